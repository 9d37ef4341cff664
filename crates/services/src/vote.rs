//! Vote orchestration. The post's score is maintained delta-based: a new
//! vote applies its value, a changed vote applies `new − old`, a retracted
//! vote applies `−last`. The score is never re-summed from the vote
//! collection.

use std::sync::Arc;

use domains::{DomainError, Post, PostId, PostRepo, Result, UserId, Vote, VoteId, VoteRepo};

pub struct VoteService {
    votes: Arc<dyn VoteRepo>,
    posts: Arc<dyn PostRepo>,
}

impl VoteService {
    pub fn new(votes: Arc<dyn VoteRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { votes, posts }
    }

    /// Casts or re-casts a user's vote on a post.
    ///
    /// Upsert semantics: no prior vote inserts a new record and applies its
    /// value; a prior vote with a different value is flipped and the delta
    /// applied; a prior vote with the same value is left untouched. `id` is
    /// only consumed on the insert path.
    pub async fn cast(
        &self,
        id: VoteId,
        target: PostId,
        user: UserId,
        value: i8,
    ) -> Result<Vote> {
        let mut post = self.load_post(target).await?;

        match self.votes.find_by_target_and_user(target, user).await? {
            Some(existing) if existing.value() == value => {
                tracing::debug!(vote = %existing.id(), "vote unchanged");
                Ok(existing)
            }
            Some(mut existing) => {
                let old = existing.value();
                existing.change_value(value)?;
                self.votes.update(&existing).await?;

                post.change_vote_score(i64::from(value) - i64::from(old));
                self.posts.update(&post).await?;

                tracing::info!(vote = %existing.id(), post = %target, value, "vote changed");
                Ok(existing)
            }
            None => {
                let vote = Vote::new(id, target, user, value)?;
                // A concurrent cast by the same user loses here with a
                // Conflict from the unique (target, user) index.
                self.votes.insert(&vote).await?;

                post.change_vote_score(i64::from(value));
                self.posts.update(&post).await?;

                tracing::info!(vote = %id, post = %target, value, "vote cast");
                Ok(vote)
            }
        }
    }

    /// Removes a user's vote, subtracting its last value from the score.
    /// Retracting a vote that does not exist is a no-op.
    pub async fn retract(&self, target: PostId, user: UserId) -> Result<()> {
        let Some(vote) = self.votes.find_by_target_and_user(target, user).await? else {
            tracing::debug!(post = %target, "no vote to retract");
            return Ok(());
        };

        let mut post = self.load_post(target).await?;
        self.votes.delete(vote.id()).await?;

        post.change_vote_score(-i64::from(vote.value()));
        self.posts.update(&post).await?;

        tracing::info!(vote = %vote.id(), post = %target, "vote retracted");
        Ok(())
    }

    async fn load_post(&self, id: PostId) -> Result<Post> {
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post", id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{CircleId, MockPostRepo, MockVoteRepo};
    use std::sync::Mutex;

    struct Harness {
        svc: VoteService,
        post_state: Arc<Mutex<Post>>,
        vote_state: Arc<Mutex<Option<Vote>>>,
    }

    /// Stateful mocks: the vote and post read back whatever was last
    /// written, so a sequence of casts behaves like a real store.
    fn harness(initial_vote: Option<Vote>) -> Harness {
        let post = Post::new(
            PostId::generate(),
            CircleId::generate(),
            UserId::generate(),
            "t",
            "b",
        );
        let post_state = Arc::new(Mutex::new(post));
        let vote_state = Arc::new(Mutex::new(initial_vote));

        let mut posts = MockPostRepo::new();
        {
            let state = post_state.clone();
            posts
                .expect_get()
                .returning(move |_| Ok(Some(state.lock().unwrap().clone())));
        }
        {
            let state = post_state.clone();
            posts.expect_update().returning(move |p| {
                *state.lock().unwrap() = p.clone();
                Ok(())
            });
        }

        let mut votes = MockVoteRepo::new();
        {
            let state = vote_state.clone();
            votes
                .expect_find_by_target_and_user()
                .returning(move |_, _| Ok(state.lock().unwrap().clone()));
        }
        {
            let state = vote_state.clone();
            votes.expect_insert().returning(move |v| {
                *state.lock().unwrap() = Some(v.clone());
                Ok(())
            });
        }
        {
            let state = vote_state.clone();
            votes.expect_update().returning(move |v| {
                *state.lock().unwrap() = Some(v.clone());
                Ok(())
            });
        }
        {
            let state = vote_state.clone();
            votes.expect_delete().returning(move |_| {
                *state.lock().unwrap() = None;
                Ok(())
            });
        }

        Harness {
            svc: VoteService::new(Arc::new(votes), Arc::new(posts)),
            post_state,
            vote_state,
        }
    }

    fn target_of(h: &Harness) -> PostId {
        h.post_state.lock().unwrap().id()
    }

    #[tokio::test]
    async fn flip_applies_delta_not_resum() {
        let h = harness(None);
        let target = target_of(&h);
        let user = UserId::generate();

        h.svc.cast(VoteId::generate(), target, user, 1).await.unwrap();
        assert_eq!(h.post_state.lock().unwrap().vote_score(), 1);

        h.svc.cast(VoteId::generate(), target, user, -1).await.unwrap();
        // +1 flipped to -1 lands at -1 (delta -2), not -2.
        assert_eq!(h.post_state.lock().unwrap().vote_score(), -1);
    }

    #[tokio::test]
    async fn same_value_cast_is_a_no_op() {
        let h = harness(None);
        let target = target_of(&h);
        let user = UserId::generate();

        h.svc.cast(VoteId::generate(), target, user, 1).await.unwrap();
        h.svc.cast(VoteId::generate(), target, user, 1).await.unwrap();
        assert_eq!(h.post_state.lock().unwrap().vote_score(), 1);
    }

    #[tokio::test]
    async fn invalid_value_leaves_everything_untouched() {
        let h = harness(None);
        let target = target_of(&h);

        let err = h
            .svc
            .cast(VoteId::generate(), target, UserId::generate(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(h.post_state.lock().unwrap().vote_score(), 0);
        assert!(h.vote_state.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn retract_subtracts_last_value() {
        let h = harness(None);
        let target = target_of(&h);
        let user = UserId::generate();

        h.svc.cast(VoteId::generate(), target, user, -1).await.unwrap();
        h.svc.retract(target, user).await.unwrap();

        assert_eq!(h.post_state.lock().unwrap().vote_score(), 0);
        assert!(h.vote_state.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn retract_without_vote_is_a_no_op() {
        let h = harness(None);
        let target = target_of(&h);

        h.svc.retract(target, UserId::generate()).await.unwrap();
        assert_eq!(h.post_state.lock().unwrap().vote_score(), 0);
    }
}
