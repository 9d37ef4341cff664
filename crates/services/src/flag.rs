//! Abuse-report orchestration. Flags carry a free-form status, so the
//! service only checks that the reported post exists and otherwise passes
//! moderation vocabulary through untouched.

use std::sync::Arc;

use domains::{DomainError, Flag, FlagId, FlagRepo, PostId, PostRepo, Result, UserId};

pub struct FlagService {
    flags: Arc<dyn FlagRepo>,
    posts: Arc<dyn PostRepo>,
}

impl FlagService {
    pub fn new(flags: Arc<dyn FlagRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { flags, posts }
    }

    /// Opens a flag against an existing post.
    pub async fn open(
        &self,
        id: FlagId,
        target: PostId,
        reporter: UserId,
        reason: impl Into<String>,
    ) -> Result<Flag> {
        if self.posts.get(target).await?.is_none() {
            return Err(DomainError::NotFound("Post", target.to_string()));
        }

        let flag = Flag::new(id, target, reporter, reason);
        self.flags.insert(&flag).await?;

        tracing::info!(flag = %id, post = %target, "flag opened");
        Ok(flag)
    }

    /// Moves a flag to any status the moderation tooling uses.
    pub async fn update_status(&self, id: FlagId, status: impl Into<String>) -> Result<Flag> {
        let mut flag = self
            .flags
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Flag", id.to_string()))?;

        let status = status.into();
        flag.change_status(status.clone());
        self.flags.update(&flag).await?;

        tracing::info!(flag = %id, status = %status, "flag status changed");
        Ok(flag)
    }

    /// The moderation queue: open flags, newest first.
    pub async fn open_queue(&self) -> Result<Vec<Flag>> {
        self.flags.list_by_status(Flag::STATUS_OPEN).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{CircleId, MockFlagRepo, MockPostRepo, Post};

    #[tokio::test]
    async fn flagging_a_missing_post_fails() {
        let mut posts = MockPostRepo::new();
        posts.expect_get().returning(|_| Ok(None));
        let mut flags = MockFlagRepo::new();
        flags.expect_insert().never();

        let svc = FlagService::new(Arc::new(flags), Arc::new(posts));
        let err = svc
            .open(
                FlagId::generate(),
                PostId::generate(),
                UserId::generate(),
                "spam",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound("Post", _)));
    }

    #[tokio::test]
    async fn opened_flag_starts_open() {
        let post = Post::new(
            PostId::generate(),
            CircleId::generate(),
            UserId::generate(),
            "t",
            "b",
        );
        let target = post.id();

        let mut posts = MockPostRepo::new();
        posts.expect_get().returning(move |_| Ok(Some(post.clone())));
        let mut flags = MockFlagRepo::new();
        flags.expect_insert().once().returning(|_| Ok(()));

        let svc = FlagService::new(Arc::new(flags), Arc::new(posts));
        let flag = svc
            .open(FlagId::generate(), target, UserId::generate(), "spam")
            .await
            .unwrap();
        assert_eq!(flag.status(), Flag::STATUS_OPEN);
    }
}
