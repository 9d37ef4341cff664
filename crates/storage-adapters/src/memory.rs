//! # In-Memory Adapter
//!
//! DashMap-backed implementation of every persistence port. This is where
//! the storage-level constraints the domain core delegates outward actually
//! live: unique username/email/slug indexes, the unique (target, user) vote
//! pair, ordered listings, and the TTL analogue that makes an expired
//! summary read as absent.
//!
//! Uniqueness checks go through the index map's entry API, so the check and
//! the reservation happen under one shard lock and two concurrent inserts
//! of the same key resolve to exactly one winner.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use domains::{
    AiSummary, AiSummaryId, AiSummaryRepo, Circle, CircleId, CircleRepo, Comment, CommentId,
    CommentRepo, ContentStatus, DomainError, Flag, FlagId, FlagRepo, Post, PostId, PostRepo,
    Result, Timestamped, User, UserId, UserRepo, Vote, VoteId, VoteRepo,
};

/// Reserves `key` in a unique index for `id`.
///
/// Claiming a key already held by the same id is fine (idempotent update
/// path); held by anyone else is a conflict.
fn claim<K, I>(index: &DashMap<K, I>, key: K, id: I, what: &str) -> Result<()>
where
    K: std::hash::Hash + Eq + std::fmt::Debug,
    I: PartialEq + Copy,
{
    match index.entry(key) {
        Entry::Occupied(held) if *held.get() != id => Err(DomainError::Conflict(format!(
            "{what} {:?} already taken",
            held.key()
        ))),
        Entry::Occupied(_) => Ok(()),
        Entry::Vacant(slot) => {
            slot.insert(id);
            Ok(())
        }
    }
}

fn clamp(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryUserRepo {
    users: DashMap<UserId, User>,
    by_username: DashMap<String, UserId>,
    by_email: DashMap<String, UserId>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn get(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let id = user.id();
        if self.users.contains_key(&id) {
            return Err(DomainError::Conflict(format!("user {id} already exists")));
        }
        claim(&self.by_username, user.username().to_string(), id, "username")?;
        if let Err(err) = claim(&self.by_email, user.email().to_string(), id, "email") {
            // Roll back the username reservation made a moment ago.
            self.by_username.remove(user.username());
            return Err(err);
        }
        self.users.insert(id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let id = user.id();
        let previous = self
            .users
            .get(&id)
            .map(|u| u.value().clone())
            .ok_or_else(|| DomainError::NotFound("User", id.to_string()))?;

        claim(&self.by_username, user.username().to_string(), id, "username")?;
        if let Err(err) = claim(&self.by_email, user.email().to_string(), id, "email") {
            if previous.username() != user.username() {
                self.by_username.remove(user.username());
            }
            return Err(err);
        }
        if previous.username() != user.username() {
            self.by_username.remove(previous.username());
        }
        if previous.email() != user.email() {
            self.by_email.remove(previous.email());
        }
        self.users.insert(id, user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let Some(id) = self.by_username.get(username).map(|e| *e) else {
            return Ok(None);
        };
        self.get(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.by_email.get(email).map(|e| *e) else {
            return Ok(None);
        };
        self.get(id).await
    }

    async fn list_recently_active(&self, limit: i64) -> Result<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .iter()
            .filter(|entry| entry.last_active_at().is_some())
            .map(|entry| entry.value().clone())
            .collect();
        users.sort_by_key(|u| std::cmp::Reverse(u.last_active_at()));
        users.truncate(clamp(limit));
        Ok(users)
    }
}

// ── Circles ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryCircleRepo {
    circles: DashMap<CircleId, Circle>,
    by_slug: DashMap<String, CircleId>,
}

impl MemoryCircleRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CircleRepo for MemoryCircleRepo {
    async fn get(&self, id: CircleId) -> Result<Option<Circle>> {
        Ok(self.circles.get(&id).map(|c| c.value().clone()))
    }

    async fn insert(&self, circle: &Circle) -> Result<()> {
        let id = circle.id();
        if self.circles.contains_key(&id) {
            return Err(DomainError::Conflict(format!("circle {id} already exists")));
        }
        claim(&self.by_slug, circle.slug().to_string(), id, "slug")?;
        self.circles.insert(id, circle.clone());
        Ok(())
    }

    async fn update(&self, circle: &Circle) -> Result<()> {
        let id = circle.id();
        if !self.circles.contains_key(&id) {
            return Err(DomainError::NotFound("Circle", id.to_string()));
        }
        self.circles.insert(id, circle.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Circle>> {
        let Some(id) = self.by_slug.get(slug).map(|e| *e) else {
            return Ok(None);
        };
        self.get(id).await
    }
}

// ── Posts ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryPostRepo {
    posts: DashMap<PostId, Post>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F>(&self, keep: F) -> Vec<Post>
    where
        F: Fn(&Post) -> bool,
    {
        self.posts
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn get(&self, id: PostId) -> Result<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.value().clone()))
    }

    async fn insert(&self, post: &Post) -> Result<()> {
        let id = post.id();
        if self.posts.contains_key(&id) {
            return Err(DomainError::Conflict(format!("post {id} already exists")));
        }
        self.posts.insert(id, post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let id = post.id();
        if !self.posts.contains_key(&id) {
            return Err(DomainError::NotFound("Post", id.to_string()));
        }
        self.posts.insert(id, post.clone());
        Ok(())
    }

    async fn list_by_circle(
        &self,
        circle: CircleId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>> {
        let mut posts = self.collect(|p| p.circle() == circle);
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        Ok(posts
            .into_iter()
            .skip(clamp(offset))
            .take(clamp(limit))
            .collect())
    }

    async fn list_by_author(&self, author: UserId) -> Result<Vec<Post>> {
        let mut posts = self.collect(|p| p.author() == author);
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        Ok(posts)
    }

    async fn list_by_status(&self, status: ContentStatus) -> Result<Vec<Post>> {
        let mut posts = self.collect(|p| p.status() == status);
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        Ok(posts)
    }

    /// Case-insensitive substring match over `search_text`, the in-memory
    /// analogue of the full-text index.
    async fn search(&self, query: &str) -> Result<Vec<Post>> {
        let needle = query.to_lowercase();
        let mut posts = self.collect(|p| p.search_text().to_lowercase().contains(&needle));
        posts.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        Ok(posts)
    }
}

// ── Comments ─────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryCommentRepo {
    comments: DashMap<CommentId, Comment>,
}

impl MemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepo for MemoryCommentRepo {
    async fn get(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.value().clone()))
    }

    async fn insert(&self, comment: &Comment) -> Result<()> {
        let id = comment.id();
        if self.comments.contains_key(&id) {
            return Err(DomainError::Conflict(format!(
                "comment {id} already exists"
            )));
        }
        self.comments.insert(id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        let id = comment.id();
        if !self.comments.contains_key(&id) {
            return Err(DomainError::NotFound("Comment", id.to_string()));
        }
        self.comments.insert(id, comment.clone());
        Ok(())
    }

    async fn list_by_post(&self, post: PostId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|entry| entry.post() == post)
            .map(|entry| entry.value().clone())
            .collect();
        comments.sort_by_key(|c| c.created_at());
        Ok(comments)
    }
}

// ── Votes ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryVoteRepo {
    votes: DashMap<VoteId, Vote>,
    by_pair: DashMap<(PostId, UserId), VoteId>,
}

impl MemoryVoteRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoteRepo for MemoryVoteRepo {
    async fn get(&self, id: VoteId) -> Result<Option<Vote>> {
        Ok(self.votes.get(&id).map(|v| v.value().clone()))
    }

    async fn insert(&self, vote: &Vote) -> Result<()> {
        let id = vote.id();
        if self.votes.contains_key(&id) {
            return Err(DomainError::Conflict(format!("vote {id} already exists")));
        }
        // The unique (target, user) pair: reservation and check are one
        // guarded operation, so concurrent casts by the same user resolve
        // to at most one record.
        match self.by_pair.entry((vote.target(), vote.user())) {
            Entry::Occupied(_) => {
                return Err(DomainError::Conflict(format!(
                    "user {} already voted on post {}",
                    vote.user(),
                    vote.target()
                )))
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        self.votes.insert(id, vote.clone());
        Ok(())
    }

    async fn update(&self, vote: &Vote) -> Result<()> {
        let id = vote.id();
        if !self.votes.contains_key(&id) {
            return Err(DomainError::NotFound("Vote", id.to_string()));
        }
        self.votes.insert(id, vote.clone());
        Ok(())
    }

    async fn delete(&self, id: VoteId) -> Result<()> {
        if let Some((_, vote)) = self.votes.remove(&id) {
            self.by_pair
                .remove_if(&(vote.target(), vote.user()), |_, held| *held == id);
        }
        Ok(())
    }

    async fn find_by_target_and_user(
        &self,
        target: PostId,
        user: UserId,
    ) -> Result<Option<Vote>> {
        let Some(id) = self.by_pair.get(&(target, user)).map(|e| *e) else {
            return Ok(None);
        };
        self.get(id).await
    }

    async fn list_by_target(&self, target: PostId) -> Result<Vec<Vote>> {
        Ok(self
            .votes
            .iter()
            .filter(|entry| entry.target() == target)
            .map(|entry| entry.value().clone())
            .collect())
    }
}

// ── Flags ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryFlagRepo {
    flags: DashMap<FlagId, Flag>,
}

impl MemoryFlagRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagRepo for MemoryFlagRepo {
    async fn get(&self, id: FlagId) -> Result<Option<Flag>> {
        Ok(self.flags.get(&id).map(|f| f.value().clone()))
    }

    async fn insert(&self, flag: &Flag) -> Result<()> {
        let id = flag.id();
        if self.flags.contains_key(&id) {
            return Err(DomainError::Conflict(format!("flag {id} already exists")));
        }
        self.flags.insert(id, flag.clone());
        Ok(())
    }

    async fn update(&self, flag: &Flag) -> Result<()> {
        let id = flag.id();
        if !self.flags.contains_key(&id) {
            return Err(DomainError::NotFound("Flag", id.to_string()));
        }
        self.flags.insert(id, flag.clone());
        Ok(())
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Flag>> {
        let mut flags: Vec<Flag> = self
            .flags
            .iter()
            .filter(|entry| entry.status() == status)
            .map(|entry| entry.value().clone())
            .collect();
        flags.sort_by_key(|f| std::cmp::Reverse(f.created_at()));
        Ok(flags)
    }
}

// ── AI summaries ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryAiSummaryRepo {
    summaries: DashMap<AiSummaryId, AiSummary>,
    by_target: DashMap<PostId, AiSummaryId>,
}

impl MemoryAiSummaryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AiSummaryRepo for MemoryAiSummaryRepo {
    async fn get(&self, id: AiSummaryId) -> Result<Option<AiSummary>> {
        Ok(self.summaries.get(&id).map(|s| s.value().clone()))
    }

    async fn insert(&self, summary: &AiSummary) -> Result<()> {
        let id = summary.id();
        if self.summaries.contains_key(&id) {
            return Err(DomainError::Conflict(format!(
                "summary {id} already exists"
            )));
        }
        self.summaries.insert(id, summary.clone());
        // Latest summary per post wins the target link.
        self.by_target.insert(summary.target(), id);
        Ok(())
    }

    async fn update(&self, summary: &AiSummary) -> Result<()> {
        let id = summary.id();
        if !self.summaries.contains_key(&id) {
            return Err(DomainError::NotFound("AiSummary", id.to_string()));
        }
        self.summaries.insert(id, summary.clone());
        Ok(())
    }

    async fn find_by_target(&self, target: PostId) -> Result<Option<AiSummary>> {
        let Some(id) = self.by_target.get(&target).map(|e| *e) else {
            return Ok(None);
        };
        let Some(summary) = self.get(id).await? else {
            return Ok(None);
        };
        if summary.is_expired() {
            tracing::debug!(summary = %id, post = %target, "expired summary treated as absent");
            return Ok(None);
        }
        Ok(Some(summary))
    }
}
