//! # Persistence Ports
//!
//! Storage adapters must implement these traits to be wired into the
//! service layer. The index set each adapter has to honor lives here as
//! documented method contracts: unique username/email/slug, the unique
//! (target, user) vote pair, ordered listings, and expiry-aware summary
//! lookup. Violations surface as `DomainError::Conflict`.

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use crate::error::Result;
use crate::id::{AiSummaryId, CircleId, CommentId, FlagId, PostId, UserId, VoteId};
use crate::models::{AiSummary, Circle, Comment, Flag, Post, User, Vote};
use crate::status::ContentStatus;

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Fails with `Conflict` when the username or email is already taken.
    async fn insert(&self, user: &User) -> Result<()>;

    /// Fails with `Conflict` when a rename collides with another user.
    async fn update(&self, user: &User) -> Result<()>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Users ordered by most recent activity, `last_active_at` descending.
    async fn list_recently_active(&self, limit: i64) -> Result<Vec<User>>;
}

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait CircleRepo: Send + Sync {
    async fn get(&self, id: CircleId) -> Result<Option<Circle>>;

    /// Fails with `Conflict` when the slug is already taken.
    async fn insert(&self, circle: &Circle) -> Result<()>;

    async fn update(&self, circle: &Circle) -> Result<()>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Circle>>;
}

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn get(&self, id: PostId) -> Result<Option<Post>>;

    async fn insert(&self, post: &Post) -> Result<()>;

    async fn update(&self, post: &Post) -> Result<()>;

    /// Posts in a circle, newest first.
    async fn list_by_circle(&self, circle: CircleId, limit: i64, offset: i64)
        -> Result<Vec<Post>>;

    async fn list_by_author(&self, author: UserId) -> Result<Vec<Post>>;

    async fn list_by_status(&self, status: ContentStatus) -> Result<Vec<Post>>;

    /// Full-text lookup over the derived `search_text` field.
    async fn search(&self, query: &str) -> Result<Vec<Post>>;
}

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn get(&self, id: CommentId) -> Result<Option<Comment>>;

    async fn insert(&self, comment: &Comment) -> Result<()>;

    async fn update(&self, comment: &Comment) -> Result<()>;

    /// Comments on a post in thread order, oldest first.
    async fn list_by_post(&self, post: PostId) -> Result<Vec<Comment>>;
}

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait VoteRepo: Send + Sync {
    async fn get(&self, id: VoteId) -> Result<Option<Vote>>;

    /// Fails with `Conflict` when a vote by the same user on the same
    /// target already exists. Two concurrent casts by one user must resolve
    /// to at most one stored record; this is the adapter's constraint to
    /// keep, not the entity's.
    async fn insert(&self, vote: &Vote) -> Result<()>;

    async fn update(&self, vote: &Vote) -> Result<()>;

    /// Removing an absent vote is a no-op.
    async fn delete(&self, id: VoteId) -> Result<()>;

    async fn find_by_target_and_user(&self, target: PostId, user: UserId)
        -> Result<Option<Vote>>;

    async fn list_by_target(&self, target: PostId) -> Result<Vec<Vote>>;
}

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait FlagRepo: Send + Sync {
    async fn get(&self, id: FlagId) -> Result<Option<Flag>>;

    async fn insert(&self, flag: &Flag) -> Result<()>;

    async fn update(&self, flag: &Flag) -> Result<()>;

    /// Flags with the given status, newest first (the moderation queue).
    async fn list_by_status(&self, status: &str) -> Result<Vec<Flag>>;
}

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait AiSummaryRepo: Send + Sync {
    async fn get(&self, id: AiSummaryId) -> Result<Option<AiSummary>>;

    async fn insert(&self, summary: &AiSummary) -> Result<()>;

    async fn update(&self, summary: &AiSummary) -> Result<()>;

    /// The cache lookup: an expired summary is reported as absent, exactly
    /// like a TTL index would have removed it. The record itself remains
    /// retrievable by id.
    async fn find_by_target(&self, target: PostId) -> Result<Option<AiSummary>>;
}
