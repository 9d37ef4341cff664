//! Comment orchestration. Every created comment bumps the post's comment
//! counter by one; archiving takes it back, clamped at zero; restoring an
//! archived comment re-adds it. Parent back-references are validated here
//! against the loaded parent record, not inside the entity.

use std::sync::Arc;

use domains::{
    Archivable, Comment, CommentId, CommentRepo, DomainError, Post, PostId, PostRepo, Result,
    UserId,
};

pub struct CommentService {
    comments: Arc<dyn CommentRepo>,
    posts: Arc<dyn PostRepo>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { comments, posts }
    }

    /// Creates a comment and increments the post's counter.
    ///
    /// A parent comment, when given, must exist and belong to the same
    /// post; a cross-post parent is a validation failure and nothing is
    /// written.
    pub async fn add_comment(
        &self,
        id: CommentId,
        post_id: PostId,
        author: UserId,
        body: impl Into<String>,
        parent: Option<CommentId>,
    ) -> Result<Comment> {
        let mut post = self.load_post(post_id).await?;

        if let Some(parent_id) = parent {
            let parent = self
                .comments
                .get(parent_id)
                .await?
                .ok_or_else(|| DomainError::NotFound("Comment", parent_id.to_string()))?;
            if parent.post() != post_id {
                return Err(DomainError::Validation(format!(
                    "parent comment {parent_id} belongs to another post"
                )));
            }
        }

        let comment = Comment::new(id, post_id, author, body, parent);
        self.comments.insert(&comment).await?;

        post.increment_comment_count(1);
        self.posts.update(&post).await?;

        tracing::info!(comment = %id, post = %post_id, "comment added");
        Ok(comment)
    }

    /// Archives a comment and decrements the post's counter, once.
    /// Re-archiving an already-archived comment is a no-op and must not
    /// decrement again.
    pub async fn archive_comment(&self, id: CommentId) -> Result<()> {
        let mut comment = self.load_comment(id).await?;
        if comment.is_archived() {
            tracing::debug!(comment = %id, "already archived");
            return Ok(());
        }
        comment.archive(None);
        self.comments.update(&comment).await?;

        let mut post = self.load_post(comment.post()).await?;
        post.decrement_comment_count(1);
        self.posts.update(&post).await?;

        tracing::info!(comment = %id, post = %comment.post(), "comment archived");
        Ok(())
    }

    /// Reverses an archival, re-counting the comment on its post.
    pub async fn restore_comment(&self, id: CommentId) -> Result<()> {
        let mut comment = self.load_comment(id).await?;
        if !comment.is_archived() {
            tracing::debug!(comment = %id, "not archived");
            return Ok(());
        }
        comment.unarchive();
        self.comments.update(&comment).await?;

        let mut post = self.load_post(comment.post()).await?;
        post.increment_comment_count(1);
        self.posts.update(&post).await?;

        tracing::info!(comment = %id, post = %comment.post(), "comment restored");
        Ok(())
    }

    async fn load_post(&self, id: PostId) -> Result<Post> {
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post", id.to_string()))
    }

    async fn load_comment(&self, id: CommentId) -> Result<Comment> {
        self.comments
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Comment", id.to_string()))
    }
}
