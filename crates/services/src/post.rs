//! Post lifecycle orchestration: creation (with the circle's post counter),
//! publishing, and archival.

use std::sync::Arc;

use domains::{
    Archivable, CircleId, CircleRepo, ContentStatus, DomainError, Post, PostId, PostRepo, Result,
    UserId,
};

pub struct PostService {
    posts: Arc<dyn PostRepo>,
    circles: Arc<dyn CircleRepo>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepo>, circles: Arc<dyn CircleRepo>) -> Self {
        Self { posts, circles }
    }

    /// Creates a draft in `circle` and advances the circle's post counter
    /// by one. The exactly-once half of the counter contract lives here,
    /// not in the entities.
    pub async fn create_post(
        &self,
        id: PostId,
        circle_id: CircleId,
        author: UserId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Post> {
        let mut circle = self
            .circles
            .get(circle_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Circle", circle_id.to_string()))?;

        let post = Post::new(id, circle_id, author, title, body);
        self.posts.insert(&post).await?;

        circle.increment_post_count(1);
        self.circles.update(&circle).await?;

        tracing::info!(post = %id, circle = %circle_id, "post created");
        Ok(post)
    }

    pub async fn publish(&self, id: PostId) -> Result<Post> {
        self.transition(id, ContentStatus::Published).await
    }

    /// Archives both the lifecycle status and the soft-delete marker.
    pub async fn archive_post(&self, id: PostId) -> Result<Post> {
        let mut post = self.load(id).await?;
        let before = post.status();
        post.set_status(ContentStatus::Archived);
        post.archive(None);
        self.posts.update(&post).await?;
        if post.status() == before {
            tracing::debug!(post = %id, from = before.as_str(), "status transition ignored");
        } else {
            tracing::info!(post = %id, "post archived");
        }
        Ok(post)
    }

    async fn transition(&self, id: PostId, to: ContentStatus) -> Result<Post> {
        let mut post = self.load(id).await?;
        let before = post.status();
        post.set_status(to);
        if post.status() == before {
            // Disallowed or same-state request: deliberate silent no-op,
            // nothing to persist.
            tracing::debug!(
                post = %id,
                from = before.as_str(),
                to = to.as_str(),
                "status transition ignored"
            );
            return Ok(post);
        }
        self.posts.update(&post).await?;
        tracing::info!(post = %id, status = to.as_str(), "post status changed");
        Ok(post)
    }

    async fn load(&self, id: PostId) -> Result<Post> {
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Post", id.to_string()))
    }
}
