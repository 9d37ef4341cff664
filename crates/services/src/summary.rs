//! Summary-cache orchestration. Lookup goes through the expiry-aware port
//! method, so an expired summary reads as a cache miss and callers request
//! regeneration; storing a summary also links it onto its post.

use std::sync::Arc;

use domains::{AiSummary, AiSummaryRepo, DomainError, PostId, PostRepo, Result};

pub struct SummaryService {
    summaries: Arc<dyn AiSummaryRepo>,
    posts: Arc<dyn PostRepo>,
}

impl SummaryService {
    pub fn new(summaries: Arc<dyn AiSummaryRepo>, posts: Arc<dyn PostRepo>) -> Self {
        Self { summaries, posts }
    }

    /// The cache read: `None` means absent *or* expired; either way the
    /// caller should regenerate.
    pub async fn lookup(&self, target: PostId) -> Result<Option<AiSummary>> {
        self.summaries.find_by_target(target).await
    }

    /// Stores a freshly generated summary and links it onto the post.
    pub async fn store(&self, summary: AiSummary) -> Result<()> {
        let mut post = self
            .posts
            .get(summary.target())
            .await?
            .ok_or_else(|| DomainError::NotFound("Post", summary.target().to_string()))?;

        self.summaries.insert(&summary).await?;

        post.set_ai_summary(Some(summary.id()));
        self.posts.update(&post).await?;

        tracing::info!(
            summary = %summary.id(),
            post = %summary.target(),
            model = summary.model(),
            "summary cached"
        );
        Ok(())
    }
}
