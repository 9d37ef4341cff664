//! Cached AI-generated summary of a post. Expiry is advisory metadata: the
//! predicate here is derived and read-only, and the cache layer treats an
//! expired summary as absent rather than deleting it from the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{impl_timestamped, Timestamps};
use crate::id::{AiSummaryId, PostId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSummary {
    id: AiSummaryId,
    target: PostId,
    model: String,
    prompt_hash: String,
    summary: String,
    tokens_used: u64,
    expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    timestamps: Timestamps,
}

impl AiSummary {
    pub fn new(
        id: AiSummaryId,
        target: PostId,
        model: impl Into<String>,
        prompt_hash: impl Into<String>,
        summary: impl Into<String>,
        tokens_used: u64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            target,
            model: model.into(),
            prompt_hash: prompt_hash.into(),
            summary: summary.into(),
            tokens_used,
            expires_at,
            timestamps: Timestamps::stamped(),
        }
    }

    pub fn id(&self) -> AiSummaryId {
        self.id
    }

    pub fn target(&self) -> PostId {
        self.target
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt_hash(&self) -> &str {
        &self.prompt_hash
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn tokens_used(&self) -> u64 {
        self.tokens_used
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// True iff an expiry is set and it is at or before the current time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl_timestamped!(AiSummary);
