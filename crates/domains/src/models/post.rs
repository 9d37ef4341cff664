//! The central content entity. Carries the status state machine, two
//! caller-maintained aggregates (`comment_count`, `vote_score`), and the
//! derived `search_text` field consumed by full-text indexing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{impl_archivable, impl_timestamped, Timestamps};
use crate::id::{AiSummaryId, CircleId, PostId, UserId};
use crate::status::ContentStatus;

/// Only the leading slice of the body feeds the search index; beyond this
/// the text adds index weight without adding recall.
const SEARCH_BODY_CHARS: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    circle: CircleId,
    author: UserId,
    title: String,
    body: String,
    excerpt: Option<String>,
    /// Attachment descriptors in display order; shape is plugin-defined.
    attachments: Vec<serde_json::Value>,
    status: ContentStatus,
    comment_count: u64,
    vote_score: i64,
    ai_summary: Option<AiSummaryId>,
    search_text: String,
    #[serde(flatten)]
    timestamps: Timestamps,
    archived_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Builds a draft with zeroed counters and freshly derived search text.
    pub fn new(
        id: PostId,
        circle: CircleId,
        author: UserId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let mut post = Self {
            id,
            circle,
            author,
            title: title.into(),
            body: body.into(),
            excerpt: None,
            attachments: Vec::new(),
            status: ContentStatus::Draft,
            comment_count: 0,
            vote_score: 0,
            ai_summary: None,
            search_text: String::new(),
            timestamps: Timestamps::stamped(),
            archived_at: None,
        };
        post.recompute_search_text();
        post
    }

    pub fn with_attachments(mut self, attachments: Vec<serde_json::Value>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn circle(&self) -> CircleId {
        self.circle
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    pub fn attachments(&self) -> &[serde_json::Value] {
        &self.attachments
    }

    pub fn status(&self) -> ContentStatus {
        self.status
    }

    pub fn comment_count(&self) -> u64 {
        self.comment_count
    }

    pub fn vote_score(&self) -> i64 {
        self.vote_score
    }

    pub fn ai_summary(&self) -> Option<AiSummaryId> {
        self.ai_summary
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn change_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.timestamps.touch_updated_at();
        self.recompute_search_text();
    }

    pub fn change_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.timestamps.touch_updated_at();
        self.recompute_search_text();
    }

    pub fn set_excerpt(&mut self, excerpt: Option<String>) {
        self.excerpt = excerpt;
        self.timestamps.touch_updated_at();
    }

    pub fn add_attachment(&mut self, attachment: serde_json::Value) {
        self.attachments.push(attachment);
        self.timestamps.touch_updated_at();
    }

    /// Requests a lifecycle transition.
    ///
    /// A same-state request and a transition the machine forbids are both
    /// silent no-ops: no state change, no timestamp touch. Idempotent
    /// retries from callers therefore never fail.
    pub fn set_status(&mut self, status: ContentStatus) {
        if self.status == status {
            return;
        }
        if !self.status.can_transition(status) {
            return;
        }
        self.status = status;
        self.timestamps.touch_updated_at();
    }

    pub fn increment_comment_count(&mut self, by: u64) {
        self.comment_count += by;
        self.timestamps.touch_updated_at();
    }

    /// Clamped at zero: a decrement that outruns the increments (a missed
    /// increment upstream) must not drive the counter negative.
    pub fn decrement_comment_count(&mut self, by: u64) {
        self.comment_count = self.comment_count.saturating_sub(by);
        self.timestamps.touch_updated_at();
    }

    /// Applies a signed delta to the running vote total.
    ///
    /// The caller computes `new − old` for a changed vote and `−last` for a
    /// deleted one; the score is never re-summed from the vote records.
    pub fn change_vote_score(&mut self, delta: i64) {
        self.vote_score += delta;
        self.timestamps.touch_updated_at();
    }

    pub fn set_ai_summary(&mut self, summary: Option<AiSummaryId>) {
        self.ai_summary = summary;
        self.timestamps.touch_updated_at();
    }

    fn recompute_search_text(&mut self) {
        let lead: String = self.body.chars().take(SEARCH_BODY_CHARS).collect();
        self.search_text = format!("{}\n\n{}", self.title, lead).trim().to_string();
    }
}

impl_timestamped!(Post);
impl_archivable!(Post);
