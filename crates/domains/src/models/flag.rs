//! Abuse report against a post. Flag status is a free-form string with an
//! open-ended taxonomy: moderation tooling defines its own vocabulary, so
//! no state machine restricts transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{impl_archivable, impl_timestamped, Timestamps};
use crate::id::{FlagId, PostId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    id: FlagId,
    target: PostId,
    reporter: UserId,
    reason: String,
    status: String,
    #[serde(flatten)]
    timestamps: Timestamps,
    archived_at: Option<DateTime<Utc>>,
}

impl Flag {
    /// Initial status for a newly opened flag.
    pub const STATUS_OPEN: &'static str = "open";

    pub fn new(id: FlagId, target: PostId, reporter: UserId, reason: impl Into<String>) -> Self {
        Self {
            id,
            target,
            reporter,
            reason: reason.into(),
            status: Self::STATUS_OPEN.to_string(),
            timestamps: Timestamps::stamped(),
            archived_at: None,
        }
    }

    pub fn id(&self) -> FlagId {
        self.id
    }

    pub fn target(&self) -> PostId {
        self.target
    }

    pub fn reporter(&self) -> UserId {
        self.reporter
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn change_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.timestamps.touch_updated_at();
    }
}

impl_timestamped!(Flag);
impl_archivable!(Flag);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_with_open_status() {
        let flag = Flag::new(
            FlagId::generate(),
            PostId::generate(),
            UserId::generate(),
            "spam",
        );
        assert_eq!(flag.status(), Flag::STATUS_OPEN);
    }

    #[test]
    fn status_transitions_are_unrestricted() {
        let mut flag = Flag::new(
            FlagId::generate(),
            PostId::generate(),
            UserId::generate(),
            "spam",
        );
        flag.change_status("dismissed");
        flag.change_status("open");
        assert_eq!(flag.status(), "open");
    }
}
