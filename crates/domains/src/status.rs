//! # Content Lifecycle Status
//!
//! Draft → Published → Archived, with no way back. Serialized in the
//! SCREAMING form the stored documents use.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    /// Whether the directed transition graph permits moving to `to`.
    ///
    /// A same-state request is not a transition; callers treat it as a
    /// no-op before ever asking.
    pub fn can_transition(self, to: ContentStatus) -> bool {
        match self {
            ContentStatus::Draft => matches!(to, ContentStatus::Published | ContentStatus::Archived),
            ContentStatus::Published => to == ContentStatus::Archived,
            ContentStatus::Archived => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Draft => "DRAFT",
            ContentStatus::Published => "PUBLISHED",
            ContentStatus::Archived => "ARCHIVED",
        }
    }
}
