//! circlet/crates/domains/src/lib.rs
//!
//! The central domain logic and port definitions for Circlet: typed
//! identifiers, shared entity behaviors, the content-status state machine,
//! the seven entities with their invariants, and the persistence traits
//! adapters implement.

pub mod behavior;
pub mod error;
pub mod id;
pub mod models;
pub mod ports;
pub mod role;
pub mod status;

// Re-exporting for easier access in other crates
pub use behavior::{Archivable, Timestamped, Timestamps};
pub use error::{DomainError, Result};
pub use id::{AiSummaryId, CircleId, CommentId, FlagId, PostId, UserId, VoteId};
pub use models::*;
pub use ports::*;
pub use role::Role;
pub use status::ContentStatus;
