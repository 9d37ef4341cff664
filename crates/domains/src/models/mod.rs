//! # Domain Entities
//!
//! The seven entities of the platform. Each composes the shared timestamp
//! and archive behaviors, holds cross-entity references by typed id, and is
//! mutated only through named operations that uphold its invariants.

mod ai_summary;
mod circle;
mod comment;
mod flag;
mod post;
mod user;
mod vote;

pub use ai_summary::AiSummary;
pub use circle::{Circle, CircleMeta};
pub use comment::Comment;
pub use flag::Flag;
pub use post::Post;
pub use user::User;
pub use vote::Vote;
