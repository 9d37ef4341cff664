//! circlet/crates/services/src/lib.rs
//!
//! Application services orchestrating the domain entities over the
//! persistence ports. This layer owns the cross-entity counter contract:
//! every state-changing event triggers exactly one matching counter
//! adjustment, inside the same unit of work as the record change itself.
//! The entities expose the increment/decrement operations but never call
//! them on each other; these services do.

pub mod comment;
pub mod flag;
pub mod post;
pub mod summary;
pub mod vote;

pub use comment::CommentService;
pub use flag::FlagService;
pub use post::PostService;
pub use summary::SummaryService;
pub use vote::VoteService;
