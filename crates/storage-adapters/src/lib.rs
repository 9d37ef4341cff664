//! circlet/crates/storage-adapters/src/lib.rs
//!
//! Persistence adapters implementing the `domains` ports. The in-memory
//! backend is the reference implementation of the index contracts and backs
//! the seed tool and integration tests.

pub mod memory;

pub use memory::{
    MemoryAiSummaryRepo, MemoryCircleRepo, MemoryCommentRepo, MemoryFlagRepo, MemoryPostRepo,
    MemoryUserRepo, MemoryVoteRepo,
};
