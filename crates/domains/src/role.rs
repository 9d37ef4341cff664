//! # User Roles
//!
//! A closed set of roles held as a set on each user. `Ord` lets the set
//! live in a `BTreeSet` with a stable serialized order.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    Member,
    Guest,
}
