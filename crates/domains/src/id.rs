//! # Typed Identifiers
//!
//! Every entity kind gets its own identifier newtype over a UUID so that a
//! `PostId` can never be passed where a `CommentId` is expected, even though
//! the underlying token is the same shape. Equality, ordering, and hashing
//! all go through the canonical UUID value.
//!
//! Generation is centralized here; entities themselves never mint ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mints a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| DomainError::InvalidIdentifier(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(UserId);
entity_id!(CircleId);
entity_id!(PostId);
entity_id!(CommentId);
entity_id!(VoteId);
entity_id!(FlagId);
entity_id!(AiSummaryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_canonical_string() {
        let id = PostId::generate();
        let parsed: PostId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = "not-a-uuid".parse::<UserId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier(_)));
    }

    #[test]
    fn distinct_kinds_do_not_compare() {
        // Compile-time property: UserId and PostId are different types even
        // when built from the same token. Equality is only defined per kind.
        let raw = Uuid::new_v4();
        let user = UserId::from(raw);
        let post = PostId::from(raw);
        assert_eq!(user.as_uuid(), post.as_uuid());
    }
}
