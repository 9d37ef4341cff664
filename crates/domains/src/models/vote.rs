//! A single user's up/down vote on a post. The entity validates the value;
//! uniqueness of the (target, user) pair is a storage-level index enforced
//! by the persistence adapter, not checked here.

use serde::{Deserialize, Serialize};

use crate::behavior::{impl_timestamped, Timestamps};
use crate::error::{DomainError, Result};
use crate::id::{PostId, UserId, VoteId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    id: VoteId,
    target: PostId,
    user: UserId,
    value: i8,
    #[serde(flatten)]
    timestamps: Timestamps,
}

impl Vote {
    /// Fails with a validation error for any value other than +1 or -1.
    pub fn new(id: VoteId, target: PostId, user: UserId, value: i8) -> Result<Self> {
        Self::validate_value(value)?;
        Ok(Self {
            id,
            target,
            user,
            value,
            timestamps: Timestamps::stamped(),
        })
    }

    pub fn id(&self) -> VoteId {
        self.id
    }

    pub fn target(&self) -> PostId {
        self.target
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn value(&self) -> i8 {
        self.value
    }

    /// Replaces the value, rejecting anything outside +1/-1 and leaving the
    /// prior value (and timestamps) untouched on failure.
    pub fn change_value(&mut self, value: i8) -> Result<()> {
        Self::validate_value(value)?;
        self.value = value;
        self.timestamps.touch_updated_at();
        Ok(())
    }

    fn validate_value(value: i8) -> Result<()> {
        if value != 1 && value != -1 {
            return Err(DomainError::Validation(format!(
                "vote value must be 1 or -1, got {value}"
            )));
        }
        Ok(())
    }
}

impl_timestamped!(Vote);
