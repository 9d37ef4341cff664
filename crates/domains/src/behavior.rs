//! # Shared Entity Behaviors
//!
//! Timestamping and reversible archival are composed into each entity as a
//! small embedded value plus a capability trait, rather than inherited.
//! Code that needs "any archivable thing" depends on [`Archivable`] alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation/update stamps embedded in every entity.
///
/// Both fields start unset so that rehydration from storage can restore
/// whatever was persisted; constructors stamp them immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Timestamps {
    /// Stamps both fields with the same instant, as every constructor does.
    pub(crate) fn stamped() -> Self {
        let mut ts = Self::default();
        ts.ensure_created_at();
        ts.updated_at = ts.created_at;
        ts
    }

    /// First call wins; later calls leave the creation stamp alone.
    pub(crate) fn ensure_created_at(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now());
        }
    }

    /// Unconditionally refreshes the update stamp.
    ///
    /// Mutating operations call this as their last step, after validation;
    /// a rejected mutation must leave the stamp alone.
    pub(crate) fn touch_updated_at(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Read access to the creation/update stamps.
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
}

/// Reversible soft-delete marker.
///
/// Archiving never cascades to related entities and never touches the
/// update stamp; it only sets the marker. Re-archiving overwrites the
/// marker timestamp and the entity simply stays archived.
pub trait Archivable {
    /// Sets the marker to `at`, or to now when omitted.
    fn archive(&mut self, at: Option<DateTime<Utc>>);

    /// Clears the marker unconditionally.
    fn unarchive(&mut self);

    fn archived_at(&self) -> Option<DateTime<Utc>>;

    fn is_archived(&self) -> bool {
        self.archived_at().is_some()
    }
}

/// Implements [`Timestamped`] for an entity embedding a `timestamps` field.
macro_rules! impl_timestamped {
    ($entity:ty) => {
        impl $crate::behavior::Timestamped for $entity {
            fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.timestamps.created_at
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.timestamps.updated_at
            }
        }
    };
}

/// Implements [`Archivable`] for an entity carrying an `archived_at` field.
macro_rules! impl_archivable {
    ($entity:ty) => {
        impl $crate::behavior::Archivable for $entity {
            fn archive(&mut self, at: Option<chrono::DateTime<chrono::Utc>>) {
                self.archived_at = Some(at.unwrap_or_else(chrono::Utc::now));
            }

            fn unarchive(&mut self) {
                self.archived_at = None;
            }

            fn archived_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.archived_at
            }
        }
    };
}

pub(crate) use impl_archivable;
pub(crate) use impl_timestamped;
