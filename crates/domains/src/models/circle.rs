//! Interest group that posts live in. The slug is unique via a storage
//! index. `meta.post_count` is a caller-maintained aggregate; the only
//! legitimate mutator is [`Circle::increment_post_count`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{impl_archivable, impl_timestamped, Timestamps};
use crate::id::{CircleId, UserId};

/// Aggregate counters stored alongside the circle document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleMeta {
    pub post_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    id: CircleId,
    slug: String,
    name: String,
    description: Option<String>,
    is_public: bool,
    owner: UserId,
    members: BTreeSet<UserId>,
    meta: CircleMeta,
    #[serde(flatten)]
    timestamps: Timestamps,
    archived_at: Option<DateTime<Utc>>,
}

impl Circle {
    /// Builds a public circle with no members beyond the owner reference.
    ///
    /// The owner is stored separately and is *not* auto-inserted into the
    /// member set.
    pub fn new(
        id: CircleId,
        slug: impl Into<String>,
        name: impl Into<String>,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            slug: slug.into(),
            name: name.into(),
            description: None,
            is_public: true,
            owner,
            members: BTreeSet::new(),
            meta: CircleMeta::default(),
            timestamps: Timestamps::stamped(),
            archived_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub fn with_members(mut self, members: BTreeSet<UserId>) -> Self {
        self.members = members;
        self
    }

    pub fn id(&self) -> CircleId {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    pub fn meta(&self) -> CircleMeta {
        self.meta
    }

    pub fn change_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.timestamps.touch_updated_at();
    }

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
        self.timestamps.touch_updated_at();
    }

    pub fn set_public(&mut self, is_public: bool) {
        self.is_public = is_public;
        self.timestamps.touch_updated_at();
    }

    /// Adds a member; an already-present member leaves the circle untouched.
    pub fn add_member(&mut self, user: UserId) {
        if self.members.insert(user) {
            self.timestamps.touch_updated_at();
        }
    }

    pub fn remove_member(&mut self, user: UserId) {
        self.members.remove(&user);
        self.timestamps.touch_updated_at();
    }

    /// Advances the post counter by a caller-chosen amount.
    ///
    /// There is deliberately no decrement: callers decide when, and
    /// whether, a removed post should be reflected here.
    pub fn increment_post_count(&mut self, by: u64) {
        self.meta.post_count += by;
        self.timestamps.touch_updated_at();
    }
}

impl_timestamped!(Circle);
impl_archivable!(Circle);
