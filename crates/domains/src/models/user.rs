//! Platform account. Username and email uniqueness is a storage-level
//! index; the entity's own invariant is that construction always yields at
//! least one role.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{impl_archivable, impl_timestamped, Timestamps};
use crate::id::UserId;
use crate::role::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    roles: BTreeSet<Role>,
    display_name: Option<String>,
    bio: Option<String>,
    last_active_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    timestamps: Timestamps,
    archived_at: Option<DateTime<Utc>>,
}

impl User {
    /// Builds a user with the default `{Member}` role set.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            roles: BTreeSet::from([Role::Member]),
            display_name: None,
            bio: None,
            last_active_at: None,
            timestamps: Timestamps::stamped(),
            archived_at: None,
        }
    }

    pub fn with_roles(mut self, roles: BTreeSet<Role>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_active_at
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    pub fn change_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.timestamps.touch_updated_at();
    }

    pub fn change_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.timestamps.touch_updated_at();
    }

    pub fn change_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.timestamps.touch_updated_at();
    }

    pub fn set_roles(&mut self, roles: BTreeSet<Role>) {
        self.roles = roles;
        self.timestamps.touch_updated_at();
    }

    /// Adds a role; already-present roles leave the user untouched.
    pub fn add_role(&mut self, role: Role) {
        if self.roles.insert(role) {
            self.timestamps.touch_updated_at();
        }
    }

    /// Removes a role. Removing the last role leaves the set empty; that is
    /// permitted and up to the caller to avoid if it matters.
    pub fn remove_role(&mut self, role: Role) {
        self.roles.remove(&role);
        self.timestamps.touch_updated_at();
    }

    pub fn change_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
        self.timestamps.touch_updated_at();
    }

    pub fn change_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.timestamps.touch_updated_at();
    }

    /// Records activity at `at`, or now when omitted.
    pub fn touch_last_active_at(&mut self, at: Option<DateTime<Utc>>) {
        self.last_active_at = Some(at.unwrap_or_else(Utc::now));
        self.timestamps.touch_updated_at();
    }
}

impl_timestamped!(User);
impl_archivable!(User);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{Archivable, Timestamped};

    fn sample() -> User {
        User::new(UserId::generate(), "ada", "ada@example.net", "argon2-hash")
    }

    #[test]
    fn fresh_user_has_member_role() {
        let user = sample();
        assert_eq!(user.roles(), &BTreeSet::from([Role::Member]));
        assert!(!user.is_admin());
    }

    #[test]
    fn construction_stamps_both_timestamps() {
        let user = sample();
        assert!(user.created_at().is_some());
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn adding_existing_role_does_not_touch() {
        let mut user = sample();
        let before = user.updated_at();
        user.add_role(Role::Member);
        assert_eq!(user.updated_at(), before);
    }

    #[test]
    fn removing_last_role_leaves_empty_set() {
        let mut user = sample();
        user.remove_role(Role::Member);
        assert!(user.roles().is_empty());
    }

    #[test]
    fn archive_is_reversible() {
        let mut user = sample();
        user.archive(None);
        assert!(user.is_archived());
        user.unarchive();
        assert!(!user.is_archived());
    }

    #[test]
    fn rearchiving_keeps_archived() {
        let mut user = sample();
        user.archive(None);
        user.archive(None);
        assert!(user.is_archived());
    }
}
