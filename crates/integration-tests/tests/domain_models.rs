//! Entity-level properties exercised through the public crate surface:
//! timestamp rules, archive cycles, the role set, and serialization shape.

use std::collections::BTreeSet;

use domains::{
    AiSummary, AiSummaryId, Archivable, CircleId, Post, PostId, Role, Timestamped, User, UserId,
};

fn sample_user() -> User {
    User::new(UserId::generate(), "ada", "ada@example.net", "hash")
}

#[test]
fn creation_aligns_both_timestamps() {
    let user = sample_user();
    assert_eq!(user.created_at(), user.updated_at());
}

#[test]
fn mutation_advances_updated_at_only() {
    let mut user = sample_user();
    let created = user.created_at();
    let updated = user.updated_at();
    user.change_bio(Some("polymath".into()));
    assert_eq!(user.created_at(), created);
    assert!(user.updated_at() >= updated);
}

#[test]
fn archive_cycle() {
    let mut user = sample_user();
    user.archive(None);
    user.unarchive();
    assert!(!user.is_archived());
    user.archive(None);
    assert!(user.is_archived());
    user.archive(None);
    assert!(user.is_archived());
}

#[test]
fn fresh_user_always_has_a_role() {
    let user = sample_user();
    assert!(!user.roles().is_empty());

    let admin = User::new(UserId::generate(), "gh", "gh@example.net", "hash")
        .with_roles(BTreeSet::from([Role::Admin, Role::Member]));
    assert!(admin.is_admin());
}

#[test]
fn search_text_matches_specified_shape() {
    let post = Post::new(
        PostId::generate(),
        CircleId::generate(),
        UserId::generate(),
        "Hello",
        "World",
    );
    assert_eq!(post.search_text(), "Hello\n\nWorld");
}

#[test]
fn entities_serialize_with_flat_timestamps() {
    let post = Post::new(
        PostId::generate(),
        CircleId::generate(),
        UserId::generate(),
        "Hello",
        "World",
    );
    let value = serde_json::to_value(&post).unwrap();
    assert!(value.get("created_at").is_some());
    assert!(value.get("updated_at").is_some());
    assert_eq!(value["status"], "DRAFT");

    let back: Post = serde_json::from_value(value).unwrap();
    assert_eq!(back.id(), post.id());
    assert_eq!(back.created_at(), post.created_at());
}

#[test]
fn summary_expiry_boundary() {
    let fresh = AiSummary::new(
        AiSummaryId::generate(),
        PostId::generate(),
        "gpt-4o-mini",
        "sha256:x",
        "text",
        10,
        Some(chrono::Utc::now() + chrono::Duration::hours(1)),
    );
    assert!(!fresh.is_expired());

    let stale = AiSummary::new(
        AiSummaryId::generate(),
        PostId::generate(),
        "gpt-4o-mini",
        "sha256:x",
        "text",
        10,
        Some(chrono::Utc::now()),
    );
    assert!(stale.is_expired());
}
