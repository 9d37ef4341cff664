//! # Seed Tool
//!
//! Builds a demo community through the service layer, so every counter and
//! invariant path runs exactly as it would in production, then verifies
//! the aggregates against their source records and dumps the dataset as
//! JSON for use as a dev fixture.

use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use configs::AppConfig;
use domains::{
    AiSummary, AiSummaryId, Archivable, Circle, CircleId, CircleRepo, CommentId, CommentRepo,
    FlagId, FlagRepo, PostId, PostRepo, User, UserId, UserRepo, VoteId, VoteRepo,
};
use services::{CommentService, FlagService, PostService, SummaryService, VoteService};
use storage_adapters::{
    MemoryAiSummaryRepo, MemoryCircleRepo, MemoryCommentRepo, MemoryFlagRepo, MemoryPostRepo,
    MemoryUserRepo, MemoryVoteRepo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log.filter)?)
        .init();

    if config.seed.users < 2 || config.seed.circles == 0 {
        bail!("seed config needs at least 2 users and 1 circle");
    }

    let users: Arc<MemoryUserRepo> = Arc::new(MemoryUserRepo::new());
    let circles: Arc<MemoryCircleRepo> = Arc::new(MemoryCircleRepo::new());
    let posts: Arc<MemoryPostRepo> = Arc::new(MemoryPostRepo::new());
    let comments: Arc<MemoryCommentRepo> = Arc::new(MemoryCommentRepo::new());
    let votes: Arc<MemoryVoteRepo> = Arc::new(MemoryVoteRepo::new());
    let flags: Arc<MemoryFlagRepo> = Arc::new(MemoryFlagRepo::new());
    let summaries: Arc<MemoryAiSummaryRepo> = Arc::new(MemoryAiSummaryRepo::new());

    let post_svc = PostService::new(posts.clone(), circles.clone());
    let comment_svc = CommentService::new(comments.clone(), posts.clone());
    let vote_svc = VoteService::new(votes.clone(), posts.clone());
    let flag_svc = FlagService::new(flags.clone(), posts.clone());
    let summary_svc = SummaryService::new(summaries.clone(), posts.clone());

    // ── Users ────────────────────────────────────────────────────────────
    let mut user_ids: Vec<UserId> = Vec::new();
    for i in 0..config.seed.users {
        // Index suffix keeps generated usernames collision-free.
        let username = format!("{}_{i}", Username().fake::<String>());
        let email = format!("{username}@example.net");
        let user = User::new(UserId::generate(), username, email, "seed-password-hash")
            .with_bio(Sentence(4..9).fake::<String>());
        users.insert(&user).await?;
        user_ids.push(user.id());
    }
    tracing::info!(count = user_ids.len(), "seeded users");

    // ── Circles ──────────────────────────────────────────────────────────
    let mut circle_ids: Vec<CircleId> = Vec::new();
    for i in 0..config.seed.circles {
        let owner = user_ids[i % user_ids.len()];
        let name: String = Sentence(2..4).fake();
        let mut circle = Circle::new(
            CircleId::generate(),
            format!("circle-{i}"),
            name.trim_end_matches('.'),
            owner,
        )
        .with_description(Sentence(5..10).fake::<String>());
        for member in user_ids.iter().skip(1).take(3) {
            circle.add_member(*member);
        }
        circles.insert(&circle).await?;
        circle_ids.push(circle.id());
    }
    tracing::info!(count = circle_ids.len(), "seeded circles");

    // ── Posts, comments, votes ───────────────────────────────────────────
    let mut post_ids: Vec<PostId> = Vec::new();
    for circle_id in &circle_ids {
        for n in 0..config.seed.posts_per_circle {
            let author = user_ids[n % user_ids.len()];
            let post = post_svc
                .create_post(
                    PostId::generate(),
                    *circle_id,
                    author,
                    Sentence(3..8).fake::<String>(),
                    Paragraph(2..5).fake::<String>(),
                )
                .await?;
            // Most posts go live; every third stays a draft.
            if n % 3 != 2 {
                post_svc.publish(post.id()).await?;
            }
            post_ids.push(post.id());
        }
    }

    let mut comment_ids: Vec<CommentId> = Vec::new();
    for (p, post_id) in post_ids.iter().enumerate() {
        let mut thread_root: Option<CommentId> = None;
        for n in 0..config.seed.comments_per_post {
            let author = user_ids[(p + n) % user_ids.len()];
            let parent = if n > 0 { thread_root } else { None };
            let comment = comment_svc
                .add_comment(
                    CommentId::generate(),
                    *post_id,
                    author,
                    Sentence(5..12).fake::<String>(),
                    parent,
                )
                .await?;
            if n == 0 {
                thread_root = Some(comment.id());
            }
            comment_ids.push(comment.id());
        }
    }
    // One archived comment exercises the decrement path.
    if let Some(first) = comment_ids.first() {
        comment_svc.archive_comment(*first).await?;
    }

    for (p, post_id) in post_ids.iter().enumerate() {
        for (u, user_id) in user_ids.iter().enumerate() {
            let value: i8 = if (p + u) % 3 == 0 { -1 } else { 1 };
            vote_svc
                .cast(VoteId::generate(), *post_id, *user_id, value)
                .await?;
        }
    }
    // A changed vote and a retraction keep the delta paths honest. The
    // first user's vote on the first post seeded as -1 above, so +1 flips.
    if let (Some(post_id), Some(user_id)) = (post_ids.first(), user_ids.first()) {
        vote_svc
            .cast(VoteId::generate(), *post_id, *user_id, 1)
            .await?;
        vote_svc.retract(*post_id, user_ids[1]).await?;
    }

    // ── Flags and summaries ──────────────────────────────────────────────
    if let Some(post_id) = post_ids.first() {
        let flag = flag_svc
            .open(
                FlagId::generate(),
                *post_id,
                user_ids[user_ids.len() - 1],
                "seed: looks like spam",
            )
            .await?;
        flag_svc.update_status(flag.id(), "dismissed").await?;

        summary_svc
            .store(AiSummary::new(
                AiSummaryId::generate(),
                *post_id,
                "gpt-4o-mini",
                "sha256:seed",
                Sentence(8..16).fake::<String>(),
                96,
                Some(Utc::now() + Duration::days(7)),
            ))
            .await?;
    }
    if let Some(post_id) = post_ids.get(1) {
        // An already-expired summary: linked on the post but absent from
        // cache lookups.
        summary_svc
            .store(AiSummary::new(
                AiSummaryId::generate(),
                *post_id,
                "gpt-4o-mini",
                "sha256:seed-stale",
                Sentence(8..16).fake::<String>(),
                96,
                Some(Utc::now() - Duration::minutes(1)),
            ))
            .await?;
    }

    verify_aggregates(&post_ids, posts.as_ref(), comments.as_ref(), votes.as_ref()).await?;

    // ── Dump ─────────────────────────────────────────────────────────────
    let mut dump_posts = Vec::new();
    for id in &post_ids {
        dump_posts.push(posts.get(*id).await?.context("seeded post vanished")?);
    }
    let mut dump_circles = Vec::new();
    for id in &circle_ids {
        dump_circles.push(circles.get(*id).await?.context("seeded circle vanished")?);
    }
    let mut dump_users = Vec::new();
    for id in &user_ids {
        dump_users.push(users.get(*id).await?.context("seeded user vanished")?);
    }
    let mut dump_comments = Vec::new();
    for id in &post_ids {
        dump_comments.extend(comments.list_by_post(*id).await?);
    }
    let mut dump_votes = Vec::new();
    for id in &post_ids {
        dump_votes.extend(votes.list_by_target(*id).await?);
    }

    let dump = json!({
        "users": dump_users,
        "circles": dump_circles,
        "posts": dump_posts,
        "comments": dump_comments,
        "votes": dump_votes,
        "flags": flags.list_by_status("dismissed").await?,
    });
    let rendered = serde_json::to_string_pretty(&dump)?;

    match &config.seed.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "dataset written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Recomputes every aggregate from its source records and bails on drift;
/// the seed run doubles as an end-to-end check of the counter contract.
async fn verify_aggregates(
    post_ids: &[PostId],
    posts: &MemoryPostRepo,
    comments: &MemoryCommentRepo,
    votes: &MemoryVoteRepo,
) -> anyhow::Result<()> {
    for id in post_ids {
        let post = posts.get(*id).await?.context("seeded post vanished")?;

        let live_comments = comments
            .list_by_post(*id)
            .await?
            .iter()
            .filter(|c| !c.is_archived())
            .count() as u64;
        if post.comment_count() != live_comments {
            bail!(
                "comment_count drift on {id}: counter {} vs {} live comments",
                post.comment_count(),
                live_comments
            );
        }

        let score: i64 = votes
            .list_by_target(*id)
            .await?
            .iter()
            .map(|v| i64::from(v.value()))
            .sum();
        if post.vote_score() != score {
            bail!(
                "vote_score drift on {id}: counter {} vs {} summed",
                post.vote_score(),
                score
            );
        }
    }
    tracing::info!(posts = post_ids.len(), "aggregates verified");
    Ok(())
}
