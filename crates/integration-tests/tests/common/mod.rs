//! Shared fixtures: a fully wired in-memory stack plus entity builders.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::Arc;

use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;

use domains::{Circle, CircleId, CircleRepo, Post, User, UserId, UserRepo};
use services::{CommentService, FlagService, PostService, SummaryService, VoteService};
use storage_adapters::{
    MemoryAiSummaryRepo, MemoryCircleRepo, MemoryCommentRepo, MemoryFlagRepo, MemoryPostRepo,
    MemoryUserRepo, MemoryVoteRepo,
};

pub struct Stack {
    pub users: Arc<MemoryUserRepo>,
    pub circles: Arc<MemoryCircleRepo>,
    pub posts: Arc<MemoryPostRepo>,
    pub comments: Arc<MemoryCommentRepo>,
    pub votes: Arc<MemoryVoteRepo>,
    pub flags: Arc<MemoryFlagRepo>,
    pub summaries: Arc<MemoryAiSummaryRepo>,
    pub post_svc: PostService,
    pub comment_svc: CommentService,
    pub vote_svc: VoteService,
    pub flag_svc: FlagService,
    pub summary_svc: SummaryService,
}

pub fn stack() -> Stack {
    let users = Arc::new(MemoryUserRepo::new());
    let circles = Arc::new(MemoryCircleRepo::new());
    let posts = Arc::new(MemoryPostRepo::new());
    let comments = Arc::new(MemoryCommentRepo::new());
    let votes = Arc::new(MemoryVoteRepo::new());
    let flags = Arc::new(MemoryFlagRepo::new());
    let summaries = Arc::new(MemoryAiSummaryRepo::new());

    Stack {
        post_svc: PostService::new(posts.clone(), circles.clone()),
        comment_svc: CommentService::new(comments.clone(), posts.clone()),
        vote_svc: VoteService::new(votes.clone(), posts.clone()),
        flag_svc: FlagService::new(flags.clone(), posts.clone()),
        summary_svc: SummaryService::new(summaries.clone(), posts.clone()),
        users,
        circles,
        posts,
        comments,
        votes,
        flags,
        summaries,
    }
}

pub async fn seeded_user(stack: &Stack) -> User {
    let username: String = format!("{}_{}", Username().fake::<String>(), UserId::generate());
    let user = User::new(
        UserId::generate(),
        username.clone(),
        format!("{username}@example.net"),
        "hash",
    );
    stack.users.insert(&user).await.unwrap();
    user
}

pub async fn seeded_circle(stack: &Stack, owner: UserId) -> Circle {
    let circle = Circle::new(
        CircleId::generate(),
        format!("c-{}", CircleId::generate()),
        Sentence(2..4).fake::<String>(),
        owner,
    );
    stack.circles.insert(&circle).await.unwrap();
    circle
}

pub async fn seeded_post(stack: &Stack) -> Post {
    let author = seeded_user(stack).await;
    let circle = seeded_circle(stack, author.id()).await;
    stack
        .post_svc
        .create_post(
            domains::PostId::generate(),
            circle.id(),
            author.id(),
            Sentence(3..6).fake::<String>(),
            Paragraph(1..3).fake::<String>(),
        )
        .await
        .unwrap()
}
