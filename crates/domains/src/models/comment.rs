//! Threaded reply on a post. The optional parent is a back-reference by id;
//! whether it belongs to the same post is the caller's check, made against
//! the loaded parent record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::behavior::{impl_archivable, impl_timestamped, Timestamps};
use crate::id::{CommentId, PostId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    post: PostId,
    author: UserId,
    body: String,
    parent: Option<CommentId>,
    #[serde(flatten)]
    timestamps: Timestamps,
    archived_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn new(
        id: CommentId,
        post: PostId,
        author: UserId,
        body: impl Into<String>,
        parent: Option<CommentId>,
    ) -> Self {
        Self {
            id,
            post,
            author,
            body: body.into(),
            parent,
            timestamps: Timestamps::stamped(),
            archived_at: None,
        }
    }

    pub fn id(&self) -> CommentId {
        self.id
    }

    pub fn post(&self) -> PostId {
        self.post
    }

    pub fn author(&self) -> UserId {
        self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    pub fn edit_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.timestamps.touch_updated_at();
    }
}

impl_timestamped!(Comment);
impl_archivable!(Comment);
