use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::comments;

#[derive(Clone, Serialize, Debug)]
pub struct UserComment {
    pub id: String,
    pub post_id: String,
    pub post_title: String,
    pub content: String,
    pub in_reply: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserComment {
    pub fn build(row: comments::UserComment) -> Self {
        Self {
            id: row.comment.id.to_string(),
            post_id: row.post_id.to_string(),
            post_title: row.post_title,
            content: row.comment.content,
            in_reply: row.comment.in_reply.map(|id| id.to_string()),
            created_at: row.comment.published,
        }
    }
}
