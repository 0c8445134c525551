use chrono::{DateTime, Utc};
use db::models::Post;
use serde::Serialize;

use crate::common::votes::VoteOutcome;

#[derive(Clone, Serialize, Debug)]
pub struct Status {
    pub id: String,
    pub author_id: String,
    pub title: Option<String>,
    pub content: String,
    pub votes_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Status {
    pub fn build(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author.to_string(),
            title: post.title,
            content: post.content,
            votes_count: post.votes_count,
            created_at: post.published,
        }
    }
}

/// Echo of a vote call for optimistic UI reconciliation.
#[derive(Clone, Serialize, Debug)]
pub struct VoteReceipt {
    pub new_value: i16,
    pub delta: i16,
}

impl From<VoteOutcome> for VoteReceipt {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            new_value: outcome.new_value,
            delta: outcome.delta,
        }
    }
}
