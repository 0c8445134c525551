use chrono::{DateTime, Utc};
use db::models::User;
use serde::Serialize;

#[derive(Clone, Serialize, Debug)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub followers_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn build(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            display_name: user.display_name.unwrap_or_else(|| user.name.clone()),
            username: user.name,
            bio: user.bio.unwrap_or_default(),
            followers_count: user.followers_count,
            following_count: user.following_count,
            created_at: user.published,
        }
    }
}
