use db::{models::User, types::DbId};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};
use serde::Serialize;

use crate::{common::follows, error::SocialError};

#[derive(Serialize, Debug)]
pub struct Relationship {
    pub id: String,
    pub following: bool,
    pub followed_by: bool,
}

impl Relationship {
    pub async fn build(
        by: &User,
        to: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> Result<Self, SocialError> {
        Ok(Self {
            id: to.to_string(),
            following: follows::is_following(&by.id, to, db_pool).await?,
            followed_by: follows::is_following(to, &by.id, db_pool).await?,
        })
    }
}
