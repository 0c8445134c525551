use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{schema::comments, types::DbId};

#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub in_reply: Option<DbId>,
    pub published: DateTime<Utc>,
}

impl Comment {
    pub async fn create(
        post_id: &DbId,
        author_id: &DbId,
        content: String,
        in_reply: Option<DbId>,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Self> {
        let comment = Comment {
            id: DbId::default(),
            post_id: post_id.clone(),
            author_id: author_id.clone(),
            content,
            in_reply,
            published: Utc::now(),
        };

        insert_into(comments::table)
            .values(vec![comment.clone()])
            .execute(&mut db_pool.get().await?)
            .await?;

        Ok(comment)
    }

    /// Fan-out read for the aggregation join: every comment by the author,
    /// across all posts, in whatever order the store returns them.
    pub async fn by_author(
        author_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        Ok(comments::table
            .filter(comments::author_id.eq(author_id))
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }
}
