use chrono::{DateTime, Utc};
use diesel::{insert_into, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{schema::posts, types::DbId};

#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: DbId,
    pub author: DbId,
    pub title: Option<String>,
    pub content: String,
    pub votes_count: i32,
    pub published: DateTime<Utc>,
}

impl Post {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> Result<Option<Self>, anyhow::Error> {
        let post = posts::table
            .filter(posts::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match post {
            Ok(post) => Ok(Some(post)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Batched lookup for the comment aggregation join. Callers chunk the
    /// id set before calling; the store sees one `ANY(...)` per chunk.
    pub async fn by_ids(
        ids: &[DbId],
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        Ok(posts::table
            .filter(posts::id.eq_any(ids))
            .load::<Self>(&mut db_pool.get().await?)
            .await?)
    }

    pub async fn create(
        author: &DbId,
        title: Option<String>,
        content: String,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Self> {
        let post = Post {
            id: DbId::default(),
            author: author.clone(),
            title,
            content,
            votes_count: 0,
            published: Utc::now(),
        };

        insert_into(posts::table)
            .values(vec![post.clone()])
            .execute(&mut db_pool.get().await?)
            .await?;

        Ok(post)
    }

    /// Store-native atomic increment of the denormalized vote counter:
    /// `UPDATE posts SET votes_count = votes_count + $delta`. Never a
    /// read-modify-write in application code.
    pub async fn adjust_votes_count(
        id: &DbId,
        delta: i16,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        diesel::update(posts::table.filter(posts::id.eq(id)))
            .set(posts::votes_count.eq(posts::votes_count + i32::from(delta)))
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }
}
