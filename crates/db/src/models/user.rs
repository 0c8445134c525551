use chrono::{DateTime, Utc};
use diesel::{dsl::sql, insert_into, prelude::*, result::Error::NotFound, sql_types::Bool};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    paginate,
    pagination::Pagination,
    schema::{follower_edges, following_edges, users},
    types::DbId,
};

#[derive(
    Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, PartialEq, Clone, Eq,
)]
#[diesel(table_name = users)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub followers_count: i32,
    pub following_count: i32,
    pub published: DateTime<Utc>,
}

impl User {
    pub async fn by_id(
        id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::id.eq(id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn by_name(
        name: &str,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let user = users::table
            .filter(users::name.eq(name.to_string()))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match user {
            Ok(user) => Ok(Some(user)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn create(
        name: String,
        display_name: Option<String>,
        bio: Option<String>,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Self> {
        let user = User {
            id: DbId::default(),
            name,
            display_name,
            bio,
            followers_count: 0,
            following_count: 0,
            published: Utc::now(),
        };

        insert_into(users::table)
            .values(vec![user.clone()])
            .execute(&mut db_pool.get().await?)
            .await?;

        Ok(user)
    }

    /// Existence probe used inside the follow transaction; runs on the
    /// transaction's own connection so the check cannot race the writes.
    pub async fn exists(id: &DbId, conn: &mut AsyncPgConnection) -> anyhow::Result<bool> {
        let result = users::table
            .select(sql::<Bool>("true"))
            .filter(users::id.eq(id))
            .first::<bool>(conn)
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn followers(
        &self,
        pagination: Pagination,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let query = follower_edges::table
            .filter(follower_edges::user_id.eq(&self.id))
            .inner_join(users::dsl::users.on(users::id.eq(follower_edges::follower_id)))
            .select(users::all_columns)
            .into_boxed();
        let query = paginate!(query, users::id, pagination);

        Ok(query.load::<Self>(&mut db_pool.get().await?).await?)
    }

    pub async fn following(
        &self,
        pagination: Pagination,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Vec<Self>> {
        let query = following_edges::table
            .filter(following_edges::user_id.eq(&self.id))
            .inner_join(users::dsl::users.on(users::id.eq(following_edges::target_id)))
            .select(users::all_columns)
            .into_boxed();
        let query = paginate!(query, users::id, pagination);

        Ok(query.load::<Self>(&mut db_pool.get().await?).await?)
    }
}
