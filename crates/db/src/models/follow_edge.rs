use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*, result::Error::NotFound, sql_types::Bool};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    schema::{follower_edges, following_edges},
    types::DbId,
};

/// `follower_id` follows `user_id`. Mirrored by a `FollowingEdge`; the
/// two are only ever written or deleted together, inside one transaction.
#[derive(Queryable, Insertable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = follower_edges)]
pub struct FollowerEdge {
    pub user_id: DbId,
    pub follower_id: DbId,
    pub published: DateTime<Utc>,
}

/// `user_id` follows `target_id`; the mirror of `FollowerEdge`.
#[derive(Queryable, Insertable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = following_edges)]
pub struct FollowingEdge {
    pub user_id: DbId,
    pub target_id: DbId,
    pub published: DateTime<Utc>,
}

impl FollowerEdge {
    /// Returns whether a row was actually inserted; an already-present
    /// edge is left alone so repeated follows stay conservative.
    pub async fn create(
        user_id: &DbId,
        follower_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> anyhow::Result<bool> {
        let rows_affected = insert_into(follower_edges::table)
            .values(vec![FollowerEdge {
                user_id: user_id.clone(),
                follower_id: follower_id.clone(),
                published: Utc::now(),
            }])
            .on_conflict((follower_edges::user_id, follower_edges::follower_id))
            .do_nothing()
            .execute(conn)
            .await
            .optional()?;

        Ok(rows_affected == Some(1))
    }

    pub async fn delete(
        user_id: &DbId,
        follower_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> anyhow::Result<bool> {
        let rows_affected = delete(
            follower_edges::table
                .filter(follower_edges::user_id.eq(user_id))
                .filter(follower_edges::follower_id.eq(follower_id)),
        )
        .execute(conn)
        .await
        .optional()?;

        Ok(rows_affected == Some(1))
    }
}

impl FollowingEdge {
    pub async fn create(
        user_id: &DbId,
        target_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> anyhow::Result<bool> {
        let rows_affected = insert_into(following_edges::table)
            .values(vec![FollowingEdge {
                user_id: user_id.clone(),
                target_id: target_id.clone(),
                published: Utc::now(),
            }])
            .on_conflict((following_edges::user_id, following_edges::target_id))
            .do_nothing()
            .execute(conn)
            .await
            .optional()?;

        Ok(rows_affected == Some(1))
    }

    pub async fn delete(
        user_id: &DbId,
        target_id: &DbId,
        conn: &mut AsyncPgConnection,
    ) -> anyhow::Result<bool> {
        let rows_affected = delete(
            following_edges::table
                .filter(following_edges::user_id.eq(user_id))
                .filter(following_edges::target_id.eq(target_id)),
        )
        .execute(conn)
        .await
        .optional()?;

        Ok(rows_affected == Some(1))
    }

    /// Single existence lookup; read-only, so it takes the pool rather
    /// than a transaction connection.
    pub async fn exists(
        user_id: &DbId,
        target_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let result = following_edges::table
            .select(diesel::dsl::sql::<Bool>("true"))
            .filter(following_edges::user_id.eq(user_id))
            .filter(following_edges::target_id.eq(target_id))
            .first::<bool>(&mut db_pool.get().await?)
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
