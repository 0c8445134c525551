use chrono::{DateTime, Utc};
use diesel::{delete, insert_into, prelude::*, result::Error::NotFound};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection, RunQueryDsl};

use crate::{
    schema::post_votes,
    types::{DbId, VoteValue},
};

/// One row per (post, actor). Existence means the actor has an active
/// vote; `value` is NULL on rows that predate the value column.
#[derive(Queryable, Insertable, AsChangeset, Selectable, Debug, PartialEq, Clone, Eq)]
#[diesel(table_name = post_votes)]
pub struct PostVote {
    pub post_id: DbId,
    pub actor_id: DbId,
    pub value: Option<i16>,
    pub published: DateTime<Utc>,
}

/// Migration-aware view of a stored vote. Pre-schema rows have no value
/// column and count as an up-vote; the resolution lives here and nowhere
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredVote {
    Legacy,
    Valued(VoteValue),
}

impl StoredVote {
    pub fn resolved(self) -> i16 {
        match self {
            Self::Legacy => 1,
            Self::Valued(value) => value.as_i16(),
        }
    }
}

impl From<&PostVote> for StoredVote {
    fn from(vote: &PostVote) -> Self {
        match vote.value.and_then(VoteValue::from_i16) {
            Some(value) => Self::Valued(value),
            None => Self::Legacy,
        }
    }
}

impl PostVote {
    pub async fn by_post_and_actor(
        post_id: &DbId,
        actor_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<Option<Self>> {
        let vote = post_votes::table
            .filter(post_votes::post_id.eq(post_id))
            .filter(post_votes::actor_id.eq(actor_id))
            .first::<Self>(&mut db_pool.get().await?)
            .await;
        match vote {
            Ok(vote) => Ok(Some(vote)),
            Err(NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// First vote or direction flip; one upsert either way.
    pub async fn upsert(
        post_id: &DbId,
        actor_id: &DbId,
        value: VoteValue,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<()> {
        insert_into(post_votes::table)
            .values(vec![PostVote {
                post_id: post_id.clone(),
                actor_id: actor_id.clone(),
                value: Some(value.as_i16()),
                published: Utc::now(),
            }])
            .on_conflict((post_votes::post_id, post_votes::actor_id))
            .do_update()
            .set(post_votes::value.eq(Some(value.as_i16())))
            .execute(&mut db_pool.get().await?)
            .await?;
        Ok(())
    }

    pub async fn delete(
        post_id: &DbId,
        actor_id: &DbId,
        db_pool: &Pool<AsyncPgConnection>,
    ) -> anyhow::Result<bool> {
        let rows_affected = delete(
            post_votes::table
                .filter(post_votes::post_id.eq(post_id))
                .filter(post_votes::actor_id.eq(actor_id)),
        )
        .execute(&mut db_pool.get().await?)
        .await
        .optional()?;

        Ok(rows_affected == Some(1))
    }
}
