use db::{
    models::{FollowerEdge, FollowingEdge, User},
    schema::users,
    types::DbId,
};
use diesel::{prelude::*, update};
use diesel_async::{
    pooled_connection::deadpool::Pool, scoped_futures::ScopedFutureExt, AsyncConnection,
    AsyncPgConnection, RunQueryDsl,
};

use crate::error::SocialError;

/// Makes `actor` follow the user with id `target_id`.
///
/// The existence checks, both mirrored edges, and both counter bumps run
/// inside one transaction: either all of it lands or none of it does, so
/// the edges can never diverge from each other or from the counters.
pub async fn follow(
    actor: &User,
    target_id: &DbId,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<(), SocialError> {
    ensure_not_self(&actor.id, target_id)?;

    let mut conn = db_pool.get().await.map_err(anyhow::Error::from)?;
    let result = conn
        .transaction::<_, SocialError, _>(|conn| {
            async move {
                ensure_participants(&actor.id, target_id, conn).await?;

                let edge = FollowerEdge::create(target_id, &actor.id, conn).await?;
                let mirror = FollowingEdge::create(&actor.id, target_id, conn).await?;

                // Counters move only when an edge actually landed, so a
                // repeated follow is idempotent rather than a double count.
                if edge || mirror {
                    adjust_counters(target_id, &actor.id, 1, conn).await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await;

    finish_transaction(result, "follow")
}

/// The structural inverse of [`follow`], with the same atomicity: both
/// edges deleted and both counters decremented, or nothing at all.
pub async fn unfollow(
    actor: &User,
    target_id: &DbId,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<(), SocialError> {
    ensure_not_self(&actor.id, target_id)?;

    let mut conn = db_pool.get().await.map_err(anyhow::Error::from)?;
    let result = conn
        .transaction::<_, SocialError, _>(|conn| {
            async move {
                ensure_participants(&actor.id, target_id, conn).await?;

                let edge = FollowerEdge::delete(target_id, &actor.id, conn).await?;
                let mirror = FollowingEdge::delete(&actor.id, target_id, conn).await?;

                // No clamp at zero: if the counters already drifted from
                // the edges, the drift stays visible (see DESIGN.md, D2).
                if edge || mirror {
                    adjust_counters(target_id, &actor.id, -1, conn).await?;
                }

                Ok(())
            }
            .scope_boxed()
        })
        .await;

    finish_transaction(result, "unfollow")
}

/// Does `actor_id` follow `target_id`? One existence lookup, no
/// transaction.
pub async fn is_following(
    actor_id: &DbId,
    target_id: &DbId,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<bool, SocialError> {
    Ok(FollowingEdge::exists(actor_id, target_id, db_pool).await?)
}

fn ensure_not_self(actor_id: &DbId, target_id: &DbId) -> Result<(), SocialError> {
    if actor_id == target_id {
        return Err(SocialError::Validation(String::from(
            "cannot follow yourself",
        )));
    }
    Ok(())
}

/// Participant checks run on the transaction's own connection so that a
/// concurrent user deletion cannot slip in between the check and the
/// writes.
async fn ensure_participants(
    actor_id: &DbId,
    target_id: &DbId,
    conn: &mut AsyncPgConnection,
) -> Result<(), SocialError> {
    if !User::exists(actor_id, conn).await? {
        return Err(SocialError::NotFound(String::from("actor not found")));
    }
    if !User::exists(target_id, conn).await? {
        return Err(SocialError::NotFound(String::from("target user not found")));
    }
    Ok(())
}

async fn adjust_counters(
    target_id: &DbId,
    follower_id: &DbId,
    delta: i32,
    conn: &mut AsyncPgConnection,
) -> anyhow::Result<()> {
    update(users::table.filter(users::id.eq(target_id)))
        .set(users::followers_count.eq(users::followers_count + delta))
        .execute(conn)
        .await?;
    update(users::table.filter(users::id.eq(follower_id)))
        .set(users::following_count.eq(users::following_count + delta))
        .execute(conn)
        .await?;
    Ok(())
}

/// A store failure anywhere inside the atomic unit (including commit)
/// means the transaction rolled back; report it as an abort with zero
/// side effects. Validation and not-found pass through unchanged.
fn finish_transaction<T>(result: Result<T, SocialError>, op: &str) -> Result<T, SocialError> {
    match result {
        Err(SocialError::TransientStore(err)) => Err(SocialError::TransactionAborted(format!(
            "{op} aborted: {err}"
        ))),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use db::types::DbId;

    use super::{ensure_not_self, finish_transaction};
    use crate::error::SocialError;

    #[test]
    fn self_follow_rejected() {
        let id = DbId::default();
        let result = ensure_not_self(&id, &id);
        assert!(matches!(result, Err(SocialError::Validation(_))));

        let other = DbId::default();
        assert!(ensure_not_self(&id, &other).is_ok());
    }

    #[test]
    fn store_failure_becomes_abort() {
        let result: Result<(), SocialError> =
            Err(SocialError::TransientStore(anyhow::anyhow!("broken pipe")));
        assert!(matches!(
            finish_transaction(result, "follow"),
            Err(SocialError::TransactionAborted(_))
        ));

        // Not-found keeps its kind so the caller can report it distinctly.
        let result: Result<(), SocialError> =
            Err(SocialError::NotFound(String::from("target user not found")));
        assert!(matches!(
            finish_transaction(result, "follow"),
            Err(SocialError::NotFound(_))
        ));
    }
}
