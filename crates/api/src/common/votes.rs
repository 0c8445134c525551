use db::{
    models::{Post, PostVote, StoredVote, User},
    types::{DbId, VoteValue},
};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};

use crate::error::SocialError;

/// What a vote call did, returned to the caller for optimistic UI
/// reconciliation: the actor's vote after the call and the amount the
/// post counter moved by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub new_value: i16,
    pub delta: i16,
}

/// The toggle decision, separated from any I/O. `current` is the
/// actor's resolved prior vote (`0` when none): re-requesting the same
/// direction toggles the vote off, anything else sets or flips it.
fn transition(current: i16, requested: VoteValue) -> VoteOutcome {
    let requested = requested.as_i16();
    if current == requested {
        VoteOutcome {
            new_value: 0,
            delta: -current,
        }
    } else {
        VoteOutcome {
            new_value: requested,
            delta: requested - current,
        }
    }
}

pub async fn apply_vote(
    post_id: &DbId,
    actor: &User,
    requested: VoteValue,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<VoteOutcome, SocialError> {
    let post = Post::by_id(post_id, db_pool)
        .await?
        .ok_or_else(|| SocialError::NotFound(String::from("post not found")))?;

    let current = PostVote::by_post_and_actor(&post.id, &actor.id, db_pool)
        .await?
        .map(|vote| StoredVote::from(&vote).resolved())
        .unwrap_or(0);

    let outcome = transition(current, requested);

    if outcome.new_value == 0 {
        PostVote::delete(&post.id, &actor.id, db_pool).await?;
    } else {
        PostVote::upsert(&post.id, &actor.id, requested, db_pool).await?;
    }

    // The record write above and this increment are two separate store
    // operations. The increment is atomic, so concurrent voters on the
    // same post always converge; a true double submit by the same actor
    // can still double-apply its delta (see DESIGN.md, D1).
    Post::adjust_votes_count(&post.id, outcome.delta, db_pool).await?;

    Ok(outcome)
}

/// Explicit vote removal. Unlike the toggle, removing a vote that does
/// not exist is a reported error, not a silent no-op.
pub async fn remove_vote(
    post_id: &DbId,
    actor: &User,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<VoteOutcome, SocialError> {
    let post = Post::by_id(post_id, db_pool)
        .await?
        .ok_or_else(|| SocialError::NotFound(String::from("post not found")))?;

    let vote = PostVote::by_post_and_actor(&post.id, &actor.id, db_pool)
        .await?
        .ok_or_else(|| SocialError::NotFound(String::from("not voted")))?;
    let current = StoredVote::from(&vote).resolved();

    PostVote::delete(&post.id, &actor.id, db_pool).await?;
    Post::adjust_votes_count(&post.id, -current, db_pool).await?;

    Ok(VoteOutcome {
        new_value: 0,
        delta: -current,
    })
}

#[cfg(test)]
mod tests {
    use db::models::{PostVote, StoredVote};
    use db::types::{DbId, VoteValue};

    use super::transition;

    #[test]
    fn toggle_off_on_repeat() {
        // No prior vote, then the same direction twice: the second call
        // removes the vote and undoes the first delta.
        let first = transition(0, VoteValue::Up);
        assert_eq!(first.new_value, 1);
        assert_eq!(first.delta, 1);

        let second = transition(first.new_value, VoteValue::Up);
        assert_eq!(second.new_value, 0);
        assert_eq!(second.delta, -1);
        assert_eq!(first.delta + second.delta, 0);
    }

    #[test]
    fn flip_direction() {
        // votes_count=5 walkthrough: up (+1 -> 6), up again (-1 -> 5),
        // then down (-1 -> 4).
        let mut count = 5;
        let mut current = 0;

        let outcome = transition(current, VoteValue::Up);
        count += i32::from(outcome.delta);
        current = outcome.new_value;
        assert_eq!((outcome.new_value, outcome.delta, count), (1, 1, 6));

        let outcome = transition(current, VoteValue::Up);
        count += i32::from(outcome.delta);
        current = outcome.new_value;
        assert_eq!((outcome.new_value, outcome.delta, count), (0, -1, 5));

        let outcome = transition(current, VoteValue::Down);
        count += i32::from(outcome.delta);
        assert_eq!((outcome.new_value, outcome.delta, count), (-1, -1, 4));
    }

    #[test]
    fn down_to_up_is_plus_two() {
        let outcome = transition(-1, VoteValue::Up);
        assert_eq!(outcome.new_value, 1);
        assert_eq!(outcome.delta, 2);
    }

    #[test]
    fn legacy_vote_counts_as_up() {
        let vote = PostVote {
            post_id: DbId::default(),
            actor_id: DbId::default(),
            value: None,
            published: chrono::Utc::now(),
        };
        let current = StoredVote::from(&vote).resolved();
        assert_eq!(current, 1);

        // An up-vote on a legacy row toggles it off.
        let outcome = transition(current, VoteValue::Up);
        assert_eq!(outcome.new_value, 0);
        assert_eq!(outcome.delta, -1);
    }
}
