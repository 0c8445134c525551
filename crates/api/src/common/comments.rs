use std::collections::{HashMap, HashSet};

use db::{
    models::{Comment, Post},
    types::DbId,
};
use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};

use crate::error::SocialError;

/// Upper bound on ids per bulk parent fetch, from the store's batched
/// read constraints.
pub const PARENT_FETCH_BATCH: usize = 10;

/// How much of an untitled post's body is shown as its display title.
const TITLE_PREVIEW_LEN: usize = 50;

/// Display title for a comment whose parent post no longer exists. A
/// deleted parent is an expected steady-state condition, not a fault.
pub const UNKNOWN_POST_TITLE: &str = "Unknown Post";

/// One row of the "all comments by a user" listing, joined in memory
/// with the parent post's derived title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserComment {
    pub comment: Comment,
    pub post_id: DbId,
    pub post_title: String,
}

/// Every comment by `author_id` across all posts, newest first.
///
/// The store cannot filter by author and order in one query, nor join
/// comments to posts, so this runs as two passes: the author fan-out
/// read, then a chunked bulk fetch of the referenced posts, with the
/// join and the descending sort done here in memory.
pub async fn comments_by_user(
    author_id: &DbId,
    db_pool: &Pool<AsyncPgConnection>,
) -> Result<Vec<UserComment>, SocialError> {
    let comments = Comment::by_author(author_id, db_pool).await?;

    let parent_ids: Vec<DbId> = comments
        .iter()
        .map(|comment| comment.post_id.clone())
        .collect::<HashSet<DbId>>()
        .into_iter()
        .collect();

    let mut parents: HashMap<DbId, Post> = HashMap::new();
    for chunk in parent_ids.chunks(PARENT_FETCH_BATCH) {
        for post in Post::by_ids(chunk, db_pool).await? {
            parents.insert(post.id.clone(), post);
        }
    }

    Ok(join_titles(comments, &parents))
}

fn join_titles(comments: Vec<Comment>, parents: &HashMap<DbId, Post>) -> Vec<UserComment> {
    let mut joined: Vec<UserComment> = comments
        .into_iter()
        .map(|comment| {
            let post_title = match parents.get(&comment.post_id) {
                Some(post) => display_title(post),
                None => String::from(UNKNOWN_POST_TITLE),
            };
            UserComment {
                post_id: comment.post_id.clone(),
                post_title,
                comment,
            }
        })
        .collect();

    joined.sort_by(|a, b| b.comment.published.cmp(&a.comment.published));
    joined
}

/// Explicit title if the post has one, else a body preview truncated to
/// [`TITLE_PREVIEW_LEN`] characters with an ellipsis marker.
fn display_title(post: &Post) -> String {
    if let Some(title) = &post.title {
        return title.clone();
    }

    if post.content.chars().count() > TITLE_PREVIEW_LEN {
        let preview: String = post.content.chars().take(TITLE_PREVIEW_LEN).collect();
        format!("{preview}...")
    } else {
        post.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, Utc};
    use db::{
        models::{Comment, Post},
        types::DbId,
    };

    use super::{display_title, join_titles, PARENT_FETCH_BATCH, UNKNOWN_POST_TITLE};

    fn post(title: Option<&str>, content: &str) -> Post {
        Post {
            id: DbId::default(),
            author: DbId::default(),
            title: title.map(String::from),
            content: String::from(content),
            votes_count: 0,
            published: Utc::now(),
        }
    }

    fn comment(post_id: &DbId, age: Duration) -> Comment {
        Comment {
            id: DbId::default(),
            post_id: post_id.clone(),
            author_id: DbId::default(),
            content: String::from("nice roast"),
            in_reply: None,
            published: Utc::now() - age,
        }
    }

    #[test]
    fn explicit_title_wins() {
        let post = post(Some("Single origin appreciation"), "long enough body text");
        assert_eq!(display_title(&post), "Single origin appreciation");
    }

    #[test]
    fn untitled_post_truncates_body() {
        let body = "a".repeat(80);
        let post = post(None, &body);
        let title = display_title(&post);
        assert_eq!(title, format!("{}...", "a".repeat(50)));

        // Short bodies pass through without a marker.
        let post = Post {
            content: String::from("short"),
            ..post
        };
        assert_eq!(display_title(&post), "short");
    }

    #[test]
    fn missing_parent_gets_fallback_title() {
        let orphan = DbId::default();
        let joined = join_titles(vec![comment(&orphan, Duration::zero())], &HashMap::new());
        assert_eq!(joined[0].post_title, UNKNOWN_POST_TITLE);
    }

    #[test]
    fn newest_first() {
        let parent = post(Some("Grinder setups"), "");
        let old = comment(&parent.id, Duration::hours(3));
        let newer = comment(&parent.id, Duration::hours(1));
        let newest = comment(&parent.id, Duration::minutes(2));

        let mut parents = HashMap::new();
        parents.insert(parent.id.clone(), parent);

        let joined = join_titles(vec![old.clone(), newest.clone(), newer.clone()], &parents);
        let order: Vec<&DbId> = joined.iter().map(|row| &row.comment.id).collect();
        assert_eq!(order, vec![&newest.id, &newer.id, &old.id]);
    }

    #[test]
    fn chunks_cover_every_id_once() {
        let ids: Vec<DbId> = (0..23).map(|_| DbId::default()).collect();
        let chunks: Vec<&[DbId]> = ids.chunks(PARENT_FETCH_BATCH).collect();

        assert!(chunks.iter().all(|chunk| chunk.len() <= PARENT_FETCH_BATCH));
        let total: usize = chunks.iter().map(|chunk| chunk.len()).sum();
        assert_eq!(total, ids.len());
    }
}
