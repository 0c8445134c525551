pub mod comment;
pub mod follow_edge;
pub mod post;
pub mod post_vote;
pub mod user;

pub use comment::Comment;
pub use follow_edge::FollowerEdge;
pub use follow_edge::FollowingEdge;
pub use post::Post;
pub use post_vote::PostVote;
pub use post_vote::StoredVote;
pub use user::User;
