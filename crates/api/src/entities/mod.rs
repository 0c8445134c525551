pub mod account;
pub mod comment;
pub mod relationship;
pub mod status;

pub use account::Account;
pub use comment::UserComment;
pub use relationship::Relationship;
pub use status::Status;
pub use status::VoteReceipt;
