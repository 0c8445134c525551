pub mod comments;
pub mod follows;
pub mod votes;
