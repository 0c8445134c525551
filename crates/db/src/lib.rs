#![forbid(unsafe_code)]

pub mod migrations;
pub mod models;
pub mod pagination;
pub mod schema;
pub mod types;
