#![forbid(unsafe_code)]

pub mod common;
pub mod entities;
pub mod error;
pub mod routers;
