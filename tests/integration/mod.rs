//! Integration tests across stores, services and the merge.

pub mod auth_flow;
pub mod content_lifecycle;
pub mod schema_merge;
