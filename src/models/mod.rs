//! Core data models for the bookmarks service.
//!
//! Rows map to the `bookmarks` table via `sqlx::FromRow` and serialize
//! as JSON via `serde`. Request bodies are validated here before any
//! storage call is made.

pub mod bookmark;
