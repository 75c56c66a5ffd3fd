//! Bookmarks CRUD service: axum handlers over a swappable bookmark repository.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod sanitize;
pub mod services;
pub mod state;
