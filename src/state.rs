use crate::{sanitize::Sanitizer, services::bookmark_repository::BookmarkRepository};
use std::sync::Arc;

/// Shared state handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(
        bookmarks: Arc<dyn BookmarkRepository>,
        sanitizer: Arc<dyn Sanitizer>,
        api_token: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            bookmarks,
            sanitizer,
            api_token: api_token.into(),
        }
    }
}
