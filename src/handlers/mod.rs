pub mod bookmark_handlers;
pub mod health_handlers;
pub mod json_body;
