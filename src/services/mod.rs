pub mod bookmark_repository;
pub mod memory_repository;
