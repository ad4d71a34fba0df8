pub mod contracts;
pub mod post_repository;
