pub mod post_repository_interface;
