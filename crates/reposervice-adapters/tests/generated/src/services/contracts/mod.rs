pub mod post_service_interface;
