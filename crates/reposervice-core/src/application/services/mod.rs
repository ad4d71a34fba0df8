//! Application services - orchestrate use cases.
//!
//! - `repository`: the generic CRUD repository and its contract
//! - `service`: the generic service over a repository
//! - `generate_service`: the repository/service generator

pub mod generate_service;
pub mod repository;
pub mod service;

pub use generate_service::GenerateService;
pub use repository::{CrudRepository, MainRepository};
pub use service::{CrudService, MainService};
