//! Application layer for reposervice.
//!
//! This layer contains:
//! - **Services**: `CrudRepository`, `CrudService` and `GenerateService`
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; scope resolution,
//! query evaluation and stub rendering live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CrudRepository, CrudService, GenerateService, MainRepository, MainService};

// Re-export port traits (for adapter implementation)
pub use ports::{Console, Filesystem, Storage, StubStore};

pub use error::ApplicationError;
