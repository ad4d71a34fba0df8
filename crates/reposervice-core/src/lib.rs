//! reposervice Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of reposervice: a
//! generic CRUD repository/service over a storage port, named query scopes,
//! and the generator that scaffolds per-model repositories and services.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        reposervice-cli (CLI)            │
//! │     (Drives GenerateService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (CrudRepository, CrudService, Generate) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Storage, Filesystem, StubStore, Console)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   reposervice-adapters (Infrastructure) │
//! │ (InMemoryStorage, LocalFilesystem, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Query, Scopes, Registries, Stub, Plan) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reposervice_core::prelude::*;
//!
//! #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
//! struct Post {
//!     #[serde(default, skip_serializing_if = "Option::is_none")]
//!     id: Option<RecordId>,
//!     title: String,
//!     published: bool,
//! }
//!
//! impl Model for Post {
//!     const TABLE: &'static str = "posts";
//!     fn id(&self) -> Option<RecordId> { self.id }
//! }
//!
//! let scopes = ScopeRegistry::<Post>::new()
//!     .scope("published", |q| q.where_eq("published", true))?;
//! let posts = CrudRepository::<Post>::new(storage).with_scopes(scopes);
//!
//! let published = posts.get(&Columns::All, &Scopes::new().bare("published")?, None)?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates and generated code should use
pub mod prelude {
    pub use crate::application::{
        CrudRepository, CrudService, MainRepository, MainService,
        ports::{Console, Filesystem, Storage, StubStore},
    };
    pub use crate::domain::{
        Attributes, Columns, Condition, Direction, DomainError, GeneratorConfig, LoaderRegistry,
        Model, Page, Query, RecordId, Row, ScopeDirective, ScopeRegistry, Scopes,
    };
    pub use crate::error::{RepoServiceError, RepoServiceResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
