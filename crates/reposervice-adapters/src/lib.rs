//! Infrastructure adapters for reposervice.
//!
//! This crate implements the ports defined in `reposervice_core::application::ports`:
//! record storage, the filesystem, stub lookup and the console.

pub mod console;
pub mod filesystem;
pub mod storage;
pub mod stubs;

// Re-export commonly used adapters
pub use console::ScriptedConsole;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use storage::InMemoryStorage;
pub use stubs::{BuiltinStubs, DirectoryStubs};
