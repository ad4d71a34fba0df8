//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `reposervice-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Storage`: Record persistence with transactions
//!   - `Filesystem`: File operations
//!   - `StubStore`: Stub retrieval
//!   - `Console`: Prompts and messages
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `MainRepository` / `MainService` contracts, in `services`

pub mod output;

#[cfg(test)]
pub use output::{MockConsole, MockFilesystem, MockStorage, MockStubStore};
pub use output::{Console, Filesystem, Storage, StubStore};
