pub mod generation;
pub mod model;
pub mod query;
pub mod registry;
pub mod scope;
pub mod stub;

pub use crate::domain::DomainError;
pub use generation::{GenerationPlan, GenerationReport, GeneratorConfig};
pub use model::{Model, Row};
pub use query::{Query, Page};
pub use registry::{LoaderRegistry, ScopeRegistry};
pub use scope::Scopes;
pub use stub::{Stub, StubKind};
