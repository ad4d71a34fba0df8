//! Stubs compiled into the binary.

use reposervice_core::{
    application::ports::StubStore,
    domain::{Stub, StubKind},
    error::RepoServiceResult,
};

const REPOSITORY_CONTRACT: &str = include_str!("../../stubs/RepositoryInterface.stub");
const REPOSITORY: &str = include_str!("../../stubs/Repository.stub");
const SERVICE_CONTRACT: &str = include_str!("../../stubs/ServiceInterface.stub");
const SERVICE: &str = include_str!("../../stubs/Service.stub");
const MODEL: &str = include_str!("../../stubs/Model.stub");

/// The default stub set.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStubs;

impl BuiltinStubs {
    pub fn new() -> Self {
        Self
    }

    /// Raw content of a built-in stub.
    pub fn content(kind: StubKind) -> &'static str {
        match kind {
            StubKind::RepositoryContract => REPOSITORY_CONTRACT,
            StubKind::Repository => REPOSITORY,
            StubKind::ServiceContract => SERVICE_CONTRACT,
            StubKind::Service => SERVICE,
            StubKind::Model => MODEL,
        }
    }
}

impl StubStore for BuiltinStubs {
    fn load(&self, kind: StubKind) -> RepoServiceResult<Stub> {
        Ok(Stub::new(kind, Self::content(kind)))
    }
}
