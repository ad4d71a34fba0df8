//! Generator configuration, the per-model generation plan, and the report
//! of what a run did.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::stub::{Replacements, StubKind};
use crate::domain::{
    common::{RelativePath, pluralize, to_snake_case},
    error::DomainError,
    value_objects::ModelReference,
};

// ============================================================================
// Configuration
// ============================================================================

/// Everything the generator needs to know about the target project.
///
/// Passed explicitly to the generator; there is no global lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub namespaces: Namespaces,
    pub paths: Paths,
    pub main: MainTypes,
}

/// Module paths of generated and base types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    pub models: String,
    pub repositories: String,
    pub repository_contracts: String,
    pub services: String,
    pub service_contracts: String,
    pub main: MainNamespaces,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            models: "crate::models".into(),
            repositories: "crate::repositories".into(),
            repository_contracts: "crate::repositories::contracts".into(),
            services: "crate::services".into(),
            service_contracts: "crate::services::contracts".into(),
            main: MainNamespaces::default(),
        }
    }
}

/// Modules the base types are imported from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainNamespaces {
    pub repository: String,
    pub repository_contract: String,
    pub service: String,
    pub service_contract: String,
}

impl Default for MainNamespaces {
    fn default() -> Self {
        const PRELUDE: &str = "reposervice_core::prelude";
        Self {
            repository: PRELUDE.into(),
            repository_contract: PRELUDE.into(),
            service: PRELUDE.into(),
            service_contract: PRELUDE.into(),
        }
    }
}

/// Output directories, relative to the project base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub models: String,
    pub repositories: String,
    pub repository_contracts: String,
    pub services: String,
    pub service_contracts: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            models: "src/models/".into(),
            repositories: "src/repositories/".into(),
            repository_contracts: "src/repositories/contracts/".into(),
            services: "src/services/".into(),
            service_contracts: "src/services/contracts/".into(),
        }
    }
}

/// Names of the base types generated code builds on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainTypes {
    pub repository: String,
    pub repository_contract: String,
    pub service: String,
    pub service_contract: String,
}

impl Default for MainTypes {
    fn default() -> Self {
        Self {
            repository: "CrudRepository".into(),
            repository_contract: "MainRepository".into(),
            service: "CrudService".into(),
            service_contract: "MainService".into(),
        }
    }
}

// ============================================================================
// Plan
// ============================================================================

/// The four generated artifacts, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    RepositoryContract,
    Repository,
    ServiceContract,
    Service,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        Self::RepositoryContract,
        Self::Repository,
        Self::ServiceContract,
        Self::Service,
    ];

    /// Word used in console messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::RepositoryContract | Self::ServiceContract => "contract",
            Self::Repository => "repository",
            Self::Service => "service",
        }
    }

    pub fn stub(self) -> StubKind {
        match self {
            Self::RepositoryContract => StubKind::RepositoryContract,
            Self::Repository => StubKind::Repository,
            Self::ServiceContract => StubKind::ServiceContract,
            Self::Service => StubKind::Service,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the model lives and how to create it if it doesn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPlan {
    pub reference: ModelReference,
    /// Full module path, e.g. `crate::models::blog::post`.
    pub module: String,
    pub path: RelativePath,
    pub table: String,
    pub replacements: Replacements,
}

/// One file to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPlan {
    pub kind: ArtifactKind,
    /// Type name, e.g. `PostRepositoryInterface`.
    pub name: String,
    /// Module path of the generated file.
    pub module: String,
    pub path: RelativePath,
    pub replacements: Replacements,
}

/// Resolved names, paths and replacements for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub model: ModelPlan,
    pub artifacts: Vec<ArtifactPlan>,
}

impl GenerationPlan {
    pub fn new(reference: ModelReference, config: &GeneratorConfig) -> Result<Self, DomainError> {
        let model = plan_model(reference, config)?;
        let name = model.reference.name().to_owned();

        let repository_contract = Named::new(
            format!("{name}RepositoryInterface"),
            &config.namespaces.repository_contracts,
            &config.paths.repository_contracts,
        )?;
        let repository = Named::new(
            format!("{name}Repository"),
            &config.namespaces.repositories,
            &config.paths.repositories,
        )?;
        let service_contract = Named::new(
            format!("{name}ServiceInterface"),
            &config.namespaces.service_contracts,
            &config.paths.service_contracts,
        )?;
        let service = Named::new(
            format!("{name}Service"),
            &config.namespaces.services,
            &config.paths.services,
        )?;

        let base = Replacements::new()
            .with("namespaces.model", &model.module)
            .with("modelName", &name);

        let artifacts = vec![
            repository_contract.clone().into_artifact(
                ArtifactKind::RepositoryContract,
                base.clone()
                    .with(
                        "namespaces.repositoryInterfaces",
                        &config.namespaces.repository_contracts,
                    )
                    .with(
                        "namespaces.mainRepositoryInterface",
                        &config.namespaces.main.repository_contract,
                    )
                    .with("mainRepositoryInterface", &config.main.repository_contract)
                    .with("repositoryInterface", &repository_contract.name),
            ),
            repository.clone().into_artifact(
                ArtifactKind::Repository,
                base.clone()
                    .with("namespaces.repositories", &config.namespaces.repositories)
                    .with("namespaces.repositoryInterface", &repository_contract.module)
                    .with("repositoryInterface", &repository_contract.name)
                    .with("namespaces.mainRepository", &config.namespaces.main.repository)
                    .with("mainRepository", &config.main.repository)
                    .with(
                        "namespaces.mainRepositoryInterface",
                        &config.namespaces.main.repository_contract,
                    )
                    .with("mainRepositoryInterface", &config.main.repository_contract)
                    .with("repositoryName", &repository.name),
            ),
            service_contract.clone().into_artifact(
                ArtifactKind::ServiceContract,
                base.clone()
                    .with(
                        "namespaces.serviceInterfaces",
                        &config.namespaces.service_contracts,
                    )
                    .with(
                        "namespaces.mainServiceInterface",
                        &config.namespaces.main.service_contract,
                    )
                    .with("mainServiceInterface", &config.main.service_contract)
                    .with("serviceInterface", &service_contract.name),
            ),
            service.clone().into_artifact(
                ArtifactKind::Service,
                base.with("namespaces.services", &config.namespaces.services)
                    .with("namespaces.serviceInterface", &service_contract.module)
                    .with("serviceInterface", &service_contract.name)
                    .with("namespaces.mainService", &config.namespaces.main.service)
                    .with("mainService", &config.main.service)
                    .with(
                        "namespaces.mainServiceInterface",
                        &config.namespaces.main.service_contract,
                    )
                    .with("mainServiceInterface", &config.main.service_contract)
                    .with("namespaces.repositories", &config.namespaces.repositories)
                    .with("repositoryModule", to_snake_case(&repository.name))
                    .with("repositoryName", &repository.name)
                    .with("serviceName", &service.name),
            ),
        ];

        Ok(Self { model, artifacts })
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactPlan> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

fn plan_model(reference: ModelReference, config: &GeneratorConfig) -> Result<ModelPlan, DomainError> {
    let stem = reference.file_stem();

    let mut dir = RelativePath::try_new(&config.paths.models)?;
    let mut module = config.namespaces.models.clone();
    for segment in reference.modules() {
        dir = dir.join(segment)?;
        module = format!("{module}::{segment}");
    }
    let parent = module.clone();
    let module = format!("{module}::{stem}");
    let path = dir.join(format!("{stem}.rs"))?;
    let table = pluralize(&stem);

    let replacements = Replacements::new()
        .with("namespaces.models", parent)
        .with("modelName", reference.name())
        .with("tableName", &table);

    Ok(ModelPlan {
        reference,
        module,
        path,
        table,
        replacements,
    })
}

/// A generated type: name, module and file.
#[derive(Clone)]
struct Named {
    name: String,
    module: String,
    path: RelativePath,
}

impl Named {
    fn new(name: String, namespace: &str, dir: &str) -> Result<Self, DomainError> {
        let stem = to_snake_case(&name);
        let path = RelativePath::try_new(dir)?.join(format!("{stem}.rs"))?;
        Ok(Self {
            module: format!("{namespace}::{stem}"),
            name,
            path,
        })
    }

    fn into_artifact(self, kind: ArtifactKind, replacements: Replacements) -> ArtifactPlan {
        ArtifactPlan {
            kind,
            name: self.name,
            module: self.module,
            path: self.path,
            replacements,
        }
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    Created,
    Overwritten,
    Skipped,
    /// Dry run: would have been written.
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub name: String,
    pub path: String,
    pub status: ArtifactStatus,
    /// The file was already there when the run reached it.
    pub existed: bool,
}

/// What a generation run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub model: String,
    pub model_path: String,
    pub model_created: bool,
    pub artifacts: Vec<ArtifactOutcome>,
    /// Model missing and creation declined; nothing was generated.
    pub aborted: bool,
}

impl GenerationReport {
    pub fn new(model: impl Into<String>, model_path: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            model_path: model_path.into(),
            model_created: false,
            artifacts: Vec::new(),
            aborted: false,
        }
    }

    pub fn count(&self, status: ArtifactStatus) -> usize {
        self.artifacts.iter().filter(|a| a.status == status).count()
    }
}
