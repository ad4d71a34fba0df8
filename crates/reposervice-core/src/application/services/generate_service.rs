//! Generate Service - repository/service scaffolding for one model.
//!
//! This service coordinates the generation workflow:
//! 1. Resolve the model reference into a [`GenerationPlan`]
//! 2. Make sure the model exists, offering to create it
//! 3. Render and write the repository contract, repository, service
//!    contract and service, asking before overwriting anything
//!
//! Every message goes through the [`Console`] port; the returned
//! [`GenerationReport`] says what happened to each file.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Console, Filesystem, StubStore},
    domain::{
        ArtifactOutcome, ArtifactPlan, ArtifactStatus, GenerationPlan, GenerationReport,
        GeneratorConfig, ModelReference, StubKind, unresolved_placeholders,
    },
    error::RepoServiceResult,
};

/// Repository/service generator.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    stubs: Box<dyn StubStore>,
    console: Box<dyn Console>,
    config: GeneratorConfig,
}

impl GenerateService {
    /// Create a new generator with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use reposervice_core::application::GenerateService;
    /// use reposervice_core::domain::GeneratorConfig;
    ///
    /// let service = GenerateService::new(
    ///     filesystem, // impl Filesystem
    ///     stubs,      // impl StubStore
    ///     console,    // impl Console
    ///     GeneratorConfig::default(),
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        stubs: Box<dyn StubStore>,
        console: Box<dyn Console>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            filesystem,
            stubs,
            console,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve names, paths and replacements without touching anything.
    pub fn plan(&self, model: &str) -> RepoServiceResult<GenerationPlan> {
        let reference = ModelReference::parse(model)?;
        Ok(GenerationPlan::new(reference, &self.config)?)
    }

    /// Generate the four artifacts for `model` below `base`.
    ///
    /// A missing model whose creation is declined is not an error: the
    /// report comes back with `aborted` set and nothing written.
    #[instrument(skip(self, base), fields(base = %base.display()))]
    pub fn generate(&self, model: &str, base: &Path) -> RepoServiceResult<GenerationReport> {
        let plan = self.plan(model)?;
        let model_path = base.join(&plan.model.path);
        let mut report = GenerationReport::new(
            plan.model.reference.to_string(),
            model_path.display().to_string(),
        );

        if !self.filesystem.exists(&model_path) {
            if !self.create_model(&plan, &model_path)? {
                report.aborted = true;
                info!("Model missing and not created, nothing generated");
                return Ok(report);
            }
            report.model_created = true;
        }

        for artifact in &plan.artifacts {
            let outcome = self.write_artifact(artifact, base)?;
            report.artifacts.push(outcome);
        }

        info!(
            created = report.count(ArtifactStatus::Created),
            overwritten = report.count(ArtifactStatus::Overwritten),
            skipped = report.count(ArtifactStatus::Skipped),
            "Generation completed"
        );
        Ok(report)
    }

    /// What [`generate`](Self::generate) would write, without prompting or
    /// writing. Stubs are still loaded and rendered so broken ones surface.
    #[instrument(skip(self, base), fields(base = %base.display()))]
    pub fn preview(&self, model: &str, base: &Path) -> RepoServiceResult<GenerationReport> {
        let plan = self.plan(model)?;
        let model_path = base.join(&plan.model.path);
        let mut report = GenerationReport::new(
            plan.model.reference.to_string(),
            model_path.display().to_string(),
        );

        for artifact in &plan.artifacts {
            self.render(artifact)?;
            let path = base.join(&artifact.path);
            report.artifacts.push(ArtifactOutcome {
                kind: artifact.kind,
                name: artifact.name.clone(),
                existed: self.filesystem.exists(&path),
                path: path.display().to_string(),
                status: ArtifactStatus::Planned,
            });
        }

        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Offer to create the missing model. `Ok(false)` when declined.
    fn create_model(&self, plan: &GenerationPlan, path: &Path) -> RepoServiceResult<bool> {
        let model = &plan.model.reference;

        let create = self.console.confirm(&format!(
            "Model [{model}] does not exist. Would you like to create it?"
        ))?;

        if !create {
            self.console
                .line(&format!("Model [{model}] is not being created."));
            self.console
                .error(&format!("Model [{model}] doesn't exist. Please create it!"));
            return Ok(false);
        }

        let content = self
            .stubs
            .load(StubKind::Model)?
            .render(&plan.model.replacements);
        self.ensure_parent(path)?;
        self.filesystem.write_file(path, &content)?;

        self.console
            .line(&format!("Model [{model}] has been successfully created."));
        info!(path = %path.display(), "Model created");
        Ok(true)
    }

    fn render(&self, artifact: &ArtifactPlan) -> RepoServiceResult<String> {
        let content = self
            .stubs
            .load(artifact.kind.stub())?
            .render(&artifact.replacements);

        let leftover = unresolved_placeholders(&content);
        if !leftover.is_empty() {
            warn!(
                artifact = %artifact.name,
                placeholders = ?leftover,
                "Stub has placeholders without a value"
            );
        }
        Ok(content)
    }

    fn write_artifact(
        &self,
        artifact: &ArtifactPlan,
        base: &Path,
    ) -> RepoServiceResult<ArtifactOutcome> {
        let content = self.render(artifact)?;
        let path = base.join(&artifact.path);
        let label = artifact.kind.label();
        let name = &artifact.name;

        self.ensure_parent(&path)?;

        let existed = self.filesystem.exists(&path);
        let status = if existed {
            let overwrite = self.console.confirm(&format!(
                "The {label} [{name}] already exists. Do you want to overwrite it?"
            ))?;
            if overwrite {
                ArtifactStatus::Overwritten
            } else {
                ArtifactStatus::Skipped
            }
        } else {
            ArtifactStatus::Created
        };

        if status == ArtifactStatus::Skipped {
            self.console
                .line(&format!("The {label} [{name}] will not be overwritten."));
        } else {
            self.filesystem.write_file(&path, &content)?;
            self.console
                .line(&format!("The {label} [{name}] has been created."));
        }
        debug!(path = %path.display(), ?status, "Artifact handled");

        Ok(ArtifactOutcome {
            kind: artifact.kind,
            name: name.clone(),
            path: path.display().to_string(),
            status,
            existed,
        })
    }

    fn ensure_parent(&self, path: &Path) -> RepoServiceResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.filesystem.exists(parent) => {
                self.filesystem.create_dir_all(parent)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockConsole, MockFilesystem, MockStubStore};
    use crate::domain::Stub;
    use mockall::Sequence;

    fn stubs() -> MockStubStore {
        let mut stubs = MockStubStore::new();
        stubs
            .expect_load()
            .returning(|kind| Ok(Stub::new(kind, "// %modelName%\n")));
        stubs
    }

    #[test]
    fn declined_model_creation_aborts_without_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let mut console = MockConsole::new();
        let mut seq = Sequence::new();
        console
            .expect_confirm()
            .withf(|q| q == "Model [Post] does not exist. Would you like to create it?")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        console
            .expect_line()
            .withf(|m| m == "Model [Post] is not being created.")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        console
            .expect_error()
            .withf(|m| m == "Model [Post] doesn't exist. Please create it!")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let service = GenerateService::new(
            Box::new(fs),
            Box::new(stubs()),
            Box::new(console),
            GeneratorConfig::default(),
        );
        let report = service.generate("Post", Path::new("app")).unwrap();
        assert!(report.aborted);
        assert!(report.artifacts.is_empty());
    }

    #[test]
    fn declined_overwrite_leaves_existing_files_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().never();

        let mut console = MockConsole::new();
        console
            .expect_confirm()
            .withf(|q| q.ends_with("already exists. Do you want to overwrite it?"))
            .times(4)
            .returning(|_| Ok(false));
        console
            .expect_line()
            .withf(|m| m.ends_with("will not be overwritten."))
            .times(4)
            .return_const(());

        let service = GenerateService::new(
            Box::new(fs),
            Box::new(stubs()),
            Box::new(console),
            GeneratorConfig::default(),
        );
        let report = service.generate("Post", Path::new("app")).unwrap();
        assert_eq!(report.count(ArtifactStatus::Skipped), 4);
        assert!(report.artifacts.iter().all(|a| a.existed));
    }

    #[test]
    fn invalid_model_reference_is_rejected_before_any_io() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().never();

        let service = GenerateService::new(
            Box::new(fs),
            Box::new(MockStubStore::new()),
            Box::new(MockConsole::new()),
            GeneratorConfig::default(),
        );
        assert!(service.generate("post", Path::new(".")).is_err());
    }
}
