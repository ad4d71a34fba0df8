//! Stubs read from a directory, falling back to the built-in set.
//!
//! The directory holds any subset of the stub files (`Repository.stub`,
//! `Service.stub`, ...). Files are read on every load so edits are picked
//! up without restarting.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use reposervice_core::{
    application::{ApplicationError, ports::StubStore},
    domain::{Stub, StubKind},
    error::RepoServiceResult,
};

use super::BuiltinStubs;

/// Directory-backed stub store.
#[derive(Debug, Clone)]
pub struct DirectoryStubs {
    root: PathBuf,
}

impl DirectoryStubs {
    /// Use `root` as the override directory. It must exist.
    pub fn new(root: impl Into<PathBuf>) -> RepoServiceResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ApplicationError::StubNotFound {
                name: root.display().to_string(),
                reason: "stub directory does not exist".into(),
            }
            .into());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stub kinds overridden by files in the directory.
    ///
    /// `.stub` files that match no known stub are reported and ignored.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn overrides(&self) -> Vec<StubKind> {
        let mut found = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            match StubKind::from_file_name(&name) {
                Some(kind) => found.push(kind),
                None if name.ends_with(".stub") => {
                    warn!(file = %name, "Unknown stub file ignored");
                }
                None => {}
            }
        }

        found.sort();
        debug!(count = found.len(), "Discovered stub overrides");
        found
    }
}

impl StubStore for DirectoryStubs {
    fn load(&self, kind: StubKind) -> RepoServiceResult<Stub> {
        let path = self.root.join(kind.file_name());
        if !path.is_file() {
            return BuiltinStubs.load(kind);
        }

        let content = fs::read_to_string(&path).map_err(|e| ApplicationError::StubNotFound {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded stub override");
        Ok(Stub::new(kind, content))
    }
}
