//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! generator never looks configuration up itself: the `generate` command
//! converts it into a [`GeneratorConfig`] and hands that to the core.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `REPOSERVICE__PATHS__MODELS=app/models/`
//! 3. Config file: `--config`, else `./reposervice.toml`, else the user
//!    config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use reposervice_core::domain::{GeneratorConfig, MainTypes, Namespaces, Paths};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "reposervice.toml";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "REPOSERVICE";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Module paths of models, generated types and base types.
    pub namespaces: Namespaces,
    /// Output directories, relative to the project base path.
    pub paths: Paths,
    /// Base types generated code builds on.
    pub main: MainTypes,
    /// Stub overrides.
    pub stubs: StubConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubConfig {
    /// Directory whose `*.stub` files replace the built-in ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = toml::to_string(&Self::default())?;
        let mut builder =
            Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml));

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using explicit config file");
                builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
            }
            None => {
                if let Some(path) = Self::discover() {
                    debug!(path = %path.display(), "Using discovered config file");
                    builder =
                        builder.add_source(File::from(path.as_path()).format(FileFormat::Toml));
                }
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// The config file that [`load`](Self::load) would read, if any.
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::global_path().filter(|path| path.is_file())
    }

    /// Path of the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tgalfa", "reposervice")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// The file `config init` writes to.
    pub fn init_path(explicit: Option<&Path>, global: bool) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None if global => {
                Self::global_path().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
            }
            None => PathBuf::from(LOCAL_CONFIG_FILE),
        }
    }

    /// The generator's view of this configuration.
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            namespaces: self.namespaces.clone(),
            paths: self.paths.clone(),
            main: self.main.clone(),
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
