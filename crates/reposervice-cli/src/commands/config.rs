//! `reposervice config` — inspect or create the configuration file.

use std::{fs, path::Path};

use tracing::info;

use crate::{
    cli::{ConfigCommands, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    explicit: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.print(&serialise(&config)?)?;
            }
        }

        ConfigCommands::Path => {
            let path = explicit.map(Path::to_path_buf).or_else(AppConfig::discover);
            match path {
                Some(path) => output.print(&path.display().to_string())?,
                None => output.info("No configuration file found, using defaults")?,
            }
        }

        ConfigCommands::Init { global, force } => {
            let path = AppConfig::init_path(explicit, global);
            write_default(&path, force)?;
            info!(path = %path.display(), "Configuration written");
            output.success(&format!("Configuration written to {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn serialise(config: &AppConfig) -> CliResult<String> {
    config.to_toml().map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn write_default(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serialise(&AppConfig::default())?)?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reposervice.toml");
        fs::write(&path, "# mine").unwrap();

        assert!(matches!(
            write_default(&path, false),
            Err(CliError::ConfigExists { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");

        write_default(&path, true).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[paths]"));
    }

    #[test]
    fn init_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/config.toml");
        write_default(&path, false).unwrap();
        assert!(path.is_file());
    }
}
