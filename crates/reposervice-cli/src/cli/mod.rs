//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "reposervice",
    bin_name = "reposervice",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate repositories and services for your models",
    long_about = "reposervice generates a repository contract, a repository, \
                  a service contract and a service for a model, built on the \
                  generic CRUD layer of reposervice-core.",
    after_help = "EXAMPLES:\n\
        \x20 reposervice generate Post\n\
        \x20 reposervice generate Blog/Post --path ./my-app\n\
        \x20 reposervice g Post --dry-run\n\
        \x20 reposervice completions bash > /usr/share/bash-completion/completions/reposervice",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the repository and service files for a model.
    #[command(
        visible_alias = "g",
        about = "Generate repository and service for a model",
        after_help = "EXAMPLES:\n\
            \x20 reposervice generate Post\n\
            \x20 reposervice generate Blog/Post --force\n\
            \x20 reposervice generate Post --no-interaction --path ../api"
    )]
    Generate(GenerateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 reposervice completions bash > ~/.local/share/bash-completion/completions/reposervice\n\
            \x20 reposervice completions zsh  > ~/.zfunc/_reposervice\n\
            \x20 reposervice completions fish > ~/.config/fish/completions/reposervice.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect or create the configuration file.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 reposervice config show\n\
            \x20 reposervice config path\n\
            \x20 reposervice config init --force"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `reposervice generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Model reference: `Post`, `Blog/Post`, `Blog\Post` or `blog::Post`.
    #[arg(value_name = "MODEL", help = "Model to generate for")]
    pub model: String,

    /// Project base directory; configured paths are relative to it.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Project base directory"
    )]
    pub path: PathBuf,

    /// Answer yes to every question (create the model, overwrite files).
    #[arg(
        short = 'f',
        long = "force",
        conflicts_with = "no_interaction",
        help = "Create missing model and overwrite existing files without asking"
    )]
    pub force: bool,

    /// Answer no to every question.
    #[arg(
        short = 'n',
        long = "no-interaction",
        help = "Never create the model or overwrite files"
    )]
    pub no_interaction: bool,

    /// Show what would be generated without writing anything.
    #[arg(long = "dry-run", help = "Show what would be generated without writing")]
    pub dry_run: bool,

    /// Directory of stub overrides; takes precedence over the configured one.
    #[arg(long = "stubs", value_name = "DIR", help = "Stub override directory")]
    pub stubs: Option<PathBuf>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `reposervice completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `reposervice config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Print the path of the configuration file in use.
    Path,
    /// Write a configuration file with the default values.
    Init {
        /// Write to the user config directory instead of `./reposervice.toml`.
        #[arg(long = "global", help = "Create global configuration")]
        global: bool,

        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_generate_command() {
        let cli = Cli::parse_from(["reposervice", "generate", "Blog/Post", "--path", "app"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.model, "Blog/Post");
        assert_eq!(args.path, PathBuf::from("app"));
        assert!(!args.force && !args.no_interaction && !args.dry_run);
    }

    #[test]
    fn generate_alias_and_default_path() {
        let cli = Cli::parse_from(["reposervice", "g", "Post"]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected Generate command");
        };
        assert_eq!(args.path, PathBuf::from("."));
    }

    #[test]
    fn force_and_no_interaction_conflict() {
        let result =
            Cli::try_parse_from(["reposervice", "generate", "Post", "--force", "--no-interaction"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["reposervice", "--quiet", "--verbose", "config", "show"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_init_flags() {
        let cli = Cli::parse_from(["reposervice", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init {
                global: false,
                force: true
            })
        ));
    }
}
