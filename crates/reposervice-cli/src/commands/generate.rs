//! Implementation of the `reposervice generate` command.
//!
//! Responsibility: pick the adapters the flags ask for, run the core
//! `GenerateService`, and display the report. No business logic lives here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use reposervice_adapters::{BuiltinStubs, DirectoryStubs, LocalFilesystem};
use reposervice_core::{
    application::{GenerateService, ports::StubStore},
    domain::{ArtifactStatus, GenerationReport},
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    console::{Answers, TerminalConsole},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `reposervice generate` command.
///
/// 1. Check the base directory
/// 2. Choose the stub store (`--stubs`, then the configured directory)
/// 3. Build the console from `--force` / `--no-interaction`
/// 4. Preview (`--dry-run`) or generate
/// 5. Print a summary, or the report as JSON
#[instrument(skip_all, fields(model = %args.model))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if !args.path.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("base path '{}' is not a directory", args.path.display()),
            source: None,
        });
    }

    let stubs = stub_store(args.stubs.clone().or_else(|| config.stubs.path.clone()))?;
    let answers = answers(&args);
    debug!(?answers, dry_run = args.dry_run, "Generator configured");

    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        stubs,
        Box::new(TerminalConsole::new(output.clone(), answers)),
        config.generator(),
    );

    if args.dry_run {
        let report = service.preview(&args.model, &args.path)?;
        return print_preview(&report, &output);
    }

    let report = service.generate(&args.model, &args.path)?;
    info!(aborted = report.aborted, "Generation finished");
    print_summary(&report, &output)
}

fn answers(args: &GenerateArgs) -> Answers {
    if args.force {
        Answers::Always(true)
    } else if args.no_interaction {
        Answers::Always(false)
    } else {
        Answers::Prompt
    }
}

fn stub_store(dir: Option<PathBuf>) -> CliResult<Box<dyn StubStore>> {
    match dir {
        Some(dir) => {
            let stubs = DirectoryStubs::new(dir)?;
            debug!(overrides = ?stubs.overrides(), "Using stub directory");
            Ok(Box::new(stubs))
        }
        None => Ok(Box::new(BuiltinStubs::new())),
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_summary(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
        return Ok(());
    }
    if report.aborted {
        return Ok(());
    }

    let written =
        report.count(ArtifactStatus::Created) + report.count(ArtifactStatus::Overwritten);
    let skipped = report.count(ArtifactStatus::Skipped);

    output.print("")?;
    if skipped == 0 {
        output.success(&format!(
            "Generated {written} files for {}",
            report.model
        ))?;
    } else {
        output.warning(&format!(
            "Generated {written} files for {}, left {skipped} untouched",
            report.model
        ))?;
    }
    Ok(())
}

fn print_preview(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(report)?;
        return Ok(());
    }

    output.header(&format!("Dry run: {}", report.model))?;
    output.print(&format!("  model       {}", report.model_path))?;
    for artifact in &report.artifacts {
        let action = if artifact.existed {
            "overwrite?"
        } else {
            "create"
        };
        output.print(&format!("  {action:<11} {}", artifact.path))?;
    }
    output.info("Nothing was written.")?;
    Ok(())
}
