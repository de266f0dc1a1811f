//! Command dispatch

use std::path::Path;

use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{resolve_dir, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the command described by the parsed arguments.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if cli.config_template {
        output::document(&Settings::template());
        return Ok(());
    }

    let settings = effective_settings(cli)?;
    if cli.show_config {
        output::document(&settings.to_toml()?);
        return Ok(());
    }

    export(settings, cli.quiet)
}

/// Layered settings with command line overrides applied on top.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    let cwd = std::env::current_dir().map_err(InfraError::WorkingDirectory)?;

    if let Some(dir) = &cli.data_dir {
        settings.data_dir = resolve_dir(dir, &cwd);
    }
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = resolve_dir(dir, &cwd);
    }
    if cli.carry_stale_parents {
        settings.carry_stale_parents = true;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(settings))]
fn export(settings: Settings, quiet: bool) -> CliResult<()> {
    if settings.carry_stale_parents {
        output::warning("carry_stale_parents is set: rows may attach to categories of an earlier area");
    }

    let container = ServiceContainer::new(settings);
    let data_dir: &Path = &container.settings.data_dir;
    let output_dir: &Path = &container.settings.output_dir;

    let report = container.taxonomy.export(data_dir, output_dir)?;
    if !quiet {
        output::document(&report.json);
    }
    output::saved(&report.output_path);
    Ok(())
}
