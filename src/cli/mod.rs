//! The duallog command-line interface.

use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use crate::cli::args::{Command, DuallogArgs, RunOptions};
use crate::config::HarnessConfig;
use crate::errors::{print_error, Result};
use crate::suite::Suite;
use crate::{logging, selfcheck};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> ExitCode {
    let args = DuallogArgs::parse();
    logging::init(args.verbose);

    let result = match args.command {
        Command::Selfcheck(options) => handle_selfcheck(&options),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            print_error(e);
            ExitCode::from(2)
        }
    }
}

fn load_config(options: &RunOptions) -> Result<HarnessConfig> {
    let mut config = match &options.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig {
            title: "duallog self-check".to_string(),
            ..HarnessConfig::default()
        },
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if let Some(dir) = &options.out_dir {
        config.report_dir = dir.clone();
    }
    Ok(config)
}

/// Returns whether both passes were free of failures.
fn handle_selfcheck(options: &RunOptions) -> Result<bool> {
    let config = load_config(options)?;
    let use_colors = config.use_colors;
    let suite = Suite::new(selfcheck::candidates(), config)?;
    let outcome = suite.run()?;
    info!(seed = ?outcome.reports.seed(), "suite run complete");
    output::print_outcome(&outcome, use_colors);
    Ok(!outcome.reports.has_failures())
}
