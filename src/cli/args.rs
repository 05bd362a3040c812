//! Command-line arguments for the duallog binary.
//!
//! Uses the `clap` crate with its "derive" feature.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "duallog",
    version,
    about = "Runs a test suite twice, in declared and randomized order, and writes two reports."
)]
pub struct DuallogArgs {
    /// Show per-unit debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the built-in self-check suite through both passes.
    Selfcheck(RunOptions),
}

/// Overrides applied on top of the configuration file.
#[derive(Debug, Args)]
pub struct RunOptions {
    /// YAML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for the randomized pass, to replay a previous ordering.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory the two reports are written to.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}
