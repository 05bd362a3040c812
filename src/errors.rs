//! Harness-level error handling.
//!
//! Everything a test unit triggers is converted to data inside its
//! [`TestResult`](crate::model::TestResult). Only structural failures of the
//! harness itself are represented here, and they always abort the suite run.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using the harness error.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// A failure of the harness itself. Never produced by a unit body.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("no test units found with prefix '{prefix}'")]
    #[diagnostic(
        code(duallog::registry::no_units),
        help("test unit names must start with the configured prefix; check for typos in it")
    )]
    NoUnitsFound { prefix: String },

    #[error("test unit '{name}' is registered more than once")]
    #[diagnostic(code(duallog::registry::duplicate_unit))]
    DuplicateUnit { name: String },

    #[error("execution order is not a permutation of the unit set: expected {expected} units, got {actual}")]
    #[diagnostic(code(duallog::engine::invalid_order))]
    InvalidOrder { expected: usize, actual: usize },

    #[error("failed to write report '{}'", path.display())]
    #[diagnostic(
        code(duallog::report::write),
        help("check that the report directory exists and is writable")
    )]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to back up '{}'", path.display())]
    #[diagnostic(code(duallog::backup::io))]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in '{}': {message}", path.display())]
    #[diagnostic(code(duallog::config::invalid))]
    Config { path: PathBuf, message: String },
}

impl HarnessError {
    pub fn report_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReportWrite {
            path: path.into(),
            source,
        }
    }

    pub fn backup(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Backup {
            path: path.into(),
            source,
        }
    }
}

/// Prints a harness error with full miette diagnostics to stderr.
pub fn print_error(error: HarnessError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
