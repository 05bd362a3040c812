//! duallog: a dual-pass test harness.
//!
//! Units are discovered by name prefix, run once in declared order and once
//! in a freshly randomized order, and each pass is written to its own report:
//! the doc artifact lists every unit, the run artifact lists only the units
//! that failed in the randomized pass. Running twice under different orders
//! surfaces units that depend on state left behind by other units.

pub use crate::config::HarnessConfig;
pub use crate::engine::{run_pass, run_unit, EngineOptions, PassOutcome};
pub use crate::errors::{HarnessError, Result};
pub use crate::model::{
    Assertion, ExceptionRecord, TestResult, WarningCategory, WarningOrigin, WarningRecord,
};
pub use crate::order::OrderStrategy;
pub use crate::recorder::TestContext;
pub use crate::registry::{discover, Candidate, TestUnit, UnitError, UnitResult};
pub use crate::report::{render_doc, render_run, write_doc, write_run};
pub use crate::suite::{Suite, SuiteOutcome, SuiteReports};
pub use crate::summary::{summarize, PassSummary};

pub mod backup;
pub mod capture;
pub mod cli;
pub mod config;
pub mod console;
pub mod engine;
pub mod errors;
pub mod format;
pub mod logging;
pub mod model;
pub mod order;
pub mod recorder;
pub mod registry;
pub mod report;
pub mod selfcheck;
pub mod suite;
pub mod summary;
