//! Runs units and passes.
//!
//! Execution is single-threaded and sequential. Each unit gets a fresh
//! [`TestContext`] and runs inside the capture boundary, so whatever it does
//! ends up as data in its own [`TestResult`].

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::capture;
use crate::errors::{HarnessError, Result};
use crate::model::{TestResult, WarningOrigin};
use crate::order::OrderStrategy;
use crate::recorder::TestContext;
use crate::registry::TestUnit;
use crate::summary::{summarize, PassSummary};

/// Knobs for unit execution.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub capture_backtrace: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            capture_backtrace: true,
        }
    }
}

/// One completed pass: its results in execution order and their summary.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub strategy: OrderStrategy,
    pub results: Vec<TestResult>,
    pub summary: PassSummary,
}

/// Runs one unit to completion. Never fails; every outcome is recorded.
pub fn run_unit(unit: &TestUnit, options: &EngineOptions) -> TestResult {
    let mut ctx = TestContext::new();
    let started = Instant::now();
    let exception = capture::contain(options.capture_backtrace, || unit.invoke(&mut ctx));
    let elapsed = started.elapsed();

    if exception.is_none() && ctx.assertion_count() == 0 {
        ctx.warn(WarningOrigin::System, "unit recorded no assertions");
    }

    let recording = ctx.into_recording();
    let result = TestResult {
        unit: unit.name().to_string(),
        description: unit.description().map(str::to_string),
        index: unit.index(),
        assertions: recording.assertions,
        warnings: recording.warnings,
        exceptions: exception.into_iter().collect(),
        output: recording.output,
        elapsed,
    };

    debug!(
        unit = %result.unit,
        passed = result.passed(),
        assertions = result.assertions.len(),
        elapsed = ?result.elapsed,
        "unit finished"
    );
    if !result.passed() {
        warn!(unit = %result.unit, "unit failed");
    }
    result
}

/// Runs every unit once, in the order `strategy` yields.
pub fn run_pass(
    units: &[TestUnit],
    strategy: OrderStrategy,
    options: &EngineOptions,
) -> Result<PassOutcome> {
    let order = strategy.sequence(units.len());
    run_in_order(units, &order, strategy, options)
}

/// Runs `units` in the explicit index `order`, which must be a permutation.
pub fn run_in_order(
    units: &[TestUnit],
    order: &[usize],
    strategy: OrderStrategy,
    options: &EngineOptions,
) -> Result<PassOutcome> {
    check_permutation(units.len(), order)?;
    info!(
        pass = strategy.name(),
        seed = ?strategy.seed(),
        units = units.len(),
        "starting pass"
    );

    let results: Vec<TestResult> = order
        .iter()
        .map(|&index| run_unit(&units[index], options))
        .collect();
    let summary = summarize(&results);

    info!(
        pass = strategy.name(),
        passed = summary.passed,
        failed = summary.failed,
        "pass complete"
    );
    Ok(PassOutcome {
        strategy,
        results,
        summary,
    })
}

fn check_permutation(len: usize, order: &[usize]) -> Result<()> {
    let invalid = || HarnessError::InvalidOrder {
        expected: len,
        actual: order.len(),
    };
    if order.len() != len {
        return Err(invalid());
    }
    let mut seen = vec![false; len];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return Err(invalid()),
        }
    }
    Ok(())
}
