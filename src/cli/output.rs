//! Console output for the CLI.
//!
//! Only harness-level summaries are printed here; unit output lives in the
//! reports.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::console::{logw, WrapOptions};
use crate::summary::PassSummary;
use crate::suite::SuiteOutcome;

/// Prints both pass summaries and the report locations to stderr.
pub fn print_outcome(outcome: &SuiteOutcome, use_colors: bool) {
    let choice = if use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);
    let reports = &outcome.reports;
    let _ = print_pass(&mut stderr, "doc pass (declared)", &reports.doc.summary);
    let run_name = match reports.seed() {
        Some(seed) => format!("run pass (seed {seed})"),
        None => "run pass".to_string(),
    };
    let _ = print_pass(&mut stderr, &run_name, &reports.run.summary);
    let paths = WrapOptions {
        subsequent_indent: "    ".to_string(),
        ..WrapOptions::default()
    };
    logw(&format!("doc report: {}", outcome.doc_path.display()), &paths);
    logw(&format!("run report: {}", outcome.run_path.display()), &paths);
}

fn print_pass<W: WriteColor>(out: &mut W, name: &str, summary: &PassSummary) -> io::Result<()> {
    write!(out, "{name}: {} units, ", summary.units_run)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "{} passed", summary.passed)?;
    out.reset()?;
    write!(out, ", ")?;
    if summary.failed > 0 {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    }
    write!(out, "{} failed", summary.failed)?;
    out.reset()?;
    writeln!(
        out,
        ", {} unintentional warnings, {} exceptions",
        summary.unintentional_warnings(),
        summary.exceptions
    )
}
