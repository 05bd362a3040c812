//! Rendering of the two report artifacts.
//!
//! Both renderers are pure functions of their inputs: the same results and
//! summary always produce byte-identical text.
//!
//! - [`render_doc`] lists every unit of the declared-order pass, grouped by
//!   label, followed by the summary table.
//! - [`render_run`] lists only the failing units of the randomized pass, in
//!   the order they ran, with output, tracebacks and timing.

use std::fmt::{self, Write};

use difference::{Changeset, Difference};
use unicode_width::UnicodeWidthStr;

use crate::format::format_percent;
use crate::model::{Assertion, ExceptionRecord, TestResult, WarningRecord};
use crate::summary::PassSummary;

const RULE_WIDTH: usize = 78;
const LABEL_COLUMN: usize = 36;
const COUNT_COLUMN: usize = 8;

/// Renders the documentation artifact from the declared-order pass.
pub fn render_doc(results: &[TestResult], summary: &PassSummary, title: &str) -> String {
    let mut out = String::new();
    write_doc(&mut out, results, summary, title)
        .map(|()| out)
        .unwrap_or_default()
}

/// Renders the run artifact from the randomized pass: failing units only.
pub fn render_run(
    results: &[TestResult],
    summary: &PassSummary,
    title: &str,
    seed: Option<u64>,
) -> String {
    let mut out = String::new();
    write_run(&mut out, results, summary, title, seed)
        .map(|()| out)
        .unwrap_or_default()
}

/// Writes the documentation artifact to any formatting sink.
pub fn write_doc<W: Write>(
    out: &mut W,
    results: &[TestResult],
    summary: &PassSummary,
    title: &str,
) -> fmt::Result {
    header(
        out,
        title,
        &[
            "Documentation pass: every unit in declared order".to_string(),
            format!("Units: {}", results.len()),
        ],
    )?;

    for result in results {
        unit_heading(out, result, &format!("{}/{}", result.index + 1, results.len()))?;
        if result.assertions.is_empty() {
            out.write_str("  (no assertions recorded)\n")?;
        }
        for (label, assertions) in result.label_groups() {
            if let Some(label) = label {
                writeln!(out, "  # {label}")?;
            }
            for assertion in assertions {
                assertion_block(out, assertion, false)?;
            }
        }
        warnings_block(out, &result.warnings)?;
        if !result.exceptions.is_empty() {
            out.write_str("  Exceptions:\n")?;
            for exception in &result.exceptions {
                writeln!(out, "    - {}: {}", exception.type_name, exception.message)?;
            }
        }
        writeln!(out, "  Result: {}\n", verdict(result))?;
    }

    summary_table(out, summary)
}

/// Writes the run artifact to any formatting sink.
pub fn write_run<W: Write>(
    out: &mut W,
    results: &[TestResult],
    summary: &PassSummary,
    title: &str,
    seed: Option<u64>,
) -> fmt::Result {
    let failing = results.iter().filter(|r| !r.passed()).count();
    let mut lines = vec!["Run pass: failing units in randomized order".to_string()];
    if let Some(seed) = seed {
        lines.push(format!("Seed: {seed} (replay with --seed {seed})"));
    }
    lines.push(format!("Units run: {}, failing: {failing}", results.len()));
    header(out, title, &lines)?;

    if failing == 0 {
        out.write_str("No failing units.\n\n")?;
    }

    for (position, result) in results.iter().enumerate() {
        if result.passed() {
            continue;
        }
        unit_heading(out, result, &format!("#{} of {}", position + 1, results.len()))?;
        writeln!(
            out,
            "  Declared position: {}   Elapsed: {:.3?}",
            result.index + 1,
            result.elapsed
        )?;

        if !result.output.is_empty() {
            out.write_str("  Output:\n")?;
            for line in result.output.lines() {
                writeln!(out, "    | {line}")?;
            }
        }

        let failed: Vec<&Assertion> = result.failed_assertions().collect();
        if !failed.is_empty() {
            out.write_str("  Failed assertions:\n")?;
            for assertion in failed {
                if let Some(label) = &assertion.label {
                    writeln!(out, "  # {label}")?;
                }
                assertion_block(out, assertion, true)?;
            }
        }

        warnings_block(out, &result.warnings)?;
        for exception in &result.exceptions {
            exception_block(out, exception)?;
        }
        out.write_char('\n')?;
    }

    summary_table(out, summary)
}

fn header<W: Write>(out: &mut W, title: &str, lines: &[String]) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{rule}\n")
}

fn unit_heading<W: Write>(out: &mut W, result: &TestResult, position: &str) -> fmt::Result {
    let mut heading = format!("[{position}] {}", result.unit);
    if let Some(description) = &result.description {
        write!(heading, " - {description}")?;
    }
    let underline = "-".repeat(heading.width().min(RULE_WIDTH));
    writeln!(out, "{heading}\n{underline}")
}

fn verdict(result: &TestResult) -> &'static str {
    if result.passed() {
        "PASSED"
    } else {
        "FAILED"
    }
}

fn assertion_block<W: Write>(out: &mut W, assertion: &Assertion, with_diff: bool) -> fmt::Result {
    let mark = if assertion.passed { "PASS" } else { "FAIL" };
    writeln!(out, "  [{mark}] {}", assertion.description)?;
    writeln!(out, "         expected: {}", assertion.expected)?;
    writeln!(out, "         actual:   {}", assertion.actual)?;
    if let Some(snippet) = &assertion.snippet {
        writeln!(out, "         source:   {snippet}")?;
    }
    let multiline = assertion.expected.contains("\\n") || assertion.actual.contains("\\n");
    if !(with_diff && !assertion.passed && multiline) {
        return Ok(());
    }
    out.write_str("         diff:\n")?;
    let expected = assertion.expected.replace("\\n", "\n");
    let actual = assertion.actual.replace("\\n", "\n");
    let changeset = Changeset::new(&expected, &actual, "\n");
    for diff in &changeset.diffs {
        let (mark, text) = match diff {
            Difference::Same(text) => (' ', text),
            Difference::Rem(text) => ('-', text),
            Difference::Add(text) => ('+', text),
        };
        for line in text.lines() {
            writeln!(out, "           {mark} {line}")?;
        }
    }
    Ok(())
}

fn warnings_block<W: Write>(out: &mut W, warnings: &[WarningRecord]) -> fmt::Result {
    if warnings.is_empty() {
        return Ok(());
    }
    out.write_str("  Warnings:\n")?;
    for warning in warnings {
        writeln!(
            out,
            "    - {}/{}: {}",
            warning.category, warning.origin, warning.message
        )?;
    }
    Ok(())
}

fn exception_block<W: Write>(out: &mut W, exception: &ExceptionRecord) -> fmt::Result {
    writeln!(
        out,
        "  Exception ({}): {}",
        exception.type_name, exception.message
    )?;
    for line in exception.traceback.lines() {
        writeln!(out, "      {line}")?;
    }
    Ok(())
}

fn summary_table<W: Write>(out: &mut W, summary: &PassSummary) -> fmt::Result {
    let border = format!(
        "+{}+{}+",
        "-".repeat(LABEL_COLUMN + 2),
        "-".repeat(COUNT_COLUMN + 2)
    );
    let rows: [(&str, usize); 8] = [
        ("Units run", summary.units_run),
        ("Passed", summary.passed),
        ("Failed", summary.failed),
        ("Intentional warnings (user)", summary.intentional_user),
        ("Intentional warnings (system)", summary.intentional_system),
        ("Unintentional warnings (user)", summary.unintentional_user),
        ("Unintentional warnings (system)", summary.unintentional_system),
        ("Exceptions", summary.exceptions),
    ];

    out.write_str("SUMMARY\n")?;
    writeln!(out, "{border}")?;
    table_row(out, "Outcome", "Count")?;
    writeln!(out, "{border}")?;
    for (label, count) in rows {
        table_row(out, label, &count.to_string())?;
    }
    writeln!(out, "{border}")?;
    let rate = format_percent(summary.pass_rate(), 1).unwrap_or_else(|| "n/a".to_string());
    writeln!(out, "Pass rate: {rate}")
}

fn table_row<W: Write>(out: &mut W, label: &str, count: &str) -> fmt::Result {
    let pad = LABEL_COLUMN.saturating_sub(label.width());
    writeln!(
        out,
        "| {label}{} | {count:>width$} |",
        " ".repeat(pad),
        width = COUNT_COLUMN
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{WarningCategory, WarningOrigin};
    use crate::summary::summarize;
    use std::time::Duration;

    fn assertion(description: &str, label: Option<&str>, expected: &str, actual: &str) -> Assertion {
        Assertion {
            description: description.into(),
            expected: expected.into(),
            actual: actual.into(),
            snippet: None,
            passed: expected == actual,
            label: label.map(str::to_string),
        }
    }

    fn unit(name: &str, index: usize, assertions: Vec<Assertion>) -> TestResult {
        TestResult {
            unit: name.into(),
            description: None,
            index,
            assertions,
            warnings: vec![],
            exceptions: vec![],
            output: String::new(),
            elapsed: Duration::from_micros(1500),
        }
    }

    fn results() -> Vec<TestResult> {
        let a = unit(
            "test_a",
            0,
            vec![assertion("adds", Some("Addition"), "4", "4")],
        );
        let mut b = unit(
            "test_b",
            1,
            vec![assertion("multiline", None, "\"x\\ny\"", "\"x\\nz\"")],
        );
        b.output = "printed by b\n".into();
        b.warnings.push(WarningRecord {
            category: WarningCategory::Unintentional,
            origin: WarningOrigin::User,
            message: "stray".into(),
        });
        vec![a, b]
    }

    #[test]
    fn doc_lists_every_unit_with_labels() {
        let results = results();
        let text = render_doc(&results, &summarize(&results), "Suite");
        assert!(text.contains("[1/2] test_a"));
        assert!(text.contains("[2/2] test_b"));
        assert!(text.contains("  # Addition\n  [PASS] adds"));
        assert!(text.contains("unintentional/user: stray"));
        assert!(text.find("test_a").unwrap() < text.find("test_b").unwrap());
        assert!(text.contains(&format!("| {:<36} | {:>8} |", "Passed", 1)));
        assert!(text.contains("Pass rate: 50.0%"));
    }

    #[test]
    fn run_lists_only_failures_with_diagnostics() {
        let results = results();
        let text = render_run(&results, &summarize(&results), "Suite", Some(99));
        assert!(!text.contains("test_a"));
        assert!(text.contains("[#2 of 2] test_b"));
        assert!(text.contains("Seed: 99"));
        assert!(text.contains("    | printed by b"));
        assert!(text.contains("Elapsed: 1.500ms"));
        assert!(text.contains("- y\""));
        assert!(text.contains("+ z\""));
    }

    #[test]
    fn write_run_appends_to_an_existing_sink() {
        let results = results();
        let summary = summarize(&results);
        let mut out = String::from("preamble\n");
        write_run(&mut out, &results, &summary, "Suite", Some(4)).unwrap();
        assert_eq!(
            out.strip_prefix("preamble\n"),
            Some(render_run(&results, &summary, "Suite", Some(4)).as_str())
        );
    }

    #[test]
    fn run_without_failures_says_so() {
        let results = vec![unit("test_a", 0, vec![assertion("ok", None, "1", "1")])];
        let text = render_run(&results, &summarize(&results), "Suite", None);
        assert!(text.contains("No failing units."));
        assert!(!text.contains("Seed:"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let results = results();
        let summary = summarize(&results);
        assert_eq!(
            render_doc(&results, &summary, "t"),
            render_doc(&results, &summary, "t")
        );
        assert_eq!(
            render_run(&results, &summary, "t", Some(1)),
            render_run(&results, &summary, "t", Some(1))
        );
    }
}
