//! Records produced while a unit executes.
//!
//! All of these are append-only while a unit runs and frozen once the
//! [`TestResult`] has been built. A result belongs to exactly one pass.

use std::fmt;
use std::time::Duration;

/// One recorded expected-vs-actual comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    pub description: String,
    pub expected: String,
    pub actual: String,
    pub snippet: Option<String>,
    pub passed: bool,
    /// Label open when the assertion was recorded.
    pub label: Option<String>,
}

/// Who raised a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningOrigin {
    /// Raised by the code under test or the unit body.
    User,
    /// Raised by the harness or the platform.
    System,
}

impl fmt::Display for WarningOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningOrigin::User => write!(f, "user"),
            WarningOrigin::System => write!(f, "system"),
        }
    }
}

/// Whether a unit declared that it expected a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCategory {
    Intentional,
    Unintentional,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::Intentional => write!(f, "intentional"),
            WarningCategory::Unintentional => write!(f, "unintentional"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningRecord {
    pub category: WarningCategory,
    pub origin: WarningOrigin,
    pub message: String,
}

/// A runtime error that escaped a unit body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRecord {
    pub type_name: String,
    pub message: String,
    pub traceback: String,
}

/// The outcome of one unit in one pass.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub unit: String,
    pub description: Option<String>,
    /// Declaration index of the unit.
    pub index: usize,
    pub assertions: Vec<Assertion>,
    pub warnings: Vec<WarningRecord>,
    pub exceptions: Vec<ExceptionRecord>,
    pub output: String,
    pub elapsed: Duration,
}

impl TestResult {
    /// A unit passes iff every assertion passed and nothing escaped it.
    pub fn passed(&self) -> bool {
        self.exceptions.is_empty() && self.assertions.iter().all(|a| a.passed)
    }

    pub fn failed_assertions(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.iter().filter(|a| !a.passed)
    }

    /// Assertions grouped by consecutive label, in recording order.
    pub fn label_groups(&self) -> Vec<(Option<&str>, Vec<&Assertion>)> {
        let mut groups: Vec<(Option<&str>, Vec<&Assertion>)> = Vec::new();
        for assertion in &self.assertions {
            let label = assertion.label.as_deref();
            match groups.last_mut() {
                Some((current, items)) if *current == label => items.push(assertion),
                _ => groups.push((label, vec![assertion])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion(label: Option<&str>, passed: bool) -> Assertion {
        Assertion {
            description: "d".into(),
            expected: "1".into(),
            actual: if passed { "1" } else { "2" }.into(),
            snippet: None,
            passed,
            label: label.map(str::to_string),
        }
    }

    fn result(assertions: Vec<Assertion>, exceptions: Vec<ExceptionRecord>) -> TestResult {
        TestResult {
            unit: "test_x".into(),
            description: None,
            index: 0,
            assertions,
            warnings: vec![],
            exceptions,
            output: String::new(),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn unit_with_no_assertions_and_no_exceptions_passes() {
        assert!(result(vec![], vec![]).passed());
    }

    #[test]
    fn exception_fails_unit_even_when_assertions_pass() {
        let exception = ExceptionRecord {
            type_name: "panic".into(),
            message: "boom".into(),
            traceback: String::new(),
        };
        assert!(!result(vec![assertion(None, true)], vec![exception]).passed());
    }

    #[test]
    fn label_groups_split_on_label_change() {
        let r = result(
            vec![
                assertion(None, true),
                assertion(Some("a"), true),
                assertion(Some("a"), false),
                assertion(Some("b"), true),
                assertion(Some("a"), true),
            ],
            vec![],
        );
        let groups: Vec<_> = r
            .label_groups()
            .into_iter()
            .map(|(label, items)| (label, items.len()))
            .collect();
        assert_eq!(
            groups,
            vec![(None, 1), (Some("a"), 2), (Some("b"), 1), (Some("a"), 1)]
        );
    }
}
