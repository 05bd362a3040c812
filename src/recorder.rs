//! The recording API used inside unit bodies.
//!
//! A fresh [`TestContext`] is created for every unit execution, so the
//! current label, the output buffer, and every record are unit-local and
//! never shared across units or passes.

use std::fmt::{self, Debug};
use std::panic::{self, AssertUnwindSafe};

use crate::model::{Assertion, WarningCategory, WarningOrigin, WarningRecord};

/// Per-execution recording state handed to a unit body.
#[derive(Debug, Default)]
pub struct TestContext {
    label: Option<String>,
    assertions: Vec<Assertion>,
    warnings: Vec<WarningRecord>,
    output: String,
    /// Origins expected by the open `record_expected_warning` scopes, innermost last.
    expecting: Vec<ExpectationScope>,
}

#[derive(Debug)]
struct ExpectationScope {
    origin: WarningOrigin,
    matched: usize,
}

/// Everything a unit recorded, handed back to the engine once the body returns.
#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub assertions: Vec<Assertion>,
    pub warnings: Vec<WarningRecord>,
    pub output: String,
}

impl TestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label attached to every assertion recorded after this call.
    pub fn open_label(&mut self, text: impl Into<String>) {
        self.label = Some(text.into());
    }

    pub fn current_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Compares `expected` with `actual` and records the outcome.
    ///
    /// Never panics on mismatch; returns whether the check passed so a body
    /// can branch on it if it wants to.
    pub fn record<T>(&mut self, expected: T, actual: T, description: impl Into<String>) -> bool
    where
        T: PartialEq + Debug,
    {
        self.push_assertion(&expected, &actual, description.into(), None)
    }

    /// Like [`record`](Self::record), keeping a source snippet for the report.
    pub fn record_with_snippet<T>(
        &mut self,
        expected: T,
        actual: T,
        description: impl Into<String>,
        snippet: impl Into<String>,
    ) -> bool
    where
        T: PartialEq + Debug,
    {
        self.push_assertion(&expected, &actual, description.into(), Some(snippet.into()))
    }

    /// Runs `trigger` expecting it to raise at least one warning of `origin`.
    ///
    /// Matching warnings are recorded as intentional and a passing assertion
    /// is added. If none fired, a failing assertion is added instead. Any
    /// other warning raised by the trigger stays unintentional.
    ///
    /// A panic inside `trigger` records a failing assertion first and then
    /// keeps unwinding to the unit's boundary.
    pub fn record_expected_warning<F>(&mut self, trigger: F, origin: WarningOrigin) -> bool
    where
        F: FnOnce(&mut TestContext),
    {
        self.expecting.push(ExpectationScope { origin, matched: 0 });
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| trigger(self)));
        let matched = self.expecting.pop().map_or(0, |scope| scope.matched);

        let (passed, actual) = match &outcome {
            Err(_) => (false, format!("trigger panicked after {matched} {origin} warning(s)")),
            Ok(()) if matched > 0 => (true, format!("{matched} {origin} warning(s)")),
            Ok(()) => (false, "no matching warning".to_string()),
        };
        self.assertions.push(Assertion {
            description: format!("expected a {origin} warning"),
            expected: format!("{origin} warning"),
            actual,
            snippet: None,
            passed,
            label: self.label.clone(),
        });
        if let Err(payload) = outcome {
            panic::resume_unwind(payload);
        }
        passed
    }

    /// Raises a warning. It is intentional only when an open
    /// `record_expected_warning` scope expects its origin.
    pub fn warn(&mut self, origin: WarningOrigin, message: impl Into<String>) {
        let category = match self.expecting.last_mut() {
            Some(scope) if scope.origin == origin => {
                scope.matched += 1;
                WarningCategory::Intentional
            }
            _ => WarningCategory::Unintentional,
        };
        self.warnings.push(WarningRecord {
            category,
            origin,
            message: message.into(),
        });
    }

    /// Appends a line to the unit's private output buffer.
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn assertion_count(&self) -> usize {
        self.assertions.len()
    }

    pub(crate) fn into_recording(self) -> Recording {
        Recording {
            assertions: self.assertions,
            warnings: self.warnings,
            output: self.output,
        }
    }

    fn push_assertion<T>(
        &mut self,
        expected: &T,
        actual: &T,
        description: String,
        snippet: Option<String>,
    ) -> bool
    where
        T: PartialEq + Debug,
    {
        let passed = expected == actual;
        self.assertions.push(Assertion {
            description,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
            snippet,
            passed,
            label: self.label.clone(),
        });
        passed
    }
}

impl fmt::Write for TestContext {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.output.push_str(s);
        Ok(())
    }
}
