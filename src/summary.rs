//! Aggregation of one pass's results.

use crate::model::{TestResult, WarningCategory, WarningOrigin};

/// Counts over one ordering's results. Recomputed per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub units_run: usize,
    pub passed: usize,
    pub failed: usize,
    pub intentional_user: usize,
    pub intentional_system: usize,
    pub unintentional_user: usize,
    pub unintentional_system: usize,
    pub exceptions: usize,
}

impl PassSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn intentional_warnings(&self) -> usize {
        self.intentional_user + self.intentional_system
    }

    pub fn unintentional_warnings(&self) -> usize {
        self.unintentional_user + self.unintentional_system
    }

    /// Fraction of units that passed, in `0.0..=1.0`.
    pub fn pass_rate(&self) -> f64 {
        if self.units_run == 0 {
            return 0.0;
        }
        self.passed as f64 / self.units_run as f64
    }

    fn add(&mut self, result: &TestResult) {
        self.units_run += 1;
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        for warning in &result.warnings {
            let slot = match (warning.category, warning.origin) {
                (WarningCategory::Intentional, WarningOrigin::User) => &mut self.intentional_user,
                (WarningCategory::Intentional, WarningOrigin::System) => {
                    &mut self.intentional_system
                }
                (WarningCategory::Unintentional, WarningOrigin::User) => {
                    &mut self.unintentional_user
                }
                (WarningCategory::Unintentional, WarningOrigin::System) => {
                    &mut self.unintentional_system
                }
            };
            *slot += 1;
        }
        self.exceptions += result.exceptions.len();
    }
}

/// Pure fold over `results`; order-independent.
pub fn summarize<'a, I>(results: I) -> PassSummary
where
    I: IntoIterator<Item = &'a TestResult>,
{
    results
        .into_iter()
        .fold(PassSummary::default(), |mut summary, result| {
            summary.add(result);
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assertion, ExceptionRecord, WarningRecord};
    use std::time::Duration;

    fn result(name: &str, passed: bool, warnings: Vec<WarningRecord>, exceptions: usize) -> TestResult {
        TestResult {
            unit: name.into(),
            description: None,
            index: 0,
            assertions: vec![Assertion {
                description: "check".into(),
                expected: "1".into(),
                actual: if passed { "1" } else { "0" }.into(),
                snippet: None,
                passed,
                label: None,
            }],
            warnings,
            exceptions: (0..exceptions)
                .map(|_| ExceptionRecord {
                    type_name: "panic".into(),
                    message: "boom".into(),
                    traceback: String::new(),
                })
                .collect(),
            output: String::new(),
            elapsed: Duration::ZERO,
        }
    }

    fn warning(category: WarningCategory, origin: WarningOrigin) -> WarningRecord {
        WarningRecord {
            category,
            origin,
            message: "w".into(),
        }
    }

    fn sample() -> Vec<TestResult> {
        vec![
            result("test_a", true, vec![], 0),
            result(
                "test_b",
                false,
                vec![warning(WarningCategory::Unintentional, WarningOrigin::User)],
                0,
            ),
            result(
                "test_c",
                true,
                vec![
                    warning(WarningCategory::Intentional, WarningOrigin::System),
                    warning(WarningCategory::Unintentional, WarningOrigin::System),
                ],
                1,
            ),
        ]
    }

    #[test]
    fn counts_by_category_and_origin() {
        let summary = summarize(&sample());
        assert_eq!(
            summary,
            PassSummary {
                units_run: 3,
                passed: 1,
                failed: 2,
                intentional_user: 0,
                intentional_system: 1,
                unintentional_user: 1,
                unintentional_system: 1,
                exceptions: 1,
            }
        );
        assert_eq!(summary.passed + summary.failed, summary.units_run);
    }

    #[test]
    fn order_independent_and_idempotent() {
        let results = sample();
        let forward = summarize(&results);
        let backward = summarize(results.iter().rev());
        assert_eq!(forward, backward);
        assert_eq!(forward, summarize(&results));
    }

    #[test]
    fn empty_summary_has_zero_rate() {
        let summary = summarize(&Vec::<TestResult>::new());
        assert_eq!(summary.units_run, 0);
        assert_eq!(summary.pass_rate(), 0.0);
    }
}
