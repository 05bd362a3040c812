//! Test unit discovery.
//!
//! A suite is handed a list of [`Candidate`]s, usually built with the
//! [`candidates!`](crate::candidates) macro, which captures each function's
//! own name. Only candidates whose name starts with the reserved prefix become
//! [`TestUnit`]s. Declaration order is kept exactly as given and is the
//! canonical order of the documentation pass.

use std::fmt;
use std::sync::Arc;

use crate::errors::{HarnessError, Result};
use crate::recorder::TestContext;

/// Default reserved prefix for test unit names.
pub const DEFAULT_PREFIX: &str = "test_";

/// Error type a unit body may return. Anything returned here is recorded as
/// an exception, never propagated.
pub type UnitError = Box<dyn std::error::Error + Send + Sync>;

pub type UnitResult = std::result::Result<(), UnitError>;

/// Shared, callable unit body.
pub type UnitBody = Arc<dyn Fn(&mut TestContext) -> UnitResult + Send + Sync>;

/// A named callable offered for discovery.
#[derive(Clone)]
pub struct Candidate {
    pub name: String,
    pub description: Option<String>,
    pub body: UnitBody,
}

impl Candidate {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut TestContext) -> UnitResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            body: Arc::new(body),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A discovered, independently executable test unit. Immutable.
#[derive(Clone)]
pub struct TestUnit {
    name: String,
    index: usize,
    description: Option<String>,
    body: UnitBody,
}

impl TestUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn invoke(&self, ctx: &mut TestContext) -> UnitResult {
        (self.body)(ctx)
    }
}

impl fmt::Debug for TestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestUnit")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Selects the candidates whose name carries `prefix`, preserving order.
///
/// Fails if nothing qualifies, or if two qualifying candidates share a name.
pub fn discover<I>(candidates: I, prefix: &str) -> Result<Vec<TestUnit>>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut units: Vec<TestUnit> = Vec::new();
    for candidate in candidates {
        if !candidate.name.starts_with(prefix) {
            tracing::trace!(name = %candidate.name, "skipping candidate without prefix");
            continue;
        }
        if units.iter().any(|u| u.name == candidate.name) {
            return Err(HarnessError::DuplicateUnit {
                name: candidate.name,
            });
        }
        units.push(TestUnit {
            index: units.len(),
            name: candidate.name,
            description: candidate.description,
            body: candidate.body,
        });
    }

    if units.is_empty() {
        return Err(HarnessError::NoUnitsFound {
            prefix: prefix.to_string(),
        });
    }
    Ok(units)
}

/// Builds a `Vec<Candidate>` from function paths, naming each after the
/// function itself. An optional `=> "description"` attaches a description.
///
/// ```
/// use duallog::{candidates, TestContext, UnitResult};
///
/// fn test_addition(ctx: &mut TestContext) -> UnitResult {
///     ctx.record(4, 2 + 2, "2 + 2 is 4");
///     Ok(())
/// }
///
/// fn helper(_: &mut TestContext) -> UnitResult {
///     Ok(())
/// }
///
/// let list = candidates![test_addition => "adds numbers", helper];
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[0].name, "test_addition");
/// ```
#[macro_export]
macro_rules! candidates {
    () => {
        ::std::vec::Vec::<$crate::Candidate>::new()
    };
    ($($func:path $(=> $desc:expr)?),+ $(,)?) => {{
        let mut list = ::std::vec::Vec::<$crate::Candidate>::new();
        $(
            let name = stringify!($func);
            let name = name.rsplit("::").next().unwrap_or(name).trim();
            #[allow(unused_mut)]
            let mut candidate = $crate::Candidate::new(name, $func);
            $( candidate = candidate.describe($desc); )?
            list.push(candidate);
        )+
        list
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_one(_: &mut TestContext) -> UnitResult {
        Ok(())
    }

    fn test_two(_: &mut TestContext) -> UnitResult {
        Ok(())
    }

    fn tset_typo(_: &mut TestContext) -> UnitResult {
        Ok(())
    }

    #[test]
    fn discovery_keeps_declaration_order_and_filters_prefix() {
        let units = discover(
            crate::candidates![test_two, tset_typo, test_one => "first declared"],
            DEFAULT_PREFIX,
        )
        .unwrap();
        let names: Vec<_> = units.iter().map(|u| u.name()).collect();
        assert_eq!(names, vec!["test_two", "test_one"]);
        assert_eq!(units[1].index(), 1);
        assert_eq!(units[1].description(), Some("first declared"));
    }

    #[test]
    fn zero_units_is_a_configuration_error() {
        let err = discover(crate::candidates![tset_typo], DEFAULT_PREFIX).unwrap_err();
        assert!(matches!(err, HarnessError::NoUnitsFound { .. }));
    }

    #[test]
    fn empty_candidate_list_is_a_configuration_error() {
        let err = discover(crate::candidates![], DEFAULT_PREFIX).unwrap_err();
        assert!(matches!(err, HarnessError::NoUnitsFound { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = discover(crate::candidates![test_one, test_one], DEFAULT_PREFIX).unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateUnit { name } if name == "test_one"));
    }

    #[test]
    fn closures_can_be_registered_directly() {
        let units = discover(
            vec![Candidate::new("test_closure", |ctx: &mut TestContext| {
                ctx.record(1, 1, "one");
                Ok(())
            })],
            DEFAULT_PREFIX,
        )
        .unwrap();
        assert_eq!(units.len(), 1);
    }
}
