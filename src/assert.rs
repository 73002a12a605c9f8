//! Assertion primitives for case bodies.
//!
//! Each helper returns `Ok(())` or a [`Fault::Assertion`] carrying the
//! mismatch, so bodies compose them with `?`. The expected-failure check
//! [`raises`] captures the action's result explicitly and compares fault
//! categories; it never re-raises the captured fault on a match.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use crate::errors::{Fault, FaultCategory};

/// Asserts two values compare equal.
pub fn equals<T: PartialEq + Debug>(expected: T, actual: T) -> Result<(), Fault> {
    if expected == actual {
        Ok(())
    } else {
        Err(Fault::assertion_mismatch(
            format!("expected {:?}, got {:?}", expected, actual),
            format!("{:?}", expected),
            format!("{:?}", actual),
        ))
    }
}

/// Asserts the condition holds; `claim` names what was being checked.
pub fn is_true(condition: bool, claim: &str) -> Result<(), Fault> {
    if condition {
        Ok(())
    } else {
        Err(Fault::assertion(format!("expected {}, but it does not hold", claim)))
    }
}

/// Asserts the condition does not hold.
pub fn is_false(condition: bool, claim: &str) -> Result<(), Fault> {
    if condition {
        Err(Fault::assertion(format!("expected {} to be false, but it holds", claim)))
    } else {
        Ok(())
    }
}

/// Asserts an optional value is present; `what` names the value.
pub fn some<T>(value: &Option<T>, what: &str) -> Result<(), Fault> {
    match value {
        Some(_) => Ok(()),
        None => Err(Fault::assertion(format!("expected {} to be present", what))),
    }
}

/// Asserts two slices are element-wise equal.
pub fn slices_equal<T: PartialEq + Debug>(expected: &[T], actual: &[T]) -> Result<(), Fault> {
    if expected == actual {
        Ok(())
    } else {
        Err(Fault::assertion_mismatch(
            format!("slices differ: expected {:?}, got {:?}", expected, actual),
            format!("{:?}", expected),
            format!("{:?}", actual),
        ))
    }
}

/// Asserts the action raises a fault of the expected category.
///
/// A matching fault is consumed and the assertion passes. Completing
/// normally, or raising a fault of a different category, is an assertion
/// failure (the invocation records as Failed, not Errored).
pub fn raises(
    expected: FaultCategory,
    action: impl FnOnce() -> Result<(), Fault>,
) -> Result<(), Fault> {
    match action() {
        Ok(()) => Err(Fault::assertion(format!(
            "expected a {} fault, but the action completed normally",
            expected
        ))),
        Err(fault) if fault.category() == expected => Ok(()),
        Err(fault) => Err(Fault::assertion_mismatch(
            format!(
                "expected a {} fault, got a {} fault: {}",
                expected,
                fault.category(),
                fault
            ),
            expected.to_string(),
            fault.category().to_string(),
        )),
    }
}

/// Asserts the action completes within the wall-clock budget.
///
/// The action runs to completion and the elapsed time is checked afterwards;
/// a fault raised by the action takes precedence over the budget check.
pub fn completes_within(
    budget: Duration,
    action: impl FnOnce() -> Result<(), Fault>,
) -> Result<(), Fault> {
    let started = Instant::now();
    action()?;
    let elapsed = started.elapsed();
    if elapsed > budget {
        Err(Fault::timeout(budget, elapsed))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod assert_tests {
    use super::*;

    #[test]
    fn raises_matches_on_category() {
        let outcome = raises(FaultCategory::Unexpected, || {
            Err(Fault::unexpected("no value to dereference"))
        });
        assert!(outcome.is_ok());
    }

    #[test]
    fn raises_rejects_mismatched_category() {
        let outcome = raises(FaultCategory::Configuration, || {
            Err(Fault::unexpected("no value to dereference"))
        });
        let fault = outcome.unwrap_err();
        assert_eq!(fault.category(), FaultCategory::Assertion);
        assert_eq!(fault.mismatch(), Some(("configuration", "unexpected")));
    }

    #[test]
    fn raises_rejects_normal_completion() {
        let outcome = raises(FaultCategory::Unexpected, || Ok(()));
        assert_eq!(outcome.unwrap_err().category(), FaultCategory::Assertion);
    }

    #[test]
    fn completes_within_prefers_the_action_fault() {
        let outcome = completes_within(Duration::from_secs(4), || {
            Err(Fault::assertion("inner mismatch"))
        });
        assert_eq!(outcome.unwrap_err().category(), FaultCategory::Assertion);
    }

    #[test]
    fn completes_within_passes_a_fast_action() {
        assert!(completes_within(Duration::from_secs(4), || Ok(())).is_ok());
    }
}
