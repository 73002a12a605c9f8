//! Unified fault type for the executor.
//!
//! Every failure the executor can observe is a [`Fault`]: assertion
//! violations raised by case bodies, any other error a body surfaces,
//! exceeded wall-clock budgets, registration-time configuration mistakes,
//! and failing fixture hooks. Outcome classification and the
//! expected-failure assertion both work on [`FaultCategory`] rather than on
//! message text, so matching stays stable as messages change.

use std::fmt;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Coarse classification of a [`Fault`], used by outcome mapping and by
/// `assert::raises`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultCategory {
    /// An expected-vs-actual mismatch raised by an assertion.
    Assertion,
    /// Any other error a case body surfaced.
    Unexpected,
    /// An invocation exceeded its wall-clock budget.
    Timeout,
    /// A malformed declaration caught at registration time.
    Configuration,
    /// A setup or teardown hook failed.
    Hook,
}

impl FaultCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultCategory::Assertion => "assertion",
            FaultCategory::Unexpected => "unexpected",
            FaultCategory::Timeout => "timeout",
            FaultCategory::Configuration => "configuration",
            FaultCategory::Hook => "hook",
        }
    }
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which hook slot a failing hook was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookScope {
    BeforeAll,
    AfterAll,
    BeforeEach,
    AfterEach,
}

impl HookScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookScope::BeforeAll => "before-all",
            HookScope::AfterAll => "after-all",
            HookScope::BeforeEach => "before-each",
            HookScope::AfterEach => "after-each",
        }
    }

    /// Whether this scope runs once per suite rather than once per case.
    pub fn is_suite_level(&self) -> bool {
        matches!(self, HookScope::BeforeAll | HookScope::AfterAll)
    }
}

impl fmt::Display for HookScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THE FAULT TYPE
// ============================================================================

/// The single error type for everything that can go wrong in a run.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("assertion failed: {message}")]
    Assertion {
        message: String,
        expected: Option<String>,
        actual: Option<String>,
    },
    #[error("unexpected fault: {message}")]
    Unexpected {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("invocation exceeded its wall-clock budget: took {elapsed:?}, budget {limit:?}")]
    Timeout { limit: Duration, elapsed: Duration },
    #[error("configuration error: {message}")]
    Configuration { message: String },
    #[error("{scope} hook failed")]
    Hook {
        scope: HookScope,
        #[source]
        cause: Box<Fault>,
    },
}

impl Fault {
    /// Assertion failure with a message only.
    pub fn assertion(message: impl Into<String>) -> Self {
        Fault::Assertion {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Assertion failure carrying both sides of the mismatch for diff
    /// rendering.
    pub fn assertion_mismatch(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Fault::Assertion {
            message: message.into(),
            expected: Some(expected.into()),
            actual: Some(actual.into()),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Fault::Unexpected {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an arbitrary error as an unexpected fault, preserving it as the
    /// source for diagnostic chains.
    pub fn unexpected_from(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Fault::Unexpected {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    pub fn timeout(limit: Duration, elapsed: Duration) -> Self {
        Fault::Timeout { limit, elapsed }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Fault::Configuration {
            message: message.into(),
        }
    }

    pub fn hook(scope: HookScope, cause: Fault) -> Self {
        Fault::Hook {
            scope,
            cause: Box::new(cause),
        }
    }

    /// Returns the classification used by outcome mapping and
    /// `assert::raises`.
    pub fn category(&self) -> FaultCategory {
        match self {
            Fault::Assertion { .. } => FaultCategory::Assertion,
            Fault::Unexpected { .. } => FaultCategory::Unexpected,
            Fault::Timeout { .. } => FaultCategory::Timeout,
            Fault::Configuration { .. } => FaultCategory::Configuration,
            Fault::Hook { .. } => FaultCategory::Hook,
        }
    }

    /// The expected/actual pair of an assertion mismatch, when present.
    pub fn mismatch(&self) -> Option<(&str, &str)> {
        match self {
            Fault::Assertion {
                expected: Some(e),
                actual: Some(a),
                ..
            } => Some((e.as_str(), a.as_str())),
            _ => None,
        }
    }
}

impl Diagnostic for Fault {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("scaffold::{}", self.category().as_str())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Fault::Configuration { .. } => Some(Box::new(
                "check the declared column kinds against the row data and the delimiter",
            )),
            Fault::Timeout { .. } => Some(Box::new(
                "raise the case budget or reduce the work the body performs",
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod errors_tests {
    use super::*;

    #[test]
    fn categories_match_variants() {
        assert_eq!(
            Fault::assertion("boom").category(),
            FaultCategory::Assertion
        );
        assert_eq!(
            Fault::unexpected("boom").category(),
            FaultCategory::Unexpected
        );
        assert_eq!(
            Fault::timeout(Duration::from_millis(1), Duration::from_millis(2)).category(),
            FaultCategory::Timeout
        );
        assert_eq!(
            Fault::configuration("boom").category(),
            FaultCategory::Configuration
        );
        assert_eq!(
            Fault::hook(HookScope::BeforeEach, Fault::unexpected("boom")).category(),
            FaultCategory::Hook
        );
    }

    #[test]
    fn hook_fault_preserves_cause() {
        let fault = Fault::hook(HookScope::AfterEach, Fault::assertion("cleanup mismatch"));
        let source = std::error::Error::source(&fault).expect("hook fault must chain its cause");
        assert!(source.to_string().contains("cleanup mismatch"));
    }

    #[test]
    fn diagnostic_codes_are_stable() {
        let code = Diagnostic::code(&Fault::configuration("bad row"))
            .expect("configuration faults carry a code")
            .to_string();
        assert_eq!(code, "scaffold::configuration");
    }

    #[test]
    fn mismatch_exposes_both_sides() {
        let fault = Fault::assertion_mismatch("values differ", "ABCD", "AbcD");
        assert_eq!(fault.mismatch(), Some(("ABCD", "AbcD")));
        assert_eq!(Fault::assertion("no sides").mismatch(), None);
    }
}
