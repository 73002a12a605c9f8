//! Run results: per-invocation outcomes aggregated into a [`Report`].

pub mod printer;

use std::fmt;

use serde::Serialize;

use crate::errors::Fault;

// ============================================================================
// OUTCOMES
// ============================================================================

/// The outcome of one invocation (or of a suite whose own hooks failed).
#[derive(Debug)]
pub enum Outcome {
    Passed,
    Failed(Fault),
    Errored(Fault),
    Skipped { reason: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_errored(&self) -> bool {
        matches!(self, Outcome::Errored(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    /// The fault behind a Failed or Errored outcome.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            Outcome::Failed(fault) | Outcome::Errored(fault) => Some(fault),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed(_) => "failed",
            Outcome::Errored(_) => "errored",
            Outcome::Skipped { .. } => "skipped",
        }
    }
}

// ============================================================================
// INVOCATION IDENTITY
// ============================================================================

/// Identifies one record: suite path, case name, parameter index and
/// repetition number. Suite-scope records (a suite whose own hooks failed)
/// carry no case name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationId {
    path: Vec<String>,
    case: Option<String>,
    parameter: Option<usize>,
    repetition: Option<u32>,
}

impl InvocationId {
    pub fn case(
        path: Vec<String>,
        case: String,
        parameter: Option<usize>,
        repetition: Option<u32>,
    ) -> Self {
        Self {
            path,
            case: Some(case),
            parameter,
            repetition,
        }
    }

    pub fn suite(path: Vec<String>) -> Self {
        Self {
            path,
            case: None,
            parameter: None,
            repetition: None,
        }
    }

    pub fn suite_path(&self) -> &[String] {
        &self.path
    }

    pub fn case_name(&self) -> Option<&str> {
        self.case.as_deref()
    }

    /// Zero-based index of the bound parameter tuple, for parameterized
    /// invocations.
    pub fn parameter(&self) -> Option<usize> {
        self.parameter
    }

    /// 1-based repetition number, for repeated invocations.
    pub fn repetition(&self) -> Option<u32> {
        self.repetition
    }

    pub fn is_suite_scope(&self) -> bool {
        self.case.is_none()
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.join("::"))?;
        if let Some(case) = &self.case {
            write!(f, "::{}", case)?;
        }
        if let Some(parameter) = self.parameter {
            write!(f, "[{}]", parameter)?;
        }
        if let Some(repetition) = self.repetition {
            write!(f, " (repetition {})", repetition)?;
        }
        Ok(())
    }
}

/// One record of the run: identity, outcome, and any cleanup faults that
/// followed the recorded one.
#[derive(Debug)]
pub struct InvocationRecord {
    pub id: InvocationId,
    pub outcome: Outcome,
    pub suppressed: Vec<Fault>,
}

// ============================================================================
// REPORT
// ============================================================================

/// Aggregated outcome of a suite run, keyed by invocation identity and kept
/// in execution order.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<InvocationRecord>,
}

impl Report {
    pub(crate) fn push(&mut self, record: InvocationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    /// Looks up a case-level outcome by its full identity.
    pub fn outcome_for(
        &self,
        path: &[&str],
        case: &str,
        parameter: Option<usize>,
        repetition: Option<u32>,
    ) -> Option<&Outcome> {
        self.records
            .iter()
            .find(|r| {
                r.id.suite_path() == path
                    && r.id.case_name() == Some(case)
                    && r.id.parameter() == parameter
                    && r.id.repetition() == repetition
            })
            .map(|r| &r.outcome)
    }

    /// Looks up the suite-scope outcome recorded when a suite's own hooks
    /// failed.
    pub fn suite_outcome_for(&self, path: &[&str]) -> Option<&Outcome> {
        self.records
            .iter()
            .find(|r| r.id.is_suite_scope() && r.id.suite_path() == path)
            .map(|r| &r.outcome)
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.records.len(),
            ..Summary::default()
        };
        for record in &self.records {
            match record.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed(_) => summary.failed += 1,
                Outcome::Errored(_) => summary.errored += 1,
                Outcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.records
            .iter()
            .any(|r| r.outcome.is_failed() || r.outcome.is_errored())
    }
}

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
}
