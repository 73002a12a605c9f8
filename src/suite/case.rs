//! Case declarations and the per-invocation context handed to bodies and
//! hooks.

use std::time::Duration;

use crate::errors::Fault;
use crate::params::{self, ParameterSet, ParameterSource};

/// What a case body (or hook) returns.
pub type CaseResult = Result<(), Fault>;

/// An executable case body. Bodies receive the invocation context and signal
/// failure by returning a fault; assertion faults map to Failed, anything
/// else to Errored.
pub type CaseBody = Box<dyn Fn(&CaseContext) -> CaseResult>;

/// Per-invocation context: who is running, where in the tree, which
/// repetition, and which argument tuple.
#[derive(Debug, Clone)]
pub struct CaseContext {
    display_name: String,
    path: Vec<String>,
    repetition: Option<(u32, u32)>,
    arguments: Option<ParameterSet>,
}

impl CaseContext {
    pub(crate) fn new(
        display_name: String,
        path: Vec<String>,
        repetition: Option<(u32, u32)>,
        arguments: Option<ParameterSet>,
    ) -> Self {
        Self {
            display_name,
            path,
            repetition,
            arguments,
        }
    }

    /// The decorated name of this invocation, including repetition or
    /// argument rendering where applicable.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Suite names from the root down to the owning suite.
    pub fn suite_path(&self) -> &[String] {
        &self.path
    }

    /// `(current, total)` for repeated cases, 1-based.
    pub fn repetition(&self) -> Option<(u32, u32)> {
        self.repetition
    }

    pub fn arguments(&self) -> Option<&ParameterSet> {
        self.arguments.as_ref()
    }

    /// The bound argument tuple; a fault if the case is not parameterized.
    pub fn args(&self) -> Result<&ParameterSet, Fault> {
        self.arguments
            .as_ref()
            .ok_or_else(|| Fault::unexpected("case has no bound parameters"))
    }
}

/// One declared, independently executable unit of verification.
///
/// Cases are immutable once registered on a [`Suite`](crate::suite::Suite):
/// the builder methods consume and return the case, and nothing mutates it
/// afterwards. Parameter sources are expanded eagerly here so malformed
/// declarations fail at registration, before anything runs.
pub struct TestCase {
    name: String,
    label: Option<String>,
    body: CaseBody,
    enabled: bool,
    repeat: u32,
    budget: Option<Duration>,
    parameters: Option<Vec<ParameterSet>>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&CaseContext) -> CaseResult + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: None,
            body: Box::new(body),
            enabled: true,
            repeat: 1,
            budget: None,
            parameters: None,
        }
    }

    /// Declares a parameterized case. Expansion happens now; a bad table
    /// shape or conversion failure rejects this case and nothing else.
    pub fn parameterized(
        name: impl Into<String>,
        source: ParameterSource,
        body: impl Fn(&CaseContext) -> CaseResult + 'static,
    ) -> Result<Self, Fault> {
        let sets = params::expand(&source)?;
        let mut case = Self::new(name, body);
        case.parameters = Some(sets);
        Ok(case)
    }

    /// Attaches a human-readable display label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks the case disabled: it records exactly one Skipped result and
    /// no hooks run for it.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Runs the body `count` times, each repetition numbered. Counts below
    /// one are treated as one.
    pub fn repeated(mut self, count: u32) -> Self {
        self.repeat = count.max(1);
        self
    }

    /// Attaches a wall-clock budget. The body runs to completion; exceeding
    /// the budget records the invocation as Failed with a timeout fault.
    pub fn budgeted(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The label when present, the name otherwise.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    pub fn parameter_sets(&self) -> Option<&[ParameterSet]> {
        self.parameters.as_deref()
    }

    pub(crate) fn run_body(&self, ctx: &CaseContext) -> CaseResult {
        (self.body)(ctx)
    }
}
