//! # Suite Model
//!
//! The declaration side of the executor: suites group cases and nested
//! suites, in declaration order, around a shared [`FixtureRegistry`].
//!
//! ## Module Structure
//!
//! - **`case`**: case declarations and the per-invocation context
//! - **`fixtures`**: ordered suite-level and case-level hook lists
//!
//! A child suite inherits its ancestors' case-level hooks at run time:
//! before-each hooks apply outer-to-inner, after-each inner-to-outer. The
//! runner composes the chains by walking parent references; nothing is
//! copied into the child.

pub mod case;
pub mod fixtures;

pub use case::{CaseBody, CaseContext, CaseResult, TestCase};
pub use fixtures::{CaseHook, FixtureRegistry, SuiteHook};

use crate::errors::Fault;

/// A suite child, kept in declaration order so runs are deterministic.
pub enum SuiteChild {
    Case(TestCase),
    Suite(Suite),
}

/// A named grouping of cases and nested suites sharing fixtures.
///
/// Built by chaining registration calls; immutable once handed to the
/// runner.
pub struct Suite {
    name: String,
    fixtures: FixtureRegistry,
    children: Vec<SuiteChild>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixtures: FixtureRegistry::new(),
            children: Vec::new(),
        }
    }

    /// Registers a case at the current position in declaration order.
    pub fn case(mut self, case: TestCase) -> Self {
        self.children.push(SuiteChild::Case(case));
        self
    }

    /// Registers a nested suite at the current position in declaration
    /// order.
    pub fn child(mut self, suite: Suite) -> Self {
        self.children.push(SuiteChild::Suite(suite));
        self
    }

    pub fn before_all(mut self, hook: impl Fn() -> Result<(), Fault> + 'static) -> Self {
        self.fixtures.register_before_all(hook);
        self
    }

    pub fn after_all(mut self, hook: impl Fn() -> Result<(), Fault> + 'static) -> Self {
        self.fixtures.register_after_all(hook);
        self
    }

    pub fn before_each(
        mut self,
        hook: impl Fn(&CaseContext) -> Result<(), Fault> + 'static,
    ) -> Self {
        self.fixtures.register_before_each(hook);
        self
    }

    pub fn after_each(
        mut self,
        hook: impl Fn(&CaseContext) -> Result<(), Fault> + 'static,
    ) -> Self {
        self.fixtures.register_after_each(hook);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fixtures(&self) -> &FixtureRegistry {
        &self.fixtures
    }

    pub fn children(&self) -> &[SuiteChild] {
        &self.children
    }
}
