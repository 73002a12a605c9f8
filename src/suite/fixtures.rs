//! Ordered fixture hooks for a suite.
//!
//! Suite-level hooks (before-all/after-all) run exactly once per suite;
//! case-level hooks (before-each/after-each) run exactly once per
//! invocation, including once per repetition and once per parameter tuple.
//! Multiple hooks in one slot execute in registration order.

use crate::errors::Fault;
use crate::suite::case::CaseContext;

/// A suite-level hook: no per-case context exists when it runs.
pub type SuiteHook = Box<dyn Fn() -> Result<(), Fault>>;

/// A case-level hook, handed the context of the invocation it wraps.
pub type CaseHook = Box<dyn Fn(&CaseContext) -> Result<(), Fault>>;

/// Holds the ordered hook lists for one suite.
#[derive(Default)]
pub struct FixtureRegistry {
    before_all: Vec<SuiteHook>,
    after_all: Vec<SuiteHook>,
    before_each: Vec<CaseHook>,
    after_each: Vec<CaseHook>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_before_all(&mut self, hook: impl Fn() -> Result<(), Fault> + 'static) {
        self.before_all.push(Box::new(hook));
    }

    pub fn register_after_all(&mut self, hook: impl Fn() -> Result<(), Fault> + 'static) {
        self.after_all.push(Box::new(hook));
    }

    pub fn register_before_each(
        &mut self,
        hook: impl Fn(&CaseContext) -> Result<(), Fault> + 'static,
    ) {
        self.before_each.push(Box::new(hook));
    }

    pub fn register_after_each(
        &mut self,
        hook: impl Fn(&CaseContext) -> Result<(), Fault> + 'static,
    ) {
        self.after_each.push(Box::new(hook));
    }

    pub fn before_all(&self) -> &[SuiteHook] {
        &self.before_all
    }

    pub fn after_all(&self) -> &[SuiteHook] {
        &self.after_all
    }

    pub fn before_each(&self) -> &[CaseHook] {
        &self.before_each
    }

    pub fn after_each(&self) -> &[CaseHook] {
        &self.after_each
    }
}
