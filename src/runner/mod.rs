//! # Suite Runner
//!
//! Walks a suite tree in declaration order and produces a [`Report`].
//!
//! Execution model, per suite:
//! 1. Run the suite's own before-all hooks, once.
//! 2. Walk children in declaration order: recurse into nested suites with
//!    this suite's fixtures prepended to the inherited chain; expand
//!    repeated cases into numbered invocations and parameterized cases into
//!    one invocation per tuple; record disabled cases as Skipped without
//!    touching any hook.
//! 3. Run the suite's own after-all hooks, once.
//!
//! A failing suite-level hook marks the suite Errored and suppresses the
//! remaining cases of that suite only; sibling suites still run.

pub mod invoker;

use crate::errors::{Fault, HookScope};
use crate::report::{InvocationId, InvocationRecord, Outcome, Report};
use crate::suite::{CaseContext, FixtureRegistry, Suite, SuiteChild, TestCase};

/// Runs the suite tree and returns the aggregated report.
pub fn run(suite: &Suite) -> Report {
    let mut report = Report::default();
    let mut chain: Vec<&FixtureRegistry> = Vec::new();
    let mut path: Vec<String> = Vec::new();
    run_suite(suite, &mut chain, &mut path, &mut report);
    report
}

fn run_suite<'a>(
    suite: &'a Suite,
    chain: &mut Vec<&'a FixtureRegistry>,
    path: &mut Vec<String>,
    report: &mut Report,
) {
    path.push(suite.name().to_string());
    chain.push(suite.fixtures());

    let mut suite_fault: Option<Fault> = None;
    let mut suite_suppressed: Vec<Fault> = Vec::new();

    for hook in suite.fixtures().before_all() {
        if let Err(fault) = hook() {
            suite_fault = Some(Fault::hook(HookScope::BeforeAll, fault));
            break;
        }
    }

    if suite_fault.is_none() {
        for child in suite.children() {
            match child {
                SuiteChild::Suite(nested) => run_suite(nested, chain, path, report),
                SuiteChild::Case(case) => {
                    run_case(case, chain.as_slice(), path.as_slice(), report)
                }
            }
        }
    }

    // Cleanup is attempted even when setup failed. Within the after-all
    // list itself there is no error recovery: the first failure aborts the
    // remaining after-all hooks.
    for hook in suite.fixtures().after_all() {
        if let Err(fault) = hook() {
            let fault = Fault::hook(HookScope::AfterAll, fault);
            if suite_fault.is_none() {
                suite_fault = Some(fault);
            } else {
                suite_suppressed.push(fault);
            }
            break;
        }
    }

    if let Some(fault) = suite_fault {
        report.push(InvocationRecord {
            id: InvocationId::suite(path.clone()),
            outcome: Outcome::Errored(fault),
            suppressed: suite_suppressed,
        });
    }

    chain.pop();
    path.pop();
}

fn run_case(case: &TestCase, chain: &[&FixtureRegistry], path: &[String], report: &mut Report) {
    if !case.is_enabled() {
        report.push(InvocationRecord {
            id: InvocationId::case(path.to_vec(), case.name().to_string(), None, None),
            outcome: Outcome::Skipped {
                reason: "case is disabled".to_string(),
            },
            suppressed: Vec::new(),
        });
        return;
    }

    // A parameter source takes precedence over a repeat count; the two are
    // never multiplied.
    if let Some(sets) = case.parameter_sets() {
        for set in sets {
            let display = format!("{} [{}]", case.display_name(), set);
            let ctx = CaseContext::new(display, path.to_vec(), None, Some(set.clone()));
            let id = InvocationId::case(
                path.to_vec(),
                case.name().to_string(),
                Some(set.index()),
                None,
            );
            report.push(invoker::invoke(case, chain, &ctx, id));
        }
        return;
    }

    let total = case.repeat();
    if total > 1 {
        for current in 1..=total {
            let display = format!(
                "{} (repetition {} of {})",
                case.display_name(),
                current,
                total
            );
            let ctx = CaseContext::new(display, path.to_vec(), Some((current, total)), None);
            let id = InvocationId::case(
                path.to_vec(),
                case.name().to_string(),
                None,
                Some(current),
            );
            report.push(invoker::invoke(case, chain, &ctx, id));
        }
        return;
    }

    let ctx = CaseContext::new(case.display_name().to_string(), path.to_vec(), None, None);
    let id = InvocationId::case(path.to_vec(), case.name().to_string(), None, None);
    report.push(invoker::invoke(case, chain, &ctx, id));
}
