//! Single-invocation execution: setup chain, body, teardown chain.

use std::time::Instant;

use crate::errors::{Fault, FaultCategory, HookScope};
use crate::report::{InvocationId, InvocationRecord, Outcome};
use crate::suite::{CaseContext, FixtureRegistry, TestCase};

/// Runs one concrete invocation of `case` inside the inherited fixture
/// chain (outermost registry first).
///
/// Before-each hooks run outer-to-inner; a failure skips the body and the
/// remaining setup. After-each hooks run inner-to-outer unconditionally.
/// The first fault observed becomes the outcome; faults raised by later
/// cleanup are attached as suppressed, never dropped.
pub fn invoke(
    case: &TestCase,
    chain: &[&FixtureRegistry],
    ctx: &CaseContext,
    id: InvocationId,
) -> InvocationRecord {
    let mut primary: Option<Fault> = None;
    let mut suppressed: Vec<Fault> = Vec::new();

    'setup: for registry in chain {
        for hook in registry.before_each() {
            if let Err(fault) = hook(ctx) {
                primary = Some(Fault::hook(HookScope::BeforeEach, fault));
                break 'setup;
            }
        }
    }

    if primary.is_none() {
        let started = Instant::now();
        match case.run_body(ctx) {
            Ok(()) => {
                if let Some(budget) = case.budget() {
                    let elapsed = started.elapsed();
                    if elapsed > budget {
                        primary = Some(Fault::timeout(budget, elapsed));
                    }
                }
            }
            Err(fault) => primary = Some(fault),
        }
    }

    for registry in chain.iter().rev() {
        for hook in registry.after_each() {
            if let Err(fault) = hook(ctx) {
                let fault = Fault::hook(HookScope::AfterEach, fault);
                if primary.is_none() {
                    primary = Some(fault);
                } else {
                    suppressed.push(fault);
                }
            }
        }
    }

    let outcome = match primary {
        None => Outcome::Passed,
        Some(fault) => classify(fault),
    };
    InvocationRecord {
        id,
        outcome,
        suppressed,
    }
}

/// Assertion violations and exceeded budgets are failures of the case;
/// everything else is an error of the run.
fn classify(fault: Fault) -> Outcome {
    match fault.category() {
        FaultCategory::Assertion | FaultCategory::Timeout => Outcome::Failed(fault),
        _ => Outcome::Errored(fault),
    }
}
