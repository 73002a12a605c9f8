//! Lifecycle invariants: hook counts, ordering, and teardown guarantees.

use std::cell::RefCell;
use std::rc::Rc;

use scaffold::report::Outcome;
use scaffold::runner;
use scaffold::suite::{Suite, TestCase};
use scaffold::{Fault, FaultCategory};

type Log = Rc<RefCell<Vec<String>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn push(log: &Log, entry: &str) {
    log.borrow_mut().push(entry.to_string());
}

fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| *e == entry).count()
}

#[test]
fn suite_hooks_run_exactly_once_regardless_of_case_count() {
    let events = new_log();
    let (setup, teardown) = (events.clone(), events.clone());
    let mut suite = Suite::new("root")
        .before_all(move || {
            push(&setup, "before-all");
            Ok(())
        })
        .after_all(move || {
            push(&teardown, "after-all");
            Ok(())
        });
    for name in ["a", "b", "c"] {
        suite = suite.case(TestCase::new(name, |_| Ok(())));
    }

    let report = runner::run(&suite);

    assert_eq!(report.summary().passed, 3);
    assert_eq!(count(&events, "before-all"), 1);
    assert_eq!(count(&events, "after-all"), 1);
}

#[test]
fn each_hooks_wrap_every_repetition() {
    let events = new_log();
    let (setup, teardown) = (events.clone(), events.clone());
    let suite = Suite::new("root")
        .before_each(move |_| {
            push(&setup, "before-each");
            Ok(())
        })
        .after_each(move |_| {
            push(&teardown, "after-each");
            Ok(())
        })
        .case(TestCase::new("again", |_| Ok(())).repeated(4));

    let report = runner::run(&suite);

    assert_eq!(report.summary().passed, 4);
    assert_eq!(count(&events, "before-each"), 4);
    assert_eq!(count(&events, "after-each"), 4);
}

#[test]
fn each_hooks_wrap_every_parameter_tuple() {
    use scaffold::params::ParameterSource;

    let events = new_log();
    let setup = events.clone();
    let source = ParameterSource::Values(vec!["abcd".into(), "defgh".into(), "1234".into()]);
    let case = TestCase::parameterized("lengths", source, |ctx| {
        scaffold::assert::is_true(!ctx.args()?.text(0)?.is_empty(), "a non-empty value")
    })
    .expect("value sources always expand");
    let suite = Suite::new("root")
        .before_each(move |_| {
            push(&setup, "before-each");
            Ok(())
        })
        .case(case);

    let report = runner::run(&suite);

    assert_eq!(report.summary().passed, 3);
    assert_eq!(count(&events, "before-each"), 3);
}

#[test]
fn setup_runs_outer_to_inner_and_teardown_inner_to_outer() {
    let events = new_log();
    let (outer_setup, outer_teardown) = (events.clone(), events.clone());
    let (inner_setup, inner_teardown) = (events.clone(), events.clone());
    let body_log = events.clone();

    let inner = Suite::new("inner")
        .before_each(move |_| {
            push(&inner_setup, "inner-setup");
            Ok(())
        })
        .after_each(move |_| {
            push(&inner_teardown, "inner-teardown");
            Ok(())
        })
        .case(TestCase::new("observe", move |_| {
            push(&body_log, "body");
            Ok(())
        }));
    let root = Suite::new("outer")
        .before_each(move |_| {
            push(&outer_setup, "outer-setup");
            Ok(())
        })
        .after_each(move |_| {
            push(&outer_teardown, "outer-teardown");
            Ok(())
        })
        .child(inner);

    let report = runner::run(&root);

    assert_eq!(report.summary().passed, 1);
    assert_eq!(
        *events.borrow(),
        vec![
            "outer-setup",
            "inner-setup",
            "body",
            "inner-teardown",
            "outer-teardown"
        ]
    );
}

#[test]
fn hooks_in_one_slot_run_in_registration_order() {
    let events = new_log();
    let (first, second) = (events.clone(), events.clone());
    let suite = Suite::new("root")
        .before_each(move |_| {
            push(&first, "first");
            Ok(())
        })
        .before_each(move |_| {
            push(&second, "second");
            Ok(())
        })
        .case(TestCase::new("observe", |_| Ok(())));

    runner::run(&suite);

    assert_eq!(*events.borrow(), vec!["first", "second"]);
}

#[test]
fn teardown_runs_after_a_failing_body() {
    let events = new_log();
    let teardown = events.clone();
    let suite = Suite::new("root")
        .after_each(move |_| {
            push(&teardown, "cleanup");
            Ok(())
        })
        .case(TestCase::new("doomed", |_| {
            Err(Fault::assertion("deliberate mismatch"))
        }));

    let report = runner::run(&suite);

    let outcome = report
        .outcome_for(&["root"], "doomed", None, None)
        .expect("the invocation must be recorded");
    assert!(outcome.is_failed());
    assert_eq!(count(&events, "cleanup"), 1);
}

#[test]
fn cleanup_faults_after_a_failure_are_suppressed_not_dropped() {
    let suite = Suite::new("root")
        .after_each(|_| Err(Fault::unexpected("cleanup broke too")))
        .case(TestCase::new("doomed", |_| {
            Err(Fault::assertion("deliberate mismatch"))
        }));

    let report = runner::run(&suite);

    let record = &report.records()[0];
    assert!(record.outcome.is_failed(), "the body fault stays primary");
    assert_eq!(record.suppressed.len(), 1);
    assert_eq!(record.suppressed[0].category(), FaultCategory::Hook);
}

#[test]
fn a_failing_cleanup_alone_errors_the_invocation() {
    let suite = Suite::new("root")
        .after_each(|_| Err(Fault::unexpected("cleanup broke")))
        .case(TestCase::new("fine-body", |_| Ok(())));

    let report = runner::run(&suite);

    let outcome = report
        .outcome_for(&["root"], "fine-body", None, None)
        .expect("the invocation must be recorded");
    match outcome {
        Outcome::Errored(fault) => assert_eq!(fault.category(), FaultCategory::Hook),
        other => panic!("expected an errored outcome, got {}", other.status()),
    }
}

#[test]
fn failing_setup_skips_the_body_but_cleanup_still_runs() {
    let events = new_log();
    let (body_log, teardown) = (events.clone(), events.clone());
    let suite = Suite::new("root")
        .before_each(|_| Err(Fault::unexpected("fixture broke")))
        .after_each(move |_| {
            push(&teardown, "cleanup");
            Ok(())
        })
        .case(TestCase::new("never-runs", move |_| {
            push(&body_log, "body");
            Ok(())
        }));

    let report = runner::run(&suite);

    let outcome = report
        .outcome_for(&["root"], "never-runs", None, None)
        .expect("the invocation must be recorded");
    assert!(outcome.is_errored());
    assert_eq!(count(&events, "body"), 0);
    assert_eq!(count(&events, "cleanup"), 1);
}

#[test]
fn disabled_case_records_one_skip_and_touches_no_hooks() {
    let events = new_log();
    let (setup, teardown, body_log) = (events.clone(), events.clone(), events.clone());
    let suite = Suite::new("root")
        .before_each(move |_| {
            push(&setup, "before-each");
            Ok(())
        })
        .after_each(move |_| {
            push(&teardown, "after-each");
            Ok(())
        })
        .case(
            TestCase::new("ignored", move |_| {
                push(&body_log, "body");
                Ok(())
            })
            .disabled(),
        );

    let report = runner::run(&suite);

    assert_eq!(report.records().len(), 1);
    assert_eq!(report.summary().skipped, 1);
    assert!(events.borrow().is_empty());
}
