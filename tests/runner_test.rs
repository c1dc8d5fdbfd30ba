//! Unit loading: isolation of load failures and the exit-status law.

mod common;

use canopy::{discovery, Origin, OutcomeKind, Runner, Unit};
use pretty_assertions::assert_eq;

fn run_units(units: Vec<Unit>) -> common::Capture {
    common::run(|session| Runner::new(units).run(session))
}

#[test]
fn a_unit_that_fails_to_load_does_not_abort_its_neighbors() {
    let units = vec![
        Unit::new("test/one_test", |session| {
            session.scope("one", |s| s.test("passes", |t| t.assert(true, None)));
            Ok(())
        }),
        Unit::new("test/two_test", |_| Err("malformed declaration".into())),
        Unit::new("test/three_test", |session| {
            session.scope("three", |s| s.test("passes", |t| t.assert(true, None)));
            Ok(())
        }),
    ];

    let capture = run_units(units);
    assert_eq!(capture.markers, ".E.");
    assert_eq!(capture.registry.len(), 1);
    let outcome = &capture.registry.outcomes()[0];
    assert_eq!(outcome.kind, OutcomeKind::Errored);
    assert_eq!(outcome.origin, Origin::Unit("test/two_test".to_string()));
    assert_eq!(outcome.message.as_deref(), Some("malformed declaration"));
    assert_eq!(capture.registry.exit_status(), 1);
}

#[test]
fn a_panic_during_load_is_attributed_to_the_unit() {
    let units = vec![Unit::new("test/explodes_test", |_| {
        panic!("bad top-level declaration")
    })];

    let capture = run_units(units);
    assert_eq!(capture.markers, "E");
    let outcome = &capture.registry.outcomes()[0];
    assert_eq!(outcome.kind, OutcomeKind::Errored);
    assert_eq!(outcome.origin, Origin::Unit("test/explodes_test".to_string()));
    assert_eq!(
        outcome.message.as_deref(),
        Some("bad top-level declaration")
    );
    let location = outcome.location.as_ref().expect("panic site captured");
    assert!(location.file.ends_with("runner_test.rs"));
}

#[test]
fn an_erroring_test_does_not_abort_the_rest_of_its_unit() {
    let units = vec![Unit::new("test/mixed_test", |session| {
        session.scope("mixed", |s| {
            s.test("panics", |_| panic!("inside the body"));
            s.test("still runs", |t| t.assert(true, None));
        });
        Ok(())
    })];

    let capture = run_units(units);
    assert_eq!(capture.markers, "E.");
    assert_eq!(capture.registry.len(), 1);
}

#[test]
fn units_load_strictly_in_the_order_given() {
    let units = vec![
        Unit::new("test/b_test", |session| {
            session.scope("b", |s| s.test("marks", |t| t.flunk(Some("from b"))));
            Ok(())
        }),
        Unit::new("test/a_test", |session| {
            session.scope("a", |s| s.test("marks", |t| t.flunk(Some("from a"))));
            Ok(())
        }),
    ];

    let capture = run_units(units);
    let messages: Vec<&str> = capture
        .registry
        .outcomes()
        .iter()
        .map(|outcome| outcome.message.as_deref().unwrap())
        .collect();
    assert_eq!(messages, ["from b", "from a"]);
}

#[test]
fn skip_only_runs_succeed_while_any_failure_fails_the_run() {
    let skip_only = run_units(vec![Unit::new("test/skips_test", |session| {
        session.scope("skips", |s| s.test("opts out", |t| t.skip()));
        Ok(())
    })]);
    assert_eq!(skip_only.markers, "S");
    assert_eq!(skip_only.registry.exit_status(), 0);

    let failing = run_units(vec![Unit::new("test/fails_test", |session| {
        session.scope("fails", |s| s.test("fails", |t| t.flunk(None)));
        Ok(())
    })]);
    assert_eq!(failing.registry.exit_status(), 1);
}

#[test]
fn discovery_narrows_the_unit_list_before_the_run() {
    let units = vec![
        Unit::new("test/kept_test", |session| {
            session.scope("kept", |s| s.test("runs", |t| t.assert(true, None)));
            Ok(())
        }),
        Unit::new("bench/dropped_bench", |session| {
            session.scope("dropped", |s| {
                s.test("never runs", |t| t.flunk(Some("must never run")))
            });
            Ok(())
        }),
    ];

    let selected = discovery::select(units, Some("test/*_test")).unwrap();
    let capture = run_units(selected);
    assert_eq!(capture.markers, ".");
    assert!(capture.registry.is_empty());
}
