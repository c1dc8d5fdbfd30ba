// Canopy self-test binary: registers a small, deterministic suite that
// exercises every outcome kind, so the marker stream, summary report, and
// exit status can be verified end to end.
// Usage: cargo run --bin selftest [pattern] [--scope NAME] [--test NAME]

use canopy::{cli, LoadResult, Session, Unit, Value};

fn main() {
    cli::main(units())
}

fn units() -> Vec<Unit> {
    vec![
        Unit::new("selftest/scope_test", scope_unit),
        Unit::new("selftest/outcome_test", outcome_unit),
        Unit::new("selftest/broken_test", broken_unit),
    ]
}

/// Helpers, hooks, and nesting, all passing.
fn scope_unit(session: &mut Session) -> LoadResult {
    session.scope("composition", |s| {
        s.helper("greeting", |_| Ok(Value::from("hello")));
        s.setup(|t| {
            let greeting = t.call("greeting")?;
            t.set("greeting", greeting);
            Ok(())
        });

        s.test("helper values reach the scratch state", |t| {
            t.assert(t.get("greeting") == Some(Value::from("hello")), None)
        });

        s.scope("nested", |inner| {
            inner.helper("audience", |_| Ok(Value::from("world")));
            inner.test("inherits outer helpers", |t| {
                t.assert(t.has_helper("greeting"), None)?;
                t.assert(t.has_helper("audience"), None)
            });
        });
    });
    Ok(())
}

/// One of each non-passing classification.
fn outcome_unit(session: &mut Session) -> LoadResult {
    session.scope("outcomes", |s| {
        s.test("fails deliberately", |t| t.flunk(Some("deliberate failure")));
        s.test("skips deliberately", |t| t.skip());
        s.test("errors deliberately", |_| panic!("deliberate panic"));
    });
    Ok(())
}

/// A unit that fails to load.
fn broken_unit(_session: &mut Session) -> LoadResult {
    Err("malformed declaration".into())
}
