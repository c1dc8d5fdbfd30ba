//! The runner: loads an ordered sequence of test-definition units.
//!
//! Loading a unit means invoking its load routine, which declares
//! top-level scopes against the session as a side effect — those scopes
//! (and the tests inside them) execute synchronously during the load, per
//! the declaration-is-execution model. A unit that fails to load — by
//! returning an error or by panicking — contributes exactly one errored
//! outcome attributed to the unit and never aborts the run; the remaining
//! units are processed in order.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::panic_capture;
use crate::registry::{Origin, Outcome, OutcomeKind};
use crate::session::Session;

/// Result type returned by a unit's load routine.
pub type LoadResult = Result<(), Box<dyn std::error::Error>>;

/// A loadable test-definition unit: a name and a load routine.
///
/// Names are path-like by convention (`test/scope_test`) so glob-based
/// unit selection reads the same as file-glob discovery would.
pub struct Unit {
    name: String,
    load: Box<dyn Fn(&mut Session<'_>) -> LoadResult>,
}

impl Unit {
    pub fn new<F>(name: impl Into<String>, load: F) -> Self
    where
        F: Fn(&mut Session<'_>) -> LoadResult + 'static,
    {
        Self {
            name: name.into(),
            load: Box::new(load),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

pub struct Runner {
    units: Vec<Unit>,
}

impl Runner {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    /// Loads every unit, strictly in the order given.
    pub fn run(&self, session: &mut Session<'_>) {
        for unit in &self.units {
            load_unit(unit, session);
        }
    }
}

fn load_unit(unit: &Unit, session: &mut Session<'_>) {
    panic_capture::install();
    let guard = panic_capture::guard();
    let loaded = {
        let session = &mut *session;
        catch_unwind(AssertUnwindSafe(|| (unit.load)(session)))
    };
    drop(guard);

    let (message, location, trace) = match loaded {
        Ok(Ok(())) => return,
        Ok(Err(error)) => (error.to_string(), None, None),
        Err(_) => match panic_capture::take_last() {
            Some(panic) => (panic.message, panic.location, Some(panic.trace)),
            None => ("unit failed to load".to_string(), None, None),
        },
    };

    let outcome = Outcome {
        kind: OutcomeKind::Errored,
        origin: Origin::Unit(unit.name.clone()),
        location,
        message: Some(message),
        trace,
    };
    session.sink.marker(outcome.kind.marker());
    session.registry.record(outcome);
}
