//! Test execution: the one boundary where every failure mode is caught.
//!
//! A test runs its inherited setup chain, its body, and its inherited
//! teardown chain against a fresh [`TestContext`], then classifies
//! whatever unwound out of them — first matching rule wins:
//!
//! | condition                        | classification | marker |
//! |----------------------------------|----------------|--------|
//! | no signal or panic escapes       | Passed         | `.`    |
//! | the failure signal is raised     | Failed         | `F`    |
//! | the skip signal is raised        | Skipped        | `S`    |
//! | any other error or panic escapes | Errored        | `E`    |
//!
//! Teardown runs unconditionally once setup has completed, even when the
//! body failed, skipped, or errored. When a setup action itself raises,
//! the remaining setup chain and the body are aborted and teardown does
//! NOT run — observed behavior of the source system, kept as documented,
//! ambiguous behavior rather than silently fixed.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::capability::Capabilities;
use crate::context::TestContext;
use crate::errors::{Signal, SourceLocation, TestResult};
use crate::panic_capture;
use crate::registry::{Origin, Outcome, OutcomeKind, PASS_MARKER};
use crate::session::Session;

/// How one step (hook or body) of a test's execution unwound.
pub(crate) enum Verdict {
    Pass,
    Fail {
        message: String,
        location: SourceLocation,
        trace: String,
    },
    Skip {
        location: SourceLocation,
    },
    Error {
        message: String,
        location: Option<SourceLocation>,
        trace: Option<String>,
    },
}

impl Verdict {
    fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    fn from_signal(signal: Signal) -> Self {
        match signal {
            Signal::Fail {
                message,
                location,
                trace,
            } => Verdict::Fail {
                message,
                location,
                trace,
            },
            Signal::Skip { location } => Verdict::Skip { location },
            Signal::Unexpected {
                message,
                location,
                trace,
            } => Verdict::Error {
                message,
                location: Some(location),
                trace: Some(trace),
            },
        }
    }
}

/// Declares and, iff selected, immediately executes one test. Emits
/// exactly one marker per executed test and appends exactly one registry
/// entry when the test did not pass.
pub(crate) fn run_case<F>(
    session: &mut Session<'_>,
    name: &str,
    caps: Capabilities,
    declared_at: SourceLocation,
    body: F,
) where
    F: FnOnce(&mut TestContext) -> TestResult,
{
    if !session.config.test_selected(name) {
        return;
    }

    panic_capture::install();
    let mut ctx = TestContext::new(name, caps.helpers.clone());

    let mut verdict = run_chain(&mut ctx, &caps.setup);
    if verdict.is_pass() {
        verdict = execute(&mut ctx, body);
        // Teardown is unconditional once setup has completed. The body's
        // outcome takes precedence; a teardown failure surfaces only when
        // the body passed.
        let teardown = run_chain(&mut ctx, &caps.teardown);
        if verdict.is_pass() {
            verdict = teardown;
        }
    }

    record(session, Origin::Test(name.to_string()), Some(declared_at), verdict);
}

/// Runs hook routines in order, stopping at the first that does not pass.
fn run_chain(
    ctx: &mut TestContext,
    hooks: &[crate::capability::HookFn],
) -> Verdict {
    for hook in hooks {
        let verdict = execute(ctx, |ctx| hook(ctx));
        if !verdict.is_pass() {
            return verdict;
        }
    }
    Verdict::Pass
}

/// Runs one step of a test's execution and classifies how it unwound.
/// Panics are intercepted here; signals are recovered by downcast; any
/// other boxed error classifies as Errored.
pub(crate) fn execute<F>(ctx: &mut TestContext, step: F) -> Verdict
where
    F: FnOnce(&mut TestContext) -> TestResult,
{
    let guard = panic_capture::guard();
    let unwound = catch_unwind(AssertUnwindSafe(|| step(ctx)));
    drop(guard);

    match unwound {
        Ok(Ok(())) => Verdict::Pass,
        Ok(Err(raised)) => match raised.downcast::<Signal>() {
            Ok(signal) => Verdict::from_signal(*signal),
            Err(other) => Verdict::Error {
                message: other.to_string(),
                location: None,
                trace: None,
            },
        },
        Err(_) => match panic_capture::take_last() {
            Some(panic) => Verdict::Error {
                message: panic.message,
                location: panic.location,
                trace: Some(panic.trace),
            },
            None => Verdict::Error {
                message: "test panicked".to_string(),
                location: None,
                trace: None,
            },
        },
    }
}

/// Emits the progress marker and, for non-passing verdicts, appends the
/// outcome to the registry. `fallback` is the declaration site, used when
/// the verdict carries no better location.
pub(crate) fn record(
    session: &mut Session<'_>,
    origin: Origin,
    fallback: Option<SourceLocation>,
    verdict: Verdict,
) {
    let outcome = match verdict {
        Verdict::Pass => {
            session.sink.marker(PASS_MARKER);
            return;
        }
        Verdict::Fail {
            message,
            location,
            trace,
        } => Outcome {
            kind: OutcomeKind::Failed,
            origin,
            location: Some(location),
            message: Some(message),
            trace: Some(trace),
        },
        Verdict::Skip { location } => Outcome {
            kind: OutcomeKind::Skipped,
            origin,
            location: Some(location),
            message: None,
            trace: None,
        },
        Verdict::Error {
            message,
            location,
            trace,
        } => Outcome {
            kind: OutcomeKind::Errored,
            origin,
            location: location.or(fallback),
            message: Some(message),
            trace,
        },
    };
    session.sink.marker(outcome.kind.marker());
    session.registry.record(outcome);
}
