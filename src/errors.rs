//! Canopy error handling.
//!
//! Everything a test body can raise flows through one channel: a boxed
//! error returned from the body (or a panic, for truly unanticipated
//! failures). The framework's own control-flow signals — assertion
//! failure, skip, unexpected condition — are variants of [`Signal`], a
//! plain error type that boxes cleanly and is recovered by downcast at
//! exactly one boundary: test execution. Nothing is caught anywhere else.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;

use thiserror::Error;

use crate::value::Value;

/// Result type returned by test bodies and lifecycle hooks.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Result type returned by helper routines.
pub type HelperResult = Result<Value, Box<dyn std::error::Error>>;

/// A `{file, line}` pair identifying where in the caller's code a signal
/// was raised or a declaration was made.
///
/// Captured through `#[track_caller]`, so the location always points at
/// the first frame belonging to the run, never at framework internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    /// Captures the location of the nearest non-`track_caller` caller.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// The tagged outcome signal raised inside a test's execution.
///
/// Three variants: continue-with-failure, continue-with-skip, and
/// unexpected. `Fail` and `Skip` are the expected, recoverable signals of
/// the assertion surface; `Unexpected` marks conditions the test did not
/// anticipate (a missing helper, for instance) and classifies as an
/// error rather than a failure.
#[derive(Debug, Error)]
pub enum Signal {
    #[error("{message}")]
    Fail {
        message: String,
        location: SourceLocation,
        trace: String,
    },
    #[error("test skipped")]
    Skip { location: SourceLocation },
    #[error("{message}")]
    Unexpected {
        message: String,
        location: SourceLocation,
        trace: String,
    },
}

impl Signal {
    /// Raises the failure signal with the given message, stamped with the
    /// caller's location.
    #[track_caller]
    pub fn fail(message: impl Into<String>) -> Self {
        Signal::Fail {
            message: message.into(),
            location: SourceLocation::caller(),
            trace: Backtrace::force_capture().to_string(),
        }
    }

    /// Raises the skip signal, stamped with the caller's location.
    #[track_caller]
    pub fn skip() -> Self {
        Signal::Skip {
            location: SourceLocation::caller(),
        }
    }

    /// Raises the unexpected-condition signal.
    #[track_caller]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Signal::Unexpected {
            message: message.into(),
            location: SourceLocation::caller(),
            trace: Backtrace::force_capture().to_string(),
        }
    }

    /// The location the signal was raised at.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Signal::Fail { location, .. }
            | Signal::Skip { location }
            | Signal::Unexpected { location, .. } => location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_carry_the_caller_location() {
        let signal = Signal::fail("boom");
        assert!(signal.location().file.ends_with("errors.rs"));
        assert!(signal.location().line > 0);
    }

    #[test]
    fn signals_survive_a_round_trip_through_boxed_errors() {
        let raised: Box<dyn std::error::Error> = Box::new(Signal::skip());
        let recovered = raised.downcast::<Signal>().expect("signal comes back out");
        assert!(matches!(*recovered, Signal::Skip { .. }));
    }
}
