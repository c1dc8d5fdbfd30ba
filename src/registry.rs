//! The outcome registry: the run's single source of truth for everything
//! that needs attention.
//!
//! Registry invariant: one registry is constructed at the entrypoint of a
//! run and passed by reference into the runner, scopes, and tests. It is
//! append-only while the run executes and consumed exactly once at the
//! end, by the reporter and the exit-status computation. Never construct
//! a second, hidden registry.
//!
//! Passed tests are counted and marked but never recorded; only
//! failures, skips, and errors carry an entry.

use crate::errors::SourceLocation;

/// Progress marker for a passed test. Non-passing markers come from
/// [`OutcomeKind::marker`].
pub const PASS_MARKER: char = '.';

/// Classification of a recorded (non-passing) outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// An explicit assertion violation. Expected, recoverable, counted
    /// against the exit status.
    Failed,
    /// An explicit opt-out. Expected, never counted against the exit
    /// status.
    Skipped,
    /// Any unanticipated error, including unit load failures. Counted
    /// against the exit status.
    Errored,
}

impl OutcomeKind {
    /// Label used in the summary report.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Failed => "failure",
            OutcomeKind::Skipped => "skip",
            OutcomeKind::Errored => "error",
        }
    }

    /// Progress marker character for this outcome.
    pub fn marker(&self) -> char {
        match self {
            OutcomeKind::Failed => 'F',
            OutcomeKind::Skipped => 'S',
            OutcomeKind::Errored => 'E',
        }
    }

    /// True for the kinds that make the run exit nonzero.
    pub fn fails_the_run(&self) -> bool {
        matches!(self, OutcomeKind::Failed | OutcomeKind::Errored)
    }
}

/// What a recorded outcome is attributed to: an executed test, or a unit
/// that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Test(String),
    Unit(String),
}

impl Origin {
    pub fn label(&self) -> &'static str {
        match self {
            Origin::Test(_) => "test",
            Origin::Unit(_) => "unit",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Origin::Test(name) | Origin::Unit(name) => name,
        }
    }
}

/// A single recorded outcome.
#[derive(Debug)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub origin: Origin,
    /// Best-effort `{file, line}` of the failure: the assertion or skip
    /// call site for signals, the panic site for panics, the declaration
    /// site as a fallback.
    pub location: Option<SourceLocation>,
    /// Human-readable detail. Absent for skips.
    pub message: Option<String>,
    /// Captured execution trace, rendered only in verbose mode.
    pub trace: Option<String>,
}

/// Tally of recorded outcomes by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub failed: usize,
    pub skipped: usize,
    pub errored: usize,
}

/// The run-wide, append-only outcome collection.
#[derive(Debug, Default)]
pub struct OutcomeRegistry {
    outcomes: Vec<Outcome>,
}

impl OutcomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Recorded outcomes in the order they were appended.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn tally(&self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();
        for outcome in &self.outcomes {
            match outcome.kind {
                OutcomeKind::Failed => tally.failed += 1,
                OutcomeKind::Skipped => tally.skipped += 1,
                OutcomeKind::Errored => tally.errored += 1,
            }
        }
        tally
    }

    /// The process exit code for this run: 1 if any recorded outcome is a
    /// failure or an error, 0 otherwise. A registry holding only skips
    /// (or nothing) is a success — deliberate policy, not an oversight.
    pub fn exit_status(&self) -> i32 {
        let fails = self
            .outcomes
            .iter()
            .any(|outcome| outcome.kind.fails_the_run());
        if fails {
            1
        } else {
            0
        }
    }
}
