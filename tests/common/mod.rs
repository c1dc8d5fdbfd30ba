//! Shared capture harness for the integration tests: runs declarations
//! against an in-memory session and hands back the recorded outcomes and
//! the marker stream.

#![allow(dead_code)]

use canopy::cli::output::OutputBuffer;
use canopy::{OutcomeRegistry, RunConfig, Session};

pub struct Capture {
    pub registry: OutcomeRegistry,
    pub markers: String,
}

/// A configuration with no selectors and no terminal concerns.
pub fn plain_config() -> RunConfig {
    RunConfig {
        scope_filter: None,
        test_filter: None,
        show_backtrace: false,
        use_colors: false,
    }
}

/// Runs `declare` against a fresh session under `config`.
pub fn run_with(config: RunConfig, declare: impl FnOnce(&mut Session)) -> Capture {
    let mut sink = OutputBuffer::new();
    let registry = {
        let mut session = Session::new(config, &mut sink);
        declare(&mut session);
        session.finish()
    };
    Capture {
        registry,
        markers: sink.markers().to_string(),
    }
}

/// Runs `declare` with no selectors configured.
pub fn run(declare: impl FnOnce(&mut Session)) -> Capture {
    run_with(plain_config(), declare)
}
