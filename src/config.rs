//! Run configuration: selectors, verbosity, and color choice.
//!
//! Selector and verbosity inputs come from the environment (with CLI
//! flags layered on top by the `cli` module) and are read exactly once,
//! when the configuration is built. Scopes and tests consult this struct,
//! never the environment, so execution stays deterministic for the whole
//! run.

use std::env;

/// Environment variable naming the single scope to run.
pub const SCOPE_ENV: &str = "CANOPY_SCOPE";
/// Environment variable naming the single test to run.
pub const TEST_ENV: &str = "CANOPY_TEST";
/// Environment variable enabling backtraces in the summary report.
pub const BACKTRACE_ENV: &str = "CANOPY_BACKTRACE";

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// When set, only the root-level scope with exactly this name runs.
    pub scope_filter: Option<String>,
    /// When set, only tests with exactly this name run.
    pub test_filter: Option<String>,
    /// Show captured execution traces with each reported failure.
    pub show_backtrace: bool,
    /// Colorize markers and the summary report.
    pub use_colors: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scope_filter: None,
            test_filter: None,
            show_backtrace: false,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl RunConfig {
    /// Builds a configuration from the environment. Empty variables count
    /// as unset.
    pub fn from_env() -> Self {
        Self {
            scope_filter: env::var(SCOPE_ENV).ok().filter(|v| !v.is_empty()),
            test_filter: env::var(TEST_ENV).ok().filter(|v| !v.is_empty()),
            show_backtrace: flag_set(BACKTRACE_ENV),
            ..Self::default()
        }
    }

    /// Whether a root-level scope with this name runs. Nested scopes do
    /// not consult this: selection latches once a root scope matches.
    pub fn scope_selected(&self, name: &str) -> bool {
        match &self.scope_filter {
            None => true,
            Some(filter) => filter == name,
        }
    }

    /// Whether a test with this name runs.
    pub fn test_selected(&self, name: &str) -> bool {
        match &self.test_filter {
            None => true,
            Some(filter) => filter == name,
        }
    }
}

fn flag_set(name: &str) -> bool {
    env::var(name)
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}
