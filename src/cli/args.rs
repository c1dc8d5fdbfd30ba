//! Defines the command-line arguments for a Canopy harness binary.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure. Flags layer over
//! the `CANOPY_*` environment variables; a flag wins when both are given.

use clap::Parser;

use crate::config::RunConfig;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "canopy",
    version,
    about = "A minimal scope-based test harness with eager execution."
)]
pub struct CanopyArgs {
    /// Glob pattern selecting which registered units to load.
    pub pattern: Option<String>,

    /// Run only the root-level scope with exactly this name.
    #[arg(long)]
    pub scope: Option<String>,

    /// Run only tests with exactly this name.
    #[arg(long)]
    pub test: Option<String>,

    /// Show captured execution traces with each reported failure.
    #[arg(long)]
    pub backtrace: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

impl CanopyArgs {
    /// Layers these arguments over an environment-derived configuration.
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if self.scope.is_some() {
            config.scope_filter = self.scope.clone();
        }
        if self.test.is_some() {
            config.test_filter = self.test.clone();
        }
        if self.backtrace {
            config.show_backtrace = true;
        }
        if self.no_color {
            config.use_colors = false;
        }
        config
    }
}
