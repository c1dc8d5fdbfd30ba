//! The Canopy command-line entry point.
//!
//! A harness binary hands its registered units to [`main`], which parses
//! the argument surface, builds the run configuration from flags layered
//! over the environment, selects units by pattern, runs them, prints the
//! summary, and exits with the registry's status: 0 when nothing failed
//! or errored, 1 otherwise. Fatal configuration errors (an invalid glob
//! pattern) are reported as diagnostics and exit with [`USAGE_STATUS`].

use clap::Parser;
use miette::IntoDiagnostic;

use crate::config::RunConfig;
use crate::discovery;
use crate::runner::{Runner, Unit};
use crate::session::Session;

pub mod args;
pub mod diagnostics;
pub mod output;

use args::CanopyArgs;
use diagnostics::print_summary;
use output::StdoutSink;

/// Exit status for configuration errors, distinct from test failures.
pub const USAGE_STATUS: i32 = 2;

/// Parses the process arguments and runs the units. Returns the exit
/// status instead of exiting, for callers that embed the harness.
pub fn run(units: Vec<Unit>) -> i32 {
    run_with_args(units, CanopyArgs::parse())
}

/// Runs the units under an explicit argument set.
pub fn run_with_args(units: Vec<Unit>, args: CanopyArgs) -> i32 {
    let config = args.apply(RunConfig::from_env());

    let units = match discovery::select(units, args.pattern.as_deref()).into_diagnostic() {
        Ok(units) => units,
        Err(report) => {
            let report = report.wrap_err("invalid unit pattern");
            eprintln!("{report:?}");
            return USAGE_STATUS;
        }
    };

    let mut sink = StdoutSink::new(config.use_colors);
    let registry = {
        let mut session = Session::new(config.clone(), &mut sink);
        Runner::new(units).run(&mut session);
        session.finish()
    };

    print_summary(&registry, &config);
    registry.exit_status()
}

/// The conventional harness entry: run and exit.
pub fn main(units: Vec<Unit>) -> ! {
    std::process::exit(run(units))
}
