//! Canopy: a minimal scope-based test harness.
//!
//! Tests are declared inside named, nestable scopes, and declaration is
//! execution: a scope's body runs the instant the scope is declared, and
//! every `test(...)` inside it runs before the call returns, against a
//! snapshot of the helpers and lifecycle hooks the scope has accumulated
//! so far. Outcomes are classified into passed/failed/skipped/errored,
//! collected in a run-wide registry, and reported with a process exit
//! code suitable for CI gating.
//!
//! ```rust
//! use canopy::cli::output::OutputBuffer;
//! use canopy::{RunConfig, Session, Value};
//!
//! let mut sink = OutputBuffer::new();
//! let mut session = Session::new(RunConfig::default(), &mut sink);
//! session.scope("math", |s| {
//!     s.helper("two", |_| Ok(Value::from(2)));
//!     s.test("adds", |t| {
//!         let two = t.call("two")?;
//!         t.assert(two == Value::from(2), None)
//!     });
//! });
//! let registry = session.finish();
//! assert_eq!(registry.exit_status(), 0);
//! assert_eq!(sink.markers(), ".");
//! ```

pub mod capability;
pub mod cli;
pub mod config;
pub mod context;
pub mod discovery;
pub mod errors;
pub mod registry;
pub mod runner;
pub mod scope;
pub mod session;
pub mod value;

mod case;
mod panic_capture;

pub use crate::config::RunConfig;
pub use crate::context::TestContext;
pub use crate::errors::{HelperResult, Signal, SourceLocation, TestResult};
pub use crate::registry::{Origin, Outcome, OutcomeKind, OutcomeRegistry, OutcomeTally};
pub use crate::runner::{LoadResult, Runner, Unit};
pub use crate::scope::Scope;
pub use crate::session::{ProgressSink, Session};
pub use crate::value::Value;
