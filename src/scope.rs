//! Scopes: named, nestable groups of tests and lifecycle hooks.
//!
//! Declaration is execution. A scope's body is evaluated the instant the
//! scope is declared, and every registration inside it — helpers, hooks,
//! tests, child scopes — takes effect in exactly the order written. There
//! is no collect-then-run phase: `test(...)` runs the test before it
//! returns, against the capability state accumulated so far. A helper
//! defined after a test in the same scope is therefore unavailable to
//! that earlier test, even though both appear in the same block.

use crate::capability::Capabilities;
use crate::case;
use crate::context::TestContext;
use crate::errors::{HelperResult, SourceLocation, TestResult};
use crate::session::Session;

pub struct Scope<'a, 's> {
    session: &'a mut Session<'s>,
    name: String,
    caps: Capabilities,
}

impl<'a, 's> Scope<'a, 's> {
    pub(crate) fn root(session: &'a mut Session<'s>, name: &str) -> Self {
        Self {
            session,
            name: name.to_string(),
            caps: Capabilities::new(),
        }
    }

    /// The scope's name, empty when unnamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a named helper routine, available from this point on to
    /// tests and child scopes declared in this scope.
    pub fn helper<F>(&mut self, name: &str, helper: F)
    where
        F: Fn(&mut TestContext) -> HelperResult + 'static,
    {
        self.caps.add_helper(name, helper);
    }

    /// Appends a setup action, run before each subsequently declared
    /// test's body.
    pub fn setup<F>(&mut self, hook: F)
    where
        F: Fn(&mut TestContext) -> TestResult + 'static,
    {
        self.caps.add_setup(hook);
    }

    /// Appends a teardown action, run after each subsequently declared
    /// test's body.
    pub fn teardown<F>(&mut self, hook: F)
    where
        F: Fn(&mut TestContext) -> TestResult + 'static,
    {
        self.caps.add_teardown(hook);
    }

    /// Declares a test and, iff selected, runs it immediately with a
    /// snapshot of the capability state accumulated so far. Helpers and
    /// hooks registered after this call are not visible to it.
    #[track_caller]
    pub fn test<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut TestContext) -> TestResult,
    {
        let declared_at = SourceLocation::caller();
        let snapshot = self.caps.snapshot();
        case::run_case(self.session, name, snapshot, declared_at, body);
    }

    /// Declares a child scope seeded with a snapshot of the capability
    /// state accumulated so far, and runs it immediately. The child's own
    /// registrations are independent of this scope from that point on.
    ///
    /// Nested scopes do not consult the scope selector: reaching this
    /// declaration means the root-level enclosing scope was already
    /// selected, and selection latches downward.
    pub fn scope<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut Scope<'_, 's>),
    {
        let snapshot = self.caps.snapshot();
        let mut child = Scope {
            session: &mut *self.session,
            name: name.to_string(),
            caps: snapshot,
        };
        body(&mut child);
    }
}
