//! Capability snapshots: the bundle of helpers and lifecycle hooks a
//! scope hands down to its tests and child scopes.
//!
//! The central invariant of the whole framework lives here: a snapshot
//! taken by a child is a copy of the parent's state **at the instant of
//! the child's own declaration**. Anything the parent registers later is
//! never visible to the already-declared child. Cloning the accumulated
//! state at the `test(...)`/`scope(...)` call site is the entire
//! mechanism — routines are shared by `Rc`, the containers are copied.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::context::TestContext;
use crate::errors::{HelperResult, TestResult};

/// A named helper routine, invokable from a test body as if locally
/// defined there.
pub type HelperFn = Rc<dyn Fn(&mut TestContext) -> HelperResult>;

/// A setup or teardown action.
pub type HookFn = Rc<dyn Fn(&mut TestContext) -> TestResult>;

/// Helper routines by name. Redefining a name shadows the inherited
/// routine, as a local definition would.
pub type HelperMap = BTreeMap<String, HelperFn>;

/// The capability state a scope accumulates while its body runs, and the
/// snapshot a test or child scope inherits.
///
/// `setup` and `teardown` are ordered outer-to-inner; this framework does
/// not reverse teardown order.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub(crate) helpers: HelperMap,
    pub(crate) setup: Vec<HookFn>,
    pub(crate) teardown: Vec<HookFn>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a helper with this name has been registered (inherited
    /// or own). The explicit rendition of a duck-typed "responds to".
    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Names of all registered helpers, in sorted order.
    pub fn helper_names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    pub(crate) fn add_helper<F>(&mut self, name: impl Into<String>, helper: F)
    where
        F: Fn(&mut TestContext) -> HelperResult + 'static,
    {
        self.helpers.insert(name.into(), Rc::new(helper));
    }

    pub(crate) fn add_setup<F>(&mut self, hook: F)
    where
        F: Fn(&mut TestContext) -> TestResult + 'static,
    {
        self.setup.push(Rc::new(hook));
    }

    pub(crate) fn add_teardown<F>(&mut self, hook: F)
    where
        F: Fn(&mut TestContext) -> TestResult + 'static,
    {
        self.teardown.push(Rc::new(hook));
    }

    /// Copies the state accumulated so far. Later additions to `self` do
    /// not affect the returned snapshot.
    pub(crate) fn snapshot(&self) -> Self {
        self.clone()
    }
}
