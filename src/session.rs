//! The injected run context.
//!
//! A [`Session`] bundles the run configuration, the outcome registry, and
//! the progress sink, and is threaded by `&mut` through unit loading,
//! scope declaration, and test execution. It is created at run start and
//! consumed at run end; there is no ambient global state anywhere in the
//! execution path.

use crate::config::RunConfig;
use crate::registry::OutcomeRegistry;
use crate::scope::Scope;

/// Receives one marker character, synchronously, as each test completes
/// (and an `E` for each unit that fails to load).
pub trait ProgressSink {
    fn marker(&mut self, marker: char);
}

pub struct Session<'s> {
    pub(crate) config: RunConfig,
    pub(crate) registry: OutcomeRegistry,
    pub(crate) sink: &'s mut dyn ProgressSink,
}

impl<'s> Session<'s> {
    pub fn new(config: RunConfig, sink: &'s mut dyn ProgressSink) -> Self {
        Self {
            config,
            registry: OutcomeRegistry::new(),
            sink,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn registry(&self) -> &OutcomeRegistry {
        &self.registry
    }

    /// Declares a root-level scope and, iff selected, evaluates its body
    /// synchronously before returning.
    ///
    /// An unselected scope's body is never evaluated: the tests and hooks
    /// inside it are not registered at all and contribute zero outcomes —
    /// invisible to the registry, not recorded as skipped.
    pub fn scope<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut Scope<'_, 's>),
    {
        if !self.config.scope_selected(name) {
            return;
        }
        let mut scope = Scope::root(self, name);
        body(&mut scope);
    }

    /// Ends the run, handing the registry to the caller for reporting and
    /// exit-status computation.
    pub fn finish(self) -> OutcomeRegistry {
        self.registry
    }
}
