//! The test execution context.
//!
//! A container for everything a running body might need: the helpers
//! inherited through the capability snapshot, the test's own mutable
//! scratch state shared between hooks and body, and the assertion
//! operations. Each test gets a fresh context; nothing here outlives the
//! test it belongs to.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::capability::HelperMap;
use crate::errors::{HelperResult, Signal, TestResult};
use crate::value::Value;

pub struct TestContext {
    name: String,
    helpers: HelperMap,
    scratch: BTreeMap<String, Value>,
}

impl TestContext {
    pub(crate) fn new(name: impl Into<String>, helpers: HelperMap) -> Self {
        Self {
            name: name.into(),
            helpers,
            scratch: BTreeMap::new(),
        }
    }

    /// The name of the running test, empty when unnamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    // =====================
    // Helpers
    // =====================

    /// True when a helper with this name is in scope.
    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Invokes an inherited helper by name.
    ///
    /// Calling a helper that is not in scope raises the unexpected
    /// signal, classifying the test as errored rather than failed.
    pub fn call(&mut self, name: &str) -> HelperResult {
        let helper = match self.helpers.get(name) {
            Some(helper) => Rc::clone(helper),
            None => {
                return Err(Box::new(Signal::unexpected(format!(
                    "no helper named `{}` in scope",
                    name
                ))))
            }
        };
        helper(self)
    }

    // =====================
    // Scratch state
    // =====================

    /// Stores a named value visible to this test's hooks and body.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.scratch.insert(name.into(), value.into());
    }

    /// Reads a named value set earlier in this test, if any.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.scratch.get(name).cloned()
    }

    // =====================
    // Assertions
    // =====================

    /// Fails the test when the value is falsy. The default message embeds
    /// the offending value.
    #[track_caller]
    pub fn assert(&self, value: impl Into<Value>, message: Option<&str>) -> TestResult {
        let value = value.into();
        if value.is_truthy() {
            return Ok(());
        }
        let message = match message {
            Some(message) => message.to_string(),
            None => format!("condition is not true: {:?}", value),
        };
        Err(Box::new(Signal::fail(message)))
    }

    /// Runs `body` and fails the test unless it raises an error
    /// downcastable to `E`. Raising nothing, or raising a different kind,
    /// both fail.
    #[track_caller]
    pub fn assert_raises<E, F>(&mut self, message: Option<&str>, body: F) -> TestResult
    where
        E: std::error::Error + 'static,
        F: FnOnce(&mut Self) -> TestResult,
    {
        match body(self) {
            Err(raised) if raised.downcast_ref::<E>().is_some() => Ok(()),
            _ => {
                let message = match message {
                    Some(message) => message.to_string(),
                    None => format!("block does not raise {}", std::any::type_name::<E>()),
                };
                Err(Box::new(Signal::fail(message)))
            }
        }
    }

    /// Unconditionally fails the test.
    #[track_caller]
    pub fn flunk(&self, message: Option<&str>) -> TestResult {
        Err(Box::new(Signal::fail(message.unwrap_or("flunked"))))
    }

    /// Unconditionally skips the test.
    #[track_caller]
    pub fn skip(&self) -> TestResult {
        Err(Box::new(Signal::skip()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capabilities;

    fn context_with(caps: &Capabilities) -> TestContext {
        TestContext::new("unit", caps.helpers.clone())
    }

    #[test]
    fn calling_a_known_helper_returns_its_value() {
        let mut caps = Capabilities::new();
        caps.add_helper("foo", |_| Ok(Value::from("foo")));
        let mut ctx = context_with(&caps);
        assert!(ctx.has_helper("foo"));
        assert_eq!(ctx.call("foo").unwrap(), Value::from("foo"));
    }

    #[test]
    fn calling_a_missing_helper_raises_the_unexpected_signal() {
        let caps = Capabilities::new();
        let mut ctx = context_with(&caps);
        let err = ctx.call("bar").unwrap_err();
        let signal = err.downcast_ref::<Signal>().unwrap();
        assert!(matches!(signal, Signal::Unexpected { .. }));
    }

    #[test]
    fn assert_fails_with_a_message_embedding_the_value() {
        let caps = Capabilities::new();
        let ctx = context_with(&caps);
        let err = ctx.assert(false, None).unwrap_err();
        let signal = err.downcast_ref::<Signal>().unwrap();
        assert!(matches!(signal, Signal::Fail { .. }));
        assert_eq!(signal.to_string(), "condition is not true: Bool(false)");
    }

    #[test]
    fn assert_raises_matches_the_error_kind() {
        let caps = Capabilities::new();
        let mut ctx = context_with(&caps);

        // The expected kind was raised.
        ctx.assert_raises::<std::num::ParseIntError, _>(None, |_| {
            "nope".parse::<i32>()?;
            Ok(())
        })
        .unwrap();

        // Nothing raised.
        let err = ctx
            .assert_raises::<std::num::ParseIntError, _>(None, |_| Ok(()))
            .unwrap_err();
        assert!(err.to_string().starts_with("block does not raise"));

        // A different kind raised.
        let err = ctx
            .assert_raises::<std::num::ParseIntError, _>(None, |c| c.flunk(None))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Signal>(),
            Some(Signal::Fail { .. })
        ));
    }
}
