//! Panic interception for the test boundary.
//!
//! A process-wide hook (installed once, panic hooks are inherently
//! global) records the panic site, the payload message, and a forced
//! backtrace into a thread-local slot while a capture guard is active.
//! Outside a guard the previous hook runs untouched, so panics in code
//! that is not under test keep their normal reporting.

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic;

use once_cell::sync::Lazy;

use crate::errors::SourceLocation;

pub(crate) struct CapturedPanic {
    pub message: String,
    pub location: Option<SourceLocation>,
    pub trace: String,
}

thread_local! {
    static CAPTURE_DEPTH: Cell<usize> = Cell::new(0);
    static LAST_PANIC: RefCell<Option<CapturedPanic>> = RefCell::new(None);
}

static HOOK: Lazy<()> = Lazy::new(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let capturing = CAPTURE_DEPTH.with(|depth| depth.get() > 0);
        if !capturing {
            previous(info);
            return;
        }
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "panicked".to_string()
        };
        let location = info.location().map(SourceLocation::from);
        let trace = Backtrace::force_capture().to_string();
        LAST_PANIC.with(|slot| {
            *slot.borrow_mut() = Some(CapturedPanic {
                message,
                location,
                trace,
            });
        });
    }));
});

/// Installs the capture hook. Idempotent.
pub(crate) fn install() {
    Lazy::force(&HOOK);
}

/// Keeps capture active while in scope. Guards nest: a unit-load guard
/// stays active around the test-level guards inside it.
pub(crate) struct CaptureGuard(());

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURE_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

pub(crate) fn guard() -> CaptureGuard {
    CAPTURE_DEPTH.with(|depth| depth.set(depth.get() + 1));
    CaptureGuard(())
}

/// Takes the most recent captured panic, clearing the slot.
pub(crate) fn take_last() -> Option<CapturedPanic> {
    LAST_PANIC.with(|slot| slot.borrow_mut().take())
}
