//! The containment boundary around a unit body.
//!
//! A panic or a returned error inside the boundary is converted into an
//! [`ExceptionRecord`] and never reaches the suite. Panic location and
//! backtrace are collected by a process-wide hook that is installed once and
//! only intercepts panics on threads that are currently inside a boundary;
//! every other panic is forwarded to the previously installed hook.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};

use once_cell::sync::OnceCell;

use crate::model::ExceptionRecord;
use crate::registry::UnitResult;

thread_local! {
    static INSIDE_BOUNDARY: Cell<bool> = const { Cell::new(false) };
    static WANT_BACKTRACE: Cell<bool> = const { Cell::new(true) };
    static LAST_PANIC: RefCell<Option<PanicSite>> = const { RefCell::new(None) };
}

static HOOK: OnceCell<()> = OnceCell::new();

#[derive(Debug)]
struct PanicSite {
    location: Option<String>,
    backtrace: Option<String>,
}

fn install_hook() {
    HOOK.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !INSIDE_BOUNDARY.with(Cell::get) {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            let backtrace = WANT_BACKTRACE
                .with(Cell::get)
                .then(|| Backtrace::force_capture().to_string());
            LAST_PANIC.with(|slot| {
                *slot.borrow_mut() = Some(PanicSite {
                    location,
                    backtrace,
                })
            });
        }));
    });
}

/// Marks the current thread as inside a boundary; restores the previous
/// state on every exit path, so boundaries nest.
struct BoundaryGuard {
    was_inside: bool,
    wanted_backtrace: bool,
}

impl BoundaryGuard {
    fn enter(capture_backtrace: bool) -> Self {
        let guard = Self {
            was_inside: INSIDE_BOUNDARY.with(|c| c.replace(true)),
            wanted_backtrace: WANT_BACKTRACE.with(|c| c.replace(capture_backtrace)),
        };
        LAST_PANIC.with(|slot| slot.borrow_mut().take());
        guard
    }
}

impl Drop for BoundaryGuard {
    fn drop(&mut self) {
        INSIDE_BOUNDARY.with(|c| c.set(self.was_inside));
        WANT_BACKTRACE.with(|c| c.set(self.wanted_backtrace));
    }
}

/// Runs `body` inside the boundary. Returns the escaped error, if any.
pub fn contain<F>(capture_backtrace: bool, body: F) -> Option<ExceptionRecord>
where
    F: FnOnce() -> UnitResult,
{
    install_hook();
    let outcome = {
        let _guard = BoundaryGuard::enter(capture_backtrace);
        panic::catch_unwind(AssertUnwindSafe(body))
    };

    match outcome {
        Ok(Ok(())) => None,
        Ok(Err(error)) => Some(error_record(error.as_ref())),
        Err(payload) => {
            let site = LAST_PANIC.with(|slot| slot.borrow_mut().take());
            Some(panic_record(payload.as_ref(), site))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

fn panic_record(payload: &(dyn Any + Send), site: Option<PanicSite>) -> ExceptionRecord {
    let message = panic_message(payload);
    let mut traceback = String::new();
    if let Some(site) = site {
        if let Some(location) = site.location {
            traceback.push_str(&format!("panicked at {location}\n"));
        }
        if let Some(backtrace) = site.backtrace {
            traceback.push_str(&backtrace);
        }
    }
    ExceptionRecord {
        type_name: "panic".to_string(),
        message,
        traceback,
    }
}

fn error_record(error: &(dyn std::error::Error + Send + Sync)) -> ExceptionRecord {
    let mut traceback = format!("error: {error}\n");
    let mut source = error.source();
    while let Some(cause) = source {
        traceback.push_str(&format!("caused by: {cause}\n"));
        source = cause.source();
    }
    ExceptionRecord {
        type_name: "error".to_string(),
        message: error.to_string(),
        traceback,
    }
}
