//! Diagnostics callbacks for the layout engine.
//!
//! The engine has no logging dependency of its own. Hosts that want
//! visibility into the lazy layout path register a log callback and/or an
//! event callback; both are global and survive for the process lifetime.
//!
//! Emitted event names:
//!
//! - `wrap.recompute` — the line-break table was rebuilt; payload is
//!   `lines=<n> width=<w>`.
//! - `area.scroll` — `show_cursor` moved the scroll window; payload is
//!   `first=<n>`.

use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    let mut guard = event_callback().lock().expect("event callback lock");
    *guard = Some(Box::new(callback));
}

/// Emit a named engine event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback().lock().expect("log callback lock");
    *guard = Some(Box::new(callback));
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    // The callbacks are global, and other tests in this binary drive the
    // engine (which emits events) concurrently; match on our own payloads
    // instead of asserting inside the callback.

    #[test]
    fn test_event_callback() {
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = Arc::clone(&called);
        set_event_callback(move |name, data| {
            if name == "diag.test" && data == "payload" {
                called_clone.store(true, Ordering::SeqCst);
            }
        });
        emit_event("diag.test", "payload");
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_log_callback() {
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = Arc::clone(&called);
        set_log_callback(move |level, msg| {
            if level == LogLevel::Warn && msg == "diag test message" {
                called_clone.store(true, Ordering::SeqCst);
            }
        });
        emit_log(LogLevel::Warn, "diag test message");
        assert!(called.load(Ordering::SeqCst));
    }
}
