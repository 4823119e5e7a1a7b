//! Env-gated debug logging.
//!
//! The toolkit owns the terminal while it runs, so diagnostics go to a side
//! channel: the file named by `SIPFLOW_TUI_LOG`, or stderr when no path is
//! configured. Everything is off unless `SIPFLOW_TUI_DEBUG=1`; callers guard
//! hot paths with `debug_enabled()` before formatting.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::config::EnvConfig;

struct DebugSink {
    enabled: bool,
    path: Option<String>,
}

static DEBUG_SINK: Lazy<Mutex<DebugSink>> = Lazy::new(|| {
    let config = EnvConfig::from_env();
    Mutex::new(DebugSink {
        enabled: config.debug,
        path: config.debug_log,
    })
});

pub fn debug_enabled() -> bool {
    DEBUG_SINK.lock().expect("debug sink lock poisoned").enabled
}

/// Append one line to the debug sink. A write failure is swallowed; losing
/// a debug line must never take the UI down.
pub fn log_debug(message: &str) {
    let sink = DEBUG_SINK.lock().expect("debug sink lock poisoned");
    if !sink.enabled {
        return;
    }
    match &sink.path {
        Some(path) => {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{message}");
            }
        }
        None => {
            let _ = writeln!(std::io::stderr(), "{message}");
        }
    }
}

/// Reconfigure the sink at runtime, overriding the environment.
pub fn set_sink(enabled: bool, path: Option<String>) {
    let mut sink = DEBUG_SINK.lock().expect("debug sink lock poisoned");
    sink.enabled = enabled;
    sink.path = path;
}
