//! Leveled diagnostics for state machines.
//!
//! Machines never log through a global. Each one owns a [`Diagnostics`]
//! handle pairing a verbosity threshold with an injected [`DiagnosticSink`];
//! the default sink forwards to `tracing`. Diagnostics only ever change what
//! gets reported, never how the machine behaves.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Verbosity threshold, ordered from quietest to loudest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    #[default]
    Warn,
    Info,
    Debug,
    All,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Off => "off",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::All => "all",
        };
        f.write_str(name)
    }
}

/// Destination for diagnostic messages.
pub trait DiagnosticSink {
    fn record(&self, level: LogLevel, machine: &str, message: &str);
}

/// Forwards to the `tracing` macros.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, level: LogLevel, machine: &str, message: &str) {
        match level {
            LogLevel::Off => {}
            LogLevel::Warn => tracing::warn!(machine, "{}", message),
            LogLevel::Info => tracing::info!(machine, "{}", message),
            LogLevel::Debug => tracing::debug!(machine, "{}", message),
            LogLevel::All => tracing::trace!(machine, "{}", message),
        }
    }
}

/// Keeps every message in memory. Handy in tests and debug overlays.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    records: Rc<RefCell<Vec<(LogLevel, String)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.borrow().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(recorded, _)| *recorded == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, level: LogLevel, _machine: &str, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}

/// Threshold plus sink, labelled with the owning machine.
pub struct Diagnostics {
    level: LogLevel,
    label: String,
    sink: Box<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub fn new(level: LogLevel, label: impl Into<String>, sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            level,
            label: label.into(),
            sink,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && level <= self.level
    }

    /// Emit `message()` at `level` if enabled. The message is only built
    /// when it will be recorded.
    pub fn emit<F>(&self, level: LogLevel, message: F)
    where
        F: FnOnce() -> String,
    {
        if self.enabled(level) {
            self.sink.record(level, &self.label, &message());
        }
    }

    pub fn warn<F: FnOnce() -> String>(&self, message: F) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn info<F: FnOnce() -> String>(&self, message: F) {
        self.emit(LogLevel::Info, message);
    }

    pub fn debug<F: FnOnce() -> String>(&self, message: F) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn trace<F: FnOnce() -> String>(&self, message: F) {
        self.emit(LogLevel::All, message);
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("level", &self.level)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
