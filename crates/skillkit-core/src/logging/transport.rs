//! Output sinks
//!
//! A transport is a callable that receives the final message parts in
//! order: the rendered prefix (when non-empty) followed by the formatted
//! arguments. Registering transports for a level replaces the console
//! fallback for that level entirely.

use std::io::Write;
use std::sync::Arc;

use super::level::Level;

/// A sink for rendered log output
pub type LogTransport = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Build a transport from any closure
pub fn transport<F>(f: F) -> LogTransport
where
    F: Fn(&[String]) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A transport that writes the space-joined parts to stderr
///
/// Backs [`test_log`](super::test_log): output that must stay visible no
/// matter how stdout is captured.
pub fn stderr_transport() -> LogTransport {
    transport(|parts| {
        let mut stderr = std::io::stderr();
        let _ = writeln!(stderr, "{}", parts.join(" "));
    })
}

/// A transport that discards everything
///
/// Backs [`stub_log`](super::stub_log): a logger for contexts wanting a
/// no-op.
pub fn discard_transport() -> LogTransport {
    transport(|_parts| {})
}

/// Per-level transport routing table
///
/// Each level holds zero or more sinks; every registered sink receives
/// every message for its level.
#[derive(Clone, Default)]
pub struct TransportMap {
    info: Vec<LogTransport>,
    warn: Vec<LogTransport>,
    error: Vec<LogTransport>,
}

impl TransportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sink for a level, keeping any already registered
    pub fn add(&mut self, level: Level, sink: LogTransport) {
        self.slot_mut(level).push(sink);
    }

    /// Builder-style variant of [`add`](Self::add)
    pub fn with(mut self, level: Level, sink: LogTransport) -> Self {
        self.add(level, sink);
        self
    }

    pub fn get(&self, level: Level) -> &[LogTransport] {
        match level {
            Level::Info => &self.info,
            Level::Warn => &self.warn,
            Level::Error => &self.error,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty() && self.warn.is_empty() && self.error.is_empty()
    }

    fn slot_mut(&mut self, level: Level) -> &mut Vec<LogTransport> {
        match level {
            Level::Info => &mut self.info,
            Level::Warn => &mut self.warn,
            Level::Error => &mut self.error,
        }
    }
}

impl std::fmt::Debug for TransportMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportMap")
            .field("info", &self.info.len())
            .field("warn", &self.warn.len())
            .field("error", &self.error.len())
            .finish()
    }
}
