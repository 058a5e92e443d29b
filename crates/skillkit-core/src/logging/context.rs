//! Shared log tracking state
//!
//! One process-wide context holds the bounded history buffer and the
//! last-write instant used for elapsed-time decorations. Every logger
//! shares the global context unless a test injects its own.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

static GLOBAL: Lazy<Arc<TrackingContext>> = Lazy::new(|| Arc::new(TrackingContext::new()));

/// History buffer and last-log timestamp shared between logger instances
///
/// The history is a bounded FIFO: once the limit is exceeded the oldest
/// entries are dropped. A limit of zero disables recording entirely.
/// Shrinking the limit does not truncate immediately; the next write
/// evicts down to the new cap.
pub struct TrackingContext {
    inner: Mutex<TrackingState>,
}

struct TrackingState {
    history: VecDeque<String>,
    limit: usize,
    last_log: Instant,
}

impl TrackingContext {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TrackingState {
                history: VecDeque::new(),
                limit: 0,
                last_log: Instant::now(),
            }),
        }
    }

    /// The process-wide context every logger uses by default
    pub fn global() -> Arc<TrackingContext> {
        GLOBAL.clone()
    }

    pub fn set_limit(&self, limit: usize) {
        self.inner.lock().limit = limit;
    }

    pub fn limit(&self) -> usize {
        self.inner.lock().limit
    }

    pub fn is_tracking(&self) -> bool {
        self.limit() > 0
    }

    /// Append an entry when tracking is on, evicting from the front until
    /// the buffer is back within the limit
    pub fn record(&self, entry: &str) {
        let mut state = self.inner.lock();
        if state.limit == 0 {
            return;
        }
        state.history.push_back(entry.to_string());
        while state.history.len() > state.limit {
            state.history.pop_front();
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history.iter().cloned().collect()
    }

    /// Milliseconds since the previous call, updating the shared instant
    pub fn take_delta_ms(&self) -> u128 {
        let mut state = self.inner.lock();
        let now = Instant::now();
        let delta = now.duration_since(state.last_log).as_millis();
        state.last_log = now;
        delta
    }
}

impl Default for TrackingContext {
    fn default() -> Self {
        Self::new()
    }
}
