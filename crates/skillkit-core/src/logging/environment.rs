//! Environment readers for log configuration
//!
//! Gating and decoration settings are read through a small trait so tests
//! can swap in an in-memory snapshot instead of mutating the process
//! environment.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use parking_lot::RwLock;

/// `LOG_LEVEL` gates output by severity (`none`, `error`, anything else)
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// `SPRUCE_LOGS` is a comma-separated prefix allow-list for namespace gating
pub const SPRUCE_LOGS: &str = "SPRUCE_LOGS";
/// `MAXIMUM_LOG_PREFIXES_LENGTH` truncates the rendered prefix chain
pub const MAXIMUM_LOG_PREFIXES_LENGTH: &str = "MAXIMUM_LOG_PREFIXES_LENGTH";
/// `SHOULD_LOG_TIME_DELTAS=false` disables the elapsed-time decoration
pub const SHOULD_LOG_TIME_DELTAS: &str = "SHOULD_LOG_TIME_DELTAS";
/// `SHOULD_LOG_TIME=false` disables the timestamp decoration
pub const SHOULD_LOG_TIME: &str = "SHOULD_LOG_TIME";

/// Read access to environment-style configuration
///
/// Implementations:
/// - `ProcessEnv`: reads the live process environment
/// - `MemoryEnv`: in-memory map for tests
pub trait EnvReader: Send + Sync {
    /// Look up a variable; `None` when unset
    fn get(&self, key: &str) -> Option<String>;
}

/// Type alias for a shared environment reader
pub type SharedEnv = Arc<dyn EnvReader>;

/// Reads the live process environment on every call
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> SharedEnv {
        Arc::new(Self)
    }
}

impl EnvReader for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory environment for tests
///
/// # Example
///
/// ```
/// use skillkit_core::logging::{EnvReader, MemoryEnv};
///
/// let env = MemoryEnv::new();
/// env.set("LOG_LEVEL", "none");
/// assert_eq!(env.get("LOG_LEVEL"), Some("none".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self {
            vars: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory environment with initial values
    pub fn with_vars(initial: HashMap<String, String>) -> Self {
        Self {
            vars: RwLock::new(initial),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        self.vars.write().insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.vars.write().remove(key);
    }

    pub fn clear(&self) {
        self.vars.write().clear();
    }
}

impl EnvReader for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.read().get(key).cloned()
    }
}
