//! Structured logging with prefix chains, transports, and history
//!
//! Build a root logger with [`build_log`], derive children with
//! [`Logger::build_log`], and route output per level through
//! [`TransportMap`]. Gating and decoration are controlled through
//! environment-style settings read via [`EnvReader`].

mod context;
mod environment;
mod level;
mod logger;
mod transport;
mod value;

pub use context::TrackingContext;
pub use environment::{
    EnvReader, MemoryEnv, ProcessEnv, SharedEnv, LOG_LEVEL, MAXIMUM_LOG_PREFIXES_LENGTH,
    SHOULD_LOG_TIME, SHOULD_LOG_TIME_DELTAS, SPRUCE_LOGS,
};
pub use level::Level;
pub use logger::{build_log, stub_log, test_log, Color, ColorOptions, LogOptions, Logger};
pub use transport::{discard_transport, stderr_transport, transport, LogTransport, TransportMap};
pub use value::LogValue;
