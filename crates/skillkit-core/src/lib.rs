//! SkillKit Core
//!
//! Shared utilities for CLI-style skill runtimes: a structured console
//! logger with hierarchical prefixing, per-level transports, and bounded
//! history tracking, plus the small file-backed services a skill needs
//! around it (env storage, nested settings, package.json patching, login
//! session persistence) and name-casing helpers.
//!
//! ## Logging
//!
//! ```no_run
//! use skillkit_core::logging::build_log;
//!
//! let log = build_log(Some("boot"));
//! let registry = log.build_log(Some("registry"));
//!
//! registry.info(&["connected".into()]);
//! // => (INFO) boot :: registry :: connected
//! ```
//!
//! Output is gated by `LOG_LEVEL` and the `SPRUCE_LOGS` prefix allow-list,
//! decorated with elapsed-time and timestamp markers unless disabled, and
//! can be fanned out to any number of per-level transports.

pub mod disk;
pub mod logging;
pub mod names;
pub mod services;
pub mod types;

// Re-export commonly used items
pub use logging::{
    build_log, stub_log, test_log, EnvReader, Level, LogOptions, LogTransport, LogValue, Logger,
    MemoryEnv, ProcessEnv, TrackingContext, TransportMap,
};

pub use services::{
    AuthService, EnvService, EnvValue, PkgService, ServiceError, ServiceResult, SettingsService,
};

pub use types::{NpmPackage, PersonWithToken, SkillAuth};
