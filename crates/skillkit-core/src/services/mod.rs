//! File-backed services for skill runtimes
//!
//! Each service owns one document in a working directory: the `.env` file,
//! the nested settings JSON, package.json, or the persisted login session.

mod auth;
mod env;
pub(crate) mod json_path;
mod pkg;
mod settings;

pub use auth::AuthService;
pub use env::{EnvService, EnvValue};
pub use pkg::PkgService;
pub use settings::SettingsService;

use std::path::PathBuf;

/// Directory (under a cwd or home dir) holding generated skill state
pub const SKILL_DIR: &str = ".skill";

/// Errors surfaced by the file-backed services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Could not find a package.json file at {0}")]
    PackageJsonNotFound(PathBuf),

    #[error("Invalid package.json at {path}: {source}")]
    InvalidPackageJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
