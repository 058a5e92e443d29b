//! Shared types for skill runtimes

use serde::{Deserialize, Serialize};

/// A stripped-down user with token details for login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonWithToken {
    pub id: String,
    /// The name you can use when talking to this person
    pub casual_name: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_logged_in: Option<bool>,
}

/// Credentials and identity of the currently registered skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAuth {
    pub id: String,
    pub api_key: String,
    pub name: String,
    pub slug: String,
}

/// An npm dependency reference used when patching package.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpmPackage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dev: Option<bool>,
}
