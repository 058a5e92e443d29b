//! Nested JSON settings for a working directory
//!
//! Settings live at `<cwd>/.skill/settings.json` and are addressed with
//! dot paths. Feature codes can be marked installed or permanently
//! skipped.

use std::path::PathBuf;

use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::disk;

use super::json_path;
use super::{ServiceResult, SKILL_DIR};

const DEFAULT_FILE: &str = "settings.json";

/// Dot-path settings store with feature bookkeeping
///
/// Loads lazily and caches in memory; a missing or unparseable file reads
/// as an empty document.
pub struct SettingsService {
    cwd: PathBuf,
    file_name: RwLock<String>,
    cache: RwLock<Option<Value>>,
}

impl SettingsService {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            file_name: RwLock::new(DEFAULT_FILE.to_string()),
            cache: RwLock::new(None),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let settings = self.load_settings();
        json_path::get_path(&settings, key).cloned()
    }

    pub fn set(&self, key: &str, value: Value) -> ServiceResult<()> {
        let mut settings = self.load_settings();
        json_path::set_path(&mut settings, key, value);
        self.save_settings(settings)
    }

    pub fn unset(&self, key: &str) -> ServiceResult<()> {
        let mut settings = self.load_settings();
        json_path::unset_path(&mut settings, key);
        self.save_settings(settings)?;
        *self.cache.write() = None;
        Ok(())
    }

    pub fn is_marked_as_installed(&self, code: &str) -> bool {
        self.list_contains("installed", code)
    }

    pub fn mark_as_installed(&self, code: &str) -> ServiceResult<()> {
        if self.is_marked_as_installed(code) {
            return Ok(());
        }

        let mut settings = self.load_settings();
        push_code(&mut settings, "installed", code);
        self.save_settings(settings)
    }

    /// Skip a feature for good, removing any installed mark it carried
    pub fn mark_as_permanently_skipped(&self, code: &str) -> ServiceResult<()> {
        let mut settings = self.load_settings();

        if let Some(installed) = settings
            .get_mut("installed")
            .and_then(Value::as_array_mut)
        {
            installed.retain(|entry| entry.as_str() != Some(code));
        }

        if !list_contains_value(&settings, "skipped", code) {
            push_code(&mut settings, "skipped", code);
        }

        self.save_settings(settings)
    }

    pub fn is_marked_as_permanently_skipped(&self, code: &str) -> bool {
        self.list_contains("skipped", code)
    }

    /// Point this service at a different file under `.skill/`
    pub fn set_file(&self, name: &str) {
        *self.file_name.write() = name.to_string();
        *self.cache.write() = None;
    }

    pub fn settings_path(&self) -> PathBuf {
        disk::resolve_path(&self.cwd, &[SKILL_DIR, &self.file_name.read()])
    }

    fn list_contains(&self, list: &str, code: &str) -> bool {
        list_contains_value(&self.load_settings(), list, code)
    }

    fn load_settings(&self) -> Value {
        if let Some(cached) = self.cache.read().as_ref() {
            return cached.clone();
        }

        let loaded = disk::read_file(self.settings_path())
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_else(|| json!({}));

        *self.cache.write() = Some(loaded.clone());
        loaded
    }

    fn save_settings(&self, settings: Value) -> ServiceResult<()> {
        let contents = serde_json::to_string_pretty(&settings)?;
        disk::write_file(self.settings_path(), &contents)?;
        *self.cache.write() = Some(settings);
        Ok(())
    }
}

fn list_contains_value(settings: &Value, list: &str, code: &str) -> bool {
    settings
        .get(list)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().any(|entry| entry.as_str() == Some(code)))
        .unwrap_or(false)
}

fn push_code(settings: &mut Value, list: &str, code: &str) {
    if !settings.is_object() {
        *settings = json!({});
    }
    let entries = settings
        .as_object_mut()
        .unwrap()
        .entry(list.to_string())
        .or_insert_with(|| json!([]));

    if let Some(entries) = entries.as_array_mut() {
        entries.push(json!(code));
    }
}

impl std::fmt::Debug for SettingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsService")
            .field("path", &self.settings_path())
            .finish()
    }
}
