//! Key/value storage backed by a `.env` file
//!
//! Reads check the process environment first, then the file. Values are
//! coerced on the way out: integer literals become numbers, `true`/`false`
//! become booleans, everything else stays a string.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::disk;

use super::ServiceResult;

/// A value stored in (or read from) the env file
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    Str(String),
    Bool(bool),
    Num(i64),
}

impl EnvValue {
    /// Coerce a raw string: `/^-?\d+$/` reads as a number, `true`/`false`
    /// as booleans, anything else as a string
    fn coerce(raw: &str) -> EnvValue {
        let is_int = {
            let digits = raw.strip_prefix('-').unwrap_or(raw);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        };

        if is_int {
            if let Ok(num) = raw.parse::<i64>() {
                return EnvValue::Num(num);
            }
        }

        match raw {
            "true" => EnvValue::Bool(true),
            "false" => EnvValue::Bool(false),
            _ => EnvValue::Str(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The literal written to the env file: strings quoted with newlines
    /// escaped, numbers and booleans bare
    fn to_literal(&self) -> String {
        match self {
            EnvValue::Str(s) => format!("\"{}\"", s.replace('\n', "\\n")),
            EnvValue::Bool(b) => b.to_string(),
            EnvValue::Num(n) => n.to_string(),
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Str(s) => f.write_str(s),
            EnvValue::Bool(b) => write!(f, "{}", b),
            EnvValue::Num(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::Str(value.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::Str(value)
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        EnvValue::Bool(value)
    }
}

impl From<i64> for EnvValue {
    fn from(value: i64) -> Self {
        EnvValue::Num(value)
    }
}

/// Env-file key/value store for a working directory
///
/// # Example
///
/// ```no_run
/// use skillkit_core::services::{EnvService, EnvValue};
///
/// let env = EnvService::new("/path/to/skill");
/// env.set("SKILL_NAME", "my skill").unwrap();
/// assert_eq!(env.get("SKILL_NAME"), Some(EnvValue::from("my skill")));
/// ```
#[derive(Debug)]
pub struct EnvService {
    cwd: PathBuf,
}

impl EnvService {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Store a value, rewriting the `.env` file
    pub fn set(&self, key: &str, value: impl Into<EnvValue>) -> ServiceResult<()> {
        let mut entries = self.parse_env()?;
        entries.insert(key.to_string(), value.into());
        self.write_config(&entries)
    }

    /// Read a value; the process environment wins over the file
    pub fn get(&self, key: &str) -> Option<EnvValue> {
        if let Ok(value) = env::var(key) {
            if !value.is_empty() {
                return Some(EnvValue::coerce(&value));
            }
        }

        self.parse_env().ok()?.remove(key)
    }

    /// Remove a key, rewriting the `.env` file
    pub fn unset(&self, key: &str) -> ServiceResult<()> {
        let mut entries = self.parse_env()?;
        entries.remove(key);
        self.write_config(&entries)
    }

    fn write_config(&self, entries: &BTreeMap<String, EnvValue>) -> ServiceResult<()> {
        let lines: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{}={}", key, value.to_literal()))
            .collect();

        disk::write_file(self.env_path(), &lines.join("\n"))?;
        Ok(())
    }

    fn parse_env(&self) -> ServiceResult<BTreeMap<String, EnvValue>> {
        let path = self.env_path();
        if !disk::does_file_exist(&path) {
            return Ok(BTreeMap::new());
        }

        let contents = disk::read_file(&path)?;
        let mut entries = BTreeMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, raw)) = line.split_once('=') else {
                continue;
            };

            let raw = raw.trim();
            let unquoted = raw
                .strip_prefix('"')
                .and_then(|r| r.strip_suffix('"'))
                .map(|r| r.replace("\\n", "\n"));

            let value = match unquoted {
                Some(string) => EnvValue::Str(string),
                None => EnvValue::coerce(raw),
            };

            entries.insert(key.trim().to_string(), value);
        }

        Ok(entries)
    }

    fn env_path(&self) -> PathBuf {
        disk::resolve_path(&self.cwd, &[".env"])
    }

    pub fn path(&self) -> &Path {
        &self.cwd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());

        service.set("SKILL_NAME", "my skill").unwrap();
        assert_eq!(service.get("SKILL_NAME"), Some(EnvValue::from("my skill")));
    }

    #[test]
    fn test_coerces_numbers_and_booleans() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());

        service.set("PORT", 8080_i64).unwrap();
        service.set("NEGATIVE", -5_i64).unwrap();
        service.set("ENABLED", true).unwrap();
        service.set("DISABLED", false).unwrap();

        assert_eq!(service.get("PORT"), Some(EnvValue::Num(8080)));
        assert_eq!(service.get("NEGATIVE"), Some(EnvValue::Num(-5)));
        assert_eq!(service.get("ENABLED"), Some(EnvValue::Bool(true)));
        assert_eq!(service.get("DISABLED"), Some(EnvValue::Bool(false)));
    }

    #[test]
    fn test_strings_keep_digit_prefixes_intact() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());

        service.set("VERSIONISH", "123abc").unwrap();
        assert_eq!(service.get("VERSIONISH"), Some(EnvValue::from("123abc")));
    }

    #[test]
    fn test_unset_removes_key() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());

        service.set("KEEP", "yes").unwrap();
        service.set("DROP", "no").unwrap();
        service.unset("DROP").unwrap();

        assert_eq!(service.get("DROP"), None);
        assert_eq!(service.get("KEEP"), Some(EnvValue::from("yes")));
    }

    #[test]
    fn test_process_env_wins_over_file() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());

        service.set("SKILLKIT_PRECEDENCE_TEST", "from file").unwrap();
        env::set_var("SKILLKIT_PRECEDENCE_TEST", "from process");

        assert_eq!(
            service.get("SKILLKIT_PRECEDENCE_TEST"),
            Some(EnvValue::from("from process"))
        );

        env::remove_var("SKILLKIT_PRECEDENCE_TEST");
    }

    #[test]
    fn test_escapes_newlines_in_strings() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());

        service.set("MULTILINE", "line one\nline two").unwrap();

        let written = disk::read_file(dir.path().join(".env")).unwrap();
        assert!(written.contains("MULTILINE=\"line one\\nline two\""));

        assert_eq!(
            service.get("MULTILINE"),
            Some(EnvValue::from("line one\nline two"))
        );
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let service = EnvService::new(dir.path());
        assert_eq!(service.get("ANYTHING"), None);
    }
}
