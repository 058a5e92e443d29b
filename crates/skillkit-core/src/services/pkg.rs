//! package.json manipulation
//!
//! Dot-path reads and writes over a working directory's package.json,
//! with a cached parse that invalidates on write.

use std::path::PathBuf;

use parking_lot::RwLock;
use serde_json::Value;

use crate::disk;
use crate::types::NpmPackage;

use super::json_path;
use super::{ServiceError, ServiceResult};

const LOCK_FILES: [&str; 2] = ["package-lock.json", "yarn.lock"];

/// Read/patch access to a package.json
pub struct PkgService {
    cwd: PathBuf,
    parsed: RwLock<Option<Value>>,
}

impl PkgService {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            parsed: RwLock::new(None),
        }
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        let contents = self.read_package().ok()?;
        json_path::get_path(&contents, path).cloned()
    }

    /// Write a value at a dot path and persist, invalidating the cache
    pub fn set(&self, path: &str, value: Value) -> ServiceResult<()> {
        let mut contents = self.read_package()?;
        json_path::set_path(&mut contents, path, value);

        let serialized = serde_json::to_string_pretty(&contents)?;
        disk::write_file(self.build_path(), &serialized)?;
        *self.parsed.write() = None;

        Ok(())
    }

    pub fn unset(&self, path: &str) -> ServiceResult<()> {
        let mut contents = self.read_package()?;
        json_path::unset_path(&mut contents, path);

        let serialized = serde_json::to_string_pretty(&contents)?;
        disk::write_file(self.build_path(), &serialized)?;
        *self.parsed.write() = None;

        Ok(())
    }

    pub fn does_exist(&self) -> bool {
        disk::does_file_exist(self.build_path())
    }

    /// True when the package appears in dependencies or devDependencies
    pub fn is_installed(&self, pkg: &str) -> bool {
        let Ok(contents) = self.read_package() else {
            return false;
        };

        ["dependencies", "devDependencies"].iter().any(|section| {
            contents
                .get(section)
                .and_then(Value::as_object)
                .map(|deps| deps.contains_key(pkg))
                .unwrap_or(false)
        })
    }

    pub fn delete_lock_file(&self) -> ServiceResult<()> {
        for file in LOCK_FILES {
            disk::delete_file(self.cwd.join(file))?;
        }
        Ok(())
    }

    pub fn strip_latest(name: &str) -> String {
        name.replace("@latest", "")
    }

    /// `{name, version}` => `name@version`; bare name when unversioned
    pub fn build_package_name(dep: &NpmPackage) -> String {
        match &dep.version {
            Some(version) => format!("{}@{}", dep.name, version),
            None => dep.name.clone(),
        }
    }

    pub fn read_package(&self) -> ServiceResult<Value> {
        if let Some(cached) = self.parsed.read().as_ref() {
            return Ok(cached.clone());
        }

        let path = self.build_path();
        let contents = disk::read_file(&path)?;
        let parsed: Value = serde_json::from_str(&contents)
            .map_err(|source| ServiceError::InvalidPackageJson { path, source })?;

        *self.parsed.write() = Some(parsed.clone());
        Ok(parsed)
    }

    pub fn build_path(&self) -> PathBuf {
        self.cwd.join("package.json")
    }
}

impl std::fmt::Debug for PkgService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkgService")
            .field("path", &self.build_path())
            .field("exists", &self.does_exist())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_package(dir: &std::path::Path, contents: Value) -> PkgService {
        disk::write_file(
            dir.join("package.json"),
            &serde_json::to_string_pretty(&contents).unwrap(),
        )
        .unwrap();
        PkgService::new(dir)
    }

    #[test]
    fn test_get_reads_dot_paths() {
        let dir = tempdir().unwrap();
        let pkg = write_package(
            dir.path(),
            json!({"name": "my-skill", "skill": {"namespace": "my-skill"}}),
        );

        assert_eq!(pkg.get("name"), Some(json!("my-skill")));
        assert_eq!(pkg.get("skill.namespace"), Some(json!("my-skill")));
        assert_eq!(pkg.get("skill.missing"), None);
    }

    #[test]
    fn test_set_persists_and_invalidates_cache() {
        let dir = tempdir().unwrap();
        let pkg = write_package(dir.path(), json!({"name": "my-skill"}));

        pkg.set("skill.namespace", json!("renamed")).unwrap();
        assert_eq!(pkg.get("skill.namespace"), Some(json!("renamed")));

        // A fresh instance sees the write
        let fresh = PkgService::new(dir.path());
        assert_eq!(fresh.get("skill.namespace"), Some(json!("renamed")));
    }

    #[test]
    fn test_unset_removes_key() {
        let dir = tempdir().unwrap();
        let pkg = write_package(dir.path(), json!({"name": "x", "private": true}));

        pkg.unset("private").unwrap();
        assert_eq!(pkg.get("private"), None);
    }

    #[test]
    fn test_does_exist() {
        let dir = tempdir().unwrap();
        let missing = PkgService::new(dir.path());
        assert!(!missing.does_exist());

        let pkg = write_package(dir.path(), json!({}));
        assert!(pkg.does_exist());
    }

    #[test]
    fn test_is_installed_checks_both_sections() {
        let dir = tempdir().unwrap();
        let pkg = write_package(
            dir.path(),
            json!({
                "dependencies": {"left-pad": "1.0.0"},
                "devDependencies": {"jest": "29.0.0"}
            }),
        );

        assert!(pkg.is_installed("left-pad"));
        assert!(pkg.is_installed("jest"));
        assert!(!pkg.is_installed("express"));
    }

    #[test]
    fn test_invalid_package_json_errors() {
        let dir = tempdir().unwrap();
        disk::write_file(dir.path().join("package.json"), "{ nope").unwrap();

        let pkg = PkgService::new(dir.path());
        assert!(matches!(
            pkg.read_package(),
            Err(ServiceError::InvalidPackageJson { .. })
        ));
        assert!(!pkg.is_installed("anything"));
    }

    #[test]
    fn test_delete_lock_file_removes_both() {
        let dir = tempdir().unwrap();
        let pkg = write_package(dir.path(), json!({}));

        disk::write_file(dir.path().join("package-lock.json"), "{}").unwrap();
        disk::write_file(dir.path().join("yarn.lock"), "").unwrap();

        pkg.delete_lock_file().unwrap();
        assert!(!disk::does_file_exist(dir.path().join("package-lock.json")));
        assert!(!disk::does_file_exist(dir.path().join("yarn.lock")));
    }

    #[test]
    fn test_package_name_helpers() {
        assert_eq!(PkgService::strip_latest("left-pad@latest"), "left-pad");

        let versioned = NpmPackage {
            name: "left-pad".to_string(),
            version: Some("1.0.0".to_string()),
            is_dev: None,
        };
        assert_eq!(PkgService::build_package_name(&versioned), "left-pad@1.0.0");

        let bare = NpmPackage {
            name: "left-pad".to_string(),
            version: None,
            is_dev: None,
        };
        assert_eq!(PkgService::build_package_name(&bare), "left-pad");
    }
}
