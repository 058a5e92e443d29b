//! Login session persistence
//!
//! The logged-in person lives at `<home>/.skill/person.json`; the current
//! skill's credentials live in the working directory's `.env` plus the
//! package.json namespace slug.

use std::path::PathBuf;

use crate::disk;
use crate::names;
use crate::types::{PersonWithToken, SkillAuth};

use super::{EnvService, PkgService, ServiceError, ServiceResult, SKILL_DIR};

const SKILL_ID: &str = "SKILL_ID";
const SKILL_API_KEY: &str = "SKILL_API_KEY";
const SKILL_NAME: &str = "SKILL_NAME";
const NAMESPACE_PATH: &str = "skill.namespace";

/// Session storage for the logged-in person and the current skill
pub struct AuthService {
    env: EnvService,
    pkg: PkgService,
    home_dir: PathBuf,
}

impl AuthService {
    /// Build an auth service for a working directory
    ///
    /// Fails when `cwd` is empty or holds no package.json.
    pub fn auth(cwd: impl Into<PathBuf>) -> ServiceResult<Self> {
        let cwd = cwd.into();
        if cwd.as_os_str().is_empty() {
            return Err(ServiceError::MissingParameter("cwd"));
        }

        let pkg = PkgService::new(&cwd);
        if !pkg.does_exist() {
            return Err(ServiceError::PackageJsonNotFound(pkg.build_path()));
        }

        Ok(Self {
            env: EnvService::new(&cwd),
            pkg,
            home_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
        })
    }

    /// Point person persistence at a different home directory (tests)
    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = home_dir.into();
        self
    }

    pub fn get_logged_in_person(&self) -> Option<PersonWithToken> {
        let path = self.person_json_path();
        if !disk::does_file_exist(&path) {
            return None;
        }

        let contents = disk::read_file(&path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn set_logged_in_person(&self, person: &PersonWithToken) -> ServiceResult<()> {
        let stored = PersonWithToken {
            is_logged_in: Some(true),
            ..person.clone()
        };

        let contents = serde_json::to_string_pretty(&stored)?;
        disk::write_file(self.person_json_path(), &contents)?;
        Ok(())
    }

    pub fn log_out_person(&self) -> ServiceResult<()> {
        disk::delete_file(self.person_json_path())?;
        Ok(())
    }

    /// The current skill, assembled from env credentials and the
    /// package.json namespace; `None` until both id and api key are set
    pub fn get_current_skill(&self) -> Option<SkillAuth> {
        let id = self.env.get(SKILL_ID)?.to_string();
        let api_key = self.env.get(SKILL_API_KEY)?.to_string();

        if id.is_empty() || api_key.is_empty() {
            return None;
        }

        let name = self
            .env
            .get(SKILL_NAME)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let slug = self
            .pkg
            .get(NAMESPACE_PATH)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        Some(SkillAuth {
            id,
            api_key,
            name,
            slug,
        })
    }

    pub fn update_current_skill(&self, skill: &SkillAuth) -> ServiceResult<()> {
        self.env.set(SKILL_ID, skill.id.as_str())?;
        self.env.set(SKILL_API_KEY, skill.api_key.as_str())?;
        self.env.set(SKILL_NAME, skill.name.as_str())?;

        self.update_current_skill_namespace(&skill.slug)
    }

    pub fn logout_current_skill(&self) -> ServiceResult<()> {
        self.env.unset(SKILL_ID)?;
        self.env.unset(SKILL_API_KEY)?;
        self.env.unset(SKILL_NAME)?;
        Ok(())
    }

    /// Kebab-case the namespace into package.json
    pub fn update_current_skill_namespace(&self, namespace: &str) -> ServiceResult<()> {
        self.pkg.set(
            NAMESPACE_PATH,
            serde_json::Value::String(names::to_kebab(namespace)),
        )
    }

    fn person_json_path(&self) -> PathBuf {
        disk::resolve_path(&self.home_dir, &[SKILL_DIR, "person.json"])
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("person_path", &self.person_json_path())
            .finish()
    }
}
