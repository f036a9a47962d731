use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

use super::credential::{Credential, CredentialKind};
use super::matching::UrlRequirement;
use super::store::{CredentialStore, LookupMode};

#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn list(&self) -> AppResult<Vec<Credential>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let credentials: Vec<Credential> = serde_json::from_str(&raw)?;
        let mut seen = HashSet::new();
        for credential in &credentials {
            if !seen.insert(credential.id.as_str()) {
                return Err(AppError::CredentialStore(format!(
                    "{} contains credential id `{}` more than once",
                    self.path.display(),
                    credential.id
                )));
            }
        }

        Ok(credentials)
    }

    /// Inserts the credential, replacing an existing record of the same id and kind.
    pub fn save(&self, credential: Credential) -> AppResult<()> {
        if credential.id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "credential id must not be blank".to_string(),
            ));
        }

        let mut credentials = self.list()?;
        match credentials.iter_mut().find(|existing| existing.id == credential.id) {
            Some(existing) if existing.kind() != credential.kind() => {
                return Err(AppError::InvalidInput(format!(
                    "credential `{}` is stored as {}, not {}; remove it first to change its kind",
                    credential.id,
                    existing.kind(),
                    credential.kind()
                )));
            }
            Some(existing) => *existing = credential,
            None => credentials.push(credential),
        }

        self.write(&credentials)
    }

    pub fn remove(&self, id: &str) -> AppResult<bool> {
        let mut credentials = self.list()?;
        let before = credentials.len();
        credentials.retain(|credential| credential.id != id);
        if credentials.len() == before {
            return Ok(false);
        }

        self.write(&credentials)?;
        Ok(true)
    }

    fn write(&self, credentials: &[Credential]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, payload)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn lookup(
        &self,
        mode: LookupMode<'_>,
        kind: CredentialKind,
        requirement: &UrlRequirement,
    ) -> AppResult<Vec<Credential>> {
        let matches = self
            .list()?
            .into_iter()
            .filter(|credential| credential.kind() == kind)
            .filter(|credential| mode.can_see(credential))
            .filter(|credential| credential.scope.matches(requirement))
            .collect();
        Ok(matches)
    }

    fn find(&self, mode: LookupMode<'_>, id: &str) -> AppResult<Option<Credential>> {
        let found = self
            .list()?
            .into_iter()
            .find(|credential| credential.id == id && mode.can_see(credential));
        Ok(found)
    }
}
