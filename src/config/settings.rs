use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::connection::ConnectionProfile;
use crate::error::AppResult;

const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub connections: Vec<ConnectionProfile>,
    #[serde(default)]
    pub authorization: AuthorizationSettings,
    #[serde(default)]
    pub default_principal: Option<String>,
    #[serde(default)]
    pub probe_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn probe_timeout(&self) -> Duration {
        let secs = self
            .probe_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationSettings {
    #[serde(default)]
    pub administrators: Vec<String>,
    #[serde(default = "default_configurers")]
    pub configurers: Vec<String>,
}

impl Default for AuthorizationSettings {
    fn default() -> Self {
        Self {
            administrators: Vec::new(),
            configurers: default_configurers(),
        }
    }
}

fn default_configurers() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    Ok(settings)
}

pub fn save(path: PathBuf, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(&path, payload)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").expect("settings should parse");
        assert!(settings.connections.is_empty());
        assert_eq!(settings.authorization.configurers, ["*"]);
        assert_eq!(settings.probe_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let settings = Settings {
            probe_timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.probe_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn loads_connections_and_policy() {
        let raw = r#"{
            "connections": [{
                "id": "space-prod",
                "name": "Space Prod",
                "baseUrl": "https://acme.jetbrains.space",
                "apiCredentialId": "api-1",
                "sshCredentialId": "ssh-1"
            }],
            "authorization": { "configurers": ["alice"] },
            "probe_timeout_secs": 3
        }"#;

        let settings: Settings = serde_json::from_str(raw).expect("settings should parse");
        assert_eq!(settings.connections.len(), 1);
        assert_eq!(settings.connections[0].id(), "space-prod");
        assert_eq!(settings.authorization.configurers, ["alice"]);
        assert!(settings.authorization.administrators.is_empty());
        assert_eq!(settings.probe_timeout(), Duration::from_secs(3));
    }
}
