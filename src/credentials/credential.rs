use std::fmt;

use serde::{Deserialize, Serialize};

use super::matching::CredentialScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    ApiToken,
    SshPrivateKey,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken => f.write_str("API token"),
            Self::SshPrivateKey => f.write_str("SSH private key"),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CredentialSecret {
    ApiToken {
        client_id: String,
        client_secret: String,
    },
    SshPrivateKey {
        username: String,
        private_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        passphrase: Option<String>,
    },
}

impl CredentialSecret {
    pub fn kind(&self) -> CredentialKind {
        match self {
            Self::ApiToken { .. } => CredentialKind::ApiToken,
            Self::SshPrivateKey { .. } => CredentialKind::SshPrivateKey,
        }
    }
}

impl fmt::Debug for CredentialSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken { client_id, .. } => f
                .debug_struct("ApiToken")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
            Self::SshPrivateKey {
                username,
                passphrase,
                ..
            } => f
                .debug_struct("SshPrivateKey")
                .field("username", username)
                .field("private_key", &"<redacted>")
                .field("passphrase", &passphrase.as_ref().map(|_| "<redacted>"))
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub scope: CredentialScope,
    pub secret: CredentialSecret,
}

impl Credential {
    pub fn kind(&self) -> CredentialKind {
        self.secret.kind()
    }

    pub fn label(&self) -> String {
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty());

        match (&self.secret, description) {
            (CredentialSecret::SshPrivateKey { username, .. }, Some(description)) => {
                format!("{username} ({description})")
            }
            (CredentialSecret::SshPrivateKey { username, .. }, None) => username.clone(),
            (CredentialSecret::ApiToken { .. }, Some(description)) => description.to_string(),
            (CredentialSecret::ApiToken { .. }, None) => self.id.clone(),
        }
    }

    pub fn descriptor(&self) -> CredentialDescriptor {
        CredentialDescriptor {
            id: self.id.clone(),
            label: self.label(),
        }
    }

    pub fn into_api_credential(self) -> Option<ApiCredential> {
        match self.secret {
            CredentialSecret::ApiToken {
                client_id,
                client_secret,
            } => Some(ApiCredential {
                id: self.id,
                client_id,
                client_secret,
            }),
            CredentialSecret::SshPrivateKey { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialDescriptor {
    pub id: String,
    pub label: String,
}

#[derive(Clone)]
pub struct ApiCredential {
    pub id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("id", &self.id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
