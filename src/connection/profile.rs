use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProfileRecord")]
pub struct ConnectionProfile {
    id: String,
    name: String,
    base_url: String,
    api_credential_id: String,
    ssh_credential_id: String,
}

impl ConnectionProfile {
    pub fn new(
        id: Option<&str>,
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_credential_id: impl Into<String>,
        ssh_credential_id: impl Into<String>,
    ) -> Self {
        let id = match id {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => generate_id(),
        };

        Self {
            id,
            name: name.into(),
            base_url: base_url.into(),
            api_credential_id: api_credential_id.into(),
            ssh_credential_id: ssh_credential_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_credential_id(&self) -> &str {
        &self.api_credential_id
    }

    pub fn ssh_credential_id(&self) -> &str {
        &self.ssh_credential_id
    }
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    base_url: String,
    #[serde(default)]
    api_credential_id: String,
    #[serde(default)]
    ssh_credential_id: String,
}

impl From<ProfileRecord> for ConnectionProfile {
    fn from(record: ProfileRecord) -> Self {
        Self::new(
            record.id.as_deref(),
            record.name,
            record.base_url,
            record.api_credential_id,
            record.ssh_credential_id,
        )
    }
}
