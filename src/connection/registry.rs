use std::sync::Arc;

use parking_lot::RwLock;

use crate::api::ConnectivityProbe;
use crate::credentials::{
    CredentialDescriptor, CredentialKind, CredentialStore, LookupMode, UrlRequirement,
};
use crate::error::AppResult;
use crate::security::{AuthorizationChecker, Capability, Principal};

use super::check::{ConnectionCheck, ConnectionFailure};
use super::profile::ConnectionProfile;

pub struct ConnectionRegistry {
    profiles: RwLock<Vec<ConnectionProfile>>,
    credentials: Arc<dyn CredentialStore>,
    authorizer: Arc<dyn AuthorizationChecker>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl ConnectionRegistry {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        authorizer: Arc<dyn AuthorizationChecker>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self::with_profiles(Vec::new(), credentials, authorizer, probe)
    }

    pub fn with_profiles(
        profiles: Vec<ConnectionProfile>,
        credentials: Arc<dyn CredentialStore>,
        authorizer: Arc<dyn AuthorizationChecker>,
        probe: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            profiles: RwLock::new(profiles),
            credentials,
            authorizer,
            probe,
        }
    }

    /// Builds a profile and appends it. Ids are not checked for uniqueness.
    pub fn create_profile(
        &self,
        id: Option<&str>,
        name: &str,
        base_url: &str,
        api_credential_id: &str,
        ssh_credential_id: &str,
    ) -> ConnectionProfile {
        let profile =
            ConnectionProfile::new(id, name, base_url, api_credential_id, ssh_credential_id);

        let mut profiles = self.profiles.write();
        if profiles.iter().any(|existing| existing.id() == profile.id()) {
            log::warn!("connection id `{}` is already in use", profile.id());
        }
        profiles.push(profile.clone());
        log::debug!("registered connection `{}` ({})", profile.id(), profile.name());

        profile
    }

    pub fn profiles(&self) -> Vec<ConnectionProfile> {
        self.profiles.read().clone()
    }

    pub fn find_profile(&self, id: &str) -> Option<ConnectionProfile> {
        self.profiles
            .read()
            .iter()
            .find(|profile| profile.id() == id)
            .cloned()
    }

    pub fn list_matching_api_credentials(
        &self,
        base_url: &str,
        requester: &Principal,
    ) -> AppResult<impl Iterator<Item = CredentialDescriptor> + use<>> {
        self.list_matching(CredentialKind::ApiToken, base_url, requester)
    }

    pub fn list_matching_ssh_credentials(
        &self,
        base_url: &str,
        requester: &Principal,
    ) -> AppResult<impl Iterator<Item = CredentialDescriptor> + use<>> {
        self.list_matching(CredentialKind::SshPrivateKey, base_url, requester)
    }

    /// Resolves the API credential and probes the endpoint once.
    pub async fn test_connection(
        &self,
        base_url: &str,
        api_credential_id: &str,
        requester: &Principal,
    ) -> AppResult<ConnectionCheck> {
        self.authorizer.require(requester, Capability::Configure)?;

        let system = Principal::system();
        let Some(credential) = self
            .credentials
            .find(LookupMode::from(&system), api_credential_id)?
        else {
            log::info!("connection test skipped: credential `{api_credential_id}` not found");
            return Ok(ConnectionFailure::CredentialNotFound(api_credential_id.to_string()).into());
        };

        let actual = credential.kind();
        let Some(credential) = credential.into_api_credential() else {
            return Ok(ConnectionFailure::WrongCredentialKind {
                id: api_credential_id.to_string(),
                expected: CredentialKind::ApiToken,
                actual,
            }
            .into());
        };

        let target = log_target(base_url);
        match self.probe.probe(base_url, &credential).await {
            Ok(()) => {
                log::info!("connection test to {target} succeeded");
                Ok(ConnectionCheck::Ok)
            }
            Err(err) => {
                log::info!("connection test to {target} failed: {err}");
                Ok(ConnectionFailure::Probe(err).into())
            }
        }
    }

    fn list_matching(
        &self,
        kind: CredentialKind,
        base_url: &str,
        requester: &Principal,
    ) -> AppResult<impl Iterator<Item = CredentialDescriptor> + use<>> {
        self.authorizer.require(requester, Capability::Configure)?;

        let system = Principal::system();
        let requirement = UrlRequirement::from_url(base_url);
        let mut matches = self
            .credentials
            .lookup(LookupMode::from(&system), kind, &requirement)?;
        matches.retain(|credential| credential.kind() == kind);
        matches.sort_by_cached_key(|credential| {
            (credential.label().to_lowercase(), credential.id.clone())
        });
        log::debug!(
            "{} {kind} credential(s) match {} for `{requester}`",
            matches.len(),
            log_target(base_url)
        );

        Ok(matches.into_iter().map(|credential| credential.descriptor()))
    }
}

// Host only, never userinfo.
fn log_target(base_url: &str) -> String {
    UrlRequirement::from_url(base_url)
        .host()
        .map_or_else(|| "an unparseable url".to_string(), ToOwned::to_owned)
}
