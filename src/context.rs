use std::sync::Arc;

use crate::api::SpaceApiProbe;
use crate::config::{self, AppPaths, Settings};
use crate::connection::ConnectionRegistry;
use crate::credentials::FileCredentialStore;
use crate::error::AppResult;
use crate::output::Output;
use crate::security::{AuthorizationChecker, Capability, PolicyAuthorizer, Principal};

pub struct AppContext {
    pub principal: Principal,
    pub paths: AppPaths,
    pub settings: Settings,
    pub credential_store: Arc<FileCredentialStore>,
    pub authorizer: Arc<PolicyAuthorizer>,
    pub registry: ConnectionRegistry,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(principal: Option<&str>, json: bool) -> AppResult<Self> {
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths)?;
        let principal = config::resolve_principal(principal, &settings);
        let credential_store = Arc::new(FileCredentialStore::new(paths.credentials_file()));
        let authorizer = Arc::new(PolicyAuthorizer::new(&settings.authorization));
        let probe = Arc::new(SpaceApiProbe::new(settings.probe_timeout())?);
        let registry = ConnectionRegistry::with_profiles(
            settings.connections.clone(),
            credential_store.clone(),
            authorizer.clone(),
            probe,
        );
        let output = Output::new(json);

        log::debug!(
            "loaded {} connection(s) from {}; acting as `{principal}`",
            settings.connections.len(),
            paths.settings_file().display()
        );

        Ok(Self {
            principal,
            paths,
            settings,
            credential_store,
            authorizer,
            registry,
            output,
        })
    }

    pub fn require(&self, capability: Capability) -> AppResult<()> {
        self.authorizer.require(&self.principal, capability)
    }

    pub fn persist_connections(&mut self) -> AppResult<()> {
        self.settings.connections = self.registry.profiles();
        config::save_settings(&self.paths, &self.settings)
    }
}
