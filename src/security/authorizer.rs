use crate::config::AuthorizationSettings;
use crate::error::{AppError, AppResult};

use super::principal::{Capability, Principal};

const ANY_PRINCIPAL: &str = "*";

pub trait AuthorizationChecker: Send + Sync {
    fn is_allowed(&self, principal: &Principal, capability: Capability) -> bool;

    fn require(&self, principal: &Principal, capability: Capability) -> AppResult<()> {
        if self.is_allowed(principal, capability) {
            return Ok(());
        }

        log::warn!("denied {capability} to principal `{principal}`");
        Err(AppError::Forbidden(format!(
            "`{principal}` is missing the {capability} permission"
        )))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PolicyAuthorizer {
    administrators: Vec<String>,
    configurers: Vec<String>,
}

impl PolicyAuthorizer {
    pub fn new(settings: &AuthorizationSettings) -> Self {
        Self {
            administrators: normalize(&settings.administrators),
            configurers: normalize(&settings.configurers),
        }
    }
}

impl AuthorizationChecker for PolicyAuthorizer {
    fn is_allowed(&self, principal: &Principal, capability: Capability) -> bool {
        if principal.is_system() || listed(&self.administrators, principal) {
            return true;
        }

        match capability {
            Capability::Administer => false,
            Capability::Configure => listed(&self.configurers, principal),
        }
    }
}

fn normalize(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn listed(names: &[String], principal: &Principal) -> bool {
    names
        .iter()
        .any(|name| name == ANY_PRINCIPAL || name == principal.name())
}
