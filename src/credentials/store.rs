use crate::error::AppResult;
use crate::security::Principal;

use super::credential::{Credential, CredentialKind};
use super::matching::UrlRequirement;

#[derive(Debug, Clone, Copy)]
pub enum LookupMode<'a> {
    System,
    Caller(&'a Principal),
}

impl<'a> From<&'a Principal> for LookupMode<'a> {
    fn from(principal: &'a Principal) -> Self {
        if principal.is_system() {
            Self::System
        } else {
            Self::Caller(principal)
        }
    }
}

impl LookupMode<'_> {
    pub fn can_see(&self, credential: &Credential) -> bool {
        match (self, credential.owner.as_deref()) {
            (_, None) => true,
            (Self::System, Some(_)) => false,
            (Self::Caller(principal), Some(owner)) => owner == principal.name(),
        }
    }
}

pub trait CredentialStore: Send + Sync {
    fn lookup(
        &self,
        mode: LookupMode<'_>,
        kind: CredentialKind,
        requirement: &UrlRequirement,
    ) -> AppResult<Vec<Credential>>;

    fn find(&self, mode: LookupMode<'_>, id: &str) -> AppResult<Option<Credential>>;
}
