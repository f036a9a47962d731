use serde::Serialize;
use thiserror::Error;

use crate::api::ProbeError;
use crate::credentials::CredentialKind;

const CONNECTION_FAILED: &str = "couldn't connect to the Space API";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionFailure {
    #[error("credential `{0}` was not found")]
    CredentialNotFound(String),
    #[error("credential `{id}` is of kind {actual}, expected {expected}")]
    WrongCredentialKind {
        id: String,
        expected: CredentialKind,
        actual: CredentialKind,
    },
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

impl ConnectionFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredentialNotFound(_) => "credential_not_found",
            Self::WrongCredentialKind { .. } => "wrong_credential_kind",
            Self::Probe(err) => err.kind(),
        }
    }

    pub fn is_credential_resolution(&self) -> bool {
        matches!(
            self,
            Self::CredentialNotFound(_) | Self::WrongCredentialKind { .. }
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}: {cause}")]
pub struct ConnectionError {
    pub message: String,
    #[source]
    pub cause: ConnectionFailure,
}

impl From<ConnectionFailure> for ConnectionError {
    fn from(cause: ConnectionFailure) -> Self {
        Self {
            message: CONNECTION_FAILED.to_string(),
            cause,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    Ok,
    Error(ConnectionError),
}

impl ConnectionCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub fn error(&self) -> Option<&ConnectionError> {
        match self {
            Self::Ok => None,
            Self::Error(err) => Some(err),
        }
    }

    pub fn view(&self) -> ConnectionCheckView {
        match self {
            Self::Ok => ConnectionCheckView {
                ok: true,
                message: None,
                cause: None,
                cause_kind: None,
            },
            Self::Error(err) => ConnectionCheckView {
                ok: false,
                message: Some(err.message.clone()),
                cause: Some(err.cause.to_string()),
                cause_kind: Some(err.cause.kind()),
            },
        }
    }
}

impl From<ConnectionFailure> for ConnectionCheck {
    fn from(cause: ConnectionFailure) -> Self {
        Self::Error(cause.into())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionCheckView {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_kind: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_wraps_cause() {
        let check = ConnectionCheck::from(ConnectionFailure::Probe(ProbeError::Unreachable(
            "connection refused".to_string(),
        )));

        let err = check.error().expect("check should fail");
        assert_eq!(
            err.to_string(),
            "couldn't connect to the Space API: host unreachable: connection refused"
        );
    }

    #[test]
    fn view_exposes_cause_kind() {
        let check = ConnectionCheck::from(ConnectionFailure::CredentialNotFound("gone".to_string()));
        let view = check.view();
        assert!(!view.ok);
        assert_eq!(view.cause_kind, Some("credential_not_found"));

        let ok = ConnectionCheck::Ok.view();
        assert!(ok.ok);
        assert!(ok.cause.is_none());
    }
}
