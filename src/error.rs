use std::io;

use thiserror::Error;

use crate::connection::ConnectionError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("permission denied: {0}")]
    Forbidden(String),
    #[error("credential store error: {0}")]
    CredentialStore(String),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    // A failed connection check is the command's own output, already printed.
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionFailure;

    #[test]
    fn failed_checks_are_already_reported() {
        let failure = ConnectionFailure::CredentialNotFound("api-1".to_string());
        assert!(AppError::from(ConnectionError::from(failure)).is_reported());
        assert!(!AppError::Forbidden("bob".to_string()).is_reported());
    }
}
