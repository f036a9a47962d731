use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::credentials::ApiCredential;
use crate::error::AppResult;

use super::client::SpaceClient;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("malformed url: {0}")]
    MalformedUrl(String),
    #[error("host unreachable: {0}")]
    Unreachable(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("authentication rejected: {0}")]
    AuthenticationRejected(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("api request failed ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ProbeError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedUrl(_) => "malformed_url",
            Self::Unreachable(_) => "unreachable",
            Self::Timeout(_) => "timeout",
            Self::AuthenticationRejected(_) => "authentication_rejected",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Api { .. } => "api_error",
        }
    }
}

#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn probe(&self, base_url: &str, credential: &ApiCredential) -> Result<(), ProbeError>;
}

#[derive(Debug, Clone)]
pub struct SpaceApiProbe {
    http: Client,
    timeout: Duration,
}

impl SpaceApiProbe {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self { http, timeout })
    }
}

#[async_trait]
impl ConnectivityProbe for SpaceApiProbe {
    async fn probe(&self, base_url: &str, credential: &ApiCredential) -> Result<(), ProbeError> {
        let client = SpaceClient::new(self.http.clone(), base_url, self.timeout)?;
        log::debug!(
            "probing {} with credential `{}`",
            client.host(),
            credential.id
        );

        let access_token = client.access_token(credential).await?;
        let application = client.current_application(&access_token).await?;

        log::info!(
            "connected to {} as application `{}`",
            client.host(),
            application
                .name
                .as_deref()
                .or(application.id.as_deref())
                .unwrap_or("unknown")
        );
        Ok(())
    }
}
