use std::error::Error as _;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::credentials::ApiCredential;

use super::probe::ProbeError;

const TOKEN_ENDPOINT: &str = "/oauth/token";
const CURRENT_APPLICATION_ENDPOINT: &str = "/api/http/applications/me";
const TOKEN_SCOPE: &str = "**";

#[derive(Debug, Clone)]
pub struct SpaceClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl SpaceClient {
    pub fn new(http: Client, base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
            timeout,
        })
    }

    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    pub async fn access_token(&self, credential: &ApiCredential) -> Result<String, ProbeError> {
        let url = self.endpoint_url(TOKEN_ENDPOINT);
        let response = self
            .http
            .post(url)
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", TOKEN_SCOPE)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let token: TokenResponse = self.parse_json_response(response).await?;
        if token.access_token.trim().is_empty() {
            return Err(ProbeError::MalformedResponse(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        Ok(token.access_token)
    }

    pub async fn current_application(
        &self,
        access_token: &str,
    ) -> Result<SpaceApplication, ProbeError> {
        let url = self.endpoint_url(CURRENT_APPLICATION_ENDPOINT);
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        self.parse_json_response(response).await
    }

    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ProbeError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !status.is_success() {
            return Err(map_api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|err| {
            ProbeError::MalformedResponse(format!("unexpected response from Space ({status}): {err}"))
        })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            return ProbeError::Timeout(self.timeout);
        }

        if err.is_builder() {
            return ProbeError::MalformedUrl(error_chain(&err));
        }

        if err.is_decode() {
            return ProbeError::MalformedResponse(error_chain(&err));
        }

        ProbeError::Unreachable(error_chain(&err))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceApplication {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpaceErrorResponse {
    error: Option<String>,
    #[serde(alias = "errorDescription")]
    description: Option<String>,
    message: Option<String>,
}

fn parse_base_url(raw: &str) -> Result<Url, ProbeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ProbeError::MalformedUrl("base url is blank".to_string()));
    }

    let url = Url::parse(raw).map_err(|err| ProbeError::MalformedUrl(format!("`{raw}`: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProbeError::MalformedUrl(format!(
            "`{raw}`: unsupported scheme `{}`",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ProbeError::MalformedUrl(format!("`{raw}`: missing host")));
    }

    Ok(url)
}

fn map_api_error(status: StatusCode, body: &str) -> ProbeError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            "no error details in response body".to_string()
        } else {
            body.to_string()
        }
    });

    let rejected_client = parse_oauth_error(body)
        .is_some_and(|error| matches!(error.as_str(), "invalid_client" | "unauthorized_client"));

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || rejected_client {
        return ProbeError::AuthenticationRejected(format!("{status}: {message}"));
    }

    ProbeError::Api {
        status: status.as_u16(),
        message,
    }
}

fn parse_oauth_error(body: &str) -> Option<String> {
    serde_json::from_str::<OAuthErrorResponse>(body)
        .ok()?
        .error
}

fn parse_api_error_message(body: &str) -> Option<String> {
    if let Ok(oauth) = serde_json::from_str::<OAuthErrorResponse>(body) {
        if let Some(description) = oauth.error_description {
            return Some(match oauth.error {
                Some(error) => format!("{error} ({description})"),
                None => description,
            });
        }
    }

    let envelope = serde_json::from_str::<SpaceErrorResponse>(body).ok()?;
    let parts: Vec<String> = [envelope.error, envelope.description, envelope.message]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(parts.join(", "))
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
