//! HTTP client for the hosted inference API
//!
//! Wraps a single `reqwest::Client` configured with the bearer token and the
//! request timeout. Inference failures are returned as `AttemptFailure`
//! values so the prober can decide whether to retry or move on.

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ApiToken, ModelCandidate};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description of one failed inference call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// HTTP status, absent for transport errors (timeout, DNS, refused)
    pub status: Option<u16>,
    pub message: String,
}

impl AttemptFailure {
    /// True when the model answered 503 (still loading)
    pub fn is_cold_start(&self) -> bool {
        self.status == Some(StatusCode::SERVICE_UNAVAILABLE.as_u16())
    }
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "request failed: {}", self.message),
        }
    }
}

/// Request body for the inference endpoint
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Account returned by the identity lookup
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Authenticated client for inference and identity calls
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    token: ApiToken,
    inference_base_url: String,
    whoami_url: String,
}

impl InferenceClient {
    /// Create a client from the API configuration
    ///
    /// Connections are not kept alive between calls.
    pub fn new(api: &ApiConfig, token: ApiToken) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(api.request_timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            token,
            inference_base_url: api.inference_base_url.trim_end_matches('/').to_string(),
            whoami_url: api.whoami_url.clone(),
        })
    }

    /// Inference URL for one model
    pub fn model_url(&self, model: &ModelCandidate) -> String {
        format!("{}/{}", self.inference_base_url, model.as_str())
    }

    /// POST `{"inputs": text}` to a model
    ///
    /// Returns the decoded JSON body on a 2xx response. Every other outcome,
    /// including transport errors and undecodable bodies, is an `AttemptFailure`.
    pub async fn infer(&self, model: &ModelCandidate, text: &str) -> Result<Value, AttemptFailure> {
        let url = self.model_url(model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose())
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .map_err(|e| AttemptFailure {
                status: e.status().map(|s| s.as_u16()),
                message: describe_transport_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptFailure {
                status: Some(status.as_u16()),
                message: error_message_from_body(status, &body),
            });
        }

        response.json::<Value>().await.map_err(|e| AttemptFailure {
            status: Some(status.as_u16()),
            message: format!("response body is not valid JSON: {}", e),
        })
    }

    /// GET the identity associated with the token
    pub async fn whoami(&self) -> AppResult<Identity> {
        let response = self
            .http
            .get(&self.whoami_url)
            .bearer_auth(self.token.expose())
            .send()
            .await
            .map_err(|e| AppError::IdentityCheckFailed {
                status: e.status().map(|s| s.as_u16()),
                reason: describe_transport_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityCheckFailed {
                status: Some(status.as_u16()),
                reason: error_message_from_body(status, &body),
            });
        }

        response
            .json::<Identity>()
            .await
            .map_err(|e| AppError::IdentityCheckFailed {
                status: Some(status.as_u16()),
                reason: format!("unexpected response body: {}", e),
            })
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        e.to_string()
    }
}

/// Pick the most useful message out of an error response body
///
/// Prefers a JSON `"error"` string, then the raw body, then the status reason.
pub fn error_message_from_body(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body)
        && let Some(Value::String(error)) = map.get("error")
    {
        return error.clone();
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
