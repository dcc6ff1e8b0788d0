//! Configuration management for sentiprobe
//!
//! Parses an optional TOML configuration file and provides typed access to
//! settings. Every section has defaults, so an empty file (or no file at all)
//! yields a working configuration.

use crate::error::{AppError, AppResult};
use crate::models::ModelCandidate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Upper bound for `api.request_timeout_seconds`
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;
/// Upper bound for `retry.cold_start_delay_seconds`
pub const MAX_COLD_START_DELAY_SECONDS: u64 = 120;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Remote API endpoints and request limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL; the model id is appended as a path (`{base}/{model}`)
    #[serde(default = "default_inference_base_url")]
    pub inference_base_url: String,
    /// Identity lookup used by the token preflight
    #[serde(default = "default_whoami_url")]
    pub whoami_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            inference_base_url: default_inference_base_url(),
            whoami_url: default_whoami_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Per-request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_inference_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_whoami_url() -> String {
    "https://huggingface.co/api/whoami".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Cold-start retry settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Pause before the single retry of a model that answered 503
    #[serde(default = "default_cold_start_delay")]
    pub cold_start_delay_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            cold_start_delay_seconds: default_cold_start_delay(),
        }
    }
}

impl RetryConfig {
    /// Cold-start delay as a `Duration`
    pub fn cold_start_delay(&self) -> Duration {
        Duration::from_secs(self.cold_start_delay_seconds)
    }
}

fn default_cold_start_delay() -> u64 {
    10
}

/// Ordered candidate models (earlier entries are preferred)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelsConfig {
    #[serde(default = "ModelCandidate::defaults")]
    pub candidates: Vec<ModelCandidate>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            candidates: ModelCandidate::defaults(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        // Phase 1: Read file (preserves io::Error context)
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        // Phase 2: Parse TOML (preserves toml::de::Error context)
        let config: Self = toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: path_display.clone(),
            source,
        })?;

        // Phase 3: Validate parsed config (provides contextual reason)
        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load the file if present, otherwise fall back to built-in defaults
    ///
    /// When `required` is true (the user named the file explicitly) a missing
    /// file is an error instead.
    pub fn load(path: &Path, required: bool) -> AppResult<Self> {
        if !required && !path.exists() {
            tracing::debug!(
                path = %path.display(),
                "No configuration file found, using built-in defaults"
            );
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Validate configuration after parsing
    ///
    /// This is called automatically by `from_file()`, but can also be called
    /// explicitly when constructing Config via other means (e.g., in tests).
    pub fn validate(&self) -> AppResult<()> {
        for (field, url) in [
            ("api.inference_base_url", &self.api.inference_base_url),
            ("api.whoami_url", &self.api.whoami_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Config(format!(
                    "{} must start with http:// or https://, got '{}'",
                    field, url
                )));
            }
        }

        let timeout = self.api.request_timeout_seconds;
        if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT_SECONDS {
            return Err(AppError::Config(format!(
                "api.request_timeout_seconds must be in 1..={}, got {}",
                MAX_REQUEST_TIMEOUT_SECONDS, timeout
            )));
        }

        if self.retry.cold_start_delay_seconds > MAX_COLD_START_DELAY_SECONDS {
            return Err(AppError::Config(format!(
                "retry.cold_start_delay_seconds cannot exceed {}, got {}",
                MAX_COLD_START_DELAY_SECONDS, self.retry.cold_start_delay_seconds
            )));
        }

        if self.models.candidates.is_empty() {
            return Err(AppError::Config(
                "models.candidates must list at least one model".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for candidate in &self.models.candidates {
            if candidate.as_str().trim().is_empty() {
                return Err(AppError::Config(
                    "models.candidates cannot contain empty model ids".to_string(),
                ));
            }
            if !seen.insert(candidate.as_str()) {
                return Err(AppError::Config(format!(
                    "models.candidates lists '{}' more than once",
                    candidate
                )));
            }
        }

        Ok(())
    }
}
