//! Error types for sentiprobe
//!
//! Only failures that stop an operation are modelled here. A single failed
//! inference call is a value (`AttemptResult::Failure`), not an error.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error(
        "No API token found. Set the {env_var} environment variable (or add it to a .env file) \
        to a Hugging Face access token from https://huggingface.co/settings/tokens"
    )]
    MissingToken { env_var: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Identity check failed ({}): {reason}", describe_status(.status))]
    IdentityCheckFailed {
        /// HTTP status, absent when no response arrived
        status: Option<u16>,
        reason: String,
    },

    #[error("No model could be reached ({attempted} candidates tried)")]
    CandidatesExhausted { attempted: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "no response".to_string(),
    }
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
