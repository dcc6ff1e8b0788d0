//! API token wrapper
//!
//! Keeps the bearer token out of logs: `Debug` and `Display` are redacted.

use crate::error::{AppError, AppResult};

/// Environment variable holding the Hugging Face access token
pub const TOKEN_ENV_VAR: &str = "HF_TOKEN";

/// A non-empty bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Build a token from an optional raw value (env var, CLI flag, ...)
    ///
    /// # Errors
    /// Returns `AppError::MissingToken` when the value is absent, empty or
    /// whitespace-only.
    pub fn from_optional(raw: Option<String>) -> AppResult<Self> {
        match raw.map(|s| s.trim().to_string()) {
            Some(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(AppError::MissingToken {
                env_var: TOKEN_ENV_VAR.to_string(),
            }),
        }
    }

    /// The raw secret, for building the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

impl std::fmt::Display for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}
