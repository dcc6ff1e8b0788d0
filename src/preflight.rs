//! Token preflight
//!
//! Looks up the identity behind the token before the first analysis. The
//! check never blocks: an invalid token will be rejected by the inference
//! endpoint itself, so a failed lookup is only reported.

use crate::models::{Identity, InferenceClient};
use std::io::Write;

/// Outcome of the identity lookup, for display
#[derive(Debug, Clone)]
pub enum PreflightReport {
    Authenticated(Identity),
    Unverified(String),
}

/// Run the identity lookup and describe the outcome
pub async fn whoami(client: &InferenceClient) -> PreflightReport {
    match client.whoami().await {
        Ok(identity) => {
            tracing::info!(
                user = %identity.name,
                account_type = identity.kind.as_deref().unwrap_or("unknown"),
                "Token verified"
            );
            PreflightReport::Authenticated(identity)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Token verification failed, continuing anyway"
            );
            PreflightReport::Unverified(e.to_string())
        }
    }
}

/// Check the token and print the outcome to `out`; always signals "proceed"
pub async fn check_token<W: Write + ?Sized>(client: &InferenceClient, out: &mut W) -> bool {
    let report = whoami(client).await;
    if let Err(e) = writeln!(out, "{}", report) {
        tracing::debug!(error = %e, "Failed to print preflight report");
    }
    true
}

impl std::fmt::Display for PreflightReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authenticated(identity) => write!(f, "✅ Token valid, logged in as {}", identity.name),
            Self::Unverified(reason) => write!(
                f,
                "⚠️  Could not verify token ({}). Continuing anyway.",
                reason
            ),
        }
    }
}
