//! Model candidates and the client used to reach them

pub mod analysis_id;
pub mod candidate;
pub mod client;
pub mod token;

pub use analysis_id::AnalysisId;
pub use candidate::{DEFAULT_CANDIDATES, ModelCandidate};
pub use client::{AttemptFailure, Identity, InferenceClient};
pub use token::{ApiToken, TOKEN_ENV_VAR};
