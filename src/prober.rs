//! Sequential model probing with cold-start retry
//!
//! Candidates are tried strictly in order, one request at a time. The first
//! successful response wins. A model answering 503 (still loading) gets one
//! delayed retry; any other failure moves straight on to the next candidate.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AnalysisId, ApiToken, AttemptFailure, InferenceClient, ModelCandidate};
use serde_json::Value;
use std::time::Duration;

/// Outcome of one HTTP call to one candidate
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    Success {
        model: ModelCandidate,
        payload: Value,
    },
    Failure {
        model: ModelCandidate,
        error: AttemptFailure,
    },
}

impl AttemptResult {
    /// The candidate this attempt was made against
    pub fn model(&self) -> &ModelCandidate {
        match self {
            Self::Success { model, .. } | Self::Failure { model, .. } => model,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Result of a successful probe
#[derive(Debug, Clone)]
pub struct ProbeSuccess {
    /// The candidate that answered
    pub model: ModelCandidate,
    /// Decoded response body
    pub payload: Value,
    /// Number of HTTP calls made, including the successful one
    pub attempts: usize,
    pub analysis_id: AnalysisId,
}

/// Progress callbacks fired while probing
///
/// All methods default to no-ops; `()` is the silent listener.
pub trait ProbeListener {
    /// About to call `model`; `retry` is true for the post-503 retry
    fn on_attempt(&mut self, _model: &ModelCandidate, _retry: bool) {}

    /// `model` answered 503 and will be retried after `delay`
    fn on_cold_start(&mut self, _model: &ModelCandidate, _delay: Duration) {}

    /// A call finished
    fn on_result(&mut self, _result: &AttemptResult) {}
}

impl ProbeListener for () {}

/// Position in the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProbeStep {
    index: usize,
    retried: bool,
}

impl ProbeStep {
    fn start() -> Self {
        Self {
            index: 0,
            retried: false,
        }
    }

    fn next_candidate(self) -> Self {
        Self {
            index: self.index + 1,
            retried: false,
        }
    }

    fn retry(self) -> Self {
        Self {
            retried: true,
            ..self
        }
    }
}

/// Tries candidates in order until one succeeds
#[derive(Debug, Clone)]
pub struct Prober {
    client: InferenceClient,
    candidates: Vec<ModelCandidate>,
    cold_start_delay: Duration,
}

impl Prober {
    /// Create a prober over a fixed candidate list
    ///
    /// # Errors
    /// Returns an error if `candidates` is empty.
    pub fn new(
        client: InferenceClient,
        candidates: Vec<ModelCandidate>,
        cold_start_delay: Duration,
    ) -> AppResult<Self> {
        if candidates.is_empty() {
            return Err(AppError::Config(
                "at least one model candidate is required".to_string(),
            ));
        }
        Ok(Self {
            client,
            candidates,
            cold_start_delay,
        })
    }

    /// Build the client and prober from a validated configuration
    pub fn from_config(config: &Config, token: ApiToken) -> AppResult<Self> {
        let client = InferenceClient::new(&config.api, token)?;
        Self::new(
            client,
            config.models.candidates.clone(),
            config.retry.cold_start_delay(),
        )
    }

    /// Candidates in the order they are tried
    pub fn candidates(&self) -> &[ModelCandidate] {
        &self.candidates
    }

    pub fn client(&self) -> &InferenceClient {
        &self.client
    }

    /// Make a single call to one candidate (no retry)
    pub async fn attempt(&self, model: &ModelCandidate, text: &str) -> AttemptResult {
        match self.client.infer(model, text).await {
            Ok(payload) => AttemptResult::Success {
                model: model.clone(),
                payload,
            },
            Err(error) => AttemptResult::Failure {
                model: model.clone(),
                error,
            },
        }
    }

    /// Run `text` through the candidates until one succeeds
    ///
    /// # Returns
    /// The first successful response, or `AppError::CandidatesExhausted` once
    /// every candidate has failed.
    pub async fn probe<L>(&self, text: &str, listener: &mut L) -> AppResult<ProbeSuccess>
    where
        L: ProbeListener + ?Sized,
    {
        let analysis_id = AnalysisId::new();
        let mut step = ProbeStep::start();
        let mut attempts = 0;

        while let Some(model) = self.candidates.get(step.index) {
            tracing::debug!(
                analysis_id = %analysis_id,
                model = %model,
                candidate = step.index + 1,
                total_candidates = self.candidates.len(),
                retry = step.retried,
                text_length = text.len(),
                "Attempting model"
            );

            listener.on_attempt(model, step.retried);
            attempts += 1;
            let result = self.attempt(model, text).await;
            listener.on_result(&result);

            match result {
                AttemptResult::Success { model, payload } => {
                    tracing::info!(
                        analysis_id = %analysis_id,
                        model = %model,
                        attempts = attempts,
                        "Model answered successfully"
                    );
                    return Ok(ProbeSuccess {
                        model,
                        payload,
                        attempts,
                        analysis_id,
                    });
                }
                AttemptResult::Failure { model, error } if error.is_cold_start() && !step.retried => {
                    tracing::warn!(
                        analysis_id = %analysis_id,
                        model = %model,
                        error = %error,
                        delay_ms = self.cold_start_delay.as_millis() as u64,
                        "Model is loading, retrying once after delay"
                    );
                    listener.on_cold_start(&model, self.cold_start_delay);
                    tokio::time::sleep(self.cold_start_delay).await;
                    step = step.retry();
                }
                AttemptResult::Failure { model, error } => {
                    tracing::warn!(
                        analysis_id = %analysis_id,
                        model = %model,
                        status = ?error.status,
                        error = %error,
                        retried = step.retried,
                        "Model failed, moving to next candidate"
                    );
                    step = step.next_candidate();
                }
            }
        }

        tracing::error!(
            analysis_id = %analysis_id,
            candidates = self.candidates.len(),
            attempts = attempts,
            "All model candidates exhausted"
        );

        Err(AppError::CandidatesExhausted {
            attempted: self.candidates.len(),
        })
    }
}
