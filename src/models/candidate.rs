//! Type-safe model candidate identifier
//!
//! A candidate names one remote sentiment-classification model. The ordered
//! list of candidates is fixed at startup and earlier entries are preferred.

use serde::{Deserialize, Serialize};

/// Models tried when the configuration does not list any, in preference order
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "cardiffnlp/twitter-roberta-base-sentiment-latest",
    "distilbert-base-uncased-finetuned-sst-2-english",
    "nlptown/bert-base-multilingual-uncased-sentiment",
];

/// Opaque identifier of a remote model (e.g. `"org/model-name"`)
///
/// Immutable once constructed. `new()` and deserialization trim the id and
/// reject blank identifiers; `From<&str>` is provided for tests and does not
/// validate.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelCandidate(String);

impl ModelCandidate {
    /// Create a validated candidate
    ///
    /// # Errors
    /// Returns an error if the identifier is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("model candidate id cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built-in candidate list
    pub fn defaults() -> Vec<ModelCandidate> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|id| ModelCandidate(id.to_string()))
            .collect()
    }
}

impl std::fmt::Display for ModelCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelCandidate {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl TryFrom<String> for ModelCandidate {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ModelCandidate> for String {
    fn from(candidate: ModelCandidate) -> Self {
        candidate.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_identifier() {
        let candidate = ModelCandidate::new("  org/model  ").unwrap();
        assert_eq!(candidate.as_str(), "org/model");
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(ModelCandidate::new("").is_err());
        assert!(ModelCandidate::new("   ").is_err());
    }

    #[test]
    fn test_defaults_preserve_order() {
        let defaults = ModelCandidate::defaults();
        assert_eq!(defaults.len(), DEFAULT_CANDIDATES.len());
        for (candidate, id) in defaults.iter().zip(DEFAULT_CANDIDATES) {
            assert_eq!(candidate.as_str(), *id);
        }
    }

    #[test]
    fn test_display_matches_inner() {
        let candidate = ModelCandidate::from("a/b");
        assert_eq!(candidate.to_string(), "a/b");
    }

    #[test]
    fn test_deserializes_transparently() {
        let candidates: Vec<ModelCandidate> = serde_json::from_str(r#"["x/y", "z"]"#).unwrap();
        assert_eq!(candidates, vec![ModelCandidate::from("x/y"), "z".into()]);
    }

    #[test]
    fn test_deserialize_trims_padded_id() {
        let candidate: ModelCandidate = serde_json::from_str(r#"" org/model ""#).unwrap();
        assert_eq!(candidate.as_str(), "org/model");
    }

    #[test]
    fn test_deserialize_rejects_blank_id() {
        let result: Result<ModelCandidate, _> = serde_json::from_str(r#""   ""#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&ModelCandidate::from("a/b")).unwrap();
        assert_eq!(json, r#""a/b""#);
    }
}
