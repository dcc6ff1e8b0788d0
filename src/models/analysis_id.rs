//! Per-analysis correlation id
//!
//! Every sentence submitted for analysis gets a fresh UUID so that the log
//! lines of its probe attempts can be grouped together.

use uuid::Uuid;

/// Analysis ID wrapper type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    /// Generate a new random analysis ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the UUID value
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
