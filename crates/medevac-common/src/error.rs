//! Error types for the MEDEVAC system
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using MedevacError
pub type Result<T> = std::result::Result<T, MedevacError>;

/// Unified error type for MEDEVAC operations
#[derive(Debug, Error)]
pub enum MedevacError {
    // Doctrine generation errors
    #[error("Doctrine error: {0}")]
    Doctrine(#[from] DoctrineError),

    // Ranking errors
    #[error("Ranking error: {0}")]
    Ranking(#[from] RankingError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MedevacError {
    /// Whether the error was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MedevacError::Doctrine(DoctrineError::InvalidSeverity(_))
                | MedevacError::Doctrine(DoctrineError::InvalidScenario(_))
        )
    }
}

/// Doctrine generation errors
#[derive(Debug, Error)]
pub enum DoctrineError {
    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),

    #[error("Unknown equipment item: {0}")]
    UnknownItem(String),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

/// Coherence ranking errors
///
/// None of these reach the caller of an evaluation; the ranking service
/// recovers from all of them with the local heuristic.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Ranker unreachable: {0}")]
    Http(String),

    #[error("Ranker returned status {status}")]
    Status { status: u16 },

    #[error("Ranker timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Malformed ranker response: {0}")]
    MalformedResponse(String),

    #[error("Ranker disabled")]
    Disabled,
}

// Implement From for common external error types
impl From<serde_json::Error> for MedevacError {
    fn from(err: serde_json::Error) -> Self {
        MedevacError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for MedevacError {
    fn from(err: std::io::Error) -> Self {
        MedevacError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for MedevacError {
    fn from(err: anyhow::Error) -> Self {
        MedevacError::Internal(err.to_string())
    }
}
