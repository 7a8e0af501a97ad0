//! Engine error types

use arbiter_store::StoreError;
use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Unknown recommendation or rule id
    #[error("Not found: {0}")]
    NotFound(String),

    /// `apply_decision` called on a recommendation that already left
    /// `pending`
    #[error("Recommendation {0} has already been processed")]
    AlreadyProcessed(String),

    /// Malformed input to `apply_decision`
    #[error("Validation error: {0}")]
    Validation(String),

    /// Engine wired without a required store
    #[error("Configuration error: {0}")]
    Config(String),

    /// Underlying store failure, propagated without retry
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecommendationNotFound { id } | StoreError::RuleNotFound { id } => {
                EngineError::NotFound(id)
            }
            StoreError::Conflict { id, .. } => EngineError::AlreadyProcessed(id),
            other => EngineError::StoreUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: EngineError = StoreError::RecommendationNotFound {
            id: "rec1".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::NotFound(id) if id == "rec1"));

        let err: EngineError = StoreError::Conflict {
            id: "rec2".to_string(),
            status: arbiter_core::RecommendationStatus::Approved,
        }
        .into();
        assert!(matches!(err, EngineError::AlreadyProcessed(id) if id == "rec2"));

        let err: EngineError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, EngineError::StoreUnavailable(_)));
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::AlreadyProcessed("rec1".to_string());
        assert!(err.to_string().contains("already been processed"));

        let err = EngineError::Validation("empty id".to_string());
        assert!(err.to_string().contains("Validation error"));
    }
}
