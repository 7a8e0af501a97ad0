//! Error types for the store layer

use arbiter_core::RecommendationStatus;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Rule id does not exist
    #[error("Rule not found: {id}")]
    RuleNotFound { id: String },

    /// Recommendation id does not exist
    #[error("Recommendation not found: {id}")]
    RecommendationNotFound { id: String },

    /// Check-and-set failure: the recommendation already left `pending`
    #[error("Recommendation {id} is already {status:?}")]
    Conflict {
        id: String,
        status: RecommendationStatus,
    },

    /// Backing store unreachable or failing
    ///
    /// The in-memory stores never produce this; it is the variant a
    /// networked or database-backed implementation maps transport and
    /// driver failures into.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
