//! Arbiter Engine - rule matching and recommendation lifecycle
//!
//! Given a business event and its context, the engine selects the single
//! best-matching configured rule, evaluates the rule's conditions against
//! the context, and emits a recommendation with a confidence score,
//! templated reasoning, and optional automatic execution. When no rule
//! matches, escalation is the designed safety net.

pub mod builder;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod evaluator;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use confidence::{confidence_score, extract_factors};
pub use engine::DecisionEngine;
pub use error::{EngineError, Result};
pub use evaluator::{evaluate_condition, evaluate_conditions};

// Re-export commonly used types from dependencies
pub use arbiter_core::{
    Confidence, DecisionRecommendation, DecisionRequest, DecisionRule, DecisionType,
    RecommendationStatus, RecommendedAction, Value,
};
pub use arbiter_store::HistoryFilter;
