//! Arbiter Core - Core types and definitions for the Arbiter decision engine
//!
//! This crate provides the fundamental types used across the Arbiter workspace:
//! - Value types for untyped event context data
//! - Condition types for rule matching
//! - Rule and recommendation data models
//! - Error types

pub mod condition;
pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use condition::{ConditionOperator, LogicalOperator, RuleCondition};
pub use error::CoreError;
pub use model::recommendation::{
    Confidence, DecisionFactor, DecisionRecommendation, DecisionRequest, FactorImpact,
    RecommendationStatus, RecommendedAction,
};
pub use model::rule::{DecisionRule, DecisionType, RuleCounterDelta, RuleStats};
pub use types::value::get_path;
pub use types::Value;
