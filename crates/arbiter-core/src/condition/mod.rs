//! Condition types for rule matching

pub mod types;

pub use types::{ConditionOperator, LogicalOperator, RuleCondition};
