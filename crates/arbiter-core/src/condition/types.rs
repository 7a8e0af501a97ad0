//! Condition types used by decision rules

use crate::model::recommendation::FactorImpact;
use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Comparison operator for a single rule condition
///
/// Operator names arriving from rule configuration that are not recognized
/// deserialize to [`ConditionOperator::Unknown`], which always evaluates
/// false rather than aborting rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    NotContains,
    In,
    NotIn,
    Between,
    /// Catch-all for unrecognized operator names
    #[serde(other)]
    Unknown,
}

impl ConditionOperator {
    /// Directional impact this operator contributes to a decision factor.
    ///
    /// Greater-than operators push toward positive, less-than toward
    /// negative; everything else is neutral.
    pub fn factor_impact(&self) -> FactorImpact {
        match self {
            ConditionOperator::GreaterThan | ConditionOperator::GreaterThanOrEqual => {
                FactorImpact::Positive
            }
            ConditionOperator::LessThan | ConditionOperator::LessThanOrEqual => {
                FactorImpact::Negative
            }
            _ => FactorImpact::Neutral,
        }
    }
}

/// How a condition's result combines with the running result of the
/// conditions evaluated before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

/// A single configured condition on a decision rule
///
/// `field` is a dotted path into the event context (nested lookup is
/// supported). The `logical_operator` stored here is consumed when the
/// evaluator folds in the *next* condition of the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Dotted field path into the event context
    pub field: String,
    /// Comparison operator
    pub operator: ConditionOperator,
    /// Value to compare against
    pub value: Value,
    /// Combinator applied when advancing past this condition
    #[serde(default)]
    pub logical_operator: LogicalOperator,
}

impl RuleCondition {
    /// Create a new condition with the default AND combinator
    pub fn new(field: impl Into<String>, operator: ConditionOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
            logical_operator: LogicalOperator::And,
        }
    }

    /// Set the combinator used when folding in the next condition
    pub fn with_logical_operator(mut self, logical_operator: LogicalOperator) -> Self {
        self.logical_operator = logical_operator;
        self
    }
}
