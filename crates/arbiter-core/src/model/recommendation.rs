//! Decision recommendation model
//!
//! A `DecisionRecommendation` is one persisted evaluation outcome. It is
//! an audit artifact: it snapshots the evaluated context and outlives the
//! business object it refers to. Once finalized it is immutable.

use crate::error::CoreError;
use crate::model::rule::DecisionType;
use crate::types::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Action a rule recommends for a matching event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Approve,
    Reject,
    Escalate,
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecommendedAction::Approve => "approve",
            RecommendedAction::Reject => "reject",
            RecommendedAction::Escalate => "escalate",
        };
        f.write_str(s)
    }
}

impl FromStr for RecommendedAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(RecommendedAction::Approve),
            "reject" => Ok(RecommendedAction::Reject),
            "escalate" => Ok(RecommendedAction::Escalate),
            other => Err(CoreError::UnknownAction(other.to_string())),
        }
    }
}

/// Lifecycle state of a recommendation: `pending` transitions exactly once
/// to a terminal `approved` or `rejected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Categorical confidence label derived from the 0-100 numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Confidence {
    /// Map a 0-100 confidence score to its label
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Confidence::VeryHigh,
            75..=89 => Confidence::High,
            50..=74 => Confidence::Medium,
            25..=49 => Confidence::Low,
            _ => Confidence::VeryLow,
        }
    }
}

/// Directional contribution of one matched condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorImpact {
    Positive,
    Negative,
    Neutral,
}

/// One entry of `factors_considered`, extracted from a matched condition
///
/// `weight` is constant 1: this is a coarse explanation aid, not a
/// weighting model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionFactor {
    /// Field path the condition inspected
    pub factor: String,
    /// Context value that was evaluated (Null when the field was missing)
    pub value: Value,
    /// Constant 1
    pub weight: u32,
    /// Directional impact derived from the condition operator
    pub impact: FactorImpact,
}

/// One persisted evaluation outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecommendation {
    /// Recommendation id
    pub id: String,
    /// Owning workspace
    pub workspace_id: String,
    /// Decision type of the triggering event
    pub decision_type: DecisionType,
    /// Business object this recommendation is about
    pub reference_id: String,
    /// Kind of business object (e.g. "expense", "purchase_order")
    pub reference_type: String,
    /// Optional human-facing document number
    pub reference_number: Option<String>,
    /// Full context snapshot that was evaluated, kept for audit/replay
    pub reference_data: HashMap<String, Value>,
    /// Matched rule, or None when the default fallback fired
    pub rule_id: Option<String>,
    pub rule_name: Option<String>,
    /// Action the engine recommends
    pub recommended_action: RecommendedAction,
    /// Categorical confidence derived from `confidence_score`
    pub confidence: Confidence,
    /// Deterministic 0-100 heuristic, not a probability
    pub confidence_score: u8,
    /// Templated explanation string
    pub reasoning: String,
    /// One entry per matched condition
    pub factors_considered: Vec<DecisionFactor>,
    /// Lifecycle state
    pub status: RecommendationStatus,
    /// True when finalized without human input
    pub auto_executed: bool,
    /// True when `apply_decision` was called with an explicit override
    /// action, regardless of whether it equals the recommended action
    pub was_overridden: bool,
    pub override_reason: Option<String>,
    /// Audit-only caller identity from the triggering request
    pub requested_by_id: String,
    pub requested_by_name: String,
    /// Set on finalization
    pub applied_by_id: Option<String>,
    pub applied_by_name: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input event for `request_decision`
///
/// `requested_by_id`/`requested_by_name` are audit-only and take no part
/// in rule matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    pub decision_type: DecisionType,
    pub reference_id: String,
    pub reference_type: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub reference_data: HashMap<String, Value>,
    pub requested_by_id: String,
    pub requested_by_name: String,
    pub workspace_id: String,
}

impl DecisionRequest {
    /// Create a new request with an empty context
    pub fn new(
        decision_type: DecisionType,
        workspace_id: impl Into<String>,
        reference_id: impl Into<String>,
        reference_type: impl Into<String>,
    ) -> Self {
        Self {
            decision_type,
            reference_id: reference_id.into(),
            reference_type: reference_type.into(),
            reference_number: None,
            reference_data: HashMap::new(),
            requested_by_id: String::new(),
            requested_by_name: String::new(),
            workspace_id: workspace_id.into(),
        }
    }

    /// Set the human-facing document number
    pub fn with_reference_number(mut self, number: impl Into<String>) -> Self {
        self.reference_number = Some(number.into());
        self
    }

    /// Add one context entry
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.reference_data.insert(key.into(), value);
        self
    }

    /// Set the requesting caller identity (audit only)
    pub fn with_requester(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.requested_by_id = id.into();
        self.requested_by_name = name.into();
        self
    }
}
