//! Decision rule model
//!
//! A `DecisionRule` is a configured policy for one decision type: a
//! condition set, a recommended action, and an execution policy. Rules are
//! created and edited by operators; the engine only reads them and applies
//! counter deltas through the rule store.

use crate::condition::RuleCondition;
use crate::error::CoreError;
use crate::model::recommendation::{RecommendationStatus, RecommendedAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag identifying which family of business events a rule
/// applies to. Rules are only considered for events of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    ExpenseApproval,
    PurchaseOrder,
    PriceAdjustment,
    StockReplenishment,
    CreditExtension,
    SalaryAdjustment,
}

impl DecisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::ExpenseApproval => "expense_approval",
            DecisionType::PurchaseOrder => "purchase_order",
            DecisionType::PriceAdjustment => "price_adjustment",
            DecisionType::StockReplenishment => "stock_replenishment",
            DecisionType::CreditExtension => "credit_extension",
            DecisionType::SalaryAdjustment => "salary_adjustment",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense_approval" => Ok(DecisionType::ExpenseApproval),
            "purchase_order" => Ok(DecisionType::PurchaseOrder),
            "price_adjustment" => Ok(DecisionType::PriceAdjustment),
            "stock_replenishment" => Ok(DecisionType::StockReplenishment),
            "credit_extension" => Ok(DecisionType::CreditExtension),
            "salary_adjustment" => Ok(DecisionType::SalaryAdjustment),
            other => Err(CoreError::UnknownDecisionType(other.to_string())),
        }
    }
}

/// Running counters maintained by the engine for one rule
///
/// `success_rate` is derived: `approved / (approved + rejected) * 100`,
/// zero when the denominator is zero. It is recomputed by the store after
/// every counter delta, from the post-increment totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RuleStats {
    #[serde(default)]
    pub total_triggered: u64,
    #[serde(default)]
    pub total_auto_executed: u64,
    #[serde(default)]
    pub total_approved: u64,
    #[serde(default)]
    pub total_rejected: u64,
    #[serde(default)]
    pub total_overridden: u64,
    #[serde(default)]
    pub success_rate: f64,
}

impl RuleStats {
    /// Recompute `success_rate` from the current approved/rejected totals
    pub fn recompute_success_rate(&mut self) {
        let denominator = self.total_approved + self.total_rejected;
        self.success_rate = if denominator == 0 {
            0.0
        } else {
            self.total_approved as f64 / denominator as f64 * 100.0
        };
    }
}

/// Additive counter delta applied atomically by the rule store
///
/// The engine never performs read-modify-write on rule counters; it hands
/// the store a delta and the store applies it under its own write lock,
/// which keeps concurrent updates to the same rule from losing increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleCounterDelta {
    pub triggered: u64,
    pub auto_executed: u64,
    pub approved: u64,
    pub rejected: u64,
    pub overridden: u64,
}

impl RuleCounterDelta {
    /// Delta recording one rule match
    pub fn triggered() -> Self {
        Self {
            triggered: 1,
            ..Default::default()
        }
    }

    /// Delta recording one auto-execution ending in `status`
    pub fn auto_executed(status: RecommendationStatus) -> Self {
        Self {
            auto_executed: 1,
            approved: (status == RecommendationStatus::Approved) as u64,
            rejected: (status == RecommendationStatus::Rejected) as u64,
            ..Default::default()
        }
    }

    /// Delta recording one manual `apply_decision` ending in `status`
    pub fn applied(status: RecommendationStatus, overridden: bool) -> Self {
        Self {
            approved: (status == RecommendationStatus::Approved) as u64,
            rejected: (status == RecommendationStatus::Rejected) as u64,
            overridden: overridden as u64,
            ..Default::default()
        }
    }
}

/// A configured policy for one decision type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    /// Rule id
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Free-text description, appended to recommendation reasoning
    #[serde(default)]
    pub description: String,
    /// Owning workspace
    pub workspace_id: String,
    /// Decision type this rule applies to
    pub decision_type: DecisionType,
    /// Rules are evaluated highest-priority-first; first match wins
    #[serde(default)]
    pub priority: i32,
    /// Ordered condition list; an empty list always matches
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    /// Action recommended when this rule matches
    pub recommended_action: RecommendedAction,
    /// Finalize a match immediately, without a human apply call
    #[serde(default)]
    pub auto_execute: bool,
    /// Overrides `auto_execute`: a rule requiring approval never
    /// auto-executes
    #[serde(default)]
    pub requires_approval: bool,
    /// Soft-disable flag; inactive rules are never matched
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Counters mutated only through the rule store
    #[serde(default)]
    pub stats: RuleStats,
}

fn default_active() -> bool {
    true
}

impl DecisionRule {
    /// Whether a match on this rule finalizes without human input
    pub fn auto_executes(&self) -> bool {
        self.auto_execute && !self.requires_approval
    }
}
