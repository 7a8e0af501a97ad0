//! Core trait definitions for the store layer
//!
//! Two capability traits:
//!
//! - [`RuleStore`]: read access to configured rules plus atomic counter
//!   deltas
//! - [`RecommendationStore`]: create/read/finalize/list for persisted
//!   recommendations
//!
//! Counter maintenance is expressed as an apply-delta operation so the
//! store can serialize increments per rule; the engine never does
//! read-modify-write on counters. Finalization is a check-and-set against
//! `pending` so two concurrent apply calls cannot both succeed.
//!
//! # Thread Safety
//!
//! All implementations must be `Send + Sync` for use across async tasks.

use arbiter_core::{
    DecisionRecommendation, DecisionRule, DecisionType, RecommendationStatus, RuleCounterDelta,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::StoreResult;

/// Store capability for configured decision rules
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// List active rules for a workspace and decision type, sorted by
    /// priority descending. Ties are returned in a store-defined stable
    /// order (the in-memory store orders ties by rule id ascending).
    async fn list_active_rules(
        &self,
        workspace_id: &str,
        decision_type: DecisionType,
    ) -> StoreResult<Vec<DecisionRule>>;

    /// Look up a rule by id
    async fn get_rule(&self, rule_id: &str) -> StoreResult<Option<DecisionRule>>;

    /// Apply a counter delta atomically and recompute the rule's success
    /// rate from the post-increment totals. Returns the updated rule.
    async fn apply_counter_delta(
        &self,
        rule_id: &str,
        delta: RuleCounterDelta,
    ) -> StoreResult<DecisionRule>;
}

/// Fields written when a recommendation leaves `pending`
///
/// `applied_by_id`/`applied_by_name` stay `None` on the auto-execute
/// path, where no human was involved.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizePatch {
    /// Terminal status (`approved` or `rejected`)
    pub status: RecommendationStatus,
    pub applied_by_id: Option<String>,
    pub applied_by_name: Option<String>,
    pub applied_at: DateTime<Utc>,
    pub was_overridden: bool,
    pub override_reason: Option<String>,
}

/// Optional equality filters for recommendation queries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryFilter {
    pub decision_type: Option<DecisionType>,
    pub status: Option<RecommendationStatus>,
    pub rule_id: Option<String>,
}

impl HistoryFilter {
    /// Create an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by decision type
    pub fn with_decision_type(mut self, decision_type: DecisionType) -> Self {
        self.decision_type = Some(decision_type);
        self
    }

    /// Filter by status
    pub fn with_status(mut self, status: RecommendationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by matched rule id
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Check if a recommendation matches this filter
    pub fn matches(&self, recommendation: &DecisionRecommendation) -> bool {
        if let Some(decision_type) = self.decision_type {
            if recommendation.decision_type != decision_type {
                return false;
            }
        }

        if let Some(status) = self.status {
            if recommendation.status != status {
                return false;
            }
        }

        if let Some(ref rule_id) = self.rule_id {
            if recommendation.rule_id.as_deref() != Some(rule_id.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Store capability for persisted recommendations
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persist a new recommendation
    async fn create(
        &self,
        recommendation: DecisionRecommendation,
    ) -> StoreResult<DecisionRecommendation>;

    /// Look up a recommendation by id
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<DecisionRecommendation>>;

    /// Finalize a pending recommendation (check-and-set)
    ///
    /// Fails with [`StoreError::Conflict`](crate::StoreError::Conflict)
    /// when the recommendation is no longer `pending`, and
    /// [`StoreError::RecommendationNotFound`](crate::StoreError::RecommendationNotFound)
    /// when the id is unknown.
    async fn finalize(
        &self,
        id: &str,
        patch: FinalizePatch,
    ) -> StoreResult<DecisionRecommendation>;

    /// List recommendations for a workspace, newest-first, applying the
    /// optional equality filters
    async fn list_by_workspace(
        &self,
        workspace_id: &str,
        filter: &HistoryFilter,
    ) -> StoreResult<Vec<DecisionRecommendation>>;
}
