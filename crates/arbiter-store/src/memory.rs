//! In-memory store implementations
//!
//! Reference implementations of the store traits, used by tests and
//! demos. Both stores keep their records behind a `tokio::sync::RwLock`,
//! so counter deltas and finalization are serialized per store: the
//! read-then-increment race on rule counters cannot lose increments here,
//! and two concurrent finalize calls on the same recommendation see a
//! consistent status check.

use arbiter_core::{
    DecisionRecommendation, DecisionRule, DecisionType, RecommendationStatus, RuleCounterDelta,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::{FinalizePatch, HistoryFilter, RecommendationStore, RuleStore};

/// In-memory rule store
#[derive(Default)]
pub struct MemoryRuleStore {
    rules: RwLock<HashMap<String, DecisionRule>>,
}

impl MemoryRuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with rules
    pub fn with_rules(rules: Vec<DecisionRule>) -> Self {
        let map = rules
            .into_iter()
            .map(|rule| (rule.id.clone(), rule))
            .collect();
        Self {
            rules: RwLock::new(map),
        }
    }

    /// Insert or replace a rule
    pub async fn insert_rule(&self, rule: DecisionRule) {
        self.rules.write().await.insert(rule.id.clone(), rule);
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn list_active_rules(
        &self,
        workspace_id: &str,
        decision_type: DecisionType,
    ) -> StoreResult<Vec<DecisionRule>> {
        let guard = self.rules.read().await;
        let mut rules: Vec<DecisionRule> = guard
            .values()
            .filter(|rule| {
                rule.is_active
                    && rule.workspace_id == workspace_id
                    && rule.decision_type == decision_type
            })
            .cloned()
            .collect();

        // Priority descending; ties broken by id ascending so the order
        // is stable across calls.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        Ok(rules)
    }

    async fn get_rule(&self, rule_id: &str) -> StoreResult<Option<DecisionRule>> {
        Ok(self.rules.read().await.get(rule_id).cloned())
    }

    async fn apply_counter_delta(
        &self,
        rule_id: &str,
        delta: RuleCounterDelta,
    ) -> StoreResult<DecisionRule> {
        let mut guard = self.rules.write().await;
        let rule = guard.get_mut(rule_id).ok_or_else(|| StoreError::RuleNotFound {
            id: rule_id.to_string(),
        })?;

        rule.stats.total_triggered += delta.triggered;
        rule.stats.total_auto_executed += delta.auto_executed;
        rule.stats.total_approved += delta.approved;
        rule.stats.total_rejected += delta.rejected;
        rule.stats.total_overridden += delta.overridden;
        rule.stats.recompute_success_rate();

        tracing::debug!(
            rule_id,
            triggered = rule.stats.total_triggered,
            success_rate = rule.stats.success_rate,
            "applied counter delta"
        );
        Ok(rule.clone())
    }
}

/// In-memory recommendation store
#[derive(Default)]
pub struct MemoryRecommendationStore {
    recommendations: RwLock<HashMap<String, DecisionRecommendation>>,
}

impl MemoryRecommendationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecommendationStore for MemoryRecommendationStore {
    async fn create(
        &self,
        recommendation: DecisionRecommendation,
    ) -> StoreResult<DecisionRecommendation> {
        self.recommendations
            .write()
            .await
            .insert(recommendation.id.clone(), recommendation.clone());
        Ok(recommendation)
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<DecisionRecommendation>> {
        Ok(self.recommendations.read().await.get(id).cloned())
    }

    async fn finalize(
        &self,
        id: &str,
        patch: FinalizePatch,
    ) -> StoreResult<DecisionRecommendation> {
        let mut guard = self.recommendations.write().await;
        let recommendation =
            guard
                .get_mut(id)
                .ok_or_else(|| StoreError::RecommendationNotFound {
                    id: id.to_string(),
                })?;

        // Check-and-set: the status check and the write happen under the
        // same write lock, so a second finalize observes the terminal
        // status and fails.
        if recommendation.status != RecommendationStatus::Pending {
            return Err(StoreError::Conflict {
                id: id.to_string(),
                status: recommendation.status,
            });
        }

        recommendation.status = patch.status;
        recommendation.applied_by_id = patch.applied_by_id;
        recommendation.applied_by_name = patch.applied_by_name;
        recommendation.applied_at = Some(patch.applied_at);
        recommendation.was_overridden = patch.was_overridden;
        recommendation.override_reason = patch.override_reason;

        Ok(recommendation.clone())
    }

    async fn list_by_workspace(
        &self,
        workspace_id: &str,
        filter: &HistoryFilter,
    ) -> StoreResult<Vec<DecisionRecommendation>> {
        let guard = self.recommendations.read().await;
        let mut results: Vec<DecisionRecommendation> = guard
            .values()
            .filter(|rec| rec.workspace_id == workspace_id && filter.matches(rec))
            .cloned()
            .collect();

        // Newest first; ties broken by id so the order is stable.
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(results)
    }
}
