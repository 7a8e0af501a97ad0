//! Core DecisionEngine implementation
//!
//! The engine is stateless between calls; all state lives in the rule and
//! recommendation stores. Every public method can be invoked from
//! multiple concurrent callers.

use crate::builder::DecisionEngineBuilder;
use crate::confidence::{confidence_score, extract_factors};
use crate::error::{EngineError, Result};
use crate::evaluator::evaluate_conditions;
use arbiter_core::{
    Confidence, DecisionRecommendation, DecisionRequest, DecisionRule, RecommendationStatus,
    RecommendedAction, RuleCounterDelta,
};
use arbiter_store::{FinalizePatch, HistoryFilter, RecommendationStore, RuleStore, StoreError};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Rule-based decision engine
///
/// Orchestrates rule selection, recommendation generation, confidence
/// scoring, optional auto-execution, and rule statistics maintenance.
pub struct DecisionEngine {
    rules: Arc<dyn RuleStore>,
    recommendations: Arc<dyn RecommendationStore>,
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine").finish_non_exhaustive()
    }
}

impl DecisionEngine {
    /// Create an engine from its two store dependencies
    pub fn new(rules: Arc<dyn RuleStore>, recommendations: Arc<dyn RecommendationStore>) -> Self {
        Self {
            rules,
            recommendations,
        }
    }

    /// Start building an engine
    pub fn builder() -> DecisionEngineBuilder {
        DecisionEngineBuilder::new()
    }

    /// Generate a unique recommendation ID
    /// Format: rec_YYYYMMDDHHmmss_xxxxxx
    /// Example: rec_20260830143052_a3f2e1
    fn generate_recommendation_id() -> String {
        let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let suffix = Uuid::new_v4().simple().to_string();
        format!("rec_{}_{}", datetime_str, &suffix[..6])
    }

    /// Evaluate an event against the configured rules and persist the
    /// outcome.
    ///
    /// Loads the active rules for the event's workspace and decision type
    /// in priority order; the first rule whose conditions hold against
    /// the event context wins. A matched rule produces a scored
    /// recommendation and bumps the rule's triggered counter; a rule
    /// configured for unattended execution is finalized immediately. When
    /// no rule matches, the fixed escalate fallback is produced instead.
    /// Only store failures are exceptional here; evaluation anomalies
    /// degrade to the fallback path.
    pub async fn request_decision(
        &self,
        request: DecisionRequest,
    ) -> Result<DecisionRecommendation> {
        let rules = self
            .rules
            .list_active_rules(&request.workspace_id, request.decision_type)
            .await?;
        tracing::debug!(
            decision_type = %request.decision_type,
            reference_id = %request.reference_id,
            candidates = rules.len(),
            "evaluating decision request"
        );

        let matched = rules
            .iter()
            .find(|rule| evaluate_conditions(&rule.conditions, &request.reference_data));

        let recommendation = match matched {
            Some(rule) => {
                tracing::info!(
                    rule_id = %rule.id,
                    priority = rule.priority,
                    reference_id = %request.reference_id,
                    "rule matched"
                );
                Self::recommendation_from_rule(rule, &request)
            }
            None => {
                tracing::info!(
                    reference_id = %request.reference_id,
                    "no rule matched, falling back to escalation"
                );
                Self::fallback_recommendation(&request)
            }
        };

        let recommendation = self.recommendations.create(recommendation).await?;

        if let Some(rule) = matched {
            // The triggered counter is bumped as soon as the match is
            // persisted. Counters are best effort here like everywhere
            // else: a rule deleted since listing must not fail the
            // already-persisted recommendation.
            self.bump_rule_counters(&rule.id, RuleCounterDelta::triggered())
                .await?;

            if recommendation.auto_executed {
                return self.auto_execute(rule, recommendation).await;
            }
        }

        Ok(recommendation)
    }

    /// Finalize a pending recommendation with a human decision.
    ///
    /// `override_action` replaces the recommended action when supplied;
    /// supplying it marks the recommendation as overridden even when it
    /// equals the original recommendation. Fails with
    /// [`EngineError::NotFound`] for unknown ids and
    /// [`EngineError::AlreadyProcessed`] when the recommendation already
    /// left `pending`.
    pub async fn apply_decision(
        &self,
        recommendation_id: &str,
        applied_by_id: &str,
        applied_by_name: &str,
        override_action: Option<RecommendedAction>,
        override_reason: Option<String>,
    ) -> Result<DecisionRecommendation> {
        if recommendation_id.trim().is_empty() {
            return Err(EngineError::Validation(
                "recommendation id must not be empty".to_string(),
            ));
        }
        if applied_by_id.trim().is_empty() {
            return Err(EngineError::Validation(
                "applied_by_id must not be empty".to_string(),
            ));
        }

        let existing = self
            .recommendations
            .get_by_id(recommendation_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(recommendation_id.to_string()))?;

        if existing.status != RecommendationStatus::Pending {
            return Err(EngineError::AlreadyProcessed(recommendation_id.to_string()));
        }

        let was_overridden = override_action.is_some();
        let final_action = override_action.unwrap_or(existing.recommended_action);
        let status = Self::terminal_status(final_action);

        // The store re-checks `pending` under its own lock, so a
        // concurrent apply that won the race surfaces as AlreadyProcessed
        // rather than a double finalization.
        let finalized = self
            .recommendations
            .finalize(
                recommendation_id,
                FinalizePatch {
                    status,
                    applied_by_id: Some(applied_by_id.to_string()),
                    applied_by_name: Some(applied_by_name.to_string()),
                    applied_at: Utc::now(),
                    was_overridden,
                    override_reason,
                },
            )
            .await?;

        if let Some(rule_id) = finalized.rule_id.as_deref() {
            self.bump_rule_counters(rule_id, RuleCounterDelta::applied(status, was_overridden))
                .await?;
        }

        tracing::info!(
            recommendation_id,
            applied_by_id,
            status = ?status,
            was_overridden,
            "decision applied"
        );
        Ok(finalized)
    }

    /// All pending recommendations for a workspace, newest first
    pub async fn pending_recommendations(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<DecisionRecommendation>> {
        let filter = HistoryFilter::new().with_status(RecommendationStatus::Pending);
        Ok(self
            .recommendations
            .list_by_workspace(workspace_id, &filter)
            .await?)
    }

    /// Recommendation history for a workspace, newest first, with
    /// optional equality filters
    pub async fn decision_history(
        &self,
        workspace_id: &str,
        filter: HistoryFilter,
    ) -> Result<Vec<DecisionRecommendation>> {
        Ok(self
            .recommendations
            .list_by_workspace(workspace_id, &filter)
            .await?)
    }

    /// Finalize an auto-executing recommendation immediately after
    /// creation.
    async fn auto_execute(
        &self,
        rule: &DecisionRule,
        recommendation: DecisionRecommendation,
    ) -> Result<DecisionRecommendation> {
        let status = Self::terminal_status(recommendation.recommended_action);

        let finalized = self
            .recommendations
            .finalize(
                &recommendation.id,
                FinalizePatch {
                    status,
                    applied_by_id: None,
                    applied_by_name: None,
                    applied_at: Utc::now(),
                    was_overridden: false,
                    override_reason: None,
                },
            )
            .await?;

        self.bump_rule_counters(&rule.id, RuleCounterDelta::auto_executed(status))
            .await?;

        tracing::info!(
            rule_id = %rule.id,
            recommendation_id = %finalized.id,
            status = ?status,
            "recommendation auto-executed"
        );
        Ok(finalized)
    }

    /// Map a final action onto the terminal status.
    ///
    /// Anything other than approve resolves to rejected; that includes an
    /// escalate action on the auto-execute path.
    fn terminal_status(action: RecommendedAction) -> RecommendationStatus {
        match action {
            RecommendedAction::Approve => RecommendationStatus::Approved,
            _ => RecommendationStatus::Rejected,
        }
    }

    /// Apply a counter delta, tolerating a rule that was deleted out from
    /// under us. Counter maintenance is best-effort once the
    /// recommendation itself is persisted; store outages still propagate.
    async fn bump_rule_counters(&self, rule_id: &str, delta: RuleCounterDelta) -> Result<()> {
        match self.rules.apply_counter_delta(rule_id, delta).await {
            Ok(rule) => {
                tracing::debug!(
                    rule_id,
                    success_rate = rule.stats.success_rate,
                    "rule counters updated"
                );
                Ok(())
            }
            Err(StoreError::RuleNotFound { id }) => {
                tracing::warn!(rule_id = %id, "matched rule no longer exists, skipping counters");
                Ok(())
            }
            Err(other) => Err(other.into()),
        }
    }

    fn recommendation_from_rule(
        rule: &DecisionRule,
        request: &DecisionRequest,
    ) -> DecisionRecommendation {
        let score = confidence_score(rule);

        DecisionRecommendation {
            id: Self::generate_recommendation_id(),
            workspace_id: request.workspace_id.clone(),
            decision_type: request.decision_type,
            reference_id: request.reference_id.clone(),
            reference_type: request.reference_type.clone(),
            reference_number: request.reference_number.clone(),
            reference_data: request.reference_data.clone(),
            rule_id: Some(rule.id.clone()),
            rule_name: Some(rule.name.clone()),
            recommended_action: rule.recommended_action,
            confidence: Confidence::from_score(score),
            confidence_score: score,
            reasoning: Self::build_reasoning(rule),
            factors_considered: extract_factors(rule, &request.reference_data),
            status: RecommendationStatus::Pending,
            auto_executed: rule.auto_executes(),
            was_overridden: false,
            override_reason: None,
            requested_by_id: request.requested_by_id.clone(),
            requested_by_name: request.requested_by_name.clone(),
            applied_by_id: None,
            applied_by_name: None,
            applied_at: None,
            created_at: Utc::now(),
        }
    }

    fn fallback_recommendation(request: &DecisionRequest) -> DecisionRecommendation {
        DecisionRecommendation {
            id: Self::generate_recommendation_id(),
            workspace_id: request.workspace_id.clone(),
            decision_type: request.decision_type,
            reference_id: request.reference_id.clone(),
            reference_type: request.reference_type.clone(),
            reference_number: request.reference_number.clone(),
            reference_data: request.reference_data.clone(),
            rule_id: None,
            rule_name: None,
            recommended_action: RecommendedAction::Escalate,
            confidence: Confidence::Low,
            confidence_score: 30,
            reasoning: "No applicable rule matched this request; escalating for manual review."
                .to_string(),
            factors_considered: Vec::new(),
            status: RecommendationStatus::Pending,
            auto_executed: false,
            was_overridden: false,
            override_reason: None,
            requested_by_id: request.requested_by_id.clone(),
            requested_by_name: request.requested_by_name.clone(),
            applied_by_id: None,
            applied_by_name: None,
            applied_at: None,
            created_at: Utc::now(),
        }
    }

    fn build_reasoning(rule: &DecisionRule) -> String {
        let mut reasoning = format!(
            "Matched rule '{}' with {} condition(s) satisfied.",
            rule.name,
            rule.conditions.len()
        );
        if rule.auto_executes() {
            reasoning.push_str(" Rule is configured for automatic execution.");
        }
        if !rule.description.is_empty() {
            reasoning.push(' ');
            reasoning.push_str(&rule.description);
        }
        reasoning
    }
}
