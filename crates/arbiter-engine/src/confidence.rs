//! Confidence scoring for matched rules
//!
//! Deterministic and explainable, not a statistical model: the score is a
//! pure function of the matched rule's state.

use arbiter_core::{get_path, DecisionFactor, DecisionRule, Value};
use std::collections::HashMap;

/// Compute the 0-100 confidence score for a matched rule.
///
/// Base 70, +15 when the rule's stored success rate exceeds 80, +10 when
/// it has at least three conditions, -5 when it executes unattended.
pub fn confidence_score(rule: &DecisionRule) -> u8 {
    let mut score: i32 = 70;

    if rule.stats.success_rate > 80.0 {
        score += 15;
    }
    if rule.conditions.len() >= 3 {
        score += 10;
    }
    if rule.auto_executes() {
        score -= 5;
    }

    score.clamp(0, 100) as u8
}

/// Extract the `factors_considered` entries from a matched rule's
/// conditions: one entry per condition, with the context value that was
/// evaluated, a constant weight of 1, and the operator's directional
/// impact.
pub fn extract_factors(
    rule: &DecisionRule,
    context: &HashMap<String, Value>,
) -> Vec<DecisionFactor> {
    rule.conditions
        .iter()
        .map(|condition| DecisionFactor {
            factor: condition.field.clone(),
            value: get_path(context, &condition.field)
                .cloned()
                .unwrap_or(Value::Null),
            weight: 1,
            impact: condition.operator.factor_impact(),
        })
        .collect()
}
