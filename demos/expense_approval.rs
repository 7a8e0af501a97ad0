//! Expense approval example
//!
//! This example demonstrates:
//! - Seeding a rule store with expense approval policies
//! - Requesting a decision for an expense event
//! - Auto-execution of a matching rule
//! - Applying a pending recommendation with a manual override

use arbiter_core::{
    ConditionOperator, DecisionRequest, DecisionRule, DecisionType, RecommendedAction,
    RuleCondition, RuleStats, Value,
};
use arbiter_engine::DecisionEngine;
use arbiter_store::{MemoryRecommendationStore, MemoryRuleStore};

fn expense_rules() -> Vec<DecisionRule> {
    vec![
        DecisionRule {
            id: "small_expense_auto_approve".to_string(),
            name: "Auto-approve small expenses".to_string(),
            description: "Expenses under the petty-cash threshold need no review.".to_string(),
            workspace_id: "ws_main".to_string(),
            decision_type: DecisionType::ExpenseApproval,
            priority: 100,
            conditions: vec![RuleCondition::new(
                "amount",
                ConditionOperator::LessThan,
                Value::Number(10000.0),
            )],
            recommended_action: RecommendedAction::Approve,
            auto_execute: true,
            requires_approval: false,
            is_active: true,
            stats: RuleStats::default(),
        },
        DecisionRule {
            id: "over_budget_reject".to_string(),
            name: "Reject over-budget expenses".to_string(),
            description: "Large expenses outside exempt categories are rejected.".to_string(),
            workspace_id: "ws_main".to_string(),
            decision_type: DecisionType::ExpenseApproval,
            priority: 50,
            conditions: vec![
                RuleCondition::new(
                    "amount",
                    ConditionOperator::GreaterThan,
                    Value::Number(100000.0),
                ),
                RuleCondition::new(
                    "category",
                    ConditionOperator::NotIn,
                    Value::Array(vec![
                        Value::String("capital".to_string()),
                        Value::String("emergency".to_string()),
                    ]),
                ),
            ],
            recommended_action: RecommendedAction::Reject,
            auto_execute: false,
            requires_approval: true,
            is_active: true,
            stats: RuleStats::default(),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Expense Approval Example ===\n");

    let engine = DecisionEngine::builder()
        .with_rule_store(MemoryRuleStore::with_rules(expense_rules()))
        .with_recommendation_store(MemoryRecommendationStore::new())
        .build()?;

    // A small expense: matched by the auto-approve rule.
    let small = DecisionRequest::new(
        DecisionType::ExpenseApproval,
        "ws_main",
        "exp-1001",
        "expense",
    )
    .with_reference_number("EXP-2026-1001")
    .with_context("amount", Value::Number(5000.0))
    .with_context("category", Value::String("office".to_string()))
    .with_requester("u1", "Dana");

    let rec = engine.request_decision(small).await?;
    println!("Small expense:");
    println!("  Rule: {:?}", rec.rule_name);
    println!("  Action: {}", rec.recommended_action);
    println!("  Status: {:?} (auto-executed: {})", rec.status, rec.auto_executed);
    println!("  Confidence: {:?} ({})", rec.confidence, rec.confidence_score);
    println!("  Reasoning: {}\n", rec.reasoning);

    // A large expense: matched by the reject rule, left pending.
    let large = DecisionRequest::new(
        DecisionType::ExpenseApproval,
        "ws_main",
        "exp-1002",
        "expense",
    )
    .with_context("amount", Value::Number(250000.0))
    .with_context("category", Value::String("marketing".to_string()))
    .with_requester("u2", "Sam");

    let rec = engine.request_decision(large).await?;
    println!("Large expense:");
    println!("  Rule: {:?}", rec.rule_name);
    println!("  Action: {}", rec.recommended_action);
    println!("  Status: {:?}\n", rec.status);

    // A manager overrides the rejection.
    let applied = engine
        .apply_decision(
            &rec.id,
            "mgr1",
            "Morgan",
            Some(RecommendedAction::Approve),
            Some("Approved by the board on 2026-08-12".to_string()),
        )
        .await?;
    println!("After manual override:");
    println!("  Status: {:?}", applied.status);
    println!("  Overridden: {}", applied.was_overridden);
    println!("  Applied by: {:?}\n", applied.applied_by_name);

    let pending = engine.pending_recommendations("ws_main").await?;
    println!("Pending recommendations remaining: {}", pending.len());

    Ok(())
}
