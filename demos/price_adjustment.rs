//! Price adjustment example
//!
//! This example demonstrates:
//! - Loading rule definitions from YAML
//! - Priority-ordered first-match evaluation
//! - The escalate fallback when no rule matches
//! - Browsing decision history with filters

use arbiter_core::{DecisionRequest, RecommendationStatus, Value};
use arbiter_engine::DecisionEngine;
use arbiter_store::{load_rules_from_str, HistoryFilter, MemoryRecommendationStore, MemoryRuleStore};

const PRICE_RULES: &str = r#"
rules:
  - id: small_markdown_auto_approve
    name: Auto-approve small markdowns
    description: Markdowns below five percent are routine.
    workspace_id: ws_main
    decision_type: price_adjustment
    priority: 100
    conditions:
      - field: discount_percent
        operator: less_than_or_equal
        value: 5
    recommended_action: approve
    auto_execute: true
  - id: clearance_review
    name: Review clearance pricing
    workspace_id: ws_main
    decision_type: price_adjustment
    priority: 50
    conditions:
      - field: discount_percent
        operator: between
        value: [5, 30]
      - field: product.stock_age_days
        operator: greater_than
        value: 90
    recommended_action: approve
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Price Adjustment Example ===\n");

    let rules = load_rules_from_str(PRICE_RULES)?;
    println!("Loaded {} rule definitions\n", rules.len());

    let engine = DecisionEngine::builder()
        .with_rule_store(MemoryRuleStore::with_rules(rules))
        .with_recommendation_store(MemoryRecommendationStore::new())
        .build()?;

    let decision_type = "price_adjustment".parse()?;

    // Routine markdown: picked up by the highest-priority rule.
    let routine = DecisionRequest::new(decision_type, "ws_main", "sku-100", "price_change")
        .with_context("discount_percent", Value::Number(3.0))
        .with_requester("u1", "Dana");
    let rec = engine.request_decision(routine).await?;
    println!("3% markdown -> {:?} via {:?}", rec.status, rec.rule_name);

    // Clearance markdown on old stock.
    let mut product = std::collections::HashMap::new();
    product.insert("stock_age_days".to_string(), Value::Number(120.0));
    let clearance = DecisionRequest::new(decision_type, "ws_main", "sku-200", "price_change")
        .with_context("discount_percent", Value::Number(25.0))
        .with_context("product", Value::Object(product))
        .with_requester("u1", "Dana");
    let rec = engine.request_decision(clearance).await?;
    println!("25% clearance -> {:?} via {:?}", rec.status, rec.rule_name);

    // Deep discount with no matching rule: escalated for manual review.
    let deep = DecisionRequest::new(decision_type, "ws_main", "sku-300", "price_change")
        .with_context("discount_percent", Value::Number(60.0))
        .with_requester("u1", "Dana");
    let rec = engine.request_decision(deep).await?;
    println!(
        "60% discount -> {} (confidence {})\n",
        rec.recommended_action, rec.confidence_score
    );

    let history = engine.decision_history("ws_main", HistoryFilter::new()).await?;
    println!("History entries: {}", history.len());
    let pending = engine
        .decision_history(
            "ws_main",
            HistoryFilter::new().with_status(RecommendationStatus::Pending),
        )
        .await?;
    println!("Awaiting review: {}", pending.len());

    Ok(())
}
