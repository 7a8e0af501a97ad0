//! YAML rule definition loader
//!
//! Rules are configured by operators; for deployments without a database
//! they live in YAML files, one document per file:
//!
//! ```yaml
//! rules:
//!   - id: small_expense_auto_approve
//!     name: Auto-approve small expenses
//!     workspace_id: ws_main
//!     decision_type: expense_approval
//!     priority: 100
//!     conditions:
//!       - field: amount
//!         operator: less_than
//!         value: 10000
//!     recommended_action: approve
//!     auto_execute: true
//! ```
//!
//! Counters are never part of the definition; they default to zero.

use arbiter_core::DecisionRule;
use serde::Deserialize;
use std::path::Path;

use crate::error::StoreResult;
use crate::memory::MemoryRuleStore;

#[derive(Debug, Deserialize)]
struct RuleFile {
    rules: Vec<DecisionRule>,
}

/// Parse rule definitions from a YAML document
pub fn load_rules_from_str(content: &str) -> StoreResult<Vec<DecisionRule>> {
    let file: RuleFile = serde_yaml::from_str(content)?;
    Ok(file.rules)
}

/// Load rule definitions from every `.yaml`/`.yml` file in a directory
pub fn load_rules_from_dir(dir: impl AsRef<Path>) -> StoreResult<Vec<DecisionRule>> {
    let mut rules = Vec::new();

    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let extension = path.extension().and_then(|s| s.to_str());
        if !matches!(extension, Some("yaml") | Some("yml")) {
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        let loaded = load_rules_from_str(&content)?;
        tracing::info!(path = %path.display(), count = loaded.len(), "loaded rule definitions");
        rules.extend(loaded);
    }

    Ok(rules)
}

/// Build a seeded in-memory rule store from a directory of definitions
pub fn rule_store_from_dir(dir: impl AsRef<Path>) -> StoreResult<MemoryRuleStore> {
    Ok(MemoryRuleStore::with_rules(load_rules_from_dir(dir)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RuleStore;
    use arbiter_core::{ConditionOperator, DecisionType, RecommendedAction, Value};
    use std::io::Write;

    const EXPENSE_RULES: &str = r#"
rules:
  - id: small_expense_auto_approve
    name: Auto-approve small expenses
    workspace_id: ws_main
    decision_type: expense_approval
    priority: 100
    conditions:
      - field: amount
        operator: less_than
        value: 10000
    recommended_action: approve
    auto_execute: true
  - id: over_budget_reject
    name: Reject over-budget expenses
    workspace_id: ws_main
    decision_type: expense_approval
    priority: 50
    conditions:
      - field: amount
        operator: greater_than
        value: 100000
      - field: category
        operator: not_in
        value: [capital, emergency]
    recommended_action: reject
"#;

    #[test]
    fn test_parse_rule_definitions() {
        let rules = load_rules_from_str(EXPENSE_RULES).unwrap();
        assert_eq!(rules.len(), 2);

        let first = &rules[0];
        assert_eq!(first.id, "small_expense_auto_approve");
        assert_eq!(first.decision_type, DecisionType::ExpenseApproval);
        assert_eq!(first.priority, 100);
        assert_eq!(first.recommended_action, RecommendedAction::Approve);
        assert!(first.auto_execute);
        assert!(first.is_active);
        assert_eq!(first.stats.total_triggered, 0);
        assert_eq!(first.conditions[0].operator, ConditionOperator::LessThan);
        assert_eq!(first.conditions[0].value, Value::Number(10000.0));

        let second = &rules[1];
        assert_eq!(second.conditions.len(), 2);
        assert_eq!(second.conditions[1].operator, ConditionOperator::NotIn);
        assert_eq!(
            second.conditions[1].value,
            Value::Array(vec![
                Value::String("capital".to_string()),
                Value::String("emergency".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_rejects_malformed_yaml() {
        assert!(load_rules_from_str("rules: [not, a, rule]").is_err());
        assert!(load_rules_from_str("no_rules_key: true").is_err());
    }

    #[tokio::test]
    async fn test_load_rules_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("expenses.yaml")).unwrap();
        file.write_all(EXPENSE_RULES.as_bytes()).unwrap();
        // Non-YAML files are skipped.
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let store = rule_store_from_dir(dir.path()).unwrap();
        let rules = store
            .list_active_rules("ws_main", DecisionType::ExpenseApproval)
            .await
            .unwrap();

        let ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["small_expense_auto_approve", "over_budget_reject"]);
    }
}
