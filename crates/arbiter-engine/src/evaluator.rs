//! Condition evaluation logic
//!
//! Pure predicates over untyped context data. This module never errors:
//! malformed conditions, unknown operators, and missing fields all
//! degrade to `false`, so a single bad condition fails closed (the rule
//! does not match) instead of aborting rule evaluation.

use arbiter_core::{get_path, ConditionOperator, LogicalOperator, RuleCondition, Value};
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// Decide whether a single condition holds against a field value.
///
/// Operator semantics:
/// - `equals`/`not_equals` use [`Value::loose_eq`] (numeric strings equal
///   numbers)
/// - ordering operators coerce both sides to f64; NaN compares false
/// - `contains`/`not_contains` compare string coercions
/// - `in`/`not_in` require an array condition value and return false
///   otherwise
/// - `between` requires a two-element `[lo, hi]` array, inclusive
/// - unrecognized operators return false
pub fn evaluate_condition(
    field_value: &Value,
    operator: ConditionOperator,
    condition_value: &Value,
) -> bool {
    match operator {
        ConditionOperator::Equals => field_value.loose_eq(condition_value),
        ConditionOperator::NotEquals => !field_value.loose_eq(condition_value),
        ConditionOperator::GreaterThan => field_value.as_number() > condition_value.as_number(),
        ConditionOperator::GreaterThanOrEqual => {
            field_value.as_number() >= condition_value.as_number()
        }
        ConditionOperator::LessThan => field_value.as_number() < condition_value.as_number(),
        ConditionOperator::LessThanOrEqual => {
            field_value.as_number() <= condition_value.as_number()
        }
        ConditionOperator::Contains => field_value
            .coerce_string()
            .contains(&condition_value.coerce_string()),
        ConditionOperator::NotContains => !field_value
            .coerce_string()
            .contains(&condition_value.coerce_string()),
        ConditionOperator::In => match condition_value {
            Value::Array(items) => items.iter().any(|item| item.loose_eq(field_value)),
            _ => false,
        },
        ConditionOperator::NotIn => match condition_value {
            Value::Array(items) => !items.iter().any(|item| item.loose_eq(field_value)),
            _ => false,
        },
        ConditionOperator::Between => match condition_value {
            Value::Array(bounds) if bounds.len() == 2 => {
                let x = field_value.as_number();
                x >= bounds[0].as_number() && x <= bounds[1].as_number()
            }
            _ => false,
        },
        ConditionOperator::Unknown => {
            tracing::debug!(?field_value, "unrecognized operator, condition fails closed");
            false
        }
    }
}

/// Fold a condition list into one boolean against an event context.
///
/// An empty list always matches. Otherwise the result starts as the
/// evaluation of condition 0 and each subsequent condition is folded in
/// using the logical operator stored on the condition *before* it. Both
/// operands are always evaluated; the predicates are side-effect-free, so
/// short-circuiting is not observable.
pub fn evaluate_conditions(
    conditions: &[RuleCondition],
    context: &HashMap<String, Value>,
) -> bool {
    let Some((first, rest)) = conditions.split_first() else {
        return true;
    };

    let mut result = evaluate_in_context(first, context);
    let mut combinator = first.logical_operator;

    for condition in rest {
        let outcome = evaluate_in_context(condition, context);
        result = match combinator {
            LogicalOperator::And => result && outcome,
            LogicalOperator::Or => result || outcome,
        };
        combinator = condition.logical_operator;
    }

    result
}

fn evaluate_in_context(condition: &RuleCondition, context: &HashMap<String, Value>) -> bool {
    let field_value = get_path(context, &condition.field).unwrap_or(&NULL);
    evaluate_condition(field_value, condition.operator, &condition.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(entries: Vec<(&str, Value)>) -> HashMap<String, Value> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn number(n: f64) -> Value {
        Value::Number(n)
    }

    fn string(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_equals_loose() {
        assert!(evaluate_condition(
            &number(42.0),
            ConditionOperator::Equals,
            &string("42")
        ));
        assert!(!evaluate_condition(
            &string("abc"),
            ConditionOperator::Equals,
            &string("abd")
        ));
        assert!(evaluate_condition(
            &string("abc"),
            ConditionOperator::NotEquals,
            &number(5.0)
        ));
    }

    #[test]
    fn test_ordering_coercion() {
        assert!(evaluate_condition(
            &string("150"),
            ConditionOperator::GreaterThan,
            &number(100.0)
        ));
        assert!(evaluate_condition(
            &number(100.0),
            ConditionOperator::GreaterThanOrEqual,
            &number(100.0)
        ));
        assert!(evaluate_condition(
            &number(5000.0),
            ConditionOperator::LessThan,
            &number(10000.0)
        ));
        assert!(evaluate_condition(
            &number(10.0),
            ConditionOperator::LessThanOrEqual,
            &string("10")
        ));
    }

    #[test]
    fn test_ordering_nan_is_false() {
        // Non-numeric input yields NaN comparisons, which never match.
        assert!(!evaluate_condition(
            &string("not a number"),
            ConditionOperator::GreaterThan,
            &number(0.0)
        ));
        assert!(!evaluate_condition(
            &Value::Null,
            ConditionOperator::LessThan,
            &number(100.0)
        ));
        assert!(!evaluate_condition(
            &Value::Null,
            ConditionOperator::LessThanOrEqual,
            &Value::Null
        ));
    }

    #[test]
    fn test_contains() {
        assert!(evaluate_condition(
            &string("office supplies"),
            ConditionOperator::Contains,
            &string("supplies")
        ));
        assert!(evaluate_condition(
            &number(5000.0),
            ConditionOperator::Contains,
            &string("500")
        ));
        assert!(evaluate_condition(
            &string("travel"),
            ConditionOperator::NotContains,
            &string("food")
        ));
    }

    #[test]
    fn test_in_requires_array() {
        let options = Value::Array(vec![string("travel"), string("meals")]);
        assert!(evaluate_condition(
            &string("travel"),
            ConditionOperator::In,
            &options
        ));
        assert!(evaluate_condition(
            &string("rent"),
            ConditionOperator::NotIn,
            &options
        ));

        // Non-array condition value fails closed for both operators.
        assert!(!evaluate_condition(
            &string("travel"),
            ConditionOperator::In,
            &string("travel")
        ));
        assert!(!evaluate_condition(
            &string("rent"),
            ConditionOperator::NotIn,
            &string("travel")
        ));
    }

    #[test]
    fn test_between_inclusive() {
        let range = Value::Array(vec![number(10.0), number(20.0)]);
        assert!(evaluate_condition(&number(10.0), ConditionOperator::Between, &range));
        assert!(evaluate_condition(&number(20.0), ConditionOperator::Between, &range));
        assert!(evaluate_condition(&string("15"), ConditionOperator::Between, &range));
        assert!(!evaluate_condition(&number(21.0), ConditionOperator::Between, &range));
    }

    #[test]
    fn test_between_malformed_shape() {
        assert!(!evaluate_condition(
            &number(15.0),
            ConditionOperator::Between,
            &Value::Array(vec![number(10.0)])
        ));
        assert!(!evaluate_condition(
            &number(15.0),
            ConditionOperator::Between,
            &Value::Array(vec![number(10.0), number(20.0), number(30.0)])
        ));
        assert!(!evaluate_condition(
            &number(15.0),
            ConditionOperator::Between,
            &number(10.0)
        ));
    }

    #[test]
    fn test_unknown_operator_is_false() {
        assert!(!evaluate_condition(
            &number(1.0),
            ConditionOperator::Unknown,
            &number(1.0)
        ));
    }

    #[test]
    fn test_empty_condition_list_matches() {
        assert!(evaluate_conditions(&[], &ctx(vec![])));
        assert!(evaluate_conditions(
            &[],
            &ctx(vec![("amount", number(5000.0))])
        ));
    }

    #[test]
    fn test_and_fold() {
        let conditions = vec![
            RuleCondition::new("amount", ConditionOperator::GreaterThan, number(100.0)),
            RuleCondition::new("amount", ConditionOperator::LessThan, number(1000.0)),
        ];
        assert!(evaluate_conditions(
            &conditions,
            &ctx(vec![("amount", number(500.0))])
        ));
        assert!(!evaluate_conditions(
            &conditions,
            &ctx(vec![("amount", number(5000.0))])
        ));
    }

    #[test]
    fn test_or_combinator_comes_from_previous_condition() {
        // The OR stored on the first condition is consumed when folding
        // in the second one.
        let conditions = vec![
            RuleCondition::new("category", ConditionOperator::Equals, string("travel"))
                .with_logical_operator(LogicalOperator::Or),
            RuleCondition::new("amount", ConditionOperator::LessThan, number(100.0)),
        ];

        let travel = ctx(vec![
            ("category", string("travel")),
            ("amount", number(5000.0)),
        ]);
        assert!(evaluate_conditions(&conditions, &travel));

        let cheap = ctx(vec![("category", string("meals")), ("amount", number(50.0))]);
        assert!(evaluate_conditions(&conditions, &cheap));

        let neither = ctx(vec![
            ("category", string("meals")),
            ("amount", number(5000.0)),
        ]);
        assert!(!evaluate_conditions(&conditions, &neither));
    }

    #[test]
    fn test_nested_field_lookup() {
        let mut customer = HashMap::new();
        customer.insert("total_spent".to_string(), number(15000.0));
        let context = ctx(vec![("customer", Value::Object(customer))]);

        let conditions = vec![RuleCondition::new(
            "customer.total_spent",
            ConditionOperator::GreaterThan,
            number(10000.0),
        )];
        assert!(evaluate_conditions(&conditions, &context));
    }

    #[test]
    fn test_missing_field_fails_closed() {
        let conditions = vec![RuleCondition::new(
            "customer.total_spent",
            ConditionOperator::GreaterThan,
            number(10.0),
        )];
        assert!(!evaluate_conditions(&conditions, &ctx(vec![])));
    }
}
