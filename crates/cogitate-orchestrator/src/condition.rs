// cogitate-orchestrator/src/condition.rs
// ============================================================================
// Module: Condition Evaluation
// Description: Evaluates a WorkflowStep's Condition against a
//              ReasoningContext.
// Purpose: Gates whether a conditional-discipline step runs or is skipped.
// Dependencies: cogitate-core (via context), serde_json
// ============================================================================

//! ## Overview
//! A [`Condition`] names a dotted path into `ReasoningContext.results` and
//! a comparison to make against it. Any failure to resolve — a missing
//! path, a type mismatch for the chosen operator — evaluates to `false`
//! rather than erroring, so a malformed condition skips its step instead
//! of aborting the workflow.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::context::ReasoningContext;
use crate::workflow::Condition;
use crate::workflow::ConditionOperator;
use serde_json::Value;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates `condition` against `context`, defaulting to `false` on any
/// unresolved path or operator/type mismatch.
#[must_use]
pub fn evaluate(condition: &Condition, context: &ReasoningContext) -> bool {
    let Some(actual) = context.lookup(&condition.field_path) else {
        return false;
    };
    match condition.operator {
        ConditionOperator::Gt => compare_numeric(actual, &condition.value, |a, b| a > b),
        ConditionOperator::Lt => compare_numeric(actual, &condition.value, |a, b| a < b),
        ConditionOperator::Eq => actual == &condition.value,
        ConditionOperator::Contains => contains(actual, &condition.value),
    }
}

/// Applies `compare` to `actual` and `expected` when both are JSON numbers.
fn compare_numeric(actual: &Value, expected: &Value, compare: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => compare(a, b),
        _ => false,
    }
}

/// Tests whether `expected`'s string form is a substring of `actual`'s.
fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual.as_str(), expected.as_str()) {
        (Some(haystack), Some(needle)) => haystack.contains(needle),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::context::ReasoningContext;
    use crate::workflow::Condition;
    use crate::workflow::ConditionOperator;
    use cogitate_core::ContextId;
    use cogitate_core::Timestamp;
    use cogitate_core::WorkflowId;
    use serde_json::json;

    fn context_with(path_key: &str, value: serde_json::Value) -> ReasoningContext {
        let mut ctx = ReasoningContext::new(ContextId::new("ctx"), WorkflowId::new("wf"), "problem".to_string(), Timestamp::from_millis(0));
        ctx.store_result(path_key.to_string(), value, Timestamp::from_millis(1));
        ctx
    }

    fn condition(field_path: &str, operator: ConditionOperator, value: serde_json::Value) -> Condition {
        Condition { kind: "result_match".to_string(), field_path: field_path.to_string(), operator, value }
    }

    #[test]
    fn gt_passes_when_the_result_exceeds_the_threshold() {
        let ctx = context_with("step1", json!({"score": 0.9}));
        let cond = condition("step1.score", ConditionOperator::Gt, json!(0.5));
        assert!(evaluate(&cond, &ctx));
    }

    #[test]
    fn lt_fails_when_the_result_is_not_below_the_threshold() {
        let ctx = context_with("step1", json!({"score": 0.9}));
        let cond = condition("step1.score", ConditionOperator::Lt, json!(0.5));
        assert!(!evaluate(&cond, &ctx));
    }

    #[test]
    fn eq_compares_raw_values() {
        let ctx = context_with("step1", json!({"label": "approved"}));
        let cond = condition("step1.label", ConditionOperator::Eq, json!("approved"));
        assert!(evaluate(&cond, &ctx));
    }

    #[test]
    fn contains_checks_a_substring() {
        let ctx = context_with("step1", json!({"text": "strongly recommend"}));
        let cond = condition("step1.text", ConditionOperator::Contains, json!("recommend"));
        assert!(evaluate(&cond, &ctx));
    }

    #[test]
    fn a_missing_path_evaluates_to_false() {
        let ctx = context_with("step1", json!({"score": 0.9}));
        let cond = condition("step1.missing", ConditionOperator::Gt, json!(0.0));
        assert!(!evaluate(&cond, &ctx));
    }
}
