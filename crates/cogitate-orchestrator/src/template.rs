// cogitate-orchestrator/src/template.rs
// ============================================================================
// Module: Template Resolution
// Description: Whole-string `{{path}}` / `$path` substitution against a
//              ReasoningContext's results and the workflow's input map.
// Purpose: Lets a later step's input reference an earlier step's result.
// Dependencies: cogitate-core (via context), serde_json
// ============================================================================

//! ## Overview
//! Resolution only recognizes a template when the *entire* string value is
//! the template expression. A value like `"{{step1.score}} total"` is not a
//! template and passes through unchanged, because partial interpolation
//! would force every resolved value to be stringified and lose its
//! original JSON type (a number stays a number, not `"0.8"`).
//!
//! A template's head segment is looked up first in the reasoning context's
//! results, then in the workflow's own input map; if neither resolves it,
//! the original literal string passes through unchanged (deliberate:
//! surfaces mis-references for debugging rather than silently producing
//! empty values). Arrays are resolved element-wise; nested maps are not
//! resolved beyond the step-input layer itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::context::ReasoningContext;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves every value in `step_input` against `context.results`, falling
/// back to `workflow_input` for unresolved head segments.
#[must_use]
pub fn resolve_input(
    step_input: &Map<String, Value>,
    context: &ReasoningContext,
    workflow_input: &Map<String, Value>,
) -> Map<String, Value> {
    step_input
        .iter()
        .map(|(key, value)| (key.clone(), resolve_value(value, context, workflow_input)))
        .collect()
}

/// Resolves a string or array-of-strings value; other values (including
/// nested objects) pass through unchanged.
fn resolve_value(value: &Value, context: &ReasoningContext, workflow_input: &Map<String, Value>) -> Value {
    match value {
        Value::String(text) => resolve_string(text, context, workflow_input),
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| resolve_value(item, context, workflow_input)).collect())
        }
        other => other.clone(),
    }
}

/// Resolves a string value, returning it unchanged if it is not a
/// whole-string template reference or its path does not resolve.
fn resolve_string(text: &str, context: &ReasoningContext, workflow_input: &Map<String, Value>) -> Value {
    let Some(path) = template_path(text) else {
        return Value::String(text.to_string());
    };
    if let Some(found) = context.lookup(path) {
        return found.clone();
    }
    if let Some(found) = lookup_path(workflow_input, path) {
        return found.clone();
    }
    Value::String(text.to_string())
}

/// Walks a dotted path into `map`, as [`ReasoningContext::lookup`] does for
/// the reasoning context's own results.
fn lookup_path<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = map.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Extracts the dotted path from a `{{path}}` or `$path` whole-string
/// template, or `None` if `text` is not exactly one of those forms.
fn template_path(text: &str) -> Option<&str> {
    if let Some(inner) = text.strip_prefix("{{").and_then(|rest| rest.strip_suffix("}}")) {
        return Some(inner.trim());
    }
    text.strip_prefix('$').filter(|path| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::resolve_input;
    use crate::context::ReasoningContext;
    use cogitate_core::ContextId;
    use cogitate_core::Timestamp;
    use cogitate_core::WorkflowId;
    use serde_json::json;
    use serde_json::Map;
    use serde_json::Value;

    fn context_with_result(name: &str, value: Value) -> ReasoningContext {
        let mut ctx = ReasoningContext::new(ContextId::new("ctx"), WorkflowId::new("wf"), "problem".to_string(), Timestamp::from_millis(0));
        ctx.store_result(name.to_string(), value, Timestamp::from_millis(1));
        ctx
    }

    #[test]
    fn braces_template_resolves_and_preserves_the_original_type() {
        let ctx = context_with_result("step1", json!({"score": 0.8}));
        let input = Map::from_iter([("threshold".to_string(), json!("{{step1.score}}"))]);
        let resolved = resolve_input(&input, &ctx, &Map::new());
        assert_eq!(resolved.get("threshold"), Some(&json!(0.8)));
    }

    #[test]
    fn dollar_template_resolves() {
        let ctx = context_with_result("step1", json!(42));
        let input = Map::from_iter([("value".to_string(), json!("$step1"))]);
        let resolved = resolve_input(&input, &ctx, &Map::new());
        assert_eq!(resolved.get("value"), Some(&json!(42)));
    }

    #[test]
    fn falls_back_to_the_workflow_input_map() {
        let ctx = context_with_result("unrelated", json!(0));
        let workflow_input = Map::from_iter([("problem".to_string(), json!("why is the sky blue"))]);
        let input = Map::from_iter([("question".to_string(), json!("{{problem}}"))]);
        let resolved = resolve_input(&input, &ctx, &workflow_input);
        assert_eq!(resolved.get("question"), Some(&json!("why is the sky blue")));
    }

    #[test]
    fn an_unresolved_template_passes_through_unchanged() {
        let ctx = context_with_result("step1", json!(1));
        let input = Map::from_iter([("value".to_string(), json!("{{missing.path}}"))]);
        let resolved = resolve_input(&input, &ctx, &Map::new());
        assert_eq!(resolved.get("value"), Some(&json!("{{missing.path}}")));
    }

    #[test]
    fn a_partial_interpolation_is_left_untouched() {
        let ctx = context_with_result("step1", json!(0.8));
        let input = Map::from_iter([("value".to_string(), json!("score is {{step1}}"))]);
        let resolved = resolve_input(&input, &ctx, &Map::new());
        assert_eq!(resolved.get("value"), Some(&json!("score is {{step1}}")));
    }

    #[test]
    fn arrays_are_resolved_element_wise() {
        let ctx = context_with_result("step1", json!(true));
        let input = Map::from_iter([("list".to_string(), json!(["{{step1}}", "literal"]))]);
        let resolved = resolve_input(&input, &ctx, &Map::new());
        assert_eq!(resolved.get("list"), Some(&json!([true, "literal"])));
    }

    #[test]
    fn nested_maps_are_not_resolved_beyond_the_step_input_layer() {
        let ctx = context_with_result("step1", json!(true));
        let input = Map::from_iter([("nested".to_string(), json!({"inner": "{{step1}}"}))]);
        let resolved = resolve_input(&input, &ctx, &Map::new());
        assert_eq!(resolved.get("nested"), Some(&json!({"inner": "{{step1}}"})));
    }
}
