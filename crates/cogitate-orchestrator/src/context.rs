// cogitate-orchestrator/src/context.rs
// ============================================================================
// Module: Reasoning Context
// Description: The accumulator a workflow run reads from and writes into.
// Purpose: Carries step results, confidence, and reasoning-entity ids across
//          a workflow execution and between workflow executions.
// Dependencies: cogitate-core, serde_json
// ============================================================================

//! ## Overview
//! A [`ReasoningContext`] is the shared scratchpad passed through a
//! workflow run. Each step's stored result lands in `results`; running
//! confidence is updated by a sliding pairwise mean as steps report their
//! own confidence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use cogitate_core::ContextId;
use cogitate_core::ThoughtId;
use cogitate_core::Timestamp;
use cogitate_core::WorkflowId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Reasoning Context
// ============================================================================

/// Accumulated state threaded through a workflow execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningContext {
    /// Identifier, unique within the owning orchestrator.
    pub id: ContextId,
    /// Identifier of the workflow this context was created for.
    pub workflow_id: WorkflowId,
    /// The originating problem statement this reasoning run addresses.
    pub problem: String,
    /// Thought identifiers appended by steps that record a thought.
    #[serde(default)]
    pub thoughts: Vec<ThoughtId>,
    /// Causal graph identifiers accumulated by steps that build one.
    #[serde(default)]
    pub causal_graphs: Vec<String>,
    /// Belief identifiers accumulated by steps that assert one.
    #[serde(default)]
    pub beliefs: Vec<String>,
    /// Evidence identifiers accumulated by steps that cite one.
    #[serde(default)]
    pub evidence: Vec<String>,
    /// Decision identifiers accumulated by steps that record one.
    #[serde(default)]
    pub decisions: Vec<String>,
    /// Named step results, keyed by each step's `store_as`.
    #[serde(default)]
    pub results: BTreeMap<String, Value>,
    /// Running confidence, updated by a sliding pairwise mean.
    pub confidence: f64,
    /// When this context was created.
    pub created_at: Timestamp,
    /// When this context was last updated.
    pub updated_at: Timestamp,
}

impl ReasoningContext {
    /// Builds a fresh, empty context with neutral confidence.
    #[must_use]
    pub fn new(id: ContextId, workflow_id: WorkflowId, problem: String, created_at: Timestamp) -> Self {
        Self {
            id,
            workflow_id,
            problem,
            thoughts: Vec::new(),
            causal_graphs: Vec::new(),
            beliefs: Vec::new(),
            evidence: Vec::new(),
            decisions: Vec::new(),
            results: BTreeMap::new(),
            confidence: 0.5,
            created_at,
            updated_at: created_at,
        }
    }

    /// Folds `observed` into `confidence` via a sliding pairwise mean.
    pub fn update_confidence(&mut self, observed: f64, at: Timestamp) {
        self.confidence = (self.confidence + observed) / 2.0;
        self.updated_at = at;
    }

    /// Stores `value` under `name` in `results`, updating `updated_at`.
    pub fn store_result(&mut self, name: String, value: Value, at: Timestamp) {
        self.results.insert(name, value);
        self.updated_at = at;
    }

    /// Resolves a dotted path (`"step.field.nested"`) against `results`.
    ///
    /// The first segment selects the top-level entry; remaining segments
    /// index into nested JSON objects. Returns `None` if any segment is
    /// missing or indexes into a non-object value.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.results.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::ReasoningContext;
    use cogitate_core::ContextId;
    use cogitate_core::Timestamp;
    use cogitate_core::WorkflowId;
    use serde_json::json;

    fn context() -> ReasoningContext {
        ReasoningContext::new(ContextId::new("ctx-1"), WorkflowId::new("wf"), "problem".to_string(), Timestamp::from_millis(0))
    }

    #[test]
    fn confidence_starts_neutral_and_slides_toward_observations() {
        let mut ctx = context();
        assert!((ctx.confidence - 0.5).abs() < f64::EPSILON);
        ctx.update_confidence(0.9, Timestamp::from_millis(1));
        assert!((ctx.confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn lookup_resolves_a_top_level_result() {
        let mut ctx = context();
        ctx.store_result("step1".to_string(), json!({"score": 0.8}), Timestamp::from_millis(1));
        assert_eq!(ctx.lookup("step1.score"), Some(&json!(0.8)));
    }

    #[test]
    fn lookup_returns_none_for_a_missing_path() {
        let ctx = context();
        assert_eq!(ctx.lookup("missing.field"), None);
    }

    #[test]
    fn lookup_returns_none_when_indexing_into_a_scalar() {
        let mut ctx = context();
        ctx.store_result("step1".to_string(), json!(42), Timestamp::from_millis(1));
        assert_eq!(ctx.lookup("step1.nested"), None);
    }
}
