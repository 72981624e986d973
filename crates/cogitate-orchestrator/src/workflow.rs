// cogitate-orchestrator/src/workflow.rs
// ============================================================================
// Module: Workflow Definition
// Description: Workflow, WorkflowStep, Condition, and OutputTransform types,
//              plus the DependsOn-forms-a-DAG invariant check.
// Purpose: The declarative shape the orchestrator schedules and executes.
// Dependencies: cogitate-core, serde
// ============================================================================

//! ## Overview
//! A [`Workflow`] is pure data: an execution discipline and an ordered list
//! of [`WorkflowStep`]s. Nothing here executes anything; [`crate::engine`]
//! is the only consumer that dispatches against these types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use cogitate_core::StepId;
use cogitate_core::Timestamp;
use cogitate_core::WorkflowId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned while defining or registering a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowDefinitionError {
    /// A step's `depends_on` names a step identifier not present in the
    /// same workflow.
    #[error("step {step} depends on unknown step {dependency}")]
    UnknownDependency {
        /// The step carrying the invalid reference.
        step: StepId,
        /// The unresolved dependency identifier.
        dependency: StepId,
    },
    /// The `depends_on` relation over the workflow's steps is not a DAG.
    #[error("workflow steps contain a dependency cycle involving step {step}")]
    DependencyCycle {
        /// A step identifier that participates in the cycle.
        step: StepId,
    },
    /// Two steps in the same workflow share an identifier.
    #[error("duplicate step identifier: {0}")]
    DuplicateStepId(StepId),
}

// ============================================================================
// SECTION: Execution Discipline
// ============================================================================

/// How a workflow's steps are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionDiscipline {
    /// Steps run one at a time, in declared order.
    Sequential,
    /// Every step launches concurrently; `depends_on` is not scheduled on.
    Parallel,
    /// Steps run in topological passes respecting `depends_on`.
    Conditional,
}

// ============================================================================
// SECTION: Condition
// ============================================================================

/// A comparison operator evaluated against a `ReasoningContext` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    /// Numeric greater-than.
    Gt,
    /// Numeric less-than.
    Lt,
    /// Raw-value equality.
    Eq,
    /// String-in-string substring test.
    Contains,
}

/// A gate evaluated against the `ReasoningContext` results map before a step
/// runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Always `"result_match"` at present; carried for wire forward
    /// compatibility.
    pub kind: String,
    /// Dotted accessor into `ReasoningContext.results`.
    pub field_path: String,
    /// The comparison to apply.
    pub operator: ConditionOperator,
    /// The value to compare the extracted field against.
    pub value: Value,
}

// ============================================================================
// SECTION: Output Transform
// ============================================================================

/// A transform applied to a step's raw tool result before it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputTransform {
    /// Replaces the result with the value at `field`.
    ExtractField {
        /// Dotted accessor into the raw result.
        field: String,
    },
    /// Renames keys per `config` (old name → new name).
    Map {
        /// Old-key → new-key renaming table.
        config: BTreeMap<String, String>,
    },
    /// Retains only the listed keys.
    Filter {
        /// Keys to keep.
        fields: Vec<String>,
    },
}

impl OutputTransform {
    /// Applies this transform to a raw tool result.
    ///
    /// A malformed result for the requested transform (not an object, or a
    /// missing `field`) is left untouched rather than erroring, since a
    /// transform mismatch is a workflow-authoring error surfaced downstream
    /// by whatever reads the (unchanged) result.
    #[must_use]
    pub fn apply(&self, raw: &Value) -> Value {
        match self {
            Self::ExtractField { field } => {
                raw.as_object().and_then(|obj| obj.get(field.as_str())).cloned().unwrap_or_else(|| raw.clone())
            }
            Self::Map { config } => {
                let Some(obj) = raw.as_object() else {
                    return raw.clone();
                };
                let renamed: Map<String, Value> = obj
                    .iter()
                    .map(|(key, value)| (config.get(key).cloned().unwrap_or_else(|| key.clone()), value.clone()))
                    .collect();
                Value::Object(renamed)
            }
            Self::Filter { fields } => {
                let Some(obj) = raw.as_object() else {
                    return raw.clone();
                };
                let filtered: Map<String, Value> =
                    obj.iter().filter(|(key, _)| fields.contains(key)).map(|(k, v)| (k.clone(), v.clone())).collect();
                Value::Object(filtered)
            }
        }
    }
}

// ============================================================================
// SECTION: Workflow Step
// ============================================================================

/// One node in a workflow's step graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Identifier, unique within the owning workflow.
    pub id: StepId,
    /// Name of the tool this step invokes.
    pub tool: String,
    /// Literal or templated input values, overlaid on the workflow input.
    #[serde(default)]
    pub input: Map<String, Value>,
    /// Step identifiers that must complete (or be skipped) before this one.
    #[serde(default)]
    pub depends_on: Vec<StepId>,
    /// Gate evaluated before this step runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Transform applied to the raw result before storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_transform: Option<OutputTransform>,
    /// Name under which the result is written into the reasoning context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_as: Option<String>,
}

// ============================================================================
// SECTION: Workflow
// ============================================================================

/// A registered, reusable declarative pipeline of tool invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Identifier, unique within the orchestrator.
    pub id: WorkflowId,
    /// Human-readable name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// How this workflow's steps are scheduled.
    pub discipline: ExecutionDiscipline,
    /// The steps, in declaration order.
    pub steps: Vec<WorkflowStep>,
    /// When this workflow was registered.
    pub created_at: Timestamp,
}

impl Workflow {
    /// Validates that every step's `depends_on` names a sibling step and
    /// that the relation is acyclic.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDefinitionError`] on a duplicate step id, an
    /// unknown dependency, or a dependency cycle.
    pub fn validate_dag(&self) -> Result<(), WorkflowDefinitionError> {
        let mut seen = BTreeSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.clone()) {
                return Err(WorkflowDefinitionError::DuplicateStepId(step.id.clone()));
            }
        }
        for step in &self.steps {
            for dependency in &step.depends_on {
                if !seen.contains(dependency) {
                    return Err(WorkflowDefinitionError::UnknownDependency {
                        step: step.id.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        detect_cycle(&self.steps)
    }
}

/// Runs Kahn's algorithm over the step graph; any step left unresolved once
/// no further progress can be made participates in a cycle.
fn detect_cycle(steps: &[WorkflowStep]) -> Result<(), WorkflowDefinitionError> {
    let mut remaining: BTreeMap<&StepId, &[StepId]> =
        steps.iter().map(|step| (&step.id, step.depends_on.as_slice())).collect();
    let mut resolved: BTreeSet<&StepId> = BTreeSet::new();

    while !remaining.is_empty() {
        let ready: Vec<&StepId> = remaining
            .iter()
            .filter(|(_, deps)| deps.iter().all(|dep| resolved.contains(dep)))
            .map(|(id, _)| *id)
            .collect();
        if ready.is_empty() {
            let stuck = (*remaining.keys().next().expect("remaining is non-empty")).clone();
            return Err(WorkflowDefinitionError::DependencyCycle { step: stuck });
        }
        for id in ready {
            resolved.insert(id);
            remaining.remove(id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ExecutionDiscipline;
    use super::Workflow;
    use super::WorkflowDefinitionError;
    use super::WorkflowStep;
    use cogitate_core::StepId;
    use cogitate_core::Timestamp;
    use cogitate_core::WorkflowId;

    fn step(id: &str, depends_on: &[&str]) -> WorkflowStep {
        WorkflowStep {
            id: StepId::new(id),
            tool: "think".to_string(),
            input: serde_json::Map::new(),
            depends_on: depends_on.iter().map(|s| StepId::new(*s)).collect(),
            condition: None,
            output_transform: None,
            store_as: None,
        }
    }

    fn workflow(discipline: ExecutionDiscipline, steps: Vec<WorkflowStep>) -> Workflow {
        Workflow {
            id: WorkflowId::new("w1"),
            name: "test".to_string(),
            description: String::new(),
            discipline,
            steps,
            created_at: Timestamp::from_millis(0),
        }
    }

    #[test]
    fn acyclic_dependencies_validate() {
        let w = workflow(
            ExecutionDiscipline::Conditional,
            vec![step("a", &[]), step("b", &["a"]), step("c", &["a", "b"])],
        );
        assert_eq!(w.validate_dag(), Ok(()));
    }

    #[test]
    fn a_cycle_is_rejected() {
        let w = workflow(
            ExecutionDiscipline::Conditional,
            vec![step("a", &["b"]), step("b", &["a"])],
        );
        assert!(matches!(w.validate_dag(), Err(WorkflowDefinitionError::DependencyCycle { .. })));
    }

    #[test]
    fn an_unknown_dependency_is_rejected() {
        let w = workflow(ExecutionDiscipline::Sequential, vec![step("a", &["missing"])]);
        assert_eq!(
            w.validate_dag(),
            Err(WorkflowDefinitionError::UnknownDependency {
                step: StepId::new("a"),
                dependency: StepId::new("missing"),
            })
        );
    }

    #[test]
    fn a_duplicate_step_id_is_rejected() {
        let w = workflow(ExecutionDiscipline::Sequential, vec![step("a", &[]), step("a", &[])]);
        assert_eq!(w.validate_dag(), Err(WorkflowDefinitionError::DuplicateStepId(StepId::new("a"))));
    }

    #[test]
    fn extract_field_returns_the_named_field() {
        let transform = super::OutputTransform::ExtractField { field: "is_valid".to_string() };
        let raw = serde_json::json!({"is_valid": true, "other": 1});
        assert_eq!(transform.apply(&raw), serde_json::json!(true));
    }

    #[test]
    fn map_renames_keys_per_config() {
        let mut config = std::collections::BTreeMap::new();
        config.insert("old".to_string(), "new".to_string());
        let transform = super::OutputTransform::Map { config };
        let raw = serde_json::json!({"old": 1, "untouched": 2});
        assert_eq!(transform.apply(&raw), serde_json::json!({"new": 1, "untouched": 2}));
    }

    #[test]
    fn filter_retains_only_listed_keys() {
        let transform = super::OutputTransform::Filter { fields: vec!["keep".to_string()] };
        let raw = serde_json::json!({"keep": 1, "drop": 2});
        assert_eq!(transform.apply(&raw), serde_json::json!({"keep": 1}));
    }
}
