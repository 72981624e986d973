// cogitate-mcp/src/registration.rs
// ============================================================================
// Module: Predefined Workflow Registration
// Description: Registers the three built-in workflows the server ships with.
// Purpose: Give a client immediately usable multi-step pipelines without
//          requiring it to author a `register-workflow` call first.
// Dependencies: cogitate-orchestrator
// ============================================================================

//! ## Overview
//! Every workflow here is plain data, built once at server startup and
//! handed to [`cogitate_orchestrator::Orchestrator::register_workflow`].
//! Their step graphs are the three pipelines named in this server's external
//! interface: a sequential causal-analysis pass, a sequential
//! critical-thinking pass with one conditional gate, and a parallel
//! multi-perspective decision.

// ============================================================================
// SECTION: Imports
// ============================================================================

use cogitate_core::StepId;
use cogitate_core::Timestamp;
use cogitate_core::WorkflowId;
use cogitate_orchestrator::Condition;
use cogitate_orchestrator::ConditionOperator;
use cogitate_orchestrator::ExecutionDiscipline;
use cogitate_orchestrator::Orchestrator;
use cogitate_orchestrator::OrchestratorError;
use cogitate_orchestrator::Workflow;
use cogitate_orchestrator::WorkflowStep;
use serde_json::Map;
use serde_json::json;

// ============================================================================
// SECTION: Registration Entry Point
// ============================================================================

/// Registers every predefined workflow against `orchestrator`.
///
/// # Errors
///
/// Returns the first [`OrchestratorError`] encountered; callers invoke this
/// once at startup against a freshly constructed, empty orchestrator, so a
/// failure here indicates a defect in one of the definitions below rather
/// than a runtime condition.
pub fn register_predefined_workflows(orchestrator: &Orchestrator) -> Result<(), OrchestratorError> {
    orchestrator.register_workflow(causal_analysis())?;
    orchestrator.register_workflow(critical_thinking())?;
    orchestrator.register_workflow(multi_perspective_decision())?;
    Ok(())
}

fn object(value: serde_json::Value) -> Map<String, serde_json::Value> {
    value.as_object().cloned().unwrap_or_default()
}

// ============================================================================
// SECTION: causal-analysis
// ============================================================================

fn causal_analysis() -> Workflow {
    Workflow {
        id: WorkflowId::new("causal-analysis"),
        name: "Causal Analysis".to_string(),
        description: "Builds a causal graph from input factors, scans it for biased framing, \
            then records a linear thought summarizing the results."
            .to_string(),
        discipline: ExecutionDiscipline::Sequential,
        steps: vec![
            WorkflowStep {
                id: StepId::new("build-graph"),
                tool: "build-causal-graph".to_string(),
                input: Map::new(),
                depends_on: Vec::new(),
                condition: None,
                output_transform: None,
                store_as: Some("causal_graph".to_string()),
            },
            WorkflowStep {
                id: StepId::new("detect-issues"),
                tool: "detect-biases".to_string(),
                input: Map::new(),
                depends_on: vec![StepId::new("build-graph")],
                condition: None,
                output_transform: None,
                store_as: Some("bias_report".to_string()),
            },
            WorkflowStep {
                id: StepId::new("think-about-results"),
                tool: "think".to_string(),
                input: object(json!({"mode": "linear"})),
                depends_on: vec![StepId::new("detect-issues")],
                condition: None,
                output_transform: None,
                store_as: Some("summary_thought".to_string()),
            },
        ],
        created_at: Timestamp::now(),
    }
}

// ============================================================================
// SECTION: critical-thinking
// ============================================================================

fn critical_thinking() -> Workflow {
    Workflow {
        id: WorkflowId::new("critical-thinking"),
        name: "Critical Thinking".to_string(),
        description: "Scans content for fallacies, checks the well-formedness of its \
            statements, then attempts a formal proof only if the syntax check passed."
            .to_string(),
        discipline: ExecutionDiscipline::Sequential,
        steps: vec![
            WorkflowStep {
                id: StepId::new("detect-biases"),
                tool: "detect-biases".to_string(),
                input: Map::new(),
                depends_on: Vec::new(),
                condition: None,
                output_transform: None,
                store_as: Some("bias_report".to_string()),
            },
            WorkflowStep {
                id: StepId::new("check-syntax"),
                tool: "check-syntax".to_string(),
                input: Map::new(),
                depends_on: vec![StepId::new("detect-biases")],
                condition: None,
                output_transform: None,
                store_as: Some("syntax_check".to_string()),
            },
            WorkflowStep {
                id: StepId::new("prove"),
                tool: "prove".to_string(),
                input: Map::new(),
                depends_on: vec![StepId::new("check-syntax")],
                condition: Some(Condition {
                    kind: "result_match".to_string(),
                    field_path: "syntax_check.is_valid".to_string(),
                    operator: ConditionOperator::Eq,
                    value: json!(true),
                }),
                output_transform: None,
                store_as: Some("proof".to_string()),
            },
        ],
        created_at: Timestamp::now(),
    }
}

// ============================================================================
// SECTION: multi-perspective-decision
// ============================================================================

fn multi_perspective_decision() -> Workflow {
    Workflow {
        id: WorkflowId::new("multi-perspective-decision"),
        name: "Multi-Perspective Decision".to_string(),
        description: "Weighs stakeholder perspectives and variable sensitivity in parallel, \
            then makes a decision informed by both."
            .to_string(),
        discipline: ExecutionDiscipline::Parallel,
        steps: vec![
            WorkflowStep {
                id: StepId::new("analyze-perspectives"),
                tool: "analyze-perspectives".to_string(),
                input: Map::new(),
                depends_on: Vec::new(),
                condition: None,
                output_transform: None,
                store_as: Some("perspectives".to_string()),
            },
            WorkflowStep {
                id: StepId::new("sensitivity-analysis"),
                tool: "sensitivity-analysis".to_string(),
                input: Map::new(),
                depends_on: Vec::new(),
                condition: None,
                output_transform: None,
                store_as: Some("sensitivity".to_string()),
            },
            WorkflowStep {
                id: StepId::new("make-decision"),
                tool: "make-decision".to_string(),
                input: object(json!({"perspectives": "{{perspectives}}", "sensitivity": "{{sensitivity}}"})),
                depends_on: vec![StepId::new("analyze-perspectives"), StepId::new("sensitivity-analysis")],
                condition: None,
                output_transform: None,
                store_as: Some("decision".to_string()),
            },
        ],
        created_at: Timestamp::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::register_predefined_workflows;
    use cogitate_core::WorkflowId;
    use cogitate_orchestrator::Orchestrator;

    #[test]
    fn all_three_predefined_workflows_register_without_error() {
        let orchestrator = Orchestrator::new(None);
        register_predefined_workflows(&orchestrator).expect("predefined workflows are well-formed");
        assert_eq!(orchestrator.list_workflows().unwrap().len(), 3);
    }

    #[test]
    fn causal_analysis_is_registered_under_its_fixed_id() {
        let orchestrator = Orchestrator::new(None);
        register_predefined_workflows(&orchestrator).unwrap();
        assert!(orchestrator.get_workflow(&WorkflowId::new("causal-analysis")).is_ok());
    }

    #[test]
    fn make_decision_input_references_both_parallel_branches() {
        let orchestrator = Orchestrator::new(None);
        register_predefined_workflows(&orchestrator).unwrap();
        let workflow = orchestrator.get_workflow(&WorkflowId::new("multi-perspective-decision")).unwrap();
        let make_decision = workflow.steps.iter().find(|s| s.tool == "make-decision").unwrap();
        assert_eq!(make_decision.input.get("perspectives"), Some(&serde_json::json!("{{perspectives}}")));
        assert_eq!(make_decision.input.get("sensitivity"), Some(&serde_json::json!("{{sensitivity}}")));
    }
}
