// cogitate-orchestrator/src/dag.rs
// ============================================================================
// Module: DAG Scheduler
// Description: Topological-pass ordering of WorkflowSteps for the
//              conditional execution discipline.
// Purpose: Groups steps into passes where every step in a pass has all of
//          its dependencies satisfied by an earlier pass.
// Dependencies: cogitate-core (via workflow)
// ============================================================================

//! ## Overview
//! [`Workflow::validate_dag`](crate::workflow::Workflow::validate_dag)
//! already guarantees the `depends_on` relation is acyclic before a
//! workflow is registered, so [`topological_passes`] here never observes a
//! cycle in practice. It still returns a `Result` rather than panicking,
//! since a future caller could hand it an unvalidated step list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::workflow::WorkflowDefinitionError;
use crate::workflow::WorkflowStep;
use cogitate_core::StepId;
use std::collections::BTreeSet;

// ============================================================================
// SECTION: Scheduling
// ============================================================================

/// Splits `steps` into ordered passes: every step in pass *n* has all of
/// its `depends_on` entries satisfied by steps in passes `0..n`.
///
/// # Errors
///
/// Returns [`WorkflowDefinitionError::DependencyCycle`] if no step can make
/// progress in some pass.
pub fn topological_passes(steps: &[WorkflowStep]) -> Result<Vec<Vec<&WorkflowStep>>, WorkflowDefinitionError> {
    let mut remaining: Vec<&WorkflowStep> = steps.iter().collect();
    let mut resolved: BTreeSet<&StepId> = BTreeSet::new();
    let mut passes = Vec::new();

    while !remaining.is_empty() {
        let (ready, blocked): (Vec<&WorkflowStep>, Vec<&WorkflowStep>) =
            remaining.into_iter().partition(|step| step.depends_on.iter().all(|dep| resolved.contains(dep)));
        if ready.is_empty() {
            let stuck = blocked.first().map_or_else(|| StepId::new(""), |step| step.id.clone());
            return Err(WorkflowDefinitionError::DependencyCycle { step: stuck });
        }
        for step in &ready {
            resolved.insert(&step.id);
        }
        passes.push(ready);
        remaining = blocked;
    }
    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::topological_passes;
    use crate::workflow::WorkflowStep;
    use cogitate_core::StepId;

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

    #[test]
    fn independent_steps_land_in_the_first_pass() {
        let steps = vec![step("a", &[]), step("b", &[])];
        let passes = topological_passes(&steps).expect("acyclic");
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].len(), 2);
    }

    #[test]
    fn a_dependent_step_lands_in_a_later_pass() {
        let steps = vec![step("a", &[]), step("b", &["a"]), step("c", &["a", "b"])];
        let passes = topological_passes(&steps).expect("acyclic");
        assert_eq!(passes.len(), 3);
        assert_eq!(passes[0][0].id.as_str(), "a");
        assert_eq!(passes[1][0].id.as_str(), "b");
        assert_eq!(passes[2][0].id.as_str(), "c");
    }

    #[test]
    fn a_cycle_reports_the_stuck_step() {
        let steps = vec![step("a", &["b"]), step("b", &["a"])];
        assert!(topological_passes(&steps).is_err());
    }
}
