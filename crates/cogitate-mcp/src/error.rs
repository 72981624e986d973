// cogitate-mcp/src/error.rs
// ============================================================================
// Module: Tool Error Mapping
// Description: Maps every domain error type in the workspace onto the
//              wire-level ToolError taxonomy.
// Purpose: Give each tool handler a single conversion path to the structured
//          error body the transport writes back to the client.
// Dependencies: cogitate-core, cogitate-calibration, cogitate-orchestrator
// ============================================================================

//! ## Overview
//! Every domain crate defines its own `thiserror` enum; this module is the
//! one place that decides which wire [`ErrorCode`] each domain error
//! deserves. No domain crate depends on `cogitate-core::ErrorCode` itself —
//! that coupling lives here, at the server boundary, where it belongs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use cogitate_calibration::CalibrationError;
use cogitate_core::ErrorCode;
use cogitate_core::StoreError;
use cogitate_core::ThoughtError;
use cogitate_core::ToolError;
use cogitate_orchestrator::OrchestratorError;
use cogitate_orchestrator::ToolExecutionError;
use cogitate_orchestrator::WorkflowDefinitionError;

// ============================================================================
// SECTION: Conversions
// ============================================================================

/// Maps a [`StoreError`] onto the wire error taxonomy.
#[must_use]
pub fn from_store_error(error: &StoreError) -> ToolError {
    match error {
        StoreError::NotFound(id) => ToolError::new(ErrorCode::NotFound, format!("not found: {id}")),
        StoreError::AlreadyExists(id) => ToolError::new(ErrorCode::AlreadyExists, format!("already exists: {id}")),
        StoreError::Backend(message) => {
            ToolError::new(ErrorCode::StorageOperationFailed, message.clone())
        }
    }
}

/// Maps a [`ThoughtError`] onto the wire error taxonomy.
#[must_use]
pub fn from_thought_error(error: &ThoughtError) -> ToolError {
    match error {
        ThoughtError::InvalidConfidence(_) => {
            ToolError::new(ErrorCode::InvalidConfidence, error.to_string())
        }
        ThoughtError::TooManyKeyPoints(_) | ThoughtError::KeyPointTooLarge(_) => {
            ToolError::new(ErrorCode::InvalidParameter, error.to_string())
        }
    }
}

/// Maps a [`CalibrationError`] onto the wire error taxonomy.
#[must_use]
pub fn from_calibration_error(error: &CalibrationError) -> ToolError {
    match error {
        CalibrationError::NotFound(id) => ToolError::new(ErrorCode::NotFound, format!("not found: {id}")),
        CalibrationError::MissingPrediction(id) => {
            ToolError::new(ErrorCode::NotFound, format!("no prediction recorded for thought: {id}"))
                .with_recovery_suggestions(vec!["record-prediction".to_string()])
                .with_related_tools(vec!["record-prediction".to_string()])
        }
        CalibrationError::InvalidConfidence(value) => {
            ToolError::new(ErrorCode::InvalidConfidence, format!("confidence must be in [0, 1], got {value}"))
        }
        CalibrationError::EmptyIdentifier => {
            ToolError::new(ErrorCode::MissingRequired, "thought identifier must not be empty".to_string())
        }
    }
}

/// Maps an [`OrchestratorError`] onto the wire error taxonomy.
#[must_use]
pub fn from_orchestrator_error(error: &OrchestratorError) -> ToolError {
    match error {
        OrchestratorError::WorkflowNotFound(id) => {
            ToolError::new(ErrorCode::NotFound, format!("workflow not found: {id}"))
        }
        OrchestratorError::WorkflowAlreadyExists(id) => {
            ToolError::new(ErrorCode::AlreadyExists, format!("workflow already exists: {id}"))
        }
        OrchestratorError::ContextNotFound(id) => {
            ToolError::new(ErrorCode::NotFound, format!("context not found: {id}"))
        }
        OrchestratorError::InvalidWorkflow(inner) => from_workflow_definition_error(inner),
        OrchestratorError::MissingToolExecutor => {
            ToolError::new(ErrorCode::InvalidParameter, "no tool executor configured".to_string())
        }
        OrchestratorError::LockPoisoned(what) => {
            ToolError::new(ErrorCode::StorageOperationFailed, format!("{what} lock poisoned"))
        }
    }
}

/// Maps a [`WorkflowDefinitionError`] onto the wire error taxonomy.
#[must_use]
pub fn from_workflow_definition_error(error: &WorkflowDefinitionError) -> ToolError {
    match error {
        WorkflowDefinitionError::UnknownDependency { .. } | WorkflowDefinitionError::DuplicateStepId(_) => {
            ToolError::new(ErrorCode::InvalidParameter, error.to_string())
        }
        WorkflowDefinitionError::DependencyCycle { .. } => {
            ToolError::new(ErrorCode::InvalidParameter, format!("deadlock: {error}"))
        }
    }
}

/// Maps a [`ToolExecutionError`] onto the wire error taxonomy.
#[must_use]
pub fn from_tool_execution_error(error: &ToolExecutionError) -> ToolError {
    match error {
        ToolExecutionError::UnknownTool(name) => {
            ToolError::new(ErrorCode::NotFound, format!("unknown tool: {name}"))
        }
        ToolExecutionError::Failed { tool, message } => {
            ToolError::new(ErrorCode::InvalidParameter, format!("tool {tool} failed: {message}"))
        }
        ToolExecutionError::Cancelled => {
            ToolError::new(ErrorCode::InvalidParameter, "execution cancelled".to_string())
        }
    }
}

/// Builds a [`ToolError::MissingRequired`]-coded error naming the absent
/// parameter.
#[must_use]
pub fn missing_required(field: &str) -> ToolError {
    ToolError::new(ErrorCode::MissingRequired, format!("missing required parameter: {field}"))
}

/// Builds a [`ToolError::InvalidParameter`]-coded error describing why
/// `field` was rejected.
#[must_use]
pub fn invalid_parameter(field: &str, reason: &str) -> ToolError {
    ToolError::new(ErrorCode::InvalidParameter, format!("invalid parameter {field}: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::from_calibration_error;
    use super::from_store_error;
    use cogitate_calibration::CalibrationError;
    use cogitate_core::ErrorCode;
    use cogitate_core::StoreError;

    #[test]
    fn store_not_found_maps_to_the_resource_namespace() {
        let err = from_store_error(&StoreError::NotFound("t1".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn missing_prediction_carries_a_recovery_suggestion() {
        let err = from_calibration_error(&CalibrationError::MissingPrediction("t1".to_string()));
        assert!(!err.recovery_suggestions.is_empty());
    }
}
