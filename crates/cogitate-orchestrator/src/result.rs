// cogitate-orchestrator/src/result.rs
// ============================================================================
// Module: Workflow Result
// Description: The terminal outcome of one ExecuteWorkflow call.
// Purpose: Reports per-step results, the attached ReasoningContext, and
//          success/failure status back to the caller.
// Dependencies: cogitate-core, serde_json
// ============================================================================

//! ## Overview
//! `partial` is defined on the wire for forward compatibility but the
//! orchestrator never produces it today: every run ends either `success` or
//! `failed`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use crate::context::ReasoningContext;
use cogitate_core::WorkflowId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Workflow Status
// ============================================================================

/// The terminal state of a workflow execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// Every step ran (or was deliberately skipped) without error.
    Success,
    /// Reserved for future use; never produced today.
    Partial,
    /// A step failed, or the run was cancelled or deadlocked.
    Failed,
}

// ============================================================================
// SECTION: Workflow Result
// ============================================================================

/// The outcome of one `ExecuteWorkflow` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// The workflow that was executed.
    pub workflow_id: WorkflowId,
    /// The terminal status of the run.
    pub status: WorkflowStatus,
    /// Each completed step's (possibly transformed) result, keyed by step id.
    pub results_by_step: BTreeMap<String, Value>,
    /// The reasoning context as it stood when the run finished.
    pub context: ReasoningContext,
    /// Wall-clock time spent executing the workflow.
    pub elapsed: Duration,
    /// A human-readable failure description, set only when `status` is
    /// [`WorkflowStatus::Failed`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
