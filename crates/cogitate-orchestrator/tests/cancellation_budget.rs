// crates/cogitate-orchestrator/tests/cancellation_budget.rs
// ============================================================================
// Module: Cancellation Budget Tests
// Description: Tests that a cancelled sequential workflow stops at the next
//              step boundary rather than running to completion.
// ============================================================================
//! ## Overview
//! `execute_workflow` checks `CancellationToken::is_cancelled` before each
//! step starts, not while a step's tool call is in flight. These tests pin
//! that behavior down: cancelling from another thread partway through a
//! multi-step sequential workflow bounds the total run time to roughly one
//! slow step's duration, not the sum of every step's duration.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use cogitate_core::StepId;
use cogitate_core::Timestamp;
use cogitate_core::WorkflowId;
use cogitate_orchestrator::CancellationToken;
use cogitate_orchestrator::ExecutionDiscipline;
use cogitate_orchestrator::Orchestrator;
use cogitate_orchestrator::ToolExecutionError;
use cogitate_orchestrator::ToolExecutor;
use cogitate_orchestrator::Workflow;
use cogitate_orchestrator::WorkflowResult;
use cogitate_orchestrator::WorkflowStatus;
use cogitate_orchestrator::WorkflowStep;
use serde_json::Map;
use serde_json::Value;

/// A tool executor where every call sleeps for a fixed duration, so a test
/// can reason about how many calls actually ran from elapsed wall time.
struct SlowToolExecutor {
    step_duration: Duration,
}

impl ToolExecutor for SlowToolExecutor {
    fn execute_tool(&self, _tool: &str, _input: &Map<String, Value>) -> Result<Value, ToolExecutionError> {
        thread::sleep(self.step_duration);
        Ok(Value::Null)
    }
}

fn step(id: &str) -> WorkflowStep {
    WorkflowStep {
        id: StepId::new(id),
        tool: "think".to_string(),
        input: Map::new(),
        depends_on: Vec::new(),
        condition: None,
        output_transform: None,
        store_as: None,
    }
}

fn four_step_sequential_workflow() -> Workflow {
    Workflow {
        id: WorkflowId::new("slow-sequential"),
        name: "slow sequential".to_string(),
        description: String::new(),
        discipline: ExecutionDiscipline::Sequential,
        steps: vec![step("a"), step("b"), step("c"), step("d")],
        created_at: Timestamp::from_millis(0),
    }
}

#[test]
fn cancelling_mid_run_stops_before_the_next_step_starts() {
    let step_duration = Duration::from_millis(120);
    let tool_executor = Arc::new(SlowToolExecutor { step_duration });
    let orchestrator = Orchestrator::new(Some(tool_executor));
    orchestrator.register_workflow(four_step_sequential_workflow()).unwrap();

    let cancellation = CancellationToken::new();
    let canceller = cancellation.clone();
    let cancel_after = step_duration + step_duration / 2;
    let handle = thread::spawn(move || {
        thread::sleep(cancel_after);
        canceller.cancel();
    });

    let start = Instant::now();
    let result: WorkflowResult = orchestrator
        .execute_workflow(&WorkflowId::new("slow-sequential"), Map::new(), &cancellation)
        .unwrap();
    let elapsed = start.elapsed();
    handle.join().unwrap();

    assert_eq!(result.status, WorkflowStatus::Failed);
    // Two steps (a, b) should have completed before cancellation landed
    // partway through step b's sleep; the run must not continue into c or d.
    assert!(
        elapsed < step_duration * 4,
        "expected a cancelled run well under the full 4-step budget, got {elapsed:?}"
    );
    assert!(
        elapsed >= step_duration,
        "expected at least one full step to have run before cancellation, got {elapsed:?}"
    );
}

#[test]
fn an_uncancelled_run_executes_every_step() {
    let tool_executor = Arc::new(SlowToolExecutor { step_duration: Duration::from_millis(1) });
    let orchestrator = Orchestrator::new(Some(tool_executor));
    orchestrator.register_workflow(four_step_sequential_workflow()).unwrap();

    let cancellation = CancellationToken::new();
    let result = orchestrator
        .execute_workflow(&WorkflowId::new("slow-sequential"), Map::new(), &cancellation)
        .unwrap();

    assert_eq!(result.status, WorkflowStatus::Success);
    assert_eq!(result.results_by_step.len(), 4);
}
