// cogitate-orchestrator/src/engine.rs
// ============================================================================
// Module: Orchestrator Engine
// Description: Registers workflows, manages ReasoningContexts, and dispatches
//              ExecuteWorkflow by execution discipline.
// Purpose: The single entry point cogitate-mcp drives to run a workflow.
// Dependencies: cogitate-core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! One [`RwLock`] guards the registered-workflow table and one guards the
//! context table, mirroring [`cogitate_core::InMemoryThoughtStore`]'s
//! single-lock-per-collection discipline. `ExecuteWorkflow` itself never
//! holds either lock for the duration of a run: it reads the workflow once
//! at the start, then works against its own owned copy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::time::Instant;

use cogitate_core::ContextId;
use cogitate_core::IdGenerator;
use cogitate_core::ThoughtId;
use cogitate_core::Timestamp;
use cogitate_core::WorkflowId;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::condition;
use crate::context::ReasoningContext;
use crate::dag;
use crate::progress::NoopProgressReporter;
use crate::progress::ProgressEvent;
use crate::progress::ProgressReporter;
use crate::result::WorkflowResult;
use crate::result::WorkflowStatus;
use crate::template;
use crate::tool_executor::CancellationToken;
use crate::tool_executor::ToolExecutionError;
use crate::tool_executor::ToolExecutor;
use crate::workflow::ExecutionDiscipline;
use crate::workflow::Workflow;
use crate::workflow::WorkflowDefinitionError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by orchestrator operations.
#[derive(Debug, Clone, Error)]
pub enum OrchestratorError {
    /// No workflow is registered under the requested identifier.
    #[error("workflow not found: {0}")]
    WorkflowNotFound(WorkflowId),
    /// `RegisterWorkflow` was called twice with the same identifier.
    #[error("workflow already exists: {0}")]
    WorkflowAlreadyExists(WorkflowId),
    /// No reasoning context is registered under the requested identifier.
    #[error("context not found: {0}")]
    ContextNotFound(ContextId),
    /// The workflow's `depends_on` relation failed validation.
    #[error("invalid workflow: {0}")]
    InvalidWorkflow(#[from] WorkflowDefinitionError),
    /// `ExecuteWorkflow` was called with no `ToolExecutor` configured.
    #[error("no tool executor configured")]
    MissingToolExecutor,
    /// An internal lock was poisoned by a panicking holder.
    #[error("{0} lock poisoned")]
    LockPoisoned(String),
}

/// Builds an [`OrchestratorError::LockPoisoned`] for a poisoned lock on `what`.
fn poisoned(what: &str) -> OrchestratorError {
    OrchestratorError::LockPoisoned(what.to_string())
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Registers workflows, manages reasoning contexts, and runs workflows
/// against an injected [`ToolExecutor`].
pub struct Orchestrator {
    workflows: RwLock<BTreeMap<String, Workflow>>,
    contexts: RwLock<BTreeMap<String, ReasoningContext>>,
    tool_executor: RwLock<Option<Arc<dyn ToolExecutor>>>,
    progress: Arc<dyn ProgressReporter>,
    ids: IdGenerator,
}

impl Orchestrator {
    /// Builds an orchestrator with no registered workflows or contexts.
    ///
    /// `tool_executor` is optional at construction so a caller can register
    /// workflows before the server's tool registry is ready; `ExecuteWorkflow`
    /// fails with [`OrchestratorError::MissingToolExecutor`] until one is
    /// supplied, either at construction or later via [`Self::set_tool_executor`].
    /// The setter exists because the executor is typically a tool registry
    /// that itself dispatches `execute-workflow` back into this orchestrator:
    /// the server builds the orchestrator first, then the registry, then
    /// wires the registry back in, rather than trying to construct both at
    /// once.
    #[must_use]
    pub fn new(tool_executor: Option<Arc<dyn ToolExecutor>>) -> Self {
        Self {
            workflows: RwLock::new(BTreeMap::new()),
            contexts: RwLock::new(BTreeMap::new()),
            tool_executor: RwLock::new(tool_executor),
            progress: Arc::new(NoopProgressReporter),
            ids: IdGenerator::new(),
        }
    }

    /// Attaches a progress reporter, replacing the default no-op one.
    #[must_use]
    pub fn with_progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress = reporter;
        self
    }

    /// Supplies (or replaces) the tool executor after construction.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::LockPoisoned`] if the executor slot's
    /// lock was poisoned by a panicking holder.
    pub fn set_tool_executor(&self, tool_executor: Arc<dyn ToolExecutor>) -> Result<(), OrchestratorError> {
        let mut slot = self.tool_executor.write().map_err(|_| poisoned("tool executor"))?;
        *slot = Some(tool_executor);
        Ok(())
    }

    /// Registers `workflow`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::InvalidWorkflow`] if its `depends_on`
    /// relation is not a DAG, or [`OrchestratorError::WorkflowAlreadyExists`]
    /// if its identifier is already registered.
    pub fn register_workflow(&self, workflow: Workflow) -> Result<(), OrchestratorError> {
        workflow.validate_dag()?;
        let mut workflows = self.workflows.write().map_err(|_| poisoned("workflow table"))?;
        let key = workflow.id.as_str().to_string();
        if workflows.contains_key(&key) {
            return Err(OrchestratorError::WorkflowAlreadyExists(workflow.id));
        }
        workflows.insert(key, workflow);
        Ok(())
    }

    /// Fetches a deep copy of the registered workflow `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::WorkflowNotFound`] if `id` is unregistered.
    pub fn get_workflow(&self, id: &WorkflowId) -> Result<Workflow, OrchestratorError> {
        let workflows = self.workflows.read().map_err(|_| poisoned("workflow table"))?;
        workflows.get(id.as_str()).cloned().ok_or_else(|| OrchestratorError::WorkflowNotFound(id.clone()))
    }

    /// Lists every registered workflow, in identifier order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the workflow table's lock is poisoned.
    pub fn list_workflows(&self) -> Result<Vec<Workflow>, OrchestratorError> {
        let workflows = self.workflows.read().map_err(|_| poisoned("workflow table"))?;
        Ok(workflows.values().cloned().collect())
    }

    /// Creates a fresh [`ReasoningContext`] for `workflow_id`, not tied to
    /// any particular execution.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::WorkflowNotFound`] if `workflow_id` is
    /// unregistered.
    pub fn create_context(&self, workflow_id: WorkflowId, problem: String) -> Result<ContextId, OrchestratorError> {
        self.get_workflow(&workflow_id)?;
        let id = ContextId::new(self.ids.next("ctx"));
        let context = ReasoningContext::new(id.clone(), workflow_id, problem, Timestamp::now());
        let mut contexts = self.contexts.write().map_err(|_| poisoned("context table"))?;
        contexts.insert(id.as_str().to_string(), context);
        Ok(id)
    }

    /// Fetches a deep copy of the reasoning context `id`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::ContextNotFound`] if `id` is unknown.
    pub fn get_context(&self, id: &ContextId) -> Result<ReasoningContext, OrchestratorError> {
        let contexts = self.contexts.read().map_err(|_| poisoned("context table"))?;
        contexts.get(id.as_str()).cloned().ok_or_else(|| OrchestratorError::ContextNotFound(id.clone()))
    }

    /// Overwrites the stored reasoning context sharing `context.id`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::ContextNotFound`] if no context is
    /// already registered under that identifier.
    pub fn update_context(&self, context: ReasoningContext) -> Result<(), OrchestratorError> {
        let mut contexts = self.contexts.write().map_err(|_| poisoned("context table"))?;
        let key = context.id.as_str().to_string();
        if !contexts.contains_key(&key) {
            return Err(OrchestratorError::ContextNotFound(context.id));
        }
        contexts.insert(key, context);
        Ok(())
    }

    /// Runs `workflow_id` to completion against `input`.
    ///
    /// A fresh [`ReasoningContext`] is created, seeded from `input["problem"]`,
    /// and retained afterward (retrievable via [`Self::get_context`]). Step
    /// failures are reported inside the returned [`WorkflowResult`] rather
    /// than as the `Err` variant; only workflow-lookup and configuration
    /// failures surface there.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::WorkflowNotFound`] if `workflow_id` is
    /// unregistered, or [`OrchestratorError::MissingToolExecutor`] if no
    /// executor was supplied at construction.
    pub fn execute_workflow(
        &self,
        workflow_id: &WorkflowId,
        input: Map<String, Value>,
        cancellation: &CancellationToken,
    ) -> Result<WorkflowResult, OrchestratorError> {
        let workflow = self.get_workflow(workflow_id)?;
        let tool_executor = self
            .tool_executor
            .read()
            .map_err(|_| poisoned("tool executor"))?
            .clone()
            .ok_or(OrchestratorError::MissingToolExecutor)?;

        let problem = input.get("problem").and_then(Value::as_str).unwrap_or_default().to_string();
        let context_id = ContextId::new(self.ids.next("ctx"));
        let context = ReasoningContext::new(context_id, workflow.id.clone(), problem, Timestamp::now());

        self.progress.report(ProgressEvent::WorkflowStarted { workflow_id: workflow.id.to_string() });
        let start = Instant::now();

        let (mut context, outcome) = match workflow.discipline {
            ExecutionDiscipline::Sequential => execute_sequential(
                &workflow,
                &input,
                context,
                tool_executor.as_ref(),
                cancellation,
                self.progress.as_ref(),
            ),
            ExecutionDiscipline::Conditional => execute_conditional(
                &workflow,
                &input,
                context,
                tool_executor.as_ref(),
                cancellation,
                self.progress.as_ref(),
            ),
            ExecutionDiscipline::Parallel => {
                execute_parallel(&workflow, &input, context, tool_executor.as_ref(), cancellation, self.progress.as_ref())
            }
        };
        let elapsed = start.elapsed();
        self.progress.report(ProgressEvent::WorkflowFinished { workflow_id: workflow.id.to_string() });

        let mut results_by_step = BTreeMap::new();
        for step in &workflow.steps {
            let key = step.store_as.clone().unwrap_or_else(|| step.id.to_string());
            if let Some(value) = context.results.get(&key) {
                results_by_step.insert(step.id.to_string(), value.clone());
            }
        }

        context.updated_at = Timestamp::now();
        {
            let mut contexts = self.contexts.write().map_err(|_| poisoned("context table"))?;
            contexts.insert(context.id.as_str().to_string(), context.clone());
        }

        let status = if outcome.is_ok() { WorkflowStatus::Success } else { WorkflowStatus::Failed };
        Ok(WorkflowResult {
            workflow_id: workflow.id,
            status,
            results_by_step,
            context,
            elapsed,
            error: outcome.err(),
        })
    }
}

// ============================================================================
// SECTION: Step Execution
// ============================================================================

/// Builds a step's tool input: the workflow input overlaid with the step's
/// own (template-resolved) input map.
fn assemble_input(
    step: &crate::workflow::WorkflowStep,
    workflow_input: &Map<String, Value>,
    context: &ReasoningContext,
) -> Map<String, Value> {
    let mut tool_input = workflow_input.clone();
    for (key, value) in template::resolve_input(&step.input, context, workflow_input) {
        tool_input.insert(key, value);
    }
    tool_input
}

/// Folds a step's (possibly transformed) result into the reasoning context:
/// stores it under `store_as` (or the step id), accumulates known
/// provenance lists, and folds a confidence-shaped scalar into the running
/// aggregate.
fn integrate_result(step: &crate::workflow::WorkflowStep, result: &Value, context: &mut ReasoningContext) {
    let now = Timestamp::now();
    let key = step.store_as.clone().unwrap_or_else(|| step.id.to_string());
    context.store_result(key, result.clone(), now);
    accumulate_provenance(step, result, context);
    if let Some(confidence) = extract_confidence(result) {
        context.update_confidence(confidence, now);
    }
}

/// Appends a known tool's identifying output to its matching
/// `ReasoningContext` accumulator list.
fn accumulate_provenance(step: &crate::workflow::WorkflowStep, result: &Value, context: &mut ReasoningContext) {
    let Some(obj) = result.as_object() else {
        return;
    };
    match step.tool.as_str() {
        "think" => {
            if let Some(id) = obj.get("thought_id").and_then(Value::as_str) {
                context.thoughts.push(ThoughtId::new(id));
            }
        }
        "build-causal-graph" => push_id(obj, "causal_graphs", &mut context.causal_graphs),
        "probabilistic-reasoning" => push_id(obj, "beliefs", &mut context.beliefs),
        "assess-evidence" => push_id(obj, "evidence", &mut context.evidence),
        "make-decision" => push_id(obj, "decisions", &mut context.decisions),
        _ => {}
    }
}

/// Appends `obj["id"]` to `target` if present and a string; `label` exists
/// only to make call sites self-describing.
fn push_id(obj: &Map<String, Value>, label: &str, target: &mut Vec<String>) {
    let _ = label;
    if let Some(id) = obj.get("id").and_then(Value::as_str) {
        target.push(id.to_string());
    }
}

/// Reads a `confidence`, `probability`, or `score` scalar from a tool result,
/// in that preference order.
fn extract_confidence(result: &Value) -> Option<f64> {
    let obj = result.as_object()?;
    ["confidence", "probability", "score"].into_iter().find_map(|key| obj.get(key).and_then(Value::as_f64))
}

/// Runs one step against an exclusively-held context, as used by the
/// sequential and conditional dispatchers.
///
/// Returns `Ok(())` on success or a deliberate skip; `Err` carries the
/// step-id-wrapped failure message.
fn run_step_owned(
    step: &crate::workflow::WorkflowStep,
    workflow_input: &Map<String, Value>,
    context: &mut ReasoningContext,
    tool_executor: &dyn ToolExecutor,
    cancellation: &CancellationToken,
    progress: &dyn ProgressReporter,
) -> Result<(), String> {
    if cancellation.is_cancelled() {
        return Err("execution cancelled".to_string());
    }
    if let Some(cond) = &step.condition {
        if !condition::evaluate(cond, context) {
            progress.report(ProgressEvent::StepSkipped { step_id: step.id.to_string() });
            return Ok(());
        }
    }
    progress.report(ProgressEvent::StepStarted { step_id: step.id.to_string() });
    let tool_input = assemble_input(step, workflow_input, context);
    let raw = tool_executor.execute_tool(&step.tool, &tool_input).map_err(|error| {
        let message = format!("step {} failed: {error}", step.id);
        progress.report(ProgressEvent::StepFinished { step_id: step.id.to_string(), error: Some(message.clone()) });
        message
    })?;
    let transformed = step.output_transform.as_ref().map_or_else(|| raw.clone(), |t| t.apply(&raw));
    integrate_result(step, &transformed, context);
    progress.report(ProgressEvent::StepFinished { step_id: step.id.to_string(), error: None });
    Ok(())
}

/// Runs one step against a shared, mutex-guarded context, as used by the
/// parallel dispatcher. The lock is held across condition evaluation and
/// template resolution, and again across result integration, but released
/// for the external tool call itself.
fn run_step_locked(
    step: &crate::workflow::WorkflowStep,
    workflow_input: &Map<String, Value>,
    context: &Mutex<ReasoningContext>,
    tool_executor: &dyn ToolExecutor,
    cancellation: &CancellationToken,
    progress: &dyn ProgressReporter,
) -> Result<(), String> {
    if cancellation.is_cancelled() {
        return Err("execution cancelled".to_string());
    }
    let tool_input = {
        let guard = context.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cond) = &step.condition {
            if !condition::evaluate(cond, &guard) {
                drop(guard);
                progress.report(ProgressEvent::StepSkipped { step_id: step.id.to_string() });
                return Ok(());
            }
        }
        assemble_input(step, workflow_input, &guard)
    };
    progress.report(ProgressEvent::StepStarted { step_id: step.id.to_string() });
    let raw = tool_executor.execute_tool(&step.tool, &tool_input).map_err(|error| {
        let message = format!("step {} failed: {error}", step.id);
        progress.report(ProgressEvent::StepFinished { step_id: step.id.to_string(), error: Some(message.clone()) });
        message
    })?;
    let transformed = step.output_transform.as_ref().map_or_else(|| raw.clone(), |t| t.apply(&raw));
    {
        let mut guard = context.lock().unwrap_or_else(PoisonError::into_inner);
        integrate_result(step, &transformed, &mut guard);
    }
    progress.report(ProgressEvent::StepFinished { step_id: step.id.to_string(), error: None });
    Ok(())
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

/// Runs `workflow`'s steps in declared order, stopping at the first failure.
fn execute_sequential(
    workflow: &Workflow,
    workflow_input: &Map<String, Value>,
    mut context: ReasoningContext,
    tool_executor: &dyn ToolExecutor,
    cancellation: &CancellationToken,
    progress: &dyn ProgressReporter,
) -> (ReasoningContext, Result<(), String>) {
    for step in &workflow.steps {
        if let Err(message) = run_step_owned(step, workflow_input, &mut context, tool_executor, cancellation, progress)
        {
            return (context, Err(message));
        }
    }
    (context, Ok(()))
}

/// Runs `workflow`'s steps in topological passes over `depends_on`, stopping
/// at the first failure. Scheduling depends only on the declared DAG shape;
/// whether a prerequisite actually ran or was itself skipped does not affect
/// which pass a step lands in.
fn execute_conditional(
    workflow: &Workflow,
    workflow_input: &Map<String, Value>,
    mut context: ReasoningContext,
    tool_executor: &dyn ToolExecutor,
    cancellation: &CancellationToken,
    progress: &dyn ProgressReporter,
) -> (ReasoningContext, Result<(), String>) {
    let passes = match dag::topological_passes(&workflow.steps) {
        Ok(passes) => passes,
        Err(_) => return (context, Err("deadlock: workflow steps contain an unresolved cycle".to_string())),
    };
    for pass in passes {
        for step in pass {
            if let Err(message) =
                run_step_owned(step, workflow_input, &mut context, tool_executor, cancellation, progress)
            {
                return (context, Err(message));
            }
        }
    }
    (context, Ok(()))
}

/// Launches every step concurrently under `std::thread::scope`, awaiting
/// every worker before returning the first observed failure, if any.
fn execute_parallel(
    workflow: &Workflow,
    workflow_input: &Map<String, Value>,
    context: ReasoningContext,
    tool_executor: &dyn ToolExecutor,
    cancellation: &CancellationToken,
    progress: &dyn ProgressReporter,
) -> (ReasoningContext, Result<(), String>) {
    let context_lock = Mutex::new(context);
    let first_error: Mutex<Option<String>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for step in &workflow.steps {
            scope.spawn(|| {
                if let Err(message) =
                    run_step_locked(step, workflow_input, &context_lock, tool_executor, cancellation, progress)
                {
                    let mut guard = first_error.lock().unwrap_or_else(PoisonError::into_inner);
                    if guard.is_none() {
                        *guard = Some(message);
                    }
                }
            });
        }
    });

    let context = context_lock.into_inner().unwrap_or_else(PoisonError::into_inner);
    let error = first_error.into_inner().unwrap_or_else(PoisonError::into_inner);
    (context, error.map_or(Ok(()), Err))
}

#[cfg(test)]
mod tests {
    use super::Orchestrator;
    use super::OrchestratorError;
    use crate::result::WorkflowStatus;
    use crate::tool_executor::CancellationToken;
    use crate::tool_executor::ToolExecutionError;
    use crate::tool_executor::ToolExecutor;
    use crate::workflow::ExecutionDiscipline;
    use crate::workflow::Workflow;
    use crate::workflow::WorkflowStep;
    use cogitate_core::StepId;
    use cogitate_core::Timestamp;
    use cogitate_core::WorkflowId;
    use serde_json::json;
    use serde_json::Map;
    use serde_json::Value;
    use std::sync::Arc;

    struct EchoTool;

    impl ToolExecutor for EchoTool {
        fn execute_tool(&self, tool: &str, input: &Map<String, Value>) -> Result<Value, ToolExecutionError> {
            Ok(json!({"tool": tool, "echo": Value::Object(input.clone())}))
        }
    }

    struct FailingTool;

    impl ToolExecutor for FailingTool {
        fn execute_tool(&self, tool: &str, _input: &Map<String, Value>) -> Result<Value, ToolExecutionError> {
            Err(ToolExecutionError::Failed { tool: tool.to_string(), message: "boom".to_string() })
        }
    }

    fn step(id: &str, tool: &str, depends_on: &[&str], store_as: Option<&str>) -> WorkflowStep {
        WorkflowStep {
            id: StepId::new(id),
            tool: tool.to_string(),
            input: Map::new(),
            depends_on: depends_on.iter().map(|s| StepId::new(*s)).collect(),
            condition: None,
            output_transform: None,
            store_as: store_as.map(ToString::to_string),
        }
    }

    fn workflow(id: &str, discipline: ExecutionDiscipline, steps: Vec<WorkflowStep>) -> Workflow {
        Workflow {
            id: WorkflowId::new(id),
            name: id.to_string(),
            description: String::new(),
            discipline,
            steps,
            created_at: Timestamp::from_millis(0),
        }
    }

    #[test]
    fn registering_the_same_workflow_twice_fails_the_second_call() {
        let orchestrator = Orchestrator::new(Some(Arc::new(EchoTool)));
        let w = workflow("w1", ExecutionDiscipline::Sequential, vec![step("a", "think", &[], None)]);
        orchestrator.register_workflow(w.clone()).expect("first registration succeeds");
        assert!(matches!(
            orchestrator.register_workflow(w),
            Err(OrchestratorError::WorkflowAlreadyExists(_))
        ));
        assert!(orchestrator.get_workflow(&WorkflowId::new("w1")).is_ok());
    }

    #[test]
    fn sequential_steps_observe_prior_results() {
        let orchestrator = Orchestrator::new(Some(Arc::new(EchoTool)));
        let w = workflow(
            "seq",
            ExecutionDiscipline::Sequential,
            vec![
                step("first", "think", &[], Some("first_result")),
                step("second", "think", &["first"], Some("second_result")),
            ],
        );
        orchestrator.register_workflow(w).expect("registers");
        let result = orchestrator
            .execute_workflow(&WorkflowId::new("seq"), Map::new(), &CancellationToken::new())
            .expect("executes");
        assert_eq!(result.status, WorkflowStatus::Success);
        assert!(result.context.results.contains_key("first_result"));
        assert!(result.context.results.contains_key("second_result"));
    }

    #[test]
    fn parallel_steps_all_store_their_results() {
        let orchestrator = Orchestrator::new(Some(Arc::new(EchoTool)));
        let w = workflow(
            "par",
            ExecutionDiscipline::Parallel,
            vec![
                step("a", "analyze-perspectives", &[], Some("perspectives")),
                step("b", "sensitivity-analysis", &[], Some("sensitivity")),
                step("c", "make-decision", &["a", "b"], Some("decision")),
            ],
        );
        orchestrator.register_workflow(w).expect("registers");
        let result = orchestrator
            .execute_workflow(&WorkflowId::new("par"), Map::new(), &CancellationToken::new())
            .expect("executes");
        assert_eq!(result.status, WorkflowStatus::Success);
        for name in ["perspectives", "sensitivity", "decision"] {
            assert!(result.context.results.contains_key(name), "missing {name}");
        }
    }

    #[test]
    fn a_failing_step_produces_a_failed_result_not_an_error() {
        let orchestrator = Orchestrator::new(Some(Arc::new(FailingTool)));
        let w = workflow("fail", ExecutionDiscipline::Sequential, vec![step("a", "think", &[], None)]);
        orchestrator.register_workflow(w).expect("registers");
        let result = orchestrator
            .execute_workflow(&WorkflowId::new("fail"), Map::new(), &CancellationToken::new())
            .expect("execute_workflow itself does not error on a step failure");
        assert_eq!(result.status, WorkflowStatus::Failed);
        assert!(result.error.is_some());
    }

    #[test]
    fn executing_an_unregistered_workflow_is_an_error() {
        let orchestrator = Orchestrator::new(Some(Arc::new(EchoTool)));
        let outcome = orchestrator.execute_workflow(&WorkflowId::new("missing"), Map::new(), &CancellationToken::new());
        assert!(matches!(outcome, Err(OrchestratorError::WorkflowNotFound(_))));
    }

    #[test]
    fn executing_without_a_tool_executor_is_a_configuration_error() {
        let orchestrator = Orchestrator::new(None);
        let w = workflow("w", ExecutionDiscipline::Sequential, vec![step("a", "think", &[], None)]);
        orchestrator.register_workflow(w).expect("registers");
        let outcome = orchestrator.execute_workflow(&WorkflowId::new("w"), Map::new(), &CancellationToken::new());
        assert!(matches!(outcome, Err(OrchestratorError::MissingToolExecutor)));
    }

    #[test]
    fn a_dependency_cycle_in_a_conditional_workflow_is_rejected_at_registration() {
        let orchestrator = Orchestrator::new(Some(Arc::new(EchoTool)));
        let w = workflow(
            "cyclic",
            ExecutionDiscipline::Conditional,
            vec![step("a", "think", &["b"], None), step("b", "think", &["a"], None)],
        );
        assert!(orchestrator.register_workflow(w).is_err());
        assert!(orchestrator.get_workflow(&WorkflowId::new("cyclic")).is_err());
    }
}
