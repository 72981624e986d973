// cogitate-mcp/src/tools.rs
// ============================================================================
// Module: MCP Tool Router
// Description: Tool catalog and dispatch table for the cognitive-reasoning
//              server.
// Purpose: Route both direct client tool calls and orchestrator-driven
//          workflow steps through one handler per tool.
// Dependencies: cogitate-core, cogitate-logic, cogitate-calibration,
//               cogitate-orchestrator
// ============================================================================

//! ## Overview
//! [`ToolRouter`] is the one piece of this crate every other module feeds
//! into: it owns the [`SharedThoughtStore`], the [`CalibrationTracker`], and
//! the [`Orchestrator`], and exposes every tool this server publishes as a
//! thin wrapper over those three. The same [`ToolRouter::handle_tool_call`]
//! path backs [`crate::transport`]'s direct `tools/call` handling and,
//! through its [`ToolExecutor`] impl, every workflow step the orchestrator
//! dispatches — the parity the spec calls for.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use cogitate_calibration::CalibrationTracker;
use cogitate_calibration::Outcome;
use cogitate_calibration::OutcomeSource;
use cogitate_calibration::Prediction;
use cogitate_core::BranchId;
use cogitate_core::IdGenerator;
use cogitate_core::SearchQuery;
use cogitate_core::SharedThoughtStore;
use cogitate_core::ThinkingMode;
use cogitate_core::Thought;
use cogitate_core::ThoughtId;
use cogitate_core::ThoughtStore;
use cogitate_core::Timestamp;
use cogitate_core::ToolError;
use cogitate_core::Validation;
use cogitate_core::ValidationId;
use cogitate_logic::detect_fallacies;
use cogitate_logic::check_well_formed;
use cogitate_logic::prove;
use cogitate_logic::validate_thought;
use cogitate_orchestrator::CancellationToken;
use cogitate_orchestrator::Orchestrator;
use cogitate_orchestrator::ToolExecutionError;
use cogitate_orchestrator::ToolExecutor;
use cogitate_orchestrator::WorkflowId;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::error;

// ============================================================================
// SECTION: Tool Definition
// ============================================================================

/// One entry in the catalog returned by a `tools/list` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Wire name of the tool.
    pub name: String,
    /// Human-readable description shown to the host.
    pub description: String,
    /// A minimal JSON Schema describing expected input shape.
    pub input_schema: Value,
}

impl ToolDefinition {
    fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self { name: name.to_string(), description: description.to_string(), input_schema }
    }
}

/// Returns the full catalog of tools this server exposes, in a fixed order.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "think",
            "Records a thought under a thinking discipline, optionally attached to a branch.",
            json!({"type": "object", "required": ["content"], "properties": {
                "content": {"type": "string"},
                "mode": {"type": "string", "enum": ["linear", "tree", "divergent", "auto"]},
                "confidence": {"type": "number"},
                "branch_id": {"type": "string"},
                "parent_id": {"type": "string"},
                "key_points": {"type": "array", "items": {"type": "string"}}
            }}),
        ),
        ToolDefinition::new(
            "validate",
            "Validates a previously recorded thought for contradictions and inline fallacies.",
            json!({"type": "object", "required": ["thought_id"], "properties": {"thought_id": {"type": "string"}}}),
        ),
        ToolDefinition::new(
            "build-causal-graph",
            "Builds a simple chained causal graph from an ordered list of factors.",
            json!({"type": "object", "required": ["factors"], "properties": {
                "factors": {"type": "array", "items": {"type": "string"}, "minItems": 2}
            }}),
        ),
        ToolDefinition::new(
            "detect-biases",
            "Scans text for formal and informal fallacy patterns.",
            json!({"type": "object", "required": ["content"], "properties": {
                "content": {"type": "string"},
                "check_formal": {"type": "boolean"},
                "check_informal": {"type": "boolean"}
            }}),
        ),
        ToolDefinition::new(
            "check-syntax",
            "Checks each statement for structural well-formedness.",
            json!({"type": "object", "required": ["statements"], "properties": {
                "statements": {"type": "array", "items": {"type": "string"}}
            }}),
        ),
        ToolDefinition::new(
            "prove",
            "Attempts to derive a conclusion from premises using a fixed inference-rule priority.",
            json!({"type": "object", "required": ["premises", "conclusion"], "properties": {
                "premises": {"type": "array", "items": {"type": "string"}},
                "conclusion": {"type": "string"}
            }}),
        ),
        ToolDefinition::new(
            "analyze-perspectives",
            "Assigns each named stakeholder perspective a weight in a decision.",
            json!({"type": "object", "required": ["perspectives"], "properties": {
                "perspectives": {"type": "array", "items": {"type": "string"}, "minItems": 1},
                "problem": {"type": "string"}
            }}),
        ),
        ToolDefinition::new(
            "sensitivity-analysis",
            "Ranks named variables by the magnitude of their effect on an outcome.",
            json!({"type": "object", "required": ["variables"], "properties": {
                "variables": {"type": "object", "additionalProperties": {"type": "number"}}
            }}),
        ),
        ToolDefinition::new(
            "make-decision",
            "Selects an option from a set, optionally weighted, and reports a confidence.",
            json!({"type": "object", "required": ["options"], "properties": {
                "options": {"type": "array", "items": {"type": "string"}, "minItems": 1},
                "weights": {"type": "object", "additionalProperties": {"type": "number"}}
            }}),
        ),
        ToolDefinition::new(
            "get-thought",
            "Fetches a previously recorded thought by identifier.",
            json!({"type": "object", "required": ["thought_id"], "properties": {"thought_id": {"type": "string"}}}),
        ),
        ToolDefinition::new(
            "search-thoughts",
            "Searches recorded thoughts by a case-insensitive content substring.",
            json!({"type": "object", "properties": {
                "query": {"type": "string"},
                "mode": {"type": "string"},
                "limit": {"type": "integer"},
                "offset": {"type": "integer"}
            }}),
        ),
        ToolDefinition::new(
            "record-prediction",
            "Records a stated confidence for a thought, for later calibration scoring.",
            json!({"type": "object", "required": ["thought_id", "confidence", "mode"], "properties": {
                "thought_id": {"type": "string"},
                "confidence": {"type": "number"},
                "mode": {"type": "string"}
            }}),
        ),
        ToolDefinition::new(
            "record-outcome",
            "Records the observed outcome for a thought with an existing prediction.",
            json!({"type": "object", "required": ["thought_id", "was_correct", "actual_confidence", "source"], "properties": {
                "thought_id": {"type": "string"},
                "was_correct": {"type": "boolean"},
                "actual_confidence": {"type": "number"},
                "source": {"type": "string", "enum": ["validation", "verification", "user_feedback"]}
            }}),
        ),
        ToolDefinition::new(
            "get-calibration-report",
            "Returns the bucketed ECE/bias calibration report over every joined prediction.",
            json!({"type": "object", "properties": {}}),
        ),
        ToolDefinition::new(
            "register-workflow",
            "Registers a reusable declarative workflow.",
            json!({"type": "object", "required": ["id", "name", "discipline", "steps"], "properties": {
                "id": {"type": "string"},
                "name": {"type": "string"},
                "description": {"type": "string"},
                "discipline": {"type": "string", "enum": ["sequential", "parallel", "conditional"]},
                "steps": {"type": "array"}
            }}),
        ),
        ToolDefinition::new(
            "execute-workflow",
            "Runs a registered workflow to completion against an input map.",
            json!({"type": "object", "required": ["workflow_id"], "properties": {"workflow_id": {"type": "string"}}}),
        ),
        ToolDefinition::new(
            "get-workflow",
            "Fetches a registered workflow's definition.",
            json!({"type": "object", "required": ["workflow_id"], "properties": {"workflow_id": {"type": "string"}}}),
        ),
        ToolDefinition::new(
            "list-workflows",
            "Lists every registered workflow.",
            json!({"type": "object", "properties": {}}),
        ),
    ]
}

// ============================================================================
// SECTION: Input Extraction Helpers
// ============================================================================

fn require_str<'a>(input: &'a Map<String, Value>, field: &str) -> Result<&'a str, ToolError> {
    input.get(field).and_then(Value::as_str).ok_or_else(|| error::missing_required(field))
}

fn optional_str<'a>(input: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    input.get(field).and_then(Value::as_str)
}

fn optional_f64(input: &Map<String, Value>, field: &str, default: f64) -> f64 {
    input.get(field).and_then(Value::as_f64).unwrap_or(default)
}

fn optional_usize(input: &Map<String, Value>, field: &str, default: usize) -> usize {
    input.get(field).and_then(Value::as_u64).map_or(default, |v| usize::try_from(v).unwrap_or(default))
}

fn require_str_array(input: &Map<String, Value>, field: &str) -> Result<Vec<String>, ToolError> {
    let array = input
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| error::missing_required(field))?;
    array
        .iter()
        .map(|item| {
            item.as_str()
                .map(ToString::to_string)
                .ok_or_else(|| error::invalid_parameter(field, "every entry must be a string"))
        })
        .collect()
}

fn require_number_map(input: &Map<String, Value>, field: &str) -> Result<Vec<(String, f64)>, ToolError> {
    let object = input
        .get(field)
        .and_then(Value::as_object)
        .ok_or_else(|| error::missing_required(field))?;
    object
        .iter()
        .map(|(key, value)| {
            value
                .as_f64()
                .map(|v| (key.clone(), v))
                .ok_or_else(|| error::invalid_parameter(field, "every value must be a number"))
        })
        .collect()
}

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Owns the store, calibration tracker, and orchestrator, and dispatches
/// every tool call against them.
pub struct ToolRouter {
    store: SharedThoughtStore,
    calibration: Arc<CalibrationTracker>,
    orchestrator: Arc<Orchestrator>,
    ids: IdGenerator,
}

impl ToolRouter {
    /// Builds a router over the given backends.
    #[must_use]
    pub fn new(
        store: SharedThoughtStore,
        calibration: Arc<CalibrationTracker>,
        orchestrator: Arc<Orchestrator>,
    ) -> Self {
        Self { store, calibration, orchestrator, ids: IdGenerator::new() }
    }

    /// Returns the tool catalog.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Dispatches one named tool call with an already-decoded JSON object
    /// input, returning its raw JSON result.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] if the tool is unknown, its input is
    /// malformed, or the underlying operation fails.
    pub fn handle_tool_call(&self, name: &str, input: &Map<String, Value>) -> Result<Value, ToolError> {
        match name {
            "think" => self.think(input),
            "validate" => self.validate(input),
            "build-causal-graph" => self.build_causal_graph(input),
            "detect-biases" => self.detect_biases(input),
            "check-syntax" => self.check_syntax(input),
            "prove" => self.prove(input),
            "analyze-perspectives" => self.analyze_perspectives(input),
            "sensitivity-analysis" => self.sensitivity_analysis(input),
            "make-decision" => self.make_decision(input),
            "get-thought" => self.get_thought(input),
            "search-thoughts" => self.search_thoughts(input),
            "record-prediction" => self.record_prediction(input),
            "record-outcome" => self.record_outcome(input),
            "get-calibration-report" => self.get_calibration_report(),
            "register-workflow" => self.register_workflow(input),
            "execute-workflow" => self.execute_workflow(input),
            "get-workflow" => self.get_workflow(input),
            "list-workflows" => self.list_workflows(),
            other => Err(ToolError::new(cogitate_core::ErrorCode::NotFound, format!("unknown tool: {other}"))),
        }
    }

    // ------------------------------------------------------------------
    // Domain / reasoning tools
    // ------------------------------------------------------------------

    fn think(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let content = require_str(input, "content")?;
        let mode = parse_mode(optional_str(input, "mode").unwrap_or("auto"))?;
        let confidence = optional_f64(input, "confidence", 0.5);
        let branch_id = optional_str(input, "branch_id").map(BranchId::new);
        let parent_id = optional_str(input, "parent_id").map(ThoughtId::new);
        let key_points = input
            .get("key_points")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(ToString::to_string).collect())
            .unwrap_or_default();

        let now = Timestamp::now();
        let id = ThoughtId::new(self.ids.next("thought"));
        let thought = Thought::new(id.clone(), content, mode, confidence, branch_id.clone(), parent_id, key_points, now)
            .map_err(|err| error::from_thought_error(&err))?;
        self.store.store_thought(thought).map_err(|err| error::from_store_error(&err))?;
        if let Some(branch_id) = &branch_id {
            self.store
                .append_thought_to_branch(branch_id, id.clone())
                .map_err(|err| error::from_store_error(&err))?;
        }
        Ok(json!({"thought_id": id.as_str(), "mode": mode.as_str(), "confidence": confidence}))
    }

    fn validate(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let thought_id = ThoughtId::new(require_str(input, "thought_id")?);
        let thought = self.store.get_thought(&thought_id).map_err(|err| error::from_store_error(&err))?;
        let outcome = validate_thought(&thought.content);
        let validation = Validation {
            id: ValidationId::new(self.ids.next("validation")),
            thought_id: thought_id.clone(),
            is_valid: outcome.is_valid,
            reason: outcome.reason.clone(),
            confidence: thought.confidence,
            created_at: Timestamp::now(),
        };
        self.store.store_validation(validation).map_err(|err| error::from_store_error(&err))?;
        Ok(json!({"thought_id": thought_id.as_str(), "is_valid": outcome.is_valid, "reason": outcome.reason}))
    }

    /// Builds a simple chained causal graph: each consecutive pair of
    /// factors is linked by a `"contributes_to"` edge. This is a
    /// deterministic placeholder for a full causal-inference engine, which
    /// is out of scope; it gives the orchestrator's `causal-analysis`
    /// workflow a real, structurally meaningful result to consume.
    fn build_causal_graph(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let factors = require_str_array(input, "factors")?;
        if factors.len() < 2 {
            return Err(error::invalid_parameter("factors", "at least two factors are required"));
        }
        let edges: Vec<Value> = factors
            .windows(2)
            .map(|pair| json!({"from": pair[0], "to": pair[1], "relation": "contributes_to"}))
            .collect();
        let id = self.ids.next("causal-graph");
        Ok(json!({"id": id, "nodes": factors, "edges": edges, "confidence": 0.5}))
    }

    fn detect_biases(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let content = require_str(input, "content")?;
        let check_formal = input.get("check_formal").and_then(Value::as_bool).unwrap_or(true);
        let check_informal = input.get("check_informal").and_then(Value::as_bool).unwrap_or(true);
        let fallacies: Vec<_> = detect_fallacies(content)
            .into_iter()
            .filter(|fallacy| match fallacy.category.as_str() {
                "formal" => check_formal,
                "informal" => check_informal,
                _ => true,
            })
            .collect();
        Ok(json!({"fallacies": fallacies}))
    }

    fn check_syntax(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let statements = require_str_array(input, "statements")?;
        let checks = check_well_formed(&statements);
        let is_valid = checks.iter().all(|check| check.is_well_formed);
        Ok(json!({"checks": checks, "is_valid": is_valid}))
    }

    fn prove(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let premises = require_str_array(input, "premises")?;
        let conclusion = require_str(input, "conclusion")?;
        let result = prove(&premises, conclusion);
        Ok(serde_json::to_value(result).unwrap_or(Value::Null))
    }

    /// Weighs each named perspective evenly and reports a confidence that
    /// rises with the number of perspectives actually considered. A
    /// deterministic placeholder for genuine stakeholder-modeling, kept
    /// simple since the spec defines no operation here.
    fn analyze_perspectives(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let perspectives = require_str_array(input, "perspectives")?;
        if perspectives.is_empty() {
            return Err(error::invalid_parameter("perspectives", "at least one perspective is required"));
        }
        #[allow(clippy::cast_precision_loss, reason = "perspective counts are small enough to round-trip")]
        let weight = 1.0 / perspectives.len() as f64;
        let weighted: Vec<Value> =
            perspectives.iter().map(|name| json!({"name": name, "weight": weight})).collect();
        #[allow(clippy::cast_precision_loss, reason = "perspective counts are small enough to round-trip")]
        let confidence = 1.0 - 1.0 / (perspectives.len() as f64 + 1.0);
        let id = self.ids.next("perspectives");
        Ok(json!({"id": id, "perspectives": weighted, "confidence": confidence}))
    }

    /// Ranks variables by the absolute magnitude of their stated effect;
    /// the mean absolute magnitude, clamped to `[0, 1]`, stands in for an
    /// overall sensitivity score. A deterministic placeholder for a real
    /// perturbation-based sensitivity engine.
    fn sensitivity_analysis(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let mut variables = require_number_map(input, "variables")?;
        if variables.is_empty() {
            return Err(error::invalid_parameter("variables", "at least one variable is required"));
        }
        variables.sort_by(|a, b| b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(std::cmp::Ordering::Equal));
        #[allow(clippy::cast_precision_loss, reason = "variable counts are small enough to round-trip")]
        let mean_abs = variables.iter().map(|(_, v)| v.abs()).sum::<f64>() / variables.len() as f64;
        let ranked: Vec<Value> =
            variables.iter().map(|(name, value)| json!({"name": name, "magnitude": value})).collect();
        Ok(json!({
            "ranked": ranked,
            "most_sensitive": variables.first().map(|(name, _)| name.clone()),
            "score": mean_abs.min(1.0),
        }))
    }

    /// Picks the highest-weighted option, or the first option when no
    /// weights are supplied, and reports a confidence proportional to how
    /// dominant the winner is. A deterministic placeholder for a real
    /// multi-criteria decision engine.
    fn make_decision(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let options = require_str_array(input, "options")?;
        if options.is_empty() {
            return Err(error::invalid_parameter("options", "at least one option is required"));
        }
        let weights = input.get("weights").and_then(Value::as_object);
        let (selected, confidence) = match weights {
            Some(weights) if !weights.is_empty() => {
                let total: f64 = weights.values().filter_map(Value::as_f64).sum();
                let best = options
                    .iter()
                    .max_by(|a, b| {
                        let wa = weights.get(*a).and_then(Value::as_f64).unwrap_or(0.0);
                        let wb = weights.get(*b).and_then(Value::as_f64).unwrap_or(0.0);
                        wa.partial_cmp(&wb).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .cloned()
                    .unwrap_or_else(|| options[0].clone());
                let best_weight = weights.get(&best).and_then(Value::as_f64).unwrap_or(0.0);
                let confidence = if total > 0.0 { (best_weight / total).clamp(0.0, 1.0) } else { 0.0 };
                (best, confidence)
            }
            _ => {
                #[allow(clippy::cast_precision_loss, reason = "option counts are small enough to round-trip")]
                let confidence = 1.0 / options.len() as f64;
                (options[0].clone(), confidence)
            }
        };
        let id = self.ids.next("decision");
        Ok(json!({
            "id": id,
            "selected_option": selected,
            "confidence": confidence,
            "rationale": "selected the highest-weighted option, or the first option when unweighted",
        }))
    }

    // ------------------------------------------------------------------
    // Store-exposing tools
    // ------------------------------------------------------------------

    fn get_thought(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let id = ThoughtId::new(require_str(input, "thought_id")?);
        let thought = self.store.get_thought(&id).map_err(|err| error::from_store_error(&err))?;
        Ok(serde_json::to_value(thought).unwrap_or(Value::Null))
    }

    fn search_thoughts(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let mode = optional_str(input, "mode").map(parse_mode).transpose()?;
        let query = SearchQuery {
            query: optional_str(input, "query").unwrap_or_default().to_string(),
            mode,
            limit: optional_usize(input, "limit", 100),
            offset: optional_usize(input, "offset", 0),
        };
        let thoughts = self.store.search_thoughts(&query).map_err(|err| error::from_store_error(&err))?;
        Ok(json!({"thoughts": thoughts}))
    }

    // ------------------------------------------------------------------
    // Calibration-exposing tools
    // ------------------------------------------------------------------

    fn record_prediction(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let thought_id = ThoughtId::new(require_str(input, "thought_id")?);
        let confidence = input
            .get("confidence")
            .and_then(Value::as_f64)
            .ok_or_else(|| error::missing_required("confidence"))?;
        let mode = parse_mode(require_str(input, "mode")?)?;
        let prediction = Prediction { thought_id: thought_id.clone(), confidence, mode, timestamp: Timestamp::now() };
        self.calibration.record_prediction(prediction).map_err(|err| error::from_calibration_error(&err))?;
        Ok(json!({"thought_id": thought_id.as_str()}))
    }

    fn record_outcome(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let thought_id = ThoughtId::new(require_str(input, "thought_id")?);
        let was_correct = input
            .get("was_correct")
            .and_then(Value::as_bool)
            .ok_or_else(|| error::missing_required("was_correct"))?;
        let actual_confidence = input
            .get("actual_confidence")
            .and_then(Value::as_f64)
            .ok_or_else(|| error::missing_required("actual_confidence"))?;
        let source = parse_outcome_source(require_str(input, "source")?)?;
        let outcome = Outcome {
            thought_id: thought_id.clone(),
            was_correct,
            actual_confidence,
            source,
            timestamp: Timestamp::now(),
        };
        self.calibration.record_outcome(outcome).map_err(|err| error::from_calibration_error(&err))?;
        Ok(json!({"thought_id": thought_id.as_str()}))
    }

    fn get_calibration_report(&self) -> Result<Value, ToolError> {
        let report = self.calibration.get_calibration_report().map_err(|err| error::from_calibration_error(&err))?;
        Ok(serde_json::to_value(report).unwrap_or(Value::Null))
    }

    // ------------------------------------------------------------------
    // Orchestrator-exposing tools
    // ------------------------------------------------------------------

    fn register_workflow(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let request: RegisterWorkflowRequest = serde_json::from_value(Value::Object(input.clone()))
            .map_err(|err| error::invalid_parameter("workflow", &err.to_string()))?;
        let workflow = cogitate_orchestrator::Workflow {
            id: WorkflowId::new(request.id),
            name: request.name,
            description: request.description.unwrap_or_default(),
            discipline: request.discipline,
            steps: request.steps,
            created_at: Timestamp::now(),
        };
        let id = workflow.id.clone();
        self.orchestrator.register_workflow(workflow).map_err(|err| error::from_orchestrator_error(&err))?;
        Ok(json!({"workflow_id": id.as_str()}))
    }

    fn execute_workflow(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let workflow_id = WorkflowId::new(require_str(input, "workflow_id")?);
        let mut workflow_input = input.clone();
        workflow_input.remove("workflow_id");
        let result = self
            .orchestrator
            .execute_workflow(&workflow_id, workflow_input, &CancellationToken::new())
            .map_err(|err| error::from_orchestrator_error(&err))?;
        Ok(serde_json::to_value(result).unwrap_or(Value::Null))
    }

    fn get_workflow(&self, input: &Map<String, Value>) -> Result<Value, ToolError> {
        let workflow_id = WorkflowId::new(require_str(input, "workflow_id")?);
        let workflow = self.orchestrator.get_workflow(&workflow_id).map_err(|err| error::from_orchestrator_error(&err))?;
        Ok(serde_json::to_value(workflow).unwrap_or(Value::Null))
    }

    fn list_workflows(&self) -> Result<Value, ToolError> {
        let workflows = self.orchestrator.list_workflows().map_err(|err| error::from_orchestrator_error(&err))?;
        Ok(json!({"workflows": workflows}))
    }
}

impl ToolExecutor for ToolRouter {
    fn execute_tool(&self, tool: &str, input: &Map<String, Value>) -> Result<Value, ToolExecutionError> {
        self.handle_tool_call(tool, input).map_err(|err| ToolExecutionError::Failed {
            tool: tool.to_string(),
            message: err.message,
        })
    }
}

// ============================================================================
// SECTION: Request Shapes
// ============================================================================

/// Decoded `register-workflow` input; `created_at` is always assigned by
/// the router rather than accepted from the caller.
#[derive(Debug, Deserialize)]
struct RegisterWorkflowRequest {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    discipline: cogitate_orchestrator::ExecutionDiscipline,
    steps: Vec<cogitate_orchestrator::WorkflowStep>,
}

// ============================================================================
// SECTION: Enum Parsing
// ============================================================================

fn parse_mode(raw: &str) -> Result<ThinkingMode, ToolError> {
    match raw {
        "linear" => Ok(ThinkingMode::Linear),
        "tree" => Ok(ThinkingMode::Tree),
        "divergent" => Ok(ThinkingMode::Divergent),
        "auto" => Ok(ThinkingMode::Auto),
        other => Err(ToolError::new(
            cogitate_core::ErrorCode::InvalidMode,
            format!("unrecognized thinking mode: {other}"),
        )),
    }
}

fn parse_outcome_source(raw: &str) -> Result<OutcomeSource, ToolError> {
    match raw {
        "validation" => Ok(OutcomeSource::Validation),
        "verification" => Ok(OutcomeSource::Verification),
        "user_feedback" => Ok(OutcomeSource::UserFeedback),
        other => Err(error::invalid_parameter("source", &format!("unrecognized outcome source: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::ToolRouter;
    use cogitate_calibration::CalibrationTracker;
    use cogitate_core::InMemoryThoughtStore;
    use cogitate_core::SharedThoughtStore;
    use cogitate_orchestrator::Orchestrator;
    use serde_json::Map;
    use serde_json::json;
    use std::sync::Arc;

    fn router() -> ToolRouter {
        let store = SharedThoughtStore::from_store(InMemoryThoughtStore::new());
        let calibration = Arc::new(CalibrationTracker::new());
        let orchestrator = Arc::new(Orchestrator::new(None));
        ToolRouter::new(store, calibration, orchestrator)
    }

    fn object(value: serde_json::Value) -> Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn think_stores_a_retrievable_thought() {
        let router = router();
        let result = router.handle_tool_call("think", &object(json!({"content": "hello"}))).unwrap();
        let thought_id = result["thought_id"].as_str().unwrap().to_string();
        let fetched = router.handle_tool_call("get-thought", &object(json!({"thought_id": thought_id}))).unwrap();
        assert_eq!(fetched["content"], "hello");
    }

    #[test]
    fn validate_rejects_a_direct_contradiction() {
        let router = router();
        let result = router
            .handle_tool_call("think", &object(json!({"content": "The claim is true, the claim is false."})))
            .unwrap();
        let thought_id = result["thought_id"].as_str().unwrap().to_string();
        let validated = router.handle_tool_call("validate", &object(json!({"thought_id": thought_id}))).unwrap();
        assert_eq!(validated["is_valid"], false);
    }

    #[test]
    fn build_causal_graph_chains_consecutive_factors() {
        let router = router();
        let result = router
            .handle_tool_call("build-causal-graph", &object(json!({"factors": ["a", "b", "c"]})))
            .unwrap();
        assert_eq!(result["edges"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn make_decision_without_weights_picks_the_first_option() {
        let router = router();
        let result = router.handle_tool_call("make-decision", &object(json!({"options": ["a", "b"]}))).unwrap();
        assert_eq!(result["selected_option"], "a");
    }

    #[test]
    fn make_decision_with_weights_picks_the_highest_weighted_option() {
        let router = router();
        let result = router
            .handle_tool_call(
                "make-decision",
                &object(json!({"options": ["a", "b"], "weights": {"a": 0.2, "b": 0.8}})),
            )
            .unwrap();
        assert_eq!(result["selected_option"], "b");
    }

    #[test]
    fn detect_biases_honors_the_informal_only_filter() {
        let router = router();
        let result = router
            .handle_tool_call(
                "detect-biases",
                &object(json!({"content": "You're wrong because you're a bad person.", "check_formal": false, "check_informal": true})),
            )
            .unwrap();
        let fallacies = result["fallacies"].as_array().unwrap();
        assert!(fallacies.iter().all(|f| f["category"] == "informal"));
    }

    #[test]
    fn an_unknown_tool_reports_not_found() {
        let router = router();
        let err = router.handle_tool_call("not-a-real-tool", &Map::new()).unwrap_err();
        assert_eq!(err.code, cogitate_core::ErrorCode::NotFound);
    }

    #[test]
    fn register_and_execute_a_minimal_workflow() {
        let store = SharedThoughtStore::from_store(InMemoryThoughtStore::new());
        let calibration = Arc::new(CalibrationTracker::new());
        let orchestrator = Arc::new(Orchestrator::new(None));
        let router = Arc::new(ToolRouter::new(store, calibration, orchestrator.clone()));
        orchestrator.set_tool_executor(router.clone()).unwrap();

        router
            .handle_tool_call(
                "register-workflow",
                &object(json!({
                    "id": "wf-test",
                    "name": "test",
                    "discipline": "sequential",
                    "steps": [{"id": "a", "tool": "think", "input": {"content": "hi"}}]
                })),
            )
            .unwrap();

        let result = router
            .handle_tool_call("execute-workflow", &object(json!({"workflow_id": "wf-test"})))
            .unwrap();
        assert_eq!(result["status"], "success");
    }
}
