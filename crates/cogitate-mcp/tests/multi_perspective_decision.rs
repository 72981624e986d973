// crates/cogitate-mcp/tests/multi_perspective_decision.rs
// ============================================================================
// Module: Multi-Perspective Decision End-to-End Test
// Description: Runs the predefined `multi-perspective-decision` workflow
//              through a real server and checks every step's result.
// ============================================================================
//! ## Overview
//! Exercises the worked scenario: `analyze-perspectives` and
//! `sensitivity-analysis` run in parallel, then `make-decision` must observe
//! both `perspectives` and `sensitivity` in its resolved input.

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

use cogitate_mcp::CogitateServer;
use cogitate_mcp::ServerConfig;
use cogitate_mcp::server::StoreBackend;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn make_decision_observes_both_parallel_branches_after_template_resolution() {
    let server = CogitateServer::new(ServerConfig { store_backend: StoreBackend::Memory }).unwrap();

    let result = server
        .router()
        .handle_tool_call(
            "execute-workflow",
            &object(json!({
                "workflow_id": "multi-perspective-decision",
                "situation": "choose DB",
                "decision": "choose DB",
                "criteria": ["latency", "cost"],
                "assumptions": [],
                "perspectives": ["ops", "finance"],
                "variables": {"latency": 0.8, "cost": 0.4},
                "options": ["postgres", "sqlite"],
            })),
        )
        .unwrap();

    assert_eq!(result["status"], "success");
    let steps = result["results_by_step"].as_object().expect("results_by_step is an object");
    assert!(steps.contains_key("perspectives"));
    assert!(steps.contains_key("sensitivity"));
    assert!(steps.contains_key("decision"));
}
