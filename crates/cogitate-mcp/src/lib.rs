// cogitate-mcp/src/lib.rs
// ============================================================================
// Module: Cogitate MCP Library
// Description: Public API surface for the cognitive-reasoning server.
// Purpose: Expose the tool catalog, the server, and the stdio transport that
//          together implement the line-delimited JSON-RPC-like protocol.
// Dependencies: cogitate-core, cogitate-calibration, cogitate-logic,
//               cogitate-orchestrator
// ============================================================================

//! ## Overview
//! This crate is the composition root: it owns the [`Store`](cogitate_core::ThoughtStore),
//! the [`Orchestrator`](cogitate_orchestrator::Orchestrator), and the
//! [`CalibrationTracker`](cogitate_calibration::CalibrationTracker), wires
//! them into a tool catalog, and drives that catalog from a stdio transport.
//! Every domain crate's error type is translated to the wire [`ToolError`]
//! taxonomy in [`error`]; no domain crate needs to know the wire shape
//! exists.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod error;
pub mod registration;
pub mod server;
pub mod tools;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditEvent;
pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use cogitate_core::ToolError;
pub use server::CogitateServer;
pub use server::ServerConfig;
pub use tools::ToolDefinition;
pub use transport::run_stdio;
