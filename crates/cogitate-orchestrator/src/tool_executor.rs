// cogitate-orchestrator/src/tool_executor.rs
// ============================================================================
// Module: Tool Executor
// Description: The seam through which the orchestrator invokes tools, plus
//              a hand-rolled cooperative cancellation signal.
// Purpose: Decouples workflow scheduling from the concrete tool catalog
//          (cogitate-mcp), and lets a caller abort a running workflow.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`ToolExecutor`] is the only point of contact between the orchestrator
//! and the tool catalog; `cogitate-mcp` supplies the real implementation.
//! [`CancellationToken`] is a plain atomic flag rather than an async
//! primitive, since the orchestrator runs its parallel dispatch on
//! `std::thread::scope` rather than a task runtime.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// An error raised while invoking a tool on behalf of a workflow step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolExecutionError {
    /// No tool is registered under the requested name.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// The tool rejected its input or failed internally.
    #[error("tool {tool} failed: {message}")]
    Failed {
        /// The tool that failed.
        tool: String,
        /// A human-readable failure description.
        message: String,
    },
    /// The step was cancelled before or during execution.
    #[error("execution cancelled")]
    Cancelled,
}

// ============================================================================
// SECTION: Tool Executor
// ============================================================================

/// Invokes a named tool with JSON input, returning JSON output.
///
/// Implemented by `cogitate-mcp`'s tool registry; kept as a trait here so
/// the orchestrator does not depend on the concrete tool catalog.
pub trait ToolExecutor: Send + Sync {
    /// Runs `tool` with `input`, returning its raw JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`ToolExecutionError`] if the tool is unknown or fails.
    fn execute_tool(&self, tool: &str, input: &Map<String, Value>) -> Result<Value, ToolExecutionError>;
}

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// A cooperative, cloneable cancellation flag shared across a workflow
/// run's worker threads.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Builds a token that starts out not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token cancelled; visible to every clone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Reports whether [`Self::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::CancellationToken;

    #[test]
    fn a_fresh_token_is_not_cancelled() {
        assert!(!CancellationToken::new().is_cancelled());
    }

    #[test]
    fn cancelling_is_visible_through_a_clone() {
        let token = CancellationToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
