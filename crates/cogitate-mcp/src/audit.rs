// cogitate-mcp/src/audit.rs
// ============================================================================
// Module: Audit Sink
// Description: Structured JSON-lines audit events for tool calls and
//              workflow executions.
// Purpose: Give an operator visibility into what the server did, without
//          pulling in a logging framework.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! There is no `tracing`/`log` crate anywhere in this workspace, matching
//! the teacher's own core path: `decision-gate-mcp::audit` emits structured
//! JSON events through an [`AuditSink`] trait rather than through a logging
//! facade. This module carries the same shape, scoped down to the events
//! this server actually produces.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use cogitate_core::Timestamp;

// ============================================================================
// SECTION: Audit Event
// ============================================================================

/// One notable moment in the server's operation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A tool call started.
    ToolCallStarted {
        /// Milliseconds since epoch.
        timestamp_ms: u64,
        /// The tool invoked.
        tool: String,
    },
    /// A tool call finished, successfully or not.
    ToolCallFinished {
        /// Milliseconds since epoch.
        timestamp_ms: u64,
        /// The tool invoked.
        tool: String,
        /// `true` if the call returned a result rather than an error.
        success: bool,
        /// Elapsed call duration, in milliseconds.
        elapsed_ms: u64,
    },
    /// A tool call failed with a structured error.
    ToolCallFailed {
        /// Milliseconds since epoch.
        timestamp_ms: u64,
        /// The tool invoked.
        tool: String,
        /// Numeric wire error code.
        error_code: u32,
        /// Human-readable error message.
        error_message: String,
    },
    /// A workflow execution started.
    WorkflowStarted {
        /// Milliseconds since epoch.
        timestamp_ms: u64,
        /// The workflow invoked.
        workflow_id: String,
    },
    /// A workflow execution finished, successfully or not.
    WorkflowFinished {
        /// Milliseconds since epoch.
        timestamp_ms: u64,
        /// The workflow invoked.
        workflow_id: String,
        /// `true` if the workflow's terminal status was `success`.
        success: bool,
    },
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Receives [`AuditEvent`]s as the server operates.
pub trait AuditSink: Send + Sync {
    /// Records one audit event. Implementations must not panic.
    fn record(&self, event: &AuditEvent);
}

/// Writes each event as one JSON line to stderr.
#[derive(Debug, Default)]
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{line}");
        }
    }
}

/// Appends each event as one JSON line to a file, behind a mutex.
#[derive(Debug)]
pub struct FileAuditSink {
    /// The open file handle, locked for the duration of each write.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens (or creates) `path` in append mode.
    ///
    /// # Errors
    ///
    /// Returns a [`std::io::Error`] if the file cannot be opened.
    pub fn new(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &AuditEvent) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}

/// Returns the current time as milliseconds since epoch, for stamping
/// audit events.
#[must_use]
pub fn now_ms() -> u64 {
    Timestamp::now().unix_millis()
}

/// Serializes an [`AuditEvent`] to a [`Value`], for tests that want to
/// inspect its shape without going through a sink.
#[must_use]
pub fn to_value(event: &AuditEvent) -> Value {
    serde_json::to_value(event).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::AuditEvent;
    use super::AuditSink;
    use super::NoopAuditSink;
    use super::StderrAuditSink;

    #[test]
    fn the_noop_sink_accepts_every_event_without_panicking() {
        let sink = NoopAuditSink;
        sink.record(&AuditEvent::ToolCallStarted { timestamp_ms: 0, tool: "think".to_string() });
    }

    #[test]
    fn the_stderr_sink_does_not_panic_on_a_well_formed_event() {
        let sink = StderrAuditSink;
        sink.record(&AuditEvent::ToolCallFinished {
            timestamp_ms: 0,
            tool: "think".to_string(),
            success: true,
            elapsed_ms: 3,
        });
    }

    #[test]
    fn the_file_sink_appends_one_json_line_per_event() {
        use super::FileAuditSink;
        use std::io::Read;

        let dir = std::env::temp_dir();
        let path = dir.join(format!("cogitate-audit-test-{:?}.jsonl", std::thread::current().id()));
        let sink = FileAuditSink::new(&path).expect("file sink opens");
        sink.record(&AuditEvent::WorkflowStarted { timestamp_ms: 1, workflow_id: "causal-analysis".to_string() });
        sink.record(&AuditEvent::WorkflowFinished { timestamp_ms: 2, workflow_id: "causal-analysis".to_string(), success: true });
        drop(sink);

        let mut contents = String::new();
        std::fs::File::open(&path).expect("file exists").read_to_string(&mut contents).expect("file is readable");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("workflow_started"));
        assert!(lines[1].contains("workflow_finished"));

        let _ = std::fs::remove_file(&path);
    }
}
