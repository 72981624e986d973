// cogitate-orchestrator/src/progress.rs
// ============================================================================
// Module: Progress Reporting
// Description: An observer interface notified as a workflow run advances.
// Purpose: Lets a caller (e.g. cogitate-mcp, streaming progress back over
//          stdio) observe step starts/completions without the orchestrator
//          depending on a transport.
// Dependencies: none beyond std
// ============================================================================

//! ## Overview
//! [`ProgressReporter`] is invoked synchronously from the dispatch thread
//! that observes each event, including worker threads spawned under
//! `std::thread::scope` for parallel steps — implementations must be
//! `Send + Sync` and should not block.

// ============================================================================
// SECTION: Progress Event
// ============================================================================

/// A single notable moment in a workflow's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A workflow run has started.
    WorkflowStarted {
        /// The workflow's identifier.
        workflow_id: String,
    },
    /// A step has started.
    StepStarted {
        /// The step's identifier.
        step_id: String,
    },
    /// A step finished (successfully or not); `error` is set on failure.
    StepFinished {
        /// The step's identifier.
        step_id: String,
        /// `Some` failure description, or `None` on success.
        error: Option<String>,
    },
    /// A step's condition evaluated to `false`, so it did not run.
    StepSkipped {
        /// The step's identifier.
        step_id: String,
    },
    /// The workflow run finished.
    WorkflowFinished {
        /// The workflow's identifier.
        workflow_id: String,
    },
}

// ============================================================================
// SECTION: Progress Reporter
// ============================================================================

/// Receives [`ProgressEvent`]s as a workflow run advances.
pub trait ProgressReporter: Send + Sync {
    /// Handles one progress event.
    fn report(&self, event: ProgressEvent);
}

/// A [`ProgressReporter`] that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressReporter;

impl ProgressReporter for NoopProgressReporter {
    fn report(&self, _event: ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::NoopProgressReporter;
    use super::ProgressEvent;
    use super::ProgressReporter;

    #[test]
    fn the_noop_reporter_accepts_every_event_without_panicking() {
        let reporter = NoopProgressReporter;
        reporter.report(ProgressEvent::WorkflowStarted { workflow_id: "w".to_string() });
        reporter.report(ProgressEvent::StepStarted { step_id: "a".to_string() });
        reporter.report(ProgressEvent::StepFinished { step_id: "a".to_string(), error: None });
        reporter.report(ProgressEvent::StepSkipped { step_id: "b".to_string() });
        reporter.report(ProgressEvent::WorkflowFinished { workflow_id: "w".to_string() });
    }
}
