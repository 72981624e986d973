// cogitate-core/src/lib.rs
// ============================================================================
// Module: Cogitate Core Library
// Description: Public API surface for the cognitive-reasoning server's core.
// Purpose: Expose the data model, the Store interface, and its default
//          in-memory backend.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Cogitate core provides the data model shared by every tool handler, the
//! backend-agnostic [`interfaces::ThoughtStore`] contract, and the default
//! in-memory backend. It embeds no wire protocol, no workflow engine, and no
//! inference logic; those live in `cogitate-mcp`, `cogitate-orchestrator`,
//! and `cogitate-logic` respectively.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::Branch;
pub use core::BranchId;
pub use core::BranchState;
pub use core::ContextId;
pub use core::CrossRef;
pub use core::CrossRefId;
pub use core::ErrorCode;
pub use core::IdGenerator;
pub use core::Insight;
pub use core::InsightId;
pub use core::RelationshipId;
pub use core::StepId;
pub use core::StoreMetrics;
pub use core::ThinkingMode;
pub use core::Thought;
pub use core::ThoughtError;
pub use core::ThoughtId;
pub use core::Timestamp;
pub use core::ToolError;
pub use core::Relationship;
pub use core::Validation;
pub use core::ValidationId;
pub use core::WorkflowId;
pub use interfaces::SearchQuery;
pub use interfaces::StoreError;
pub use interfaces::ThoughtStore;
pub use runtime::InMemoryThoughtStore;
pub use runtime::SharedThoughtStore;
