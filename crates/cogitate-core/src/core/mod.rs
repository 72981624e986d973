// cogitate-core/src/core/mod.rs
// ============================================================================
// Module: Core Data Model
// Description: Wires together the record types shared across the workspace.
// Purpose: Re-export the public data model surface.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The data model is deliberately free of any store, validator, or
//! orchestrator logic: it is the set of types every other crate in the
//! workspace agrees on.

pub mod branch;
pub mod errors;
pub mod identifiers;
pub mod metrics;
pub mod records;
pub mod thought;
pub mod time;

pub use branch::Branch;
pub use branch::BranchState;
pub use errors::ErrorCode;
pub use errors::ToolError;
pub use identifiers::BranchId;
pub use identifiers::ContextId;
pub use identifiers::CrossRefId;
pub use identifiers::IdGenerator;
pub use identifiers::InsightId;
pub use identifiers::RelationshipId;
pub use identifiers::StepId;
pub use identifiers::ThoughtId;
pub use identifiers::ValidationId;
pub use identifiers::WorkflowId;
pub use metrics::StoreMetrics;
pub use records::CrossRef;
pub use records::Insight;
pub use records::Relationship;
pub use records::Validation;
pub use thought::MAX_KEY_POINT_BYTES;
pub use thought::MAX_KEY_POINTS;
pub use thought::Thought;
pub use thought::ThoughtError;
pub use thought::ThinkingMode;
pub use time::Timestamp;
