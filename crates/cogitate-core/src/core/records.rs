// cogitate-core/src/core/records.rs
// ============================================================================
// Module: Append-Only Records
// Description: Insight, CrossRef, Validation, and Relationship record types.
// Purpose: Typed payloads referencing Thought/Branch identifiers.
// Dependencies: crate::core::{identifiers, time}, serde_json
// ============================================================================

//! ## Overview
//! These four record kinds share one shape: an identifier, a foreign
//! reference to the thought and/or branch they annotate, a content payload,
//! and a creation timestamp. None are ever mutated in place; a correction is
//! recorded as a new record, never an edit of an old one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::BranchId;
use crate::core::identifiers::CrossRefId;
use crate::core::identifiers::InsightId;
use crate::core::identifiers::RelationshipId;
use crate::core::identifiers::ThoughtId;
use crate::core::identifiers::ValidationId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Insight
// ============================================================================

/// An observation derived from one or more thoughts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Immutable identifier assigned at creation.
    pub id: InsightId,
    /// Thought this insight was derived from.
    pub thought_id: ThoughtId,
    /// Owning branch, if any.
    pub branch_id: Option<BranchId>,
    /// Free-text insight content.
    pub content: String,
    /// Creation time.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: CrossRef
// ============================================================================

/// A link between two thoughts, optionally across branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRef {
    /// Immutable identifier assigned at creation.
    pub id: CrossRefId,
    /// Source thought of the reference.
    pub from_thought_id: ThoughtId,
    /// Target thought of the reference.
    pub to_thought_id: ThoughtId,
    /// Owning branch, if any.
    pub branch_id: Option<BranchId>,
    /// Description of the nature of the link.
    pub reason: String,
    /// Creation time.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Recorded outcome of a [`crate::core::thought::Thought`] validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// Immutable identifier assigned at creation.
    pub id: ValidationId,
    /// Thought this validation examined.
    pub thought_id: ThoughtId,
    /// Whether the thought was free of detected contradictions/fallacies.
    pub is_valid: bool,
    /// Human-readable reason, populated when `is_valid` is false.
    pub reason: Option<String>,
    /// Confidence in `[0, 1]` carried over from the examined thought.
    pub confidence: f64,
    /// Creation time.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: Relationship
// ============================================================================

/// A typed relationship between two thoughts, with an open payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Immutable identifier assigned at creation.
    pub id: RelationshipId,
    /// Source thought of the relationship.
    pub from_thought_id: ThoughtId,
    /// Target thought of the relationship.
    pub to_thought_id: ThoughtId,
    /// Relationship kind tag (e.g. `"supports"`, `"contradicts"`).
    pub kind: String,
    /// Open payload carrying relationship-specific detail.
    pub payload: Value,
    /// Creation time.
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::Insight;
    use super::InsightId;
    use super::ThoughtId;
    use super::Timestamp;
    use super::Validation;
    use super::ValidationId;

    #[test]
    fn insight_carries_its_source_thought() {
        let insight = Insight {
            id: InsightId::new("i1"),
            thought_id: ThoughtId::new("t1"),
            branch_id: None,
            content: "derived observation".to_string(),
            created_at: Timestamp::from_millis(0),
        };
        assert_eq!(insight.thought_id.as_str(), "t1");
    }

    #[test]
    fn invalid_validation_carries_a_reason() {
        let validation = Validation {
            id: ValidationId::new("v1"),
            thought_id: ThoughtId::new("t1"),
            is_valid: false,
            reason: Some("direct contradiction".to_string()),
            confidence: 0.4,
            created_at: Timestamp::from_millis(0),
        };
        assert!(!validation.is_valid);
        assert!(validation.reason.is_some());
    }
}
