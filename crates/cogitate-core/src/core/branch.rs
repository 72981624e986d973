// cogitate-core/src/core/branch.rs
// ============================================================================
// Module: Branch
// Description: A named line of exploration grouping thoughts and insights.
// Purpose: Define `Branch` and `BranchState`.
// Dependencies: crate::core::{identifiers, time}
// ============================================================================

//! ## Overview
//! A branch groups an ordered sequence of thought, insight, and cross-ref
//! identifiers under one priority/confidence pair. At most one branch in a
//! store may be [`BranchState::Active`] at a time; the store enforces this,
//! not this type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BranchId;
use crate::core::identifiers::CrossRefId;
use crate::core::identifiers::InsightId;
use crate::core::identifiers::ThoughtId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Branch State
// ============================================================================

/// Lifecycle state of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchState {
    /// The single branch currently receiving new thoughts, if any.
    Active,
    /// Set aside; may become active again later.
    Suspended,
    /// Reasoning finished; read-only from here on.
    Completed,
    /// Abandoned; read-only from here on.
    Dead,
}

impl BranchState {
    /// Returns the wire name for this state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Completed => "completed",
            Self::Dead => "dead",
        }
    }

    /// Returns true when the branch accepts no further mutation.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Dead)
    }
}

impl std::fmt::Display for BranchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Branch
// ============================================================================

/// A named line of exploration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Immutable identifier assigned at creation.
    pub id: BranchId,
    /// Current lifecycle state.
    pub state: BranchState,
    /// Scheduling priority; higher values are preferred when resuming.
    pub priority: f64,
    /// Aggregate confidence across the branch's thoughts.
    pub confidence: f64,
    /// Thought identifiers in recording order.
    pub thought_ids: Vec<ThoughtId>,
    /// Insight identifiers in recording order.
    pub insight_ids: Vec<InsightId>,
    /// Cross-reference identifiers in recording order.
    pub cross_ref_ids: Vec<CrossRefId>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Time of the most recent read or write touching this branch.
    pub last_accessed_at: Timestamp,
}

impl Branch {
    /// Builds a new, empty branch in [`BranchState::Active`].
    #[must_use]
    pub fn new(id: BranchId, priority: f64, created_at: Timestamp) -> Self {
        Self {
            id,
            state: BranchState::Active,
            priority,
            confidence: 0.0,
            thought_ids: Vec::new(),
            insight_ids: Vec::new(),
            cross_ref_ids: Vec::new(),
            created_at,
            last_accessed_at: created_at,
        }
    }

    /// Appends a thought identifier and bumps `last_accessed_at`.
    pub fn push_thought(&mut self, thought_id: ThoughtId, now: Timestamp) {
        self.thought_ids.push(thought_id);
        self.last_accessed_at = now;
    }

    /// Appends an insight identifier and bumps `last_accessed_at`.
    pub fn push_insight(&mut self, insight_id: InsightId, now: Timestamp) {
        self.insight_ids.push(insight_id);
        self.last_accessed_at = now;
    }

    /// Appends a cross-reference identifier and bumps `last_accessed_at`.
    pub fn push_cross_ref(&mut self, cross_ref_id: CrossRefId, now: Timestamp) {
        self.cross_ref_ids.push(cross_ref_id);
        self.last_accessed_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::Branch;
    use super::BranchId;
    use super::BranchState;
    use super::Timestamp;

    #[test]
    fn new_branch_starts_active_and_empty() {
        let branch = Branch::new(BranchId::new("b1"), 0.5, Timestamp::from_millis(0));
        assert_eq!(branch.state, BranchState::Active);
        assert!(branch.thought_ids.is_empty());
    }

    #[test]
    fn terminal_states_are_completed_and_dead_only() {
        assert!(BranchState::Completed.is_terminal());
        assert!(BranchState::Dead.is_terminal());
        assert!(!BranchState::Active.is_terminal());
        assert!(!BranchState::Suspended.is_terminal());
    }

    #[test]
    fn pushing_a_thought_advances_last_accessed() {
        let mut branch = Branch::new(BranchId::new("b1"), 0.5, Timestamp::from_millis(0));
        branch.push_thought(super::ThoughtId::new("t1"), Timestamp::from_millis(10));
        assert_eq!(branch.thought_ids.len(), 1);
        assert_eq!(branch.last_accessed_at, Timestamp::from_millis(10));
    }
}
