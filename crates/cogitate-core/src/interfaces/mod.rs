// cogitate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Store Interface
// Description: Backend-agnostic contract for the Thought/Branch store.
// Purpose: Define `ThoughtStore` and `StoreError` so in-memory and
//          persistent backends can be substituted at construction time.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! `ThoughtStore` is the one seam every backend must satisfy. It says
//! nothing about locking strategy or persistence; it only fixes behavior:
//! readers return deep copies, writers take ownership, unknown identifiers
//! fail with [`StoreError::NotFound`], duplicate identifiers fail with
//! [`StoreError::AlreadyExists`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Branch;
use crate::core::BranchId;
use crate::core::CrossRef;
use crate::core::CrossRefId;
use crate::core::Insight;
use crate::core::InsightId;
use crate::core::Relationship;
use crate::core::RelationshipId;
use crate::core::StoreMetrics;
use crate::core::ThinkingMode;
use crate::core::Thought;
use crate::core::ThoughtId;
use crate::core::Validation;

// ============================================================================
// SECTION: Store Error
// ============================================================================

/// Errors returned by [`ThoughtStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record exists under the given identifier.
    #[error("not found: {0}")]
    NotFound(String),
    /// A record already exists under the given identifier.
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// The underlying backend reported an I/O or storage failure.
    #[error("storage operation failed: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Search
// ============================================================================

/// Parameters for [`ThoughtStore::search_thoughts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring to match against thought content.
    pub query: String,
    /// Optional thinking-mode filter.
    pub mode: Option<ThinkingMode>,
    /// Maximum number of matches to return.
    pub limit: usize,
    /// Number of leading matches to skip.
    pub offset: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            mode: None,
            limit: 100,
            offset: 0,
        }
    }
}

// ============================================================================
// SECTION: Thought Store
// ============================================================================

/// Backend-agnostic repository of thoughts, branches, and append-only
/// records.
///
/// Implementations must return deep copies from every read method and must
/// accept ownership of records passed to write methods.
pub trait ThoughtStore {
    /// Persists a new thought.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if `thought.id` is already
    /// stored.
    fn store_thought(&self, thought: Thought) -> Result<(), StoreError>;

    /// Returns a deep copy of the thought with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such thought exists.
    fn get_thought(&self, id: &ThoughtId) -> Result<Thought, StoreError>;

    /// Returns thoughts matching `query`, bounded and paginated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on a backend failure.
    fn search_thoughts(&self, query: &SearchQuery) -> Result<Vec<Thought>, StoreError>;

    /// Persists a new branch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if `branch.id` is already
    /// stored.
    fn store_branch(&self, branch: Branch) -> Result<(), StoreError>;

    /// Returns a deep copy of the branch with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no such branch exists.
    fn get_branch(&self, id: &BranchId) -> Result<Branch, StoreError>;

    /// Returns every stored branch, insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on a backend failure.
    fn list_branches(&self) -> Result<Vec<Branch>, StoreError>;

    /// Returns the currently active branch, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on a backend failure.
    fn get_active_branch(&self) -> Result<Option<Branch>, StoreError>;

    /// Activates `id`, atomically demoting any previously active branch to
    /// suspended.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` does not name a stored
    /// branch.
    fn set_active_branch(&self, id: &BranchId) -> Result<(), StoreError>;

    /// Updates the branch's `last_accessed_at` to now.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` does not name a stored
    /// branch.
    fn update_branch_access(&self, id: &BranchId) -> Result<(), StoreError>;

    /// Overwrites the branch's scheduling priority.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` does not name a stored
    /// branch.
    fn update_branch_priority(&self, id: &BranchId, priority: f64) -> Result<(), StoreError>;

    /// Overwrites the branch's aggregate confidence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `id` does not name a stored
    /// branch.
    fn update_branch_confidence(&self, id: &BranchId, confidence: f64) -> Result<(), StoreError>;

    /// Appends a thought identifier to the branch's owned sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `branch_id` does not name a
    /// stored branch.
    fn append_thought_to_branch(
        &self,
        branch_id: &BranchId,
        thought_id: ThoughtId,
    ) -> Result<(), StoreError>;

    /// Appends an insight identifier to the branch's owned sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `branch_id` does not name a
    /// stored branch.
    fn append_insight_to_branch(
        &self,
        branch_id: &BranchId,
        insight_id: InsightId,
    ) -> Result<(), StoreError>;

    /// Appends a cross-reference identifier to the branch's owned sequence.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `branch_id` does not name a
    /// stored branch.
    fn append_cross_ref_to_branch(
        &self,
        branch_id: &BranchId,
        cross_ref_id: CrossRefId,
    ) -> Result<(), StoreError>;

    /// Returns the `limit` most recently accessed branches, most recent
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on a backend failure.
    fn get_recent_branches(&self, limit: usize) -> Result<Vec<Branch>, StoreError>;

    /// Persists a new insight.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if `insight.id` is already
    /// stored.
    fn store_insight(&self, insight: Insight) -> Result<(), StoreError>;

    /// Persists a new validation record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if `validation.id` is already
    /// stored.
    fn store_validation(&self, validation: Validation) -> Result<(), StoreError>;

    /// Persists a new relationship record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if `relationship.id` is
    /// already stored.
    fn store_relationship(&self, relationship: Relationship) -> Result<(), StoreError>;

    /// Returns a point-in-time snapshot of store occupancy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] on a backend failure.
    fn get_metrics(&self) -> Result<StoreMetrics, StoreError>;

    /// Releases any resources held by the backend. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend cannot be closed
    /// cleanly.
    fn close(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::SearchQuery;

    #[test]
    fn default_search_query_matches_everything_up_to_one_hundred() {
        let query = SearchQuery::default();
        assert!(query.query.is_empty());
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 0);
    }
}
