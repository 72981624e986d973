// cogitate-core/src/core/metrics.rs
// ============================================================================
// Module: Store Metrics
// Description: Point-in-time counts reported by `GetMetrics`.
// Purpose: Define `StoreMetrics`.
// Dependencies: crate::core::identifiers
// ============================================================================

//! ## Overview
//! A cheap snapshot of store occupancy, taken under the same read lock as any
//! other reader.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BranchId;

// ============================================================================
// SECTION: Store Metrics
// ============================================================================

/// Point-in-time counts of stored records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreMetrics {
    /// Total number of stored thoughts.
    pub thought_count: usize,
    /// Total number of stored branches.
    pub branch_count: usize,
    /// Total number of stored insights.
    pub insight_count: usize,
    /// Total number of stored cross-references.
    pub cross_ref_count: usize,
    /// Total number of stored validations.
    pub validation_count: usize,
    /// Total number of stored relationships.
    pub relationship_count: usize,
    /// Identifier of the currently active branch, if any.
    pub active_branch_id: Option<BranchId>,
}

#[cfg(test)]
mod tests {
    use super::StoreMetrics;

    #[test]
    fn default_metrics_are_all_zero_and_no_active_branch() {
        let metrics = StoreMetrics::default();
        assert_eq!(metrics.thought_count, 0);
        assert!(metrics.active_branch_id.is_none());
    }
}
