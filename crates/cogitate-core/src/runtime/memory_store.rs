// cogitate-core/src/runtime/memory_store.rs
// ============================================================================
// Module: In-Memory Thought Store
// Description: Readers-writer-locked in-memory implementation of ThoughtStore.
// Purpose: Provide the default store backend and its shared, clonable wrapper.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! A single [`std::sync::RwLock`] guards one [`StoreState`] so that the
//! one-active-branch invariant can be enforced atomically under the write
//! lock taken by [`InMemoryThoughtStore::set_active_branch`]. Every reader
//! clones its result before releasing the lock; no reference into the
//! locked state escapes a method call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::RwLock;

use crate::core::Branch;
use crate::core::BranchId;
use crate::core::BranchState;
use crate::core::CrossRef;
use crate::core::CrossRefId;
use crate::core::IdGenerator;
use crate::core::Insight;
use crate::core::InsightId;
use crate::core::Relationship;
use crate::core::StoreMetrics;
use crate::core::Thought;
use crate::core::ThoughtId;
use crate::core::Timestamp;
use crate::core::Validation;
use crate::interfaces::SearchQuery;
use crate::interfaces::StoreError;
use crate::interfaces::ThoughtStore;

// ============================================================================
// SECTION: Store State
// ============================================================================

/// The full mutable state of the in-memory backend, guarded as one unit.
#[derive(Debug, Default)]
struct StoreState {
    thoughts: BTreeMap<String, Thought>,
    thought_order: Vec<ThoughtId>,
    branches: BTreeMap<String, Branch>,
    branch_order: Vec<BranchId>,
    active_branch_id: Option<BranchId>,
    insights: BTreeMap<String, Insight>,
    cross_refs: BTreeMap<String, CrossRef>,
    validations: BTreeMap<String, Validation>,
    relationships: BTreeMap<String, Relationship>,
    closed: bool,
}

/// Builds a [`StoreError::Backend`] for a poisoned lock on `what`.
fn poisoned(what: &str) -> StoreError {
    StoreError::Backend(format!("{what} lock poisoned"))
}

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory [`ThoughtStore`] backend.
#[derive(Debug)]
pub struct InMemoryThoughtStore {
    state: RwLock<StoreState>,
    ids: IdGenerator,
}

impl Default for InMemoryThoughtStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryThoughtStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            ids: IdGenerator::new(),
        }
    }

    /// Generates the next identifier for the given entity prefix.
    #[must_use]
    pub fn next_id(&self, prefix: &str) -> String {
        self.ids.next(prefix)
    }
}

impl ThoughtStore for InMemoryThoughtStore {
    fn store_thought(&self, thought: Thought) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let key = thought.id.as_str().to_string();
        if state.thoughts.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        state.thought_order.push(thought.id.clone());
        state.thoughts.insert(key, thought);
        Ok(())
    }

    fn get_thought(&self, id: &ThoughtId) -> Result<Thought, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        state
            .thoughts
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))
    }

    fn search_thoughts(&self, query: &SearchQuery) -> Result<Vec<Thought>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        let needle = query.query.to_lowercase();
        let mut matched = 0usize;
        let mut results = Vec::new();
        for id in &state.thought_order {
            let Some(thought) = state.thoughts.get(id.as_str()) else {
                continue;
            };
            if !thought.content_lower.contains(&needle) {
                continue;
            }
            if let Some(mode) = query.mode {
                if thought.mode != mode {
                    continue;
                }
            }
            if matched < query.offset {
                matched += 1;
                continue;
            }
            if results.len() >= query.limit {
                break;
            }
            results.push(thought.clone());
            matched += 1;
        }
        Ok(results)
    }

    fn store_branch(&self, branch: Branch) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let key = branch.id.as_str().to_string();
        if state.branches.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        state.branch_order.push(branch.id.clone());
        state.branches.insert(key, branch);
        Ok(())
    }

    fn get_branch(&self, id: &BranchId) -> Result<Branch, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        state
            .branches
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))
    }

    fn list_branches(&self) -> Result<Vec<Branch>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        Ok(state
            .branch_order
            .iter()
            .filter_map(|id| state.branches.get(id.as_str()).cloned())
            .collect())
    }

    fn get_active_branch(&self) -> Result<Option<Branch>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        Ok(state
            .active_branch_id
            .as_ref()
            .and_then(|id| state.branches.get(id.as_str()).cloned()))
    }

    fn set_active_branch(&self, id: &BranchId) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        if !state.branches.contains_key(id.as_str()) {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        }
        if let Some(previous) = state.active_branch_id.clone() {
            if previous != *id {
                if let Some(branch) = state.branches.get_mut(previous.as_str()) {
                    branch.state = BranchState::Suspended;
                }
            }
        }
        if let Some(branch) = state.branches.get_mut(id.as_str()) {
            branch.state = BranchState::Active;
        }
        state.active_branch_id = Some(id.clone());
        Ok(())
    }

    fn update_branch_access(&self, id: &BranchId) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let branch = state
            .branches
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))?;
        branch.last_accessed_at = Timestamp::now();
        Ok(())
    }

    fn update_branch_priority(&self, id: &BranchId, priority: f64) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let branch = state
            .branches
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))?;
        branch.priority = priority;
        Ok(())
    }

    fn update_branch_confidence(&self, id: &BranchId, confidence: f64) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let branch = state
            .branches
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))?;
        branch.confidence = confidence;
        Ok(())
    }

    fn append_thought_to_branch(
        &self,
        branch_id: &BranchId,
        thought_id: ThoughtId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let now = Timestamp::now();
        let branch = state
            .branches
            .get_mut(branch_id.as_str())
            .ok_or_else(|| StoreError::NotFound(branch_id.as_str().to_string()))?;
        branch.push_thought(thought_id, now);
        Ok(())
    }

    fn append_insight_to_branch(
        &self,
        branch_id: &BranchId,
        insight_id: InsightId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let now = Timestamp::now();
        let branch = state
            .branches
            .get_mut(branch_id.as_str())
            .ok_or_else(|| StoreError::NotFound(branch_id.as_str().to_string()))?;
        branch.push_insight(insight_id, now);
        Ok(())
    }

    fn append_cross_ref_to_branch(
        &self,
        branch_id: &BranchId,
        cross_ref_id: CrossRefId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let now = Timestamp::now();
        let branch = state
            .branches
            .get_mut(branch_id.as_str())
            .ok_or_else(|| StoreError::NotFound(branch_id.as_str().to_string()))?;
        branch.push_cross_ref(cross_ref_id, now);
        Ok(())
    }

    fn get_recent_branches(&self, limit: usize) -> Result<Vec<Branch>, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        let mut branches: Vec<Branch> = state.branches.values().cloned().collect();
        branches.sort_by(|a, b| b.last_accessed_at.cmp(&a.last_accessed_at));
        branches.truncate(limit);
        Ok(branches)
    }

    fn store_insight(&self, insight: Insight) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let key = insight.id.as_str().to_string();
        if state.insights.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        state.insights.insert(key, insight);
        Ok(())
    }

    fn store_validation(&self, validation: Validation) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let key = validation.id.as_str().to_string();
        if state.validations.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        state.validations.insert(key, validation);
        Ok(())
    }

    fn store_relationship(&self, relationship: Relationship) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        let key = relationship.id.as_str().to_string();
        if state.relationships.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        state.relationships.insert(key, relationship);
        Ok(())
    }

    fn get_metrics(&self) -> Result<StoreMetrics, StoreError> {
        let state = self.state.read().map_err(|_| poisoned("thought store"))?;
        Ok(StoreMetrics {
            thought_count: state.thoughts.len(),
            branch_count: state.branches.len(),
            insight_count: state.insights.len(),
            cross_ref_count: state.cross_refs.len(),
            validation_count: state.validations.len(),
            relationship_count: state.relationships.len(),
            active_branch_id: state.active_branch_id.clone(),
        })
    }

    fn close(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().map_err(|_| poisoned("thought store"))?;
        state.closed = true;
        Ok(())
    }
}

// ============================================================================
// SECTION: Shared Store Wrapper
// ============================================================================

/// Shared [`ThoughtStore`] backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedThoughtStore {
    inner: Arc<dyn ThoughtStore + Send + Sync>,
}

impl SharedThoughtStore {
    /// Wraps a store implementation in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl ThoughtStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub fn new(store: Arc<dyn ThoughtStore + Send + Sync>) -> Self {
        Self { inner: store }
    }
}

impl ThoughtStore for SharedThoughtStore {
    fn store_thought(&self, thought: Thought) -> Result<(), StoreError> {
        self.inner.store_thought(thought)
    }

    fn get_thought(&self, id: &ThoughtId) -> Result<Thought, StoreError> {
        self.inner.get_thought(id)
    }

    fn search_thoughts(&self, query: &SearchQuery) -> Result<Vec<Thought>, StoreError> {
        self.inner.search_thoughts(query)
    }

    fn store_branch(&self, branch: Branch) -> Result<(), StoreError> {
        self.inner.store_branch(branch)
    }

    fn get_branch(&self, id: &BranchId) -> Result<Branch, StoreError> {
        self.inner.get_branch(id)
    }

    fn list_branches(&self) -> Result<Vec<Branch>, StoreError> {
        self.inner.list_branches()
    }

    fn get_active_branch(&self) -> Result<Option<Branch>, StoreError> {
        self.inner.get_active_branch()
    }

    fn set_active_branch(&self, id: &BranchId) -> Result<(), StoreError> {
        self.inner.set_active_branch(id)
    }

    fn update_branch_access(&self, id: &BranchId) -> Result<(), StoreError> {
        self.inner.update_branch_access(id)
    }

    fn update_branch_priority(&self, id: &BranchId, priority: f64) -> Result<(), StoreError> {
        self.inner.update_branch_priority(id, priority)
    }

    fn update_branch_confidence(&self, id: &BranchId, confidence: f64) -> Result<(), StoreError> {
        self.inner.update_branch_confidence(id, confidence)
    }

    fn append_thought_to_branch(
        &self,
        branch_id: &BranchId,
        thought_id: ThoughtId,
    ) -> Result<(), StoreError> {
        self.inner.append_thought_to_branch(branch_id, thought_id)
    }

    fn append_insight_to_branch(
        &self,
        branch_id: &BranchId,
        insight_id: InsightId,
    ) -> Result<(), StoreError> {
        self.inner.append_insight_to_branch(branch_id, insight_id)
    }

    fn append_cross_ref_to_branch(
        &self,
        branch_id: &BranchId,
        cross_ref_id: CrossRefId,
    ) -> Result<(), StoreError> {
        self.inner.append_cross_ref_to_branch(branch_id, cross_ref_id)
    }

    fn get_recent_branches(&self, limit: usize) -> Result<Vec<Branch>, StoreError> {
        self.inner.get_recent_branches(limit)
    }

    fn store_insight(&self, insight: Insight) -> Result<(), StoreError> {
        self.inner.store_insight(insight)
    }

    fn store_validation(&self, validation: Validation) -> Result<(), StoreError> {
        self.inner.store_validation(validation)
    }

    fn store_relationship(&self, relationship: Relationship) -> Result<(), StoreError> {
        self.inner.store_relationship(relationship)
    }

    fn get_metrics(&self) -> Result<StoreMetrics, StoreError> {
        self.inner.get_metrics()
    }

    fn close(&self) -> Result<(), StoreError> {
        self.inner.close()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]
mod tests {
    use super::*;
    use crate::core::ThinkingMode;

    fn sample_thought(id: &str, content: &str) -> Thought {
        Thought::new(
            ThoughtId::new(id),
            content,
            ThinkingMode::Linear,
            0.5,
            None,
            None,
            Vec::new(),
            Timestamp::from_millis(0),
        )
        .expect("valid thought")
    }

    #[test]
    fn get_thought_returns_a_copy_not_an_alias() {
        let store = InMemoryThoughtStore::new();
        store.store_thought(sample_thought("t1", "hello world")).unwrap();
        let mut first = store.get_thought(&ThoughtId::new("t1")).unwrap();
        first.content.push_str(" mutated");
        let second = store.get_thought(&ThoughtId::new("t1")).unwrap();
        assert_eq!(second.content, "hello world");
    }

    #[test]
    fn storing_a_duplicate_thought_id_fails() {
        let store = InMemoryThoughtStore::new();
        store.store_thought(sample_thought("t1", "a")).unwrap();
        let err = store.store_thought(sample_thought("t1", "b")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn getting_an_unknown_thought_fails_not_found() {
        let store = InMemoryThoughtStore::new();
        let err = store.get_thought(&ThoughtId::new("missing")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn search_respects_limit_and_offset_in_insertion_order() {
        let store = InMemoryThoughtStore::new();
        for i in 0..5 {
            store
                .store_thought(sample_thought(&format!("t{i}"), "banana split"))
                .unwrap();
        }
        let query = SearchQuery {
            query: "banana".to_string(),
            mode: None,
            limit: 2,
            offset: 1,
        };
        let results = store.search_thoughts(&query).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_str(), "t1");
        assert_eq!(results[1].id.as_str(), "t2");
    }

    #[test]
    fn empty_query_matches_all_thoughts() {
        let store = InMemoryThoughtStore::new();
        store.store_thought(sample_thought("t1", "alpha")).unwrap();
        store.store_thought(sample_thought("t2", "beta")).unwrap();
        let results = store.search_thoughts(&SearchQuery::default()).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn setting_active_branch_demotes_the_previous_one() {
        let store = InMemoryThoughtStore::new();
        store
            .store_branch(Branch::new(BranchId::new("b1"), 0.0, Timestamp::from_millis(0)))
            .unwrap();
        store
            .store_branch(Branch::new(BranchId::new("b2"), 0.0, Timestamp::from_millis(0)))
            .unwrap();
        store.set_active_branch(&BranchId::new("b1")).unwrap();
        store.set_active_branch(&BranchId::new("b2")).unwrap();

        let active = store.get_active_branch().unwrap().expect("active branch");
        assert_eq!(active.id.as_str(), "b2");
        let demoted = store.get_branch(&BranchId::new("b1")).unwrap();
        assert_eq!(demoted.state, BranchState::Suspended);
    }

    #[test]
    fn mutating_a_branch_without_storing_it_first_fails_not_found() {
        let store = InMemoryThoughtStore::new();
        let err = store
            .set_active_branch(&BranchId::new("ghost"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn close_is_idempotent() {
        let store = InMemoryThoughtStore::new();
        store.close().unwrap();
        store.close().unwrap();
    }
}
