// cogitate-core/src/core/identifiers.rs
// ============================================================================
// Module: Cogitate Identifiers
// Description: Canonical opaque identifiers for thoughts, branches, and workflows.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the string-based identifiers used throughout the
//! reasoning server. Identifiers are opaque and serialize as plain JSON
//! strings; validation of contents (non-empty, charset, etc.) is left to the
//! boundary that first accepts the value from the wire.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Macro
// ============================================================================

/// Generates an opaque, string-backed identifier newtype.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from any owned-or-borrowed string source.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

id_type!(
    /// Identifier of a recorded [`crate::core::thought::Thought`].
    ThoughtId
);
id_type!(
    /// Identifier of a [`crate::core::branch::Branch`].
    BranchId
);
id_type!(
    /// Identifier of an [`crate::core::records::Insight`].
    InsightId
);
id_type!(
    /// Identifier of a [`crate::core::records::CrossRef`].
    CrossRefId
);
id_type!(
    /// Identifier of a [`crate::core::records::Validation`].
    ValidationId
);
id_type!(
    /// Identifier of a [`crate::core::records::Relationship`].
    RelationshipId
);
id_type!(
    /// Identifier of a registered workflow, unique within the orchestrator.
    WorkflowId
);
id_type!(
    /// Identifier of a workflow step, unique within its owning workflow.
    StepId
);
id_type!(
    /// Identifier of a `ReasoningContext` created for one workflow execution.
    ContextId
);

// ============================================================================
// SECTION: Identifier Generation
// ============================================================================

/// Generates collision-free identifiers within a single process.
///
/// Combines a monotonically increasing counter with a coarse timestamp, the
/// same scheme described for Store-assigned identifiers: no cross-process
/// coordination is attempted or required.
#[derive(Debug, Default)]
pub struct IdGenerator {
    /// Monotonic counter, incremented on every call to [`Self::next`].
    counter: std::sync::atomic::AtomicU64,
}

impl IdGenerator {
    /// Creates a new generator starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Produces the next identifier string for the given entity `prefix`.
    pub fn next(&self, prefix: &str) -> String {
        let seq = self.counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let millis = crate::core::time::Timestamp::now().unix_millis();
        format!("{prefix}-{millis}-{seq}")
    }
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;
    use super::ThoughtId;

    #[test]
    fn ids_round_trip_through_display() {
        let id = ThoughtId::new("thought-1");
        assert_eq!(id.as_str(), "thought-1");
        assert_eq!(id.to_string(), "thought-1");
    }

    #[test]
    fn generator_never_repeats_within_process() {
        let gen = IdGenerator::new();
        let a = gen.next("thought");
        let b = gen.next("thought");
        assert_ne!(a, b);
    }
}
