// cogitate-core/src/core/thought.rs
// ============================================================================
// Module: Thought
// Description: The atomic recorded reasoning unit.
// Purpose: Define `Thought`, `ThinkingMode`, and construction invariants.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! A `Thought` is the smallest unit the store persists. Once stored, its
//! identifier is immutable and its lowercase shadow is kept in lock-step with
//! `content` so that [`crate::interfaces::ThoughtStore::search_thoughts`]
//! never has to re-derive it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::BranchId;
use crate::core::identifiers::ThoughtId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum length, in bytes, of a single key point.
pub const MAX_KEY_POINT_BYTES: usize = 1024;
/// Maximum number of key points a thought may carry.
pub const MAX_KEY_POINTS: usize = 50;

// ============================================================================
// SECTION: Thinking Mode
// ============================================================================

/// The reasoning discipline a thought was recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThinkingMode {
    /// A single, ordered chain of reasoning.
    Linear,
    /// Branching exploration with an explicit parent/child structure.
    Tree,
    /// Unstructured, exploratory brainstorming.
    Divergent,
    /// Caller leaves mode selection to the server.
    Auto,
}

impl ThinkingMode {
    /// Returns the wire name for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Tree => "tree",
            Self::Divergent => "divergent",
            Self::Auto => "auto",
        }
    }
}

impl std::fmt::Display for ThinkingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Thought
// ============================================================================

/// A single recorded reasoning unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    /// Immutable identifier assigned at creation.
    pub id: ThoughtId,
    /// Free-text content as recorded by the caller.
    pub content: String,
    /// Unicode case-fold of `content`, cached for substring search.
    pub content_lower: String,
    /// Thinking discipline this thought was recorded under.
    pub mode: ThinkingMode,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Owning branch, if any.
    pub branch_id: Option<BranchId>,
    /// Parent thought, if this thought continues another.
    pub parent_id: Option<ThoughtId>,
    /// Ordered key points extracted from the content.
    pub key_points: Vec<String>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Open metadata bag for caller-defined annotations.
    pub metadata: BTreeMap<String, Value>,
}

/// Errors returned while constructing a [`Thought`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThoughtError {
    /// Confidence was outside `[0, 1]`.
    #[error("confidence {0} is outside the valid range [0, 1]")]
    InvalidConfidence(String),
    /// Too many key points were supplied.
    #[error("thought carries {0} key points, exceeding the limit of {MAX_KEY_POINTS}")]
    TooManyKeyPoints(usize),
    /// A key point exceeded the per-entry byte limit.
    #[error("key point at index {0} exceeds {MAX_KEY_POINT_BYTES} bytes")]
    KeyPointTooLarge(usize),
}

impl Thought {
    /// Builds a new thought, validating confidence and key-point limits.
    ///
    /// # Errors
    ///
    /// Returns [`ThoughtError`] when confidence is out of range or key points
    /// violate the size/count limits in this module.
    pub fn new(
        id: ThoughtId,
        content: impl Into<String>,
        mode: ThinkingMode,
        confidence: f64,
        branch_id: Option<BranchId>,
        parent_id: Option<ThoughtId>,
        key_points: Vec<String>,
        created_at: Timestamp,
    ) -> Result<Self, ThoughtError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ThoughtError::InvalidConfidence(confidence.to_string()));
        }
        if key_points.len() > MAX_KEY_POINTS {
            return Err(ThoughtError::TooManyKeyPoints(key_points.len()));
        }
        for (idx, point) in key_points.iter().enumerate() {
            if point.len() > MAX_KEY_POINT_BYTES {
                return Err(ThoughtError::KeyPointTooLarge(idx));
            }
        }

        let content = content.into();
        let content_lower = content.to_lowercase();
        Ok(Self {
            id,
            content,
            content_lower,
            mode,
            confidence,
            branch_id,
            parent_id,
            key_points,
            created_at,
            metadata: BTreeMap::new(),
        })
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

    #[test]
    fn lowercase_shadow_tracks_unicode_case_fold() {
        let thought = Thought::new(
            ThoughtId::new("t1"),
            "STRASSE Ärger",
            ThinkingMode::Linear,
            0.5,
            None,
            None,
            Vec::new(),
            Timestamp::from_millis(0),
        )
        .expect("valid thought");
        assert_eq!(thought.content_lower, "strasse ärger");
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let err = Thought::new(
            ThoughtId::new("t1"),
            "x",
            ThinkingMode::Linear,
            1.5,
            None,
            None,
            Vec::new(),
            Timestamp::from_millis(0),
        )
        .expect_err("confidence out of range");
        assert!(matches!(err, ThoughtError::InvalidConfidence(_)));
    }

    #[test]
    fn rejects_too_many_key_points() {
        let points = vec!["p".to_string(); MAX_KEY_POINTS + 1];
        let err = Thought::new(
            ThoughtId::new("t1"),
            "x",
            ThinkingMode::Linear,
            0.5,
            None,
            None,
            points,
            Timestamp::from_millis(0),
        )
        .expect_err("too many key points");
        assert!(matches!(err, ThoughtError::TooManyKeyPoints(_)));
    }
}
