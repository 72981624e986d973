// cogitate-calibration/src/tracker.rs
// ============================================================================
// Module: Calibration Tracker
// Description: The RecordPrediction/RecordOutcome/GetCalibrationReport ledger.
// Purpose: Own the Prediction and Outcome maps under one lock and join them
//          into a CalibrationReport on request.
// Dependencies: crate::report, cogitate-core
// ============================================================================

//! ## Overview
//! A single [`std::sync::RwLock`] guards both maps, mirroring
//! `cogitate-core`'s in-memory store: every reader clones its result before
//! releasing the lock, and `RecordOutcome` takes the write lock to enforce
//! the "matching prediction must already exist" invariant atomically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::RwLock;

use cogitate_core::ThinkingMode;
use cogitate_core::Timestamp;
use cogitate_core::ThoughtId;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::report::CalibrationReport;
use crate::report::JoinedPair;
use crate::report::build_report;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by [`CalibrationTracker`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// No prediction or outcome exists under the given thought identifier.
    #[error("not found: {0}")]
    NotFound(String),
    /// `RecordOutcome` was called for a thought with no matching prediction.
    #[error("no prediction recorded for thought: {0}")]
    MissingPrediction(String),
    /// A confidence value fell outside `[0, 1]`.
    #[error("confidence must be in [0, 1], got {0}")]
    InvalidConfidence(f64),
    /// The thought identifier was empty.
    #[error("thought identifier must not be empty")]
    EmptyIdentifier,
}

// ============================================================================
// SECTION: Outcome Source
// ============================================================================

/// Where an [`Outcome`] judgment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSource {
    /// The Logical Validator judged the thought.
    Validation,
    /// An external verification step judged the thought.
    Verification,
    /// A human supplied the judgment.
    UserFeedback,
}

// ============================================================================
// SECTION: Prediction / Outcome
// ============================================================================

/// A stated confidence for a thought, recorded at prediction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The thought this prediction is about.
    pub thought_id: ThoughtId,
    /// Stated confidence in `[0, 1]`.
    pub confidence: f64,
    /// The thinking mode the thought was recorded under.
    pub mode: ThinkingMode,
    /// When the prediction was recorded.
    pub timestamp: Timestamp,
}

/// An observed outcome judging an earlier [`Prediction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// The thought this outcome judges.
    pub thought_id: ThoughtId,
    /// Whether the thought was judged correct.
    pub was_correct: bool,
    /// The confidence the judge would have assigned, in `[0, 1]`.
    pub actual_confidence: f64,
    /// Where this judgment came from.
    pub source: OutcomeSource,
    /// When the outcome was recorded.
    pub timestamp: Timestamp,
}

// ============================================================================
// SECTION: Tracker State
// ============================================================================

/// The full mutable state of the tracker, guarded as one unit.
#[derive(Debug, Default)]
struct TrackerState {
    predictions: BTreeMap<String, Prediction>,
    prediction_order: Vec<ThoughtId>,
    outcomes: BTreeMap<String, Outcome>,
}

// ============================================================================
// SECTION: Calibration Tracker
// ============================================================================

/// Ledger of confidence predictions and their observed outcomes.
#[derive(Debug, Default)]
pub struct CalibrationTracker {
    state: RwLock<TrackerState>,
}

impl CalibrationTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a prediction, replacing any prior prediction for the same
    /// thought.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidConfidence`] if `confidence` is
    /// outside `[0, 1]`, or [`CalibrationError::EmptyIdentifier`] if the
    /// thought identifier is empty.
    pub fn record_prediction(&self, prediction: Prediction) -> Result<(), CalibrationError> {
        validate_identifier(prediction.thought_id.as_str())?;
        validate_confidence(prediction.confidence)?;
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let key = prediction.thought_id.as_str().to_string();
        if !state.predictions.contains_key(&key) {
            state.prediction_order.push(prediction.thought_id.clone());
        }
        state.predictions.insert(key, prediction);
        Ok(())
    }

    /// Records an outcome for a thought that already has a matching
    /// prediction.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidConfidence`] if
    /// `actual_confidence` is outside `[0, 1]`, or
    /// [`CalibrationError::MissingPrediction`] if no prediction exists for
    /// `outcome.thought_id`.
    pub fn record_outcome(&self, outcome: Outcome) -> Result<(), CalibrationError> {
        validate_identifier(outcome.thought_id.as_str())?;
        validate_confidence(outcome.actual_confidence)?;
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let key = outcome.thought_id.as_str().to_string();
        if !state.predictions.contains_key(&key) {
            return Err(CalibrationError::MissingPrediction(key));
        }
        state.outcomes.insert(key, outcome);
        Ok(())
    }

    /// Returns the prediction recorded for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::NotFound`] if no prediction exists.
    pub fn get_prediction(&self, id: &ThoughtId) -> Result<Prediction, CalibrationError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .predictions
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| CalibrationError::NotFound(id.as_str().to_string()))
    }

    /// Returns the outcome recorded for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::NotFound`] if no outcome exists.
    pub fn get_outcome(&self, id: &ThoughtId) -> Result<Outcome, CalibrationError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .outcomes
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| CalibrationError::NotFound(id.as_str().to_string()))
    }

    /// Lists predictions in insertion order, optionally filtered by mode,
    /// bounded by `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError`] only if the internal lock is poisoned.
    pub fn list_predictions(
        &self,
        mode: Option<ThinkingMode>,
        limit: usize,
    ) -> Result<Vec<Prediction>, CalibrationError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let predictions = state
            .prediction_order
            .iter()
            .filter_map(|id| state.predictions.get(id.as_str()))
            .filter(|prediction| mode.is_none_or(|m| prediction.mode == m))
            .take(limit)
            .cloned()
            .collect();
        Ok(predictions)
    }

    /// Joins every prediction with its recorded outcome and builds the full
    /// calibration report.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError`] only if the internal lock is poisoned.
    pub fn get_calibration_report(&self) -> Result<CalibrationReport, CalibrationError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        let pairs: Vec<JoinedPair> = state
            .prediction_order
            .iter()
            .filter_map(|id| {
                let prediction = state.predictions.get(id.as_str())?;
                let outcome = state.outcomes.get(id.as_str())?;
                Some(JoinedPair {
                    confidence: prediction.confidence,
                    was_correct: outcome.was_correct,
                    mode: prediction.mode,
                })
            })
            .collect();
        Ok(build_report(&pairs))
    }

    /// Clears every recorded prediction and outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError`] only if the internal lock is poisoned.
    pub fn clear(&self) -> Result<(), CalibrationError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        *state = TrackerState::default();
        Ok(())
    }
}

/// Validates that a thought identifier is non-empty.
fn validate_identifier(id: &str) -> Result<(), CalibrationError> {
    if id.trim().is_empty() {
        Err(CalibrationError::EmptyIdentifier)
    } else {
        Ok(())
    }
}

/// Validates that a confidence value lies in `[0, 1]`.
fn validate_confidence(confidence: f64) -> Result<(), CalibrationError> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(CalibrationError::InvalidConfidence(confidence))
    }
}

/// Builds the error for a poisoned internal lock.
fn poisoned() -> CalibrationError {
    CalibrationError::NotFound("tracker lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::CalibrationError;
    use super::CalibrationTracker;
    use super::Outcome;
    use super::OutcomeSource;
    use super::Prediction;
    use cogitate_core::ThinkingMode;
    use cogitate_core::Timestamp;
    use cogitate_core::ThoughtId;

    fn prediction(id: &str, confidence: f64) -> Prediction {
        Prediction {
            thought_id: ThoughtId::new(id),
            confidence,
            mode: ThinkingMode::Linear,
            timestamp: Timestamp::from_millis(0),
        }
    }

    fn outcome(id: &str, was_correct: bool) -> Outcome {
        Outcome {
            thought_id: ThoughtId::new(id),
            was_correct,
            actual_confidence: if was_correct { 1.0 } else { 0.0 },
            source: OutcomeSource::Validation,
            timestamp: Timestamp::from_millis(0),
        }
    }

    #[test]
    fn outcome_without_a_matching_prediction_is_rejected() {
        let tracker = CalibrationTracker::new();
        let result = tracker.record_outcome(outcome("thought_1", true));
        assert_eq!(result, Err(CalibrationError::MissingPrediction("thought_1".to_string())));
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let tracker = CalibrationTracker::new();
        let result = tracker.record_prediction(prediction("thought_1", 1.5));
        assert_eq!(result, Err(CalibrationError::InvalidConfidence(1.5)));
    }

    #[test]
    fn roundtrips_a_prediction_and_its_outcome() {
        let tracker = CalibrationTracker::new();
        tracker.record_prediction(prediction("thought_1", 0.8)).unwrap();
        tracker.record_outcome(outcome("thought_1", true)).unwrap();
        let id = ThoughtId::new("thought_1");
        assert_eq!(tracker.get_prediction(&id).unwrap().confidence, 0.8);
        assert!(tracker.get_outcome(&id).unwrap().was_correct);
    }

    #[test]
    fn list_predictions_filters_by_mode_and_respects_the_limit() {
        let tracker = CalibrationTracker::new();
        tracker.record_prediction(prediction("thought_1", 0.5)).unwrap();
        tracker.record_prediction(prediction("thought_2", 0.6)).unwrap();
        let listed = tracker.list_predictions(Some(ThinkingMode::Linear), 1).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].thought_id.as_str(), "thought_1");
    }

    #[test]
    fn report_reflects_overconfidence_from_ten_recorded_predictions() {
        let tracker = CalibrationTracker::new();
        for i in 0..10 {
            let id = format!("thought_{i}");
            tracker.record_prediction(prediction(&id, 0.9)).unwrap();
            tracker.record_outcome(outcome(&id, i < 6)).unwrap();
        }
        let report = tracker.get_calibration_report().unwrap();
        assert_eq!(report.total_outcomes, 10);
        assert!((report.overall_accuracy - 0.6).abs() < 1e-9);
        assert!(report.bias.magnitude.abs() > 0.15);
    }

    #[test]
    fn clear_removes_every_prediction_and_outcome() {
        let tracker = CalibrationTracker::new();
        tracker.record_prediction(prediction("thought_1", 0.5)).unwrap();
        tracker.record_outcome(outcome("thought_1", true)).unwrap();
        tracker.clear().unwrap();
        let id = ThoughtId::new("thought_1");
        assert_eq!(tracker.get_prediction(&id), Err(CalibrationError::NotFound("thought_1".to_string())));
    }
}
