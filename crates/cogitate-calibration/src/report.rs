// cogitate-calibration/src/report.rs
// ============================================================================
// Module: Calibration Report
// Description: The bucketed ECE/bias report produced by GetCalibrationReport.
// Purpose: Define the report types and the pure computation that builds one
//          from a list of joined (confidence, was_correct, mode) triples.
// Dependencies: cogitate-core, serde
// ============================================================================

//! ## Overview
//! [`build_report`] is a pure function over already-joined prediction/outcome
//! pairs; [`crate::tracker::CalibrationTracker`] is the only caller, and is
//! responsible for performing the join under its lock.

// ============================================================================
// SECTION: Imports
// ============================================================================

use cogitate_core::ThinkingMode;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of equal-width confidence buckets partitioning `[0, 1]`.
const BUCKET_COUNT: usize = 10;
/// Width of each bucket.
const BUCKET_WIDTH: f64 = 1.0 / BUCKET_COUNT as f64;
/// `|bias|` below this is classified [`BiasType::None`].
const NEUTRAL_BIAS_THRESHOLD: f64 = 0.05;
/// `|bias|` above this drives the "significant" explanation.
const SIGNIFICANT_BIAS_THRESHOLD: f64 = 0.15;
/// Minimum bucket count for per-bucket outlier detection.
const OUTLIER_MIN_COUNT: usize = 5;
/// Minimum `|calibration|` for per-bucket outlier detection.
const OUTLIER_MIN_CALIBRATION: f64 = 0.2;
/// Below this many total outcomes the report adds a cold-start note.
const COLD_START_THRESHOLD: usize = 20;

// ============================================================================
// SECTION: Joined Pair
// ============================================================================

/// One joined prediction/outcome pair, ready for bucketing.
#[derive(Debug, Clone, Copy)]
pub struct JoinedPair {
    /// The confidence the predictor stated.
    pub confidence: f64,
    /// Whether the outcome was later judged correct.
    pub was_correct: bool,
    /// The thinking mode the prediction was recorded under.
    pub mode: ThinkingMode,
}

// ============================================================================
// SECTION: Bucket Report
// ============================================================================

/// Per-bucket calibration statistics for one non-empty confidence bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketReport {
    /// Index of this bucket in `[0, 9]`.
    pub bucket_index: usize,
    /// Lower (inclusive) bound of the bucket's confidence range.
    pub range_low: f64,
    /// Upper (exclusive, except for the last bucket) bound.
    pub range_high: f64,
    /// Number of joined pairs falling in this bucket.
    pub count: usize,
    /// Number of those pairs judged correct.
    pub correct_count: usize,
    /// `correct_count / count`.
    pub accuracy: f64,
    /// `accuracy - midpoint`.
    pub calibration: f64,
}

// ============================================================================
// SECTION: Bias Report
// ============================================================================

/// Classification of the tracker's overall confidence bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasType {
    /// `|bias|` is below the neutral threshold.
    None,
    /// Stated confidence runs lower than observed accuracy.
    Underconfident,
    /// Stated confidence runs higher than observed accuracy.
    Overconfident,
}

/// The tracker's overall bias classification and magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    /// The bias classification.
    pub bias_type: BiasType,
    /// The signed, bucket-count-weighted mean of per-bucket calibration.
    pub magnitude: f64,
    /// True when `|magnitude|` exceeds the significant threshold.
    pub significant: bool,
    /// Human-readable explanation of the classification.
    pub explanation: String,
}

// ============================================================================
// SECTION: Per-Mode Calibration
// ============================================================================

/// Mean absolute calibration error for one thinking mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeCalibration {
    /// The thinking mode these predictions were recorded under.
    pub mode: ThinkingMode,
    /// Mean of `|confidence - correctness|` over this mode's predictions.
    pub mean_absolute_error: f64,
    /// Number of joined pairs contributing to this mean.
    pub count: usize,
}

// ============================================================================
// SECTION: Calibration Report
// ============================================================================

/// The full report produced by `GetCalibrationReport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    /// Non-empty buckets, in ascending order of confidence.
    pub buckets: Vec<BucketReport>,
    /// Bucket-count-weighted mean of per-bucket `|calibration|`.
    pub ece: f64,
    /// Overall bias classification.
    pub bias: BiasReport,
    /// Mean absolute calibration error, grouped by thinking mode.
    pub per_mode: Vec<ModeCalibration>,
    /// Total number of joined (prediction, outcome) pairs.
    pub total_outcomes: usize,
    /// `total correct / total joined pairs`, or `0.0` with no data.
    pub overall_accuracy: f64,
    /// Generated guidance: bias classification, per-bucket outliers, and a
    /// cold-start note when applicable.
    pub recommendations: Vec<String>,
}

// ============================================================================
// SECTION: Report Construction
// ============================================================================

/// Assigns the bucket index for a confidence value in `[0, 1]`.
fn bucket_index(confidence: f64) -> usize {
    let raw = (confidence / BUCKET_WIDTH).floor();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "confidence is validated to [0, 1] before this is called"
    )]
    let index = raw as usize;
    index.min(BUCKET_COUNT - 1)
}

/// Builds a [`CalibrationReport`] from already-joined prediction/outcome pairs.
#[must_use]
pub fn build_report(pairs: &[JoinedPair]) -> CalibrationReport {
    let buckets = build_buckets(pairs);
    let total_outcomes = pairs.len();
    let total_correct = pairs.iter().filter(|pair| pair.was_correct).count();
    #[allow(clippy::cast_precision_loss, reason = "pair counts are small enough to round-trip")]
    let overall_accuracy = if total_outcomes == 0 {
        0.0
    } else {
        total_correct as f64 / total_outcomes as f64
    };

    let ece = weighted_mean(&buckets, |bucket| bucket.calibration.abs());
    let signed_bias = weighted_mean(&buckets, |bucket| bucket.calibration);
    let bias = classify_bias(signed_bias);
    let per_mode = build_per_mode(pairs);

    let mut recommendations = Vec::new();
    recommendations.extend(bias_recommendation(&bias));
    recommendations.extend(outlier_recommendations(&buckets));
    if total_outcomes < COLD_START_THRESHOLD {
        recommendations.push(format!(
            "cold start: only {total_outcomes} outcomes recorded; calibration estimates are unreliable below {COLD_START_THRESHOLD}"
        ));
    }

    CalibrationReport {
        buckets,
        ece,
        bias,
        per_mode,
        total_outcomes,
        overall_accuracy,
        recommendations,
    }
}

/// Groups joined pairs into the fixed ten buckets, dropping empty ones.
fn build_buckets(pairs: &[JoinedPair]) -> Vec<BucketReport> {
    let mut counts = [0usize; BUCKET_COUNT];
    let mut corrects = [0usize; BUCKET_COUNT];
    for pair in pairs {
        let index = bucket_index(pair.confidence);
        counts[index] += 1;
        if pair.was_correct {
            corrects[index] += 1;
        }
    }

    #[allow(clippy::cast_precision_loss, reason = "bucket index and counts are small enough to round-trip")]
    (0..BUCKET_COUNT)
        .filter(|&index| counts[index] > 0)
        .map(|index| {
            let count = counts[index];
            let correct_count = corrects[index];
            let accuracy = correct_count as f64 / count as f64;
            let midpoint = (index as f64 + 0.5) * BUCKET_WIDTH;
            BucketReport {
                bucket_index: index,
                range_low: index as f64 * BUCKET_WIDTH,
                range_high: (index as f64 + 1.0) * BUCKET_WIDTH,
                count,
                correct_count,
                accuracy,
                calibration: accuracy - midpoint,
            }
        })
        .collect()
}

/// Bucket-count-weighted mean of `metric` over non-empty buckets.
fn weighted_mean(buckets: &[BucketReport], metric: impl Fn(&BucketReport) -> f64) -> f64 {
    let total: usize = buckets.iter().map(|bucket| bucket.count).sum();
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss, reason = "bucket counts are small enough to round-trip")]
    let weighted_sum: f64 =
        buckets.iter().map(|bucket| metric(bucket) * bucket.count as f64).sum();
    #[allow(clippy::cast_precision_loss, reason = "total pair count is small enough to round-trip")]
    {
        weighted_sum / total as f64
    }
}

/// Classifies a signed bias magnitude into a [`BiasReport`].
fn classify_bias(signed_bias: f64) -> BiasReport {
    let significant = signed_bias.abs() > SIGNIFICANT_BIAS_THRESHOLD;
    let bias_type = if signed_bias.abs() < NEUTRAL_BIAS_THRESHOLD {
        BiasType::None
    } else if signed_bias > 0.0 {
        BiasType::Underconfident
    } else {
        BiasType::Overconfident
    };
    let explanation = match bias_type {
        BiasType::None => "confidence tracks observed accuracy closely".to_string(),
        BiasType::Underconfident if significant => {
            "predictions are significantly underconfident: observed accuracy consistently exceeds stated confidence".to_string()
        }
        BiasType::Underconfident => {
            "predictions are mildly underconfident: observed accuracy slightly exceeds stated confidence".to_string()
        }
        BiasType::Overconfident if significant => {
            "predictions show significant overconfidence: observed accuracy falls well short of stated confidence".to_string()
        }
        BiasType::Overconfident => {
            "predictions are mildly overconfident: observed accuracy slightly trails stated confidence".to_string()
        }
    };
    BiasReport { bias_type, magnitude: signed_bias, significant, explanation }
}

/// Builds a recommendation string from the bias classification, if any.
fn bias_recommendation(bias: &BiasReport) -> Option<String> {
    match bias.bias_type {
        BiasType::None => None,
        BiasType::Underconfident => Some(format!(
            "consider raising stated confidence; {}",
            bias.explanation
        )),
        BiasType::Overconfident => Some(format!(
            "consider lowering stated confidence; {}",
            bias.explanation
        )),
    }
}

/// Flags individual buckets whose accuracy diverges sharply from their
/// midpoint, with enough samples to trust the divergence.
fn outlier_recommendations(buckets: &[BucketReport]) -> Vec<String> {
    buckets
        .iter()
        .filter(|bucket| bucket.count >= OUTLIER_MIN_COUNT && bucket.calibration.abs() > OUTLIER_MIN_CALIBRATION)
        .map(|bucket| {
            format!(
                "bucket [{:.1}, {:.1}) is miscalibrated: accuracy {:.2} vs expected midpoint {:.2}",
                bucket.range_low,
                bucket.range_high,
                bucket.accuracy,
                bucket.range_low + BUCKET_WIDTH / 2.0
            )
        })
        .collect()
}

/// Groups joined pairs by thinking mode and computes mean absolute error.
fn build_per_mode(pairs: &[JoinedPair]) -> Vec<ModeCalibration> {
    let modes = [ThinkingMode::Linear, ThinkingMode::Tree, ThinkingMode::Divergent, ThinkingMode::Auto];
    modes
        .into_iter()
        .filter_map(|mode| {
            let matching: Vec<&JoinedPair> = pairs.iter().filter(|pair| pair.mode == mode).collect();
            if matching.is_empty() {
                return None;
            }
            #[allow(clippy::cast_precision_loss, reason = "pair counts are small enough to round-trip")]
            let mean_absolute_error = matching
                .iter()
                .map(|pair| {
                    let correctness = if pair.was_correct { 1.0 } else { 0.0 };
                    (pair.confidence - correctness).abs()
                })
                .sum::<f64>()
                / matching.len() as f64;
            Some(ModeCalibration { mode, mean_absolute_error, count: matching.len() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::BiasType;
    use super::JoinedPair;
    use super::build_report;
    use cogitate_core::ThinkingMode;

    fn pair(confidence: f64, was_correct: bool) -> JoinedPair {
        JoinedPair { confidence, was_correct, mode: ThinkingMode::Linear }
    }

    #[test]
    fn single_bucket_accuracy_and_calibration_match_the_observed_proportion() {
        let pairs: Vec<JoinedPair> =
            (0..10).map(|i| pair(0.9, i < 6)).collect();
        let report = build_report(&pairs);
        assert_eq!(report.buckets.len(), 1);
        let bucket = &report.buckets[0];
        assert!((bucket.accuracy - 0.6).abs() < 1e-9);
        assert!((bucket.calibration - (0.6 - 0.95)).abs() < 1e-9);
    }

    #[test]
    fn ece_is_zero_when_every_bucket_is_perfectly_calibrated() {
        let pairs = vec![pair(0.95, true), pair(0.95, false)];
        let report = build_report(&pairs);
        assert!(report.ece < 1e-9);
        assert_eq!(report.bias.bias_type, BiasType::None);
    }

    #[test]
    fn overconfident_bias_is_classified_as_significant() {
        let pairs: Vec<JoinedPair> = (0..10).map(|i| pair(0.9, i < 6)).collect();
        let report = build_report(&pairs);
        assert_eq!(report.bias.bias_type, BiasType::Overconfident);
        assert!(report.bias.magnitude.abs() > 0.15);
        assert!(report.recommendations.iter().any(|r| r.contains("overconfidence")));
    }

    #[test]
    fn empty_input_reports_zero_statistics_and_a_cold_start_note() {
        let report = build_report(&[]);
        assert!(report.buckets.is_empty());
        assert_eq!(report.overall_accuracy, 0.0);
        assert_eq!(report.bias.bias_type, BiasType::None);
        assert!(report.recommendations.iter().any(|r| r.contains("cold start")));
    }

    #[test]
    fn per_mode_calibration_is_grouped_separately() {
        let mut pairs = vec![pair(0.9, true), pair(0.9, true)];
        pairs.push(JoinedPair { confidence: 0.5, was_correct: false, mode: ThinkingMode::Tree });
        let report = build_report(&pairs);
        assert_eq!(report.per_mode.len(), 2);
    }
}
