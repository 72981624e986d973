// cogitate-logic/src/fallacy_validator.rs
// ============================================================================
// Module: Validator Fallacy Checks
// Description: The two fallacy checks ValidateThought runs, distinct from
//              the full FallacyDetector catalog.
// Purpose: Detect circular reasoning and false dichotomy within one
//          statement's content.
// Dependencies: crate::normalize
// ============================================================================

//! ## Overview
//! `ValidateThought` runs only these two fallacy checks inline; the broader
//! twenty-one-type catalog lives in [`crate::fallacy_detector`] behind the
//! separate `DetectFallacies` operation.

use crate::normalize::canonical;

/// Runs the validator's fallacy checks, returning the first reason found.
#[must_use]
pub fn check_validator_fallacies(content_lower: &str) -> Option<String> {
    circular_reasoning(content_lower).or_else(|| false_dichotomy(content_lower))
}

/// Fraction of the smaller word set's words that also appear in the other.
fn word_overlap_ratio(a: &str, b: &str) -> f64 {
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }
    let shared = a_words.iter().filter(|word| b_words.contains(word)).count();
    let smaller = a_words.len().min(b_words.len());
    #[allow(
        clippy::cast_precision_loss,
        reason = "word counts are small enough to round-trip through f64 exactly"
    )]
    {
        shared as f64 / smaller as f64
    }
}

/// Flags a "because" clause whose conclusion largely restates its premise.
fn circular_reasoning(content_lower: &str) -> Option<String> {
    let (conclusion, premise) = content_lower.split_once(" because ")?;
    let conclusion = canonical(conclusion);
    let premise = canonical(premise);
    if word_overlap_ratio(&conclusion, &premise) >= 0.6 {
        Some(format!(
            "circular reasoning: conclusion \"{conclusion}\" restates its premise \"{premise}\""
        ))
    } else {
        None
    }
}

/// Flags an "either/or" framing with no acknowledged third option.
fn false_dichotomy(content_lower: &str) -> Option<String> {
    if !content_lower.contains("either") || !content_lower.contains(" or ") {
        return None;
    }
    let acknowledges_alternatives = content_lower.contains("other option")
        || content_lower.contains("could also")
        || content_lower.contains("might also")
        || content_lower.contains("or perhaps")
        || content_lower.contains("alternatively");
    if acknowledges_alternatives {
        None
    } else {
        Some("false dichotomy: \"either/or\" framing with no acknowledged alternative".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::check_validator_fallacies;

    #[test]
    fn detects_circular_reasoning() {
        let reason = check_validator_fallacies("the law is just because it is just");
        assert!(reason.is_some());
    }

    #[test]
    fn detects_false_dichotomy() {
        let reason = check_validator_fallacies("either we cut spending or the economy collapses");
        assert!(reason.is_some());
    }

    #[test]
    fn acknowledged_alternatives_are_not_a_false_dichotomy() {
        let reason = check_validator_fallacies(
            "either we cut spending or the economy collapses, though other options exist",
        );
        assert!(reason.is_none());
    }

    #[test]
    fn unrelated_premise_is_not_circular() {
        let reason = check_validator_fallacies("the bridge collapsed because of metal fatigue");
        assert!(reason.is_none());
    }
}
