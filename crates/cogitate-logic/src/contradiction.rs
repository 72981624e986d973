// cogitate-logic/src/contradiction.rs
// ============================================================================
// Module: Contradiction Detection
// Description: The nine contradiction heuristics run by ValidateThought.
// Purpose: Detect self-contradictory statements within one piece of content.
// Dependencies: crate::normalize
// ============================================================================

//! ## Overview
//! Each check is independent and stateless; [`check_contradictions`] runs
//! them in the fixed order the component design lists them in and returns
//! the first match's human-readable reason.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::normalize::canonical;
use crate::normalize::is_negated;
use crate::normalize::strip_negation;

// ============================================================================
// SECTION: Mutually Exclusive Terms
// ============================================================================

/// Fixed table of terms that cannot both truthfully describe the same
/// subject.
const MUTUALLY_EXCLUSIVE_PAIRS: &[(&str, &str)] = &[
    ("bachelor", "married"),
    ("dead", "alive"),
    ("single", "married"),
    ("empty", "full"),
    ("asleep", "awake"),
    ("legal", "illegal"),
    ("true", "false"),
    ("present", "absent"),
];

// ============================================================================
// SECTION: Top-Level Dispatch
// ============================================================================

/// Runs every contradiction heuristic against lowercased `content` in the
/// fixed priority order, returning the first reason found.
#[must_use]
pub fn check_contradictions(content_lower: &str) -> Option<String> {
    direct_true_false(content_lower)
        .or_else(|| mutually_exclusive_terms(content_lower))
        .or_else(|| numeric_impossibility(content_lower))
        .or_else(|| transitive_ordering_cycle(content_lower))
        .or_else(|| modal_contradiction(content_lower))
        .or_else(|| direct_negation(content_lower))
        .or_else(|| universal_quantifier_clash(content_lower))
        .or_else(|| necessity_vs_impossibility(content_lower))
        .or_else(|| existential_clash(content_lower))
}

/// Splits lowercased content into trimmed clauses on `,`/`;`/`.` and `and`.
fn clauses(content_lower: &str) -> Vec<&str> {
    content_lower
        .split([',', ';', '.'])
        .flat_map(|clause| clause.split(" and "))
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect()
}

// ============================================================================
// SECTION: 1. Direct X-true/X-false
// ============================================================================

/// Flags a subject asserted both "is true" and "is false".
fn direct_true_false(content_lower: &str) -> Option<String> {
    let mut trues = Vec::new();
    let mut falses = Vec::new();
    for clause in clauses(content_lower) {
        if let Some(subject) = clause.strip_suffix(" is true") {
            trues.push(subject.trim().to_string());
        } else if let Some(subject) = clause.strip_suffix(" is false") {
            falses.push(subject.trim().to_string());
        }
    }
    for subject in &trues {
        if falses.contains(subject) {
            return Some(format!("\"{subject}\" is asserted both true and false"));
        }
    }
    None
}

// ============================================================================
// SECTION: 2. Mutually Exclusive Term Pairs
// ============================================================================

/// Flags content containing both halves of a fixed mutually-exclusive pair.
fn mutually_exclusive_terms(content_lower: &str) -> Option<String> {
    for (left, right) in MUTUALLY_EXCLUSIVE_PAIRS {
        if content_lower.contains(left) && content_lower.contains(right) {
            return Some(format!("mutually exclusive terms \"{left}\" and \"{right}\" both appear"));
        }
    }
    None
}

// ============================================================================
// SECTION: 3. Numeric Impossibility
// ============================================================================

/// Finds `keyword` and parses the numeric token that immediately follows it.
fn extract_threshold<'a>(content_lower: &'a str, keyword: &str) -> Option<f64> {
    let idx = content_lower.find(keyword)?;
    let rest = &content_lower[idx + keyword.len()..];
    let token: String = rest
        .trim_start()
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    token.parse::<f64>().ok()
}

/// Flags an "above N" threshold that is not actually below a paired
/// "below M" threshold.
fn numeric_impossibility(content_lower: &str) -> Option<String> {
    let above = extract_threshold(content_lower, "above ").or_else(|| extract_threshold(content_lower, "over "));
    let below = extract_threshold(content_lower, "below ").or_else(|| extract_threshold(content_lower, "under "));
    match (above, below) {
        (Some(above_value), Some(below_value)) if above_value >= below_value => Some(format!(
            "numeric impossibility: above {above_value} and below {below_value} cannot both hold"
        )),
        _ => None,
    }
}

// ============================================================================
// SECTION: 4. Transitive Ordering Cycle
// ============================================================================

/// Parses every "X is greater than Y" / "X > Y" clause into ordered pairs.
fn extract_greater_than_pairs(content_lower: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for clause in clauses(content_lower) {
        if let Some((left, right)) = clause.split_once(" is greater than ") {
            pairs.push((left.trim().to_string(), right.trim().to_string()));
        } else if let Some((left, right)) = clause.split_once(" > ") {
            pairs.push((left.trim().to_string(), right.trim().to_string()));
        }
    }
    pairs
}

/// Walks the directed "greater than" chain from each pair's start looking
/// for a path back to itself.
fn transitive_ordering_cycle(content_lower: &str) -> Option<String> {
    let pairs = extract_greater_than_pairs(content_lower);
    if pairs.len() < 3 {
        return None;
    }
    for (start, _) in &pairs {
        let mut visited = vec![start.clone()];
        let mut current = start.clone();
        loop {
            let Some((_, next)) = pairs.iter().find(|(left, _)| *left == current) else {
                break;
            };
            if *next == *start {
                return Some(format!(
                    "transitive ordering cycle detected starting and ending at \"{start}\""
                ));
            }
            if visited.contains(next) {
                break;
            }
            visited.push(next.clone());
            current = next.clone();
        }
    }
    None
}

// ============================================================================
// SECTION: 5. Modal Contradiction
// ============================================================================

/// Flags the same subject asserted "necessarily" and "possibly" with
/// opposite negation polarity.
fn modal_contradiction(content_lower: &str) -> Option<String> {
    if !(content_lower.contains("necessarily") && content_lower.contains("possibly")) {
        return None;
    }
    for clause in clauses(content_lower) {
        let Some(necessarily_subject) = clause.strip_prefix("necessarily ") else {
            continue;
        };
        for other in clauses(content_lower) {
            let Some(possibly_subject) = other.strip_prefix("possibly ") else {
                continue;
            };
            let same_subject = canonical(strip_negation(possibly_subject).as_str())
                == canonical(strip_negation(necessarily_subject).as_str());
            if same_subject && is_negated(possibly_subject) != is_negated(necessarily_subject) {
                return Some(format!(
                    "modal contradiction: necessarily \"{necessarily_subject}\" conflicts with possibly \"{possibly_subject}\""
                ));
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 6. Direct Negation ("X and not X")
// ============================================================================

/// Flags one clause asserted alongside its own negated form.
fn direct_negation(content_lower: &str) -> Option<String> {
    let clauses = clauses(content_lower);
    for i in 0..clauses.len() {
        for j in 0..clauses.len() {
            if i == j {
                continue;
            }
            let a = clauses[i];
            let b = clauses[j];
            if is_negated(b) && canonical(strip_negation(b).as_str()) == canonical(a) && !is_negated(a) {
                return Some(format!("direct negation: \"{a}\" asserted alongside \"{b}\""));
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 7. Universal Quantifier Clash
// ============================================================================

/// Flags "all"/"none" or "always"/"never" both appearing in content.
fn universal_quantifier_clash(content_lower: &str) -> Option<String> {
    if content_lower.contains(" all ") && content_lower.contains(" none ") {
        return Some("universal quantifier clash: \"all\" and \"none\" both asserted".to_string());
    }
    if content_lower.contains("always") && content_lower.contains("never") {
        return Some("universal quantifier clash: \"always\" and \"never\" both asserted".to_string());
    }
    None
}

// ============================================================================
// SECTION: 8. Necessity vs Impossibility
// ============================================================================

/// Flags content asserting something is both "necessary" and "impossible".
fn necessity_vs_impossibility(content_lower: &str) -> Option<String> {
    if content_lower.contains("necessary") && content_lower.contains("impossible") {
        return Some(
            "modal contradiction: something is asserted both necessary and impossible".to_string(),
        );
    }
    None
}

// ============================================================================
// SECTION: 9. Existential Clash
// ============================================================================

/// Flags content asserting both that something exists and that it does not.
fn existential_clash(content_lower: &str) -> Option<String> {
    let has_exists = content_lower.contains("exists") || content_lower.contains("there is");
    let has_does_not_exist = content_lower.contains("does not exist")
        || content_lower.contains("doesn't exist")
        || content_lower.contains("there is no");
    if has_exists && has_does_not_exist {
        return Some("existential clash: existence and non-existence both asserted".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::check_contradictions;

    #[test]
    fn detects_direct_true_false() {
        let reason = check_contradictions("the claim is true, the claim is false");
        assert!(reason.is_some());
    }

    #[test]
    fn detects_mutually_exclusive_terms() {
        let reason = check_contradictions("he is a bachelor and he is married");
        assert!(reason.is_some());
    }

    #[test]
    fn detects_numeric_impossibility() {
        let reason = check_contradictions("the value is above 10 and below 5");
        assert!(reason.is_some());
    }

    #[test]
    fn allows_consistent_numeric_range() {
        let reason = check_contradictions("the value is above 5 and below 10");
        assert!(reason.is_none());
    }

    #[test]
    fn detects_transitive_ordering_cycle() {
        let reason =
            check_contradictions("a is greater than b, b is greater than c, c is greater than a");
        assert!(reason.is_some());
    }

    #[test]
    fn detects_universal_quantifier_clash() {
        let reason = check_contradictions("always winter and never summer");
        assert!(reason.is_some());
    }

    #[test]
    fn detects_existential_clash() {
        let reason = check_contradictions("a unicorn exists but there is no unicorn");
        assert!(reason.is_some());
    }

    #[test]
    fn well_formed_content_has_no_contradiction() {
        let reason = check_contradictions("the sky is blue today");
        assert!(reason.is_none());
    }
}
