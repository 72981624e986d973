// cogitate-logic/src/normalize.rs
// ============================================================================
// Module: Statement Normalization
// Description: Shared text-normalization helpers used by every inference rule.
// Purpose: Lowercase, strip articles, detect negation, split conditionals,
//          and singularize nouns (including irregular plurals).
// Dependencies: none
// ============================================================================

//! ## Overview
//! Every rule in [`crate::inference`] and every check in
//! [`crate::contradiction`] normalizes its operands through these helpers
//! first, so that "The cat is happy" and "cat is happy" compare equal.

// ============================================================================
// SECTION: Irregular Plurals
// ============================================================================

/// Irregular plural/singular pairs consulted before the default `-s` rule.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

/// Verb connectives permitted between a subject and its predicate in
/// universal-instantiation matching.
pub const PERMITTED_CONNECTIVES: &[&str] = &["are", "have", "can", "do", "write", "create", "make"];

// ============================================================================
// SECTION: Basic Normalization
// ============================================================================

/// Lowercases and collapses internal whitespace.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips leading/embedded indefinite and definite articles as standalone
/// tokens ("a", "an", "the").
#[must_use]
pub fn strip_articles(text: &str) -> String {
    text.split_whitespace()
        .filter(|token| !matches!(*token, "a" | "an" | "the"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fully normalizes a statement: lowercase, whitespace-collapsed, articles
/// elided.
#[must_use]
pub fn canonical(text: &str) -> String {
    strip_articles(&normalize(text))
}

/// Returns the singular form of `word`, consulting the irregular table
/// before falling back to stripping a trailing `s`.
#[must_use]
pub fn singularize(word: &str) -> String {
    for (plural, singular) in IRREGULAR_PLURALS {
        if word == *plural {
            return (*singular).to_string();
        }
    }
    word.strip_suffix('s').map_or_else(|| word.to_string(), ToString::to_string)
}

// ============================================================================
// SECTION: Negation
// ============================================================================

/// Returns true when `text` contains a negation marker: a bare "not "/" not"
/// token, an `n't` contraction, or a leading "not " prefix.
#[must_use]
pub fn is_negated(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.starts_with("not ")
        || lower.contains(" not ")
        || lower.ends_with(" not")
        || lower.contains("n't")
}

/// Returns `text` with its negation marker removed, if any. Idempotent on
/// already-affirmative text.
#[must_use]
pub fn strip_negation(text: &str) -> String {
    let lower = normalize(text);
    let without_not = lower.replace(" not ", " ").replace("n't", "");
    without_not
        .strip_prefix("not ")
        .map_or(without_not.clone(), ToString::to_string)
        .trim()
        .to_string()
}

/// Returns the negated form of `text`, prefixing "not " if not already
/// negated.
#[must_use]
pub fn negate(text: &str) -> String {
    if is_negated(text) {
        text.to_string()
    } else {
        format!("not {}", text.trim())
    }
}

// ============================================================================
// SECTION: Conditional Splitting
// ============================================================================

/// An antecedent/consequent pair extracted from a conditional statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    /// The "if" clause.
    pub antecedent: String,
    /// The "then" clause.
    pub consequent: String,
}

/// Attempts to split a statement into antecedent/consequent, recognizing
/// "if P then Q", "if P, Q", and "P implies Q" forms.
#[must_use]
pub fn split_conditional(text: &str) -> Option<Conditional> {
    let lower = normalize(text);

    if let Some(rest) = lower.strip_prefix("if ") {
        if let Some((antecedent, consequent)) = rest.split_once(" then ") {
            return Some(Conditional {
                antecedent: canonical(antecedent),
                consequent: canonical(consequent),
            });
        }
        if let Some((antecedent, consequent)) = rest.split_once(", ") {
            return Some(Conditional {
                antecedent: canonical(antecedent),
                consequent: canonical(consequent),
            });
        }
        return None;
    }

    if let Some((antecedent, consequent)) = lower.split_once(" implies ") {
        return Some(Conditional {
            antecedent: canonical(antecedent),
            consequent: canonical(consequent),
        });
    }

    None
}

/// Attempts to split a disjunction ("P or Q") into its two disjuncts.
#[must_use]
pub fn split_disjunction(text: &str) -> Option<(String, String)> {
    let lower = canonical(text);
    lower.split_once(" or ").map(|(left, right)| (left.trim().to_string(), right.trim().to_string()))
}

// ============================================================================
// SECTION: Categorical Statement Parsing
// ============================================================================

/// Parses "all X are Y" into `(X, Y)`.
#[must_use]
pub fn parse_all(text: &str) -> Option<(String, String)> {
    let rest = canonical(text).strip_prefix("all ")?.to_string();
    rest.split_once(" are ").map(|(s, p)| (s.trim().to_string(), p.trim().to_string()))
}

/// Parses "no X are Y" into `(X, Y)`.
#[must_use]
pub fn parse_no(text: &str) -> Option<(String, String)> {
    let rest = canonical(text).strip_prefix("no ")?.to_string();
    rest.split_once(" are ").map(|(s, p)| (s.trim().to_string(), p.trim().to_string()))
}

/// Parses "some X are Y" into `(X, Y)`.
#[must_use]
pub fn parse_some(text: &str) -> Option<(String, String)> {
    let rest = canonical(text).strip_prefix("some ")?.to_string();
    rest.split_once(" are ").map(|(s, p)| (s.trim().to_string(), p.trim().to_string()))
}

/// Parses "Z is Y" into `(Z, Y)`.
#[must_use]
pub fn parse_is(text: &str) -> Option<(String, String)> {
    canonical(text).split_once(" is ").map(|(s, p)| (s.trim().to_string(), p.trim().to_string()))
}

/// Parses "all X `connective` Y" into `(X, connective, Y)`, trying each
/// permitted connective in turn.
#[must_use]
pub fn parse_universal_connective(text: &str) -> Option<(String, &'static str, String)> {
    let rest = canonical(text).strip_prefix("all ")?.to_string();
    for connective in PERMITTED_CONNECTIVES {
        let marker = format!(" {connective} ");
        if let Some((subject, predicate)) = rest.split_once(&marker) {
            return Some((subject.trim().to_string(), connective, predicate.trim().to_string()));
        }
    }
    None
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
    fn canonical_strips_articles_and_lowercases() {
        assert_eq!(canonical("The Cat is Happy"), "cat is happy");
    }

    #[test]
    fn singularize_consults_the_irregular_table() {
        assert_eq!(singularize("men"), "man");
        assert_eq!(singularize("dogs"), "dog");
    }

    #[test]
    fn negation_is_detected_in_several_forms() {
        assert!(is_negated("not happy"));
        assert!(is_negated("it is not happy"));
        assert!(is_negated("it isn't happy"));
        assert!(!is_negated("happy"));
    }

    #[test]
    fn split_conditional_recognizes_if_then_and_implies() {
        let a = split_conditional("If it rains then the ground is wet").unwrap();
        assert_eq!(a.antecedent, "it rains");
        assert_eq!(a.consequent, "ground is wet");

        let b = split_conditional("it rains implies the ground is wet").unwrap();
        assert_eq!(b.antecedent, "it rains");
        assert_eq!(b.consequent, "ground is wet");

        let c = split_conditional("If it rains, the ground is wet").unwrap();
        assert_eq!(c.antecedent, "it rains");
        assert_eq!(c.consequent, "ground is wet");
    }

    #[test]
    fn split_disjunction_recognizes_or() {
        let (left, right) = split_disjunction("It is red or it is blue").unwrap();
        assert_eq!(left, "it is red");
        assert_eq!(right, "it is blue");
    }
}
