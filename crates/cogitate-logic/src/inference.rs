// cogitate-logic/src/inference.rs
// ============================================================================
// Module: Proof Search
// Description: The nine inference rules behind the Prove operation.
// Purpose: Attempt each rule in declared priority and emit a stepwise trace.
// Dependencies: crate::normalize
// ============================================================================

//! ## Overview
//! [`prove`] tries each rule in the fixed order the component design lists
//! them in. The first rule that derives the conclusion wins; its own trace
//! becomes the result. If none fire, the trace lists every premise plus a
//! final "cannot prove" line — the trace is never empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::normalize::canonical;
use crate::normalize::is_negated;
use crate::normalize::parse_all;
use crate::normalize::parse_is;
use crate::normalize::parse_no;
use crate::normalize::parse_some;
use crate::normalize::parse_universal_connective;
use crate::normalize::singularize;
use crate::normalize::split_conditional;
use crate::normalize::split_disjunction;
use crate::normalize::strip_negation;

// ============================================================================
// SECTION: Result Type
// ============================================================================

/// Outcome of a [`prove`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResult {
    /// True if any rule derived the conclusion.
    pub is_provable: bool,
    /// Name of the rule that succeeded, if any.
    pub rule_used: Option<String>,
    /// Stepwise trace of the proof attempt; never empty.
    pub trace: Vec<String>,
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Attempts to prove `conclusion` from `premises` using the fixed rule
/// priority: modus ponens, modus tollens, hypothetical syllogism,
/// disjunctive syllogism, categorical syllogism (Barbara), negative
/// syllogism, negative instantiation, universal instantiation, direct
/// derivation.
#[must_use]
pub fn prove(premises: &[String], conclusion: &str) -> ProofResult {
    let rules: &[(&str, fn(&[String], &str) -> Option<Vec<String>>)] = &[
        ("modus_ponens", modus_ponens),
        ("modus_tollens", modus_tollens),
        ("hypothetical_syllogism", hypothetical_syllogism),
        ("disjunctive_syllogism", disjunctive_syllogism),
        ("categorical_syllogism_barbara", categorical_syllogism_barbara),
        ("negative_syllogism", negative_syllogism),
        ("negative_instantiation", negative_instantiation),
        ("universal_instantiation", universal_instantiation),
        ("direct_derivation", direct_derivation),
    ];

    for (name, rule) in rules {
        if let Some(trace) = rule(premises, conclusion) {
            return ProofResult {
                is_provable: true,
                rule_used: Some((*name).to_string()),
                trace,
            };
        }
    }

    let mut trace: Vec<String> = premises.iter().map(|p| format!("premise: {p}")).collect();
    trace.push(format!("cannot prove: \"{conclusion}\""));
    ProofResult {
        is_provable: false,
        rule_used: None,
        trace,
    }
}

/// True if either string contains the other as a substring (and both are non-empty).
fn contains_either_way(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

// ============================================================================
// SECTION: 1. Modus Ponens
// ============================================================================

/// P, if P then Q ⊢ Q.
fn modus_ponens(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let conclusion_c = canonical(conclusion);
    for premise in premises {
        let Some(cond) = split_conditional(premise) else {
            continue;
        };
        for other in premises {
            if std::ptr::eq(other, premise) || split_conditional(other).is_some() {
                continue;
            }
            let other_c = canonical(other);
            if contains_either_way(&other_c, &cond.antecedent)
                && contains_either_way(&conclusion_c, &cond.consequent)
            {
                return Some(vec![
                    format!("premise: {premise}"),
                    format!("premise: {other}"),
                    format!(
                        "modus ponens: antecedent \"{}\" satisfied, consequent \"{}\" derived",
                        cond.antecedent, cond.consequent
                    ),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 2. Modus Tollens
// ============================================================================

/// If P then Q, not Q ⊢ not P.
fn modus_tollens(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    if !is_negated(conclusion) {
        return None;
    }
    let negated_conclusion_subject = canonical(&strip_negation(conclusion));
    for premise in premises {
        let Some(cond) = split_conditional(premise) else {
            continue;
        };
        for other in premises {
            if std::ptr::eq(other, premise) || !is_negated(other) || split_conditional(other).is_some() {
                continue;
            }
            let other_subject = canonical(&strip_negation(other));
            if contains_either_way(&other_subject, &cond.consequent)
                && contains_either_way(&negated_conclusion_subject, &cond.antecedent)
            {
                return Some(vec![
                    format!("premise: {premise}"),
                    format!("premise: {other}"),
                    format!(
                        "modus tollens: consequent \"{}\" denied, antecedent \"{}\" denied",
                        cond.consequent, cond.antecedent
                    ),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 3. Hypothetical Syllogism
// ============================================================================

/// If P then Q, if Q then R ⊢ if P then R.
fn hypothetical_syllogism(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let Some(goal) = split_conditional(conclusion) else {
        return None;
    };
    for first in premises {
        let Some(first_cond) = split_conditional(first) else {
            continue;
        };
        for second in premises {
            if std::ptr::eq(first, second) {
                continue;
            }
            let Some(second_cond) = split_conditional(second) else {
                continue;
            };
            if contains_either_way(&first_cond.consequent, &second_cond.antecedent)
                && contains_either_way(&first_cond.antecedent, &goal.antecedent)
                && contains_either_way(&second_cond.consequent, &goal.consequent)
            {
                return Some(vec![
                    format!("premise: {first}"),
                    format!("premise: {second}"),
                    format!(
                        "hypothetical syllogism: if \"{}\" then \"{}\"",
                        first_cond.antecedent, second_cond.consequent
                    ),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 4. Disjunctive Syllogism
// ============================================================================

/// P or Q, not P ⊢ Q (or symmetrically, not Q ⊢ P).
fn disjunctive_syllogism(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let conclusion_c = canonical(conclusion);
    for premise in premises {
        let Some((left, right)) = split_disjunction(premise) else {
            continue;
        };
        for other in premises {
            if std::ptr::eq(other, premise) || !is_negated(other) || split_conditional(other).is_some() {
                continue;
            }
            let denied = canonical(&strip_negation(other));
            if contains_either_way(&denied, &left) && contains_either_way(&conclusion_c, &right) {
                return Some(vec![
                    format!("premise: {premise}"),
                    format!("premise: {other}"),
                    format!("disjunctive syllogism: \"{left}\" denied, \"{right}\" derived"),
                ]);
            }
            if contains_either_way(&denied, &right) && contains_either_way(&conclusion_c, &left) {
                return Some(vec![
                    format!("premise: {premise}"),
                    format!("premise: {other}"),
                    format!("disjunctive syllogism: \"{right}\" denied, \"{left}\" derived"),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 5. Categorical Syllogism (Barbara)
// ============================================================================

/// All M are P, all S are M ⊢ all S are P.
fn categorical_syllogism_barbara(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let Some((goal_subject, goal_predicate)) = parse_all(conclusion) else {
        return None;
    };
    for first in premises {
        let Some((middle, predicate)) = parse_all(first) else {
            continue;
        };
        for second in premises {
            if std::ptr::eq(first, second) {
                continue;
            }
            let Some((subject, middle_again)) = parse_all(second) else {
                continue;
            };
            if middle == middle_again
                && contains_either_way(&subject, &goal_subject)
                && contains_either_way(&predicate, &goal_predicate)
            {
                return Some(vec![
                    format!("premise: {first}"),
                    format!("premise: {second}"),
                    format!("categorical syllogism (Barbara): all {subject} are {predicate}"),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 6. Negative Syllogism (Ferio/Celarent)
// ============================================================================

/// No M are P, some S are M ⊢ some S are not P.
fn negative_syllogism(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let conclusion_c = canonical(conclusion);
    for first in premises {
        let Some((middle, predicate)) = parse_no(first) else {
            continue;
        };
        for second in premises {
            if std::ptr::eq(first, second) {
                continue;
            }
            let Some((subject, middle_again)) = parse_some(second) else {
                continue;
            };
            if middle != middle_again {
                continue;
            }
            let expected = format!("some {subject} are not {predicate}");
            if contains_either_way(&conclusion_c, &expected) {
                return Some(vec![
                    format!("premise: {first}"),
                    format!("premise: {second}"),
                    format!("negative syllogism: {expected}"),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 7. Negative Instantiation
// ============================================================================

/// No A are B, C is B ⊢ C is not A.
fn negative_instantiation(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let conclusion_c = canonical(conclusion);
    for first in premises {
        let Some((category_a, category_b)) = parse_no(first) else {
            continue;
        };
        for second in premises {
            if std::ptr::eq(first, second) {
                continue;
            }
            let Some((instance, predicate)) = parse_is(second) else {
                continue;
            };
            if !contains_either_way(&predicate, &category_b) {
                continue;
            }
            let expected = format!("{instance} is not {category_a}");
            if contains_either_way(&conclusion_c, &expected) {
                return Some(vec![
                    format!("premise: {first}"),
                    format!("premise: {second}"),
                    format!("negative instantiation: {expected}"),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 8. Universal Instantiation
// ============================================================================

/// All X (connective) Y, Z is an X ⊢ Z (connective) Y.
fn universal_instantiation(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let conclusion_c = canonical(conclusion);
    for first in premises {
        let Some((category, connective, predicate)) = parse_universal_connective(first) else {
            continue;
        };
        let category_singular = singularize(&category);
        for second in premises {
            if std::ptr::eq(first, second) {
                continue;
            }
            let Some((instance, named_category)) = parse_is(second) else {
                continue;
            };
            let named_singular = singularize(&named_category);
            if named_singular != category_singular && named_category != category {
                continue;
            }
            let expected = format!("{instance} {connective} {predicate}");
            if contains_either_way(&conclusion_c, &expected) {
                return Some(vec![
                    format!("premise: {first}"),
                    format!("premise: {second}"),
                    format!("universal instantiation: {expected}"),
                ]);
            }
        }
    }
    None
}

// ============================================================================
// SECTION: 9. Direct Derivation
// ============================================================================

/// Matches the conclusion directly against a whole premise, verbatim.
///
/// Never decomposes a conditional or disjunctive premise to match a part of
/// it against the conclusion — doing so would let any premise whose
/// antecedent or disjunct textually overlaps the conclusion stand in for a
/// proof, which affirms the consequent instead of deriving it.
fn direct_derivation(premises: &[String], conclusion: &str) -> Option<Vec<String>> {
    let conclusion_c = canonical(conclusion);

    if conclusion_c.is_empty() && !premises.is_empty() {
        return Some(vec!["direct derivation: empty conclusion is vacuously provable".to_string()]);
    }

    for premise in premises {
        let premise_c = canonical(premise);
        if contains_either_way(&premise_c, &conclusion_c) {
            return Some(vec![
                format!("premise: {premise}"),
                "direct derivation: conclusion matches premise".to_string(),
            ]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::prove;

    fn premises(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn modus_ponens_derives_the_consequent() {
        let result = prove(
            &premises(&["if it rains then the ground is wet", "it rains"]),
            "the ground is wet",
        );
        assert!(result.is_provable);
        assert_eq!(result.rule_used.as_deref(), Some("modus_ponens"));
    }

    #[test]
    fn modus_tollens_derives_the_negated_antecedent() {
        let result = prove(
            &premises(&["if the alarm is active then the light is on", "the light is not on"]),
            "the alarm is not active",
        );
        assert!(result.is_provable);
        assert_eq!(result.rule_used.as_deref(), Some("modus_tollens"));
    }

    #[test]
    fn hypothetical_syllogism_chains_two_conditionals() {
        let result = prove(
            &premises(&["if it rains then the ground is wet", "if the ground is wet then the game is cancelled"]),
            "if it rains then the game is cancelled",
        );
        assert!(result.is_provable);
        assert_eq!(result.rule_used.as_deref(), Some("hypothetical_syllogism"));
    }

    #[test]
    fn disjunctive_syllogism_derives_the_remaining_disjunct() {
        let result = prove(&premises(&["it is red or it is blue", "it is not red"]), "it is blue");
        assert!(result.is_provable);
        assert_eq!(result.rule_used.as_deref(), Some("disjunctive_syllogism"));
    }

    #[test]
    fn barbara_derives_the_transitive_category() {
        let result = prove(&premises(&["all men are mortal", "all greeks are men"]), "all greeks are mortal");
        assert!(result.is_provable);
        assert_eq!(result.rule_used.as_deref(), Some("categorical_syllogism_barbara"));
    }

    #[test]
    fn universal_instantiation_applies_the_category_to_an_instance() {
        let result = prove(&premises(&["all birds can fly", "tweety is a bird"]), "tweety can fly");
        assert!(result.is_provable);
        assert_eq!(result.rule_used.as_deref(), Some("universal_instantiation"));
    }

    #[test]
    fn unrelated_premises_cannot_prove_the_conclusion() {
        let result = prove(&premises(&["the sky is blue"]), "fish can fly");
        assert!(!result.is_provable);
        assert!(result.rule_used.is_none());
        assert!(result.trace.last().is_some_and(|line| line.contains("cannot prove")));
    }

    #[test]
    fn empty_conclusion_is_vacuously_provable() {
        let result = prove(&premises(&["something"]), "");
        assert!(result.is_provable);
    }

    #[test]
    fn affirming_the_consequent_is_not_provable() {
        let result =
            prove(&premises(&["if it rains then the ground is wet", "the ground is wet"]), "it rains");
        assert!(!result.is_provable);
        assert!(result.rule_used.is_none());
    }

    #[test]
    fn monotonicity_holds_under_an_irrelevant_extra_premise() {
        let base = prove(&premises(&["if it rains then the ground is wet", "it rains"]), "the ground is wet");
        let extended = prove(
            &premises(&["if it rains then the ground is wet", "it rains", "the sky is blue"]),
            "the ground is wet",
        );
        assert_eq!(base.is_provable, extended.is_provable);
    }
}
