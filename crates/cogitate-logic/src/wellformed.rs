// cogitate-logic/src/wellformed.rs
// ============================================================================
// Module: Well-Formedness Checking
// Description: The CheckWellFormed operation's structural checks.
// Purpose: Flag statements that are too short, unbalanced, or otherwise
//          structurally broken before they ever reach the validator or the
//          proof engine.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Each statement is checked independently; every issue found is reported,
//! not just the first, since a statement can be malformed in more than one
//! way at once.

use serde::Deserialize;
use serde::Serialize;

/// Minimum trimmed length, in characters, for a statement to be considered
/// well-formed.
const MIN_STATEMENT_LENGTH: usize = 3;

/// Statements at or under this word count are exempt from the
/// "if without then" check — short conditionals like "I'll go if sunny"
/// read naturally without a "then".
const SHORT_CONDITIONAL_WORD_LIMIT: usize = 6;

/// Result of checking a single statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementCheck {
    /// True only when no issues were found.
    pub is_well_formed: bool,
    /// Every issue found, in check order; empty when well-formed.
    pub issues: Vec<String>,
}

/// Checks each of `statements` independently and returns one
/// [`StatementCheck`] per input, in the same order.
#[must_use]
pub fn check_well_formed(statements: &[String]) -> Vec<StatementCheck> {
    statements.iter().map(|statement| check_one(statement)).collect()
}

/// Runs every structural check against one statement and collects every
/// issue found.
fn check_one(statement: &str) -> StatementCheck {
    let mut issues = Vec::new();

    if let Some(issue) = empty_or_whitespace(statement) {
        issues.push(issue);
        return StatementCheck { is_well_formed: false, issues };
    }

    if let Some(issue) = too_short(statement) {
        issues.push(issue);
    }
    if let Some(issue) = missing_space(statement) {
        issues.push(issue);
    }
    if let Some(issue) = unbalanced_delimiters(statement) {
        issues.push(issue);
    }
    if let Some(issue) = doubled_operators(statement) {
        issues.push(issue);
    }
    if let Some(issue) = incomplete_conditional(statement) {
        issues.push(issue);
    }
    if let Some(issue) = unmatched_quotes(statement) {
        issues.push(issue);
    }
    if let Some(issue) = dangling_quantifier(statement) {
        issues.push(issue);
    }

    StatementCheck { is_well_formed: issues.is_empty(), issues }
}

/// Flags a statement that is empty or contains only whitespace.
fn empty_or_whitespace(statement: &str) -> Option<String> {
    if statement.trim().is_empty() {
        Some("statement is empty or whitespace-only".to_string())
    } else {
        None
    }
}

/// Flags a statement shorter than [`MIN_STATEMENT_LENGTH`] characters.
fn too_short(statement: &str) -> Option<String> {
    if statement.trim().chars().count() < MIN_STATEMENT_LENGTH {
        Some(format!("statement is shorter than {MIN_STATEMENT_LENGTH} characters"))
    } else {
        None
    }
}

/// Flags a statement with no internal space (a single token).
fn missing_space(statement: &str) -> Option<String> {
    if statement.trim().split_whitespace().count() < 2 {
        Some("statement is a single word".to_string())
    } else {
        None
    }
}

/// Flags unbalanced or mismatched parentheses, brackets, or braces.
fn unbalanced_delimiters(statement: &str) -> Option<String> {
    let mut stack = Vec::new();
    for ch in statement.chars() {
        match ch {
            '(' | '[' | '{' => stack.push(ch),
            ')' => {
                if stack.pop() != Some('(') {
                    return Some("unbalanced parentheses".to_string());
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return Some("unbalanced brackets".to_string());
                }
            }
            '}' => {
                if stack.pop() != Some('{') {
                    return Some("unbalanced braces".to_string());
                }
            }
            _ => {}
        }
    }
    if stack.is_empty() { None } else { Some("unclosed delimiter".to_string()) }
}

/// Flags the same logical operator repeated back to back ("and and").
fn doubled_operators(statement: &str) -> Option<String> {
    const OPERATORS: &[&str] = &["and", "or", "not", "if", "then"];
    let lower: Vec<String> = statement.to_lowercase().split_whitespace().map(str::to_string).collect();
    for window in lower.windows(2) {
        if window[0] == window[1] && OPERATORS.contains(&window[0].as_str()) {
            return Some(format!("doubled logical operator \"{} {}\"", window[0], window[1]));
        }
    }
    None
}

/// Flags a long statement that uses "if" without a matching "then".
fn incomplete_conditional(statement: &str) -> Option<String> {
    let lower = statement.to_lowercase();
    if !lower.starts_with("if ") && !lower.contains(" if ") {
        return None;
    }
    if lower.contains(" then ") {
        return None;
    }
    let word_count = lower.split_whitespace().count();
    if word_count <= SHORT_CONDITIONAL_WORD_LIMIT {
        return None;
    }
    Some("conditional uses \"if\" without a matching \"then\"".to_string())
}

/// Flags an odd number of straight double quotes.
fn unmatched_quotes(statement: &str) -> Option<String> {
    let count = statement.chars().filter(|ch| *ch == '"').count();
    if count % 2 == 1 { Some("unmatched double quote".to_string()) } else { None }
}

/// Flags a statement ending on a bare quantifier word with no predicate.
fn dangling_quantifier(statement: &str) -> Option<String> {
    const QUANTIFIERS: &[&str] = &["all", "some", "every", "any", "no", "none"];
    let trimmed = statement.trim().trim_end_matches(['.', '!', '?']);
    let Some(last_word) = trimmed.split_whitespace().last() else {
        return None;
    };
    if QUANTIFIERS.contains(&last_word.to_lowercase().as_str()) {
        Some(format!("statement ends with a dangling quantifier \"{last_word}\""))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::check_well_formed;

    fn one(statement: &str) -> super::StatementCheck {
        check_well_formed(std::slice::from_ref(&statement.to_string())).remove(0)
    }

    #[test]
    fn empty_statement_is_not_well_formed() {
        assert!(!one("   ").is_well_formed);
    }

    #[test]
    fn single_word_is_not_well_formed() {
        let check = one("hello");
        assert!(!check.is_well_formed);
        assert!(check.issues.iter().any(|issue| issue.contains("single word")));
    }

    #[test]
    fn unbalanced_parentheses_are_flagged() {
        let check = one("this statement (is missing its close");
        assert!(!check.is_well_formed);
    }

    #[test]
    fn doubled_operator_is_flagged() {
        let check = one("the cat sat and and the dog ran");
        assert!(!check.is_well_formed);
    }

    #[test]
    fn short_if_without_then_is_allowed() {
        let check = one("i will go if sunny");
        assert!(check.is_well_formed);
    }

    #[test]
    fn long_if_without_then_is_flagged() {
        let check = one(
            "if the committee approves the budget proposal next quarter we will finally start construction",
        );
        assert!(!check.is_well_formed);
    }

    #[test]
    fn unmatched_quote_is_flagged() {
        let check = one("she said \"hello and walked away");
        assert!(!check.is_well_formed);
    }

    #[test]
    fn dangling_quantifier_is_flagged() {
        let check = one("the votes were counted and all");
        assert!(!check.is_well_formed);
    }

    #[test]
    fn well_formed_statement_has_no_issues() {
        let check = one("the sky is blue today");
        assert!(check.is_well_formed);
        assert!(check.issues.is_empty());
    }
}
