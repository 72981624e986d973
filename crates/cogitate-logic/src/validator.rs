// cogitate-logic/src/validator.rs
// ============================================================================
// Module: Thought Validation
// Description: The ValidateThought operation, combining contradiction
//              detection with the validator's two inline fallacy checks.
// Purpose: Give a single pass/fail verdict plus a human-readable reason for
//          one piece of thought content.
// Dependencies: crate::contradiction, crate::fallacy_validator
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::contradiction::check_contradictions;
use crate::fallacy_validator::check_validator_fallacies;

/// Outcome of validating one statement's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// False when a contradiction or fallacy was found.
    pub is_valid: bool,
    /// The reason validation failed, if it did.
    pub reason: Option<String>,
}

/// Runs contradiction detection followed by the validator's fallacy checks
/// against lowercased `content`, stopping at the first issue found.
#[must_use]
pub fn validate_thought(content: &str) -> ValidationOutcome {
    let content_lower = content.to_lowercase();
    let reason = check_contradictions(&content_lower).or_else(|| check_validator_fallacies(&content_lower));
    ValidationOutcome { is_valid: reason.is_none(), reason }
}

#[cfg(test)]
mod tests {
    use super::validate_thought;

    #[test]
    fn contradictory_content_is_invalid() {
        let outcome = validate_thought("The claim is true, the claim is false.");
        assert!(!outcome.is_valid);
        assert!(outcome.reason.is_some());
    }

    #[test]
    fn circular_content_is_invalid() {
        let outcome = validate_thought("The law is just because it is a just law.");
        assert!(!outcome.is_valid);
    }

    #[test]
    fn well_formed_content_is_valid() {
        let outcome = validate_thought("The sky is blue today.");
        assert!(outcome.is_valid);
        assert!(outcome.reason.is_none());
    }
}
