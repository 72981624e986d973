// cogitate-core/src/core/errors.rs
// ============================================================================
// Module: Tool Error Taxonomy
// Description: The wire-level structured error shared by every tool handler.
// Purpose: Define `ErrorCode` and `ToolError`.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every tool invocation either succeeds with a JSON result or fails with a
//! [`ToolError`]. The code namespace is fixed: 1xxx resource, 2xxx
//! validation, 3xxx state, 4xxx external, 5xxx limit. Codes in 4xxx and
//! `rate_limited` (5001) are retryable; nothing else is.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Error Code
// ============================================================================

/// A code from the fixed wire-level error namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// 1000 - the referenced resource does not exist.
    NotFound,
    /// 1001 - a resource with this identifier already exists.
    AlreadyExists,
    /// 2000 - a parameter failed validation.
    InvalidParameter,
    /// 2001 - a required parameter was omitted.
    MissingRequired,
    /// 2002 - an unrecognized thinking mode was supplied.
    InvalidMode,
    /// 2003 - a confidence value fell outside `[0, 1]`.
    InvalidConfidence,
    /// 3000 - a session is already active.
    SessionAlreadyActive,
    /// 3001 - the referenced graph has already been finalized.
    GraphFinalized,
    /// 3002 - the referenced branch is locked against mutation.
    BranchLocked,
    /// 4000 - the embedding backend call failed.
    EmbeddingFailed,
    /// 4001 - the LLM backend call failed.
    LlmCallFailed,
    /// 4002 - the storage backend reported an operation failure.
    StorageOperationFailed,
    /// 5001 - caller exceeded the configured rate limit.
    RateLimited,
    /// 5002 - the reasoning context grew beyond the configured size limit.
    ContextTooLarge,
    /// 5003 - too many branches are open concurrently.
    TooManyBranches,
    /// 5004 - recursion/traversal exceeded the configured maximum depth.
    MaxDepthReached,
}

impl ErrorCode {
    /// Returns the fixed numeric code on the wire.
    #[must_use]
    pub const fn numeric(self) -> u32 {
        match self {
            Self::NotFound => 1000,
            Self::AlreadyExists => 1001,
            Self::InvalidParameter => 2000,
            Self::MissingRequired => 2001,
            Self::InvalidMode => 2002,
            Self::InvalidConfidence => 2003,
            Self::SessionAlreadyActive => 3000,
            Self::GraphFinalized => 3001,
            Self::BranchLocked => 3002,
            Self::EmbeddingFailed => 4000,
            Self::LlmCallFailed => 4001,
            Self::StorageOperationFailed => 4002,
            Self::RateLimited => 5001,
            Self::ContextTooLarge => 5002,
            Self::TooManyBranches => 5003,
            Self::MaxDepthReached => 5004,
        }
    }

    /// Returns true for 4xxx codes and `rate_limited` (5001), the only
    /// codes a caller may usefully retry.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::EmbeddingFailed
                | Self::LlmCallFailed
                | Self::StorageOperationFailed
                | Self::RateLimited
        )
    }
}

// ============================================================================
// SECTION: Tool Error
// ============================================================================

/// The structured error body returned by any tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Fixed-namespace error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Optional machine-readable detail payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Suggested remediations for the caller.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recovery_suggestions: Vec<String>,
    /// Names of tools related to resolving this error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_tools: Vec<String>,
    /// A worked example of a corrected call, when one can be offered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_fix: Option<Value>,
}

impl ToolError {
    /// Builds a bare error carrying only a code and message.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            recovery_suggestions: Vec::new(),
            related_tools: Vec::new(),
            example_fix: None,
        }
    }

    /// Returns true if a caller may usefully retry this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Attaches recovery suggestions, replacing any already present.
    #[must_use]
    pub fn with_recovery_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.recovery_suggestions = suggestions;
        self
    }

    /// Attaches related tool names, replacing any already present.
    #[must_use]
    pub fn with_related_tools(mut self, tools: Vec<String>) -> Self {
        self.related_tools = tools;
        self
    }

    /// Attaches a machine-readable detail payload.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.numeric(), self.message)
    }
}

impl std::error::Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use super::ToolError;

    #[test]
    fn fourxxx_and_rate_limited_are_retryable() {
        assert!(ErrorCode::EmbeddingFailed.is_retryable());
        assert!(ErrorCode::LlmCallFailed.is_retryable());
        assert!(ErrorCode::StorageOperationFailed.is_retryable());
        assert!(ErrorCode::RateLimited.is_retryable());
    }

    #[test]
    fn resource_and_validation_codes_are_not_retryable() {
        assert!(!ErrorCode::NotFound.is_retryable());
        assert!(!ErrorCode::AlreadyExists.is_retryable());
        assert!(!ErrorCode::InvalidParameter.is_retryable());
    }

    #[test]
    fn numeric_codes_match_the_fixed_namespace() {
        assert_eq!(ErrorCode::NotFound.numeric(), 1000);
        assert_eq!(ErrorCode::InvalidParameter.numeric(), 2000);
        assert_eq!(ErrorCode::SessionAlreadyActive.numeric(), 3000);
        assert_eq!(ErrorCode::EmbeddingFailed.numeric(), 4000);
        assert_eq!(ErrorCode::RateLimited.numeric(), 5001);
    }

    #[test]
    fn builder_attaches_optional_fields() {
        let err = ToolError::new(ErrorCode::NotFound, "thought not found")
            .with_recovery_suggestions(vec!["check the id".to_string()])
            .with_related_tools(vec!["get-thought".to_string()]);
        assert_eq!(err.recovery_suggestions.len(), 1);
        assert_eq!(err.related_tools.len(), 1);
    }
}
