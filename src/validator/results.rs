//! Validator result types
//!
//! Defines result structures returned by validation operations.

use serde_yaml::Value;

use crate::error::ValidatorCode;

/// Outcome of validating a single snippet within a list.
#[derive(Debug, Clone)]
pub struct SnippetReport {
    pub index: usize,
    pub valid: bool,
    /// Original snippet text, kept verbatim.
    pub yaml: String,
    pub parsed: Option<Value>,
    pub error: Option<String>,
}

/// Diagnostic payload attached to a validation result.
#[derive(Debug, Clone)]
pub enum DebugInfo {
    None,
    /// Raw text input, echoed back after normalization.
    Raw(String),
    /// Already-decoded input, echoed back.
    Value(Value),
    /// Per-snippet breakdown for list inputs.
    Snippets(Vec<SnippetReport>),
}

/// Full outcome of the last validation attempt.
///
/// Invariant: `pass` is true iff `error_code` is `Success` iff `parsed` is set.
/// The record is replaced wholesale on every call, nothing accumulates.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub pass: bool,
    /// Human-readable classification plus the origin input type.
    pub validation_type: String,
    pub error_code: ValidatorCode,
    /// Short error label.
    pub error: String,
    /// Detailed cause, empty on success.
    pub error_description: String,
    /// Decoded structure, present only when validation passed.
    pub parsed: Option<Value>,
    /// Canonical YAML text representation.
    pub yaml: Option<String>,
    pub debug: DebugInfo,
}

impl Default for ValidationResult {
    fn default() -> Self {
        ValidationResult {
            pass: false,
            validation_type: String::new(),
            error_code: ValidatorCode::NoData,
            error: ValidatorCode::NoData.to_string(),
            error_description: String::from("No validation has been performed"),
            parsed: None,
            yaml: None,
            debug: DebugInfo::None,
        }
    }
}
