//! Tolerant YAML validation
//!
//! Accepts raw YAML text, lists of YAML snippets, or already-decoded
//! structured data, classifies the input and applies the matching
//! verification strategy. The full outcome of the last call is kept as a
//! result snapshot; calls are independent of each other.

pub mod checks;
pub mod content;
pub mod results;

use serde_yaml::{Mapping, Value};

use crate::error::ValidatorCode;
use checks::{StructuredOutcome, check_snippet_list, check_structured, pack_snippet_errors};
use content::{Shape, YamlContent, classify};
use results::{DebugInfo, ValidationResult};

/// Validates heterogeneous YAML input and records the last result.
#[derive(Debug, Default)]
pub struct YamlValidator {
    result: ValidationResult,
}

impl YamlValidator {
    pub fn new() -> Self {
        YamlValidator::default()
    }

    /// Validate the given content.
    ///
    /// Returns the overall pass flag; the full detail of the attempt is
    /// available through [`result`](Self::result) until the next call.
    pub fn check_yaml(&mut self, content: impl Into<YamlContent>) -> bool {
        let content = content.into();
        let origin = content.type_label();

        self.result = match classify(content) {
            Shape::Empty => Self::empty_result(),
            Shape::RawText(text) => Self::check_text(&text, origin),
            Shape::Snippets(snippets) => Self::check_snippets(&snippets, origin),
            Shape::Structured(map) => Self::check_mapping(&map, origin),
            Shape::Scalar(value) => Self::scalar_result(&value, origin),
            Shape::Unsupported(value) => Self::unsupported_result(value, origin),
        };
        self.result.pass
    }

    /// Detailed information from the last validation attempt.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Parse raw text once and re-route by the decoded shape.
    fn check_text(text: &str, origin: &str) -> ValidationResult {
        let decoded: Value = match serde_yaml::from_str(text) {
            Ok(value) => value,
            Err(err) => {
                return ValidationResult {
                    pass: false,
                    validation_type: format!("Without validation from input {origin}"),
                    error_code: ValidatorCode::ParseFailed,
                    error: ValidatorCode::ParseFailed.to_string(),
                    error_description: err.to_string(),
                    parsed: None,
                    yaml: None,
                    debug: DebugInfo::Raw(text.to_string()),
                };
            }
        };

        match decoded {
            Value::Mapping(map) => Self::check_mapping(&map, origin),
            Value::Sequence(items) if items.iter().all(Value::is_string) => {
                let snippets: Vec<String> = items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect();
                Self::check_snippets(&snippets, origin)
            }
            Value::Sequence(_) | Value::Tagged(_) => {
                Self::unsupported_result(decoded, origin)
            }
            scalar => Self::scalar_result(&scalar, origin),
        }
    }

    /// Validate each snippet of a list independently.
    fn check_snippets(snippets: &[String], origin: &str) -> ValidationResult {
        let outcome = check_snippet_list(snippets);
        let (error_code, error_description) = if outcome.pass {
            (ValidatorCode::Success, String::new())
        } else {
            (
                ValidatorCode::ValidationFailed,
                pack_snippet_errors(&outcome.reports),
            )
        };
        ValidationResult {
            pass: outcome.pass,
            validation_type: format!("Array of strings from input {origin}"),
            error_code,
            error: if outcome.pass {
                ValidatorCode::Success.to_string()
            } else {
                ValidatorCode::ValidationFailed.to_string()
            },
            error_description,
            parsed: outcome.parsed,
            yaml: outcome.yaml,
            debug: DebugInfo::Snippets(outcome.reports),
        }
    }

    /// Round-trip structured data through the codec and compare.
    fn check_mapping(map: &Mapping, origin: &str) -> ValidationResult {
        let validation_type = format!("Structured array from input {origin}");
        match check_structured(map) {
            StructuredOutcome::Valid { yaml, parsed } => ValidationResult {
                pass: true,
                validation_type,
                error_code: ValidatorCode::Success,
                error: ValidatorCode::Success.to_string(),
                error_description: String::new(),
                parsed: Some(parsed),
                yaml: Some(yaml),
                debug: DebugInfo::Value(Value::Mapping(map.clone())),
            },
            StructuredOutcome::Mismatch { yaml, reparsed } => ValidationResult {
                pass: false,
                validation_type,
                error_code: ValidatorCode::ValidationFailed,
                error: ValidatorCode::ValidationFailed.to_string(),
                error_description: String::from("Dumped YAML does not match the original array"),
                parsed: None,
                yaml: Some(yaml),
                debug: DebugInfo::Value(reparsed),
            },
            StructuredOutcome::SyntaxError(message) => ValidationResult {
                pass: false,
                validation_type,
                error_code: ValidatorCode::ParseFailed,
                error: ValidatorCode::ParseFailed.to_string(),
                error_description: message,
                parsed: None,
                yaml: None,
                debug: DebugInfo::Value(Value::Mapping(map.clone())),
            },
        }
    }

    /// Bare scalars carry no structural content to validate; the canonical
    /// dump is still produced for display.
    fn scalar_result(value: &Value, origin: &str) -> ValidationResult {
        ValidationResult {
            pass: false,
            validation_type: format!("Scalar from input {origin}"),
            error_code: ValidatorCode::ScalarValue,
            error: ValidatorCode::ScalarValue.to_string(),
            error_description: String::from("Scalar values are not evaluated"),
            parsed: None,
            yaml: serde_yaml::to_string(value).ok(),
            debug: DebugInfo::Value(value.clone()),
        }
    }

    fn unsupported_result(value: Value, origin: &str) -> ValidationResult {
        ValidationResult {
            pass: false,
            validation_type: format!("Without validation from input {origin}"),
            error_code: ValidatorCode::UnsupportedType,
            error: ValidatorCode::UnsupportedType.to_string(),
            error_description: String::from(
                "The input could not be matched to a validation strategy",
            ),
            parsed: None,
            yaml: None,
            debug: DebugInfo::Value(value),
        }
    }

    fn empty_result() -> ValidationResult {
        ValidationResult {
            pass: false,
            validation_type: String::from("Empty input"),
            error_code: ValidatorCode::NoData,
            error: ValidatorCode::NoData.to_string(),
            error_description: String::from("YAML validator received empty or null data"),
            parsed: None,
            yaml: None,
            debug: DebugInfo::None,
        }
    }
}
