//! Verification strategies
//!
//! Per-snippet parsing for lists of YAML strings and the dump/re-parse round
//! trip for structured data.

use serde_yaml::{Mapping, Value};

use super::results::SnippetReport;

/// Parse one snippet and record the outcome under its list index.
pub fn check_snippet(snippet: &str, index: usize) -> SnippetReport {
    match serde_yaml::from_str::<Value>(snippet) {
        Ok(parsed) => SnippetReport {
            index,
            valid: true,
            yaml: snippet.to_string(),
            parsed: Some(parsed),
            error: None,
        },
        Err(err) => SnippetReport {
            index,
            valid: false,
            yaml: snippet.to_string(),
            parsed: None,
            error: Some(err.to_string()),
        },
    }
}

/// Outcome of checking a whole list of snippets.
#[derive(Debug)]
pub struct SnippetListOutcome {
    pub pass: bool,
    pub reports: Vec<SnippetReport>,
    /// Canonical dump of the full list, present only when every snippet parsed.
    pub yaml: Option<String>,
    /// The original snippet list, preserved verbatim, only on overall success.
    pub parsed: Option<Value>,
}

/// Validate every snippet independently; overall success is the AND of all
/// element validities. The parsed value keeps the original strings rather
/// than their decoded forms, so input fidelity is preserved.
pub fn check_snippet_list(snippets: &[String]) -> SnippetListOutcome {
    let reports: Vec<SnippetReport> = snippets
        .iter()
        .enumerate()
        .map(|(index, snippet)| check_snippet(snippet, index))
        .collect();
    let pass = reports.iter().all(|report| report.valid);

    if !pass {
        return SnippetListOutcome {
            pass,
            reports,
            yaml: None,
            parsed: None,
        };
    }

    let yaml = serde_yaml::to_string(&snippets).ok();
    let parsed = Value::Sequence(
        snippets
            .iter()
            .map(|snippet| Value::String(snippet.clone()))
            .collect(),
    );
    SnippetListOutcome {
        pass,
        reports,
        yaml,
        parsed: Some(parsed),
    }
}

/// Join the messages of the failing snippets, in original order.
pub fn pack_snippet_errors(reports: &[SnippetReport]) -> String {
    reports
        .iter()
        .filter(|report| !report.valid)
        .filter_map(|report| report.error.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Outcome of the structured round-trip check.
#[derive(Debug)]
pub enum StructuredOutcome {
    /// Dump and re-parse reproduced the original exactly.
    Valid { yaml: String, parsed: Value },
    /// The codec round trip silently altered the data, e.g. by coercing a
    /// numeric-looking string.
    Mismatch { yaml: String, reparsed: Value },
    /// The codec itself rejected the data.
    SyntaxError(String),
}

/// Dump the mapping to canonical YAML, re-parse it, and require the re-parsed
/// value to match the original structurally.
pub fn check_structured(map: &Mapping) -> StructuredOutcome {
    let yaml = match serde_yaml::to_string(map) {
        Ok(yaml) => yaml,
        Err(err) => return StructuredOutcome::SyntaxError(err.to_string()),
    };
    let reparsed: Value = match serde_yaml::from_str(&yaml) {
        Ok(value) => value,
        Err(err) => return StructuredOutcome::SyntaxError(err.to_string()),
    };

    let original = Value::Mapping(map.clone());
    if round_trip_matches(&original, &reparsed) {
        StructuredOutcome::Valid {
            yaml,
            parsed: reparsed,
        }
    } else {
        StructuredOutcome::Mismatch { yaml, reparsed }
    }
}

/// Structural equality on the JSON-serialized forms, so key order and exact
/// numeric and boolean round trips matter. Values that cannot be represented
/// as JSON (non-string mapping keys) fall back to direct comparison.
fn round_trip_matches(original: &Value, reparsed: &Value) -> bool {
    match (
        serde_json::to_string(original),
        serde_json::to_string(reparsed),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => original == reparsed,
    }
}
