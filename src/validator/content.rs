//! Input content classification
//!
//! Defines the tagged union of input shapes the validator accepts and the
//! explicit classification step that routes each input to its verification
//! strategy. Raw strings are normalized here before any classification.

use serde_yaml::{Mapping, Value};

/// Content accepted by the validator.
///
/// Callers usually build this through one of the `From` conversions rather
/// than naming a variant directly.
#[derive(Debug, Clone)]
pub enum YamlContent {
    /// Raw YAML text, e.g. from a textarea or a file.
    Text(String),
    /// An ordered list of YAML snippets, validated one by one.
    Snippets(Vec<String>),
    /// Already-decoded associative data.
    Structured(Mapping),
    /// Any other already-decoded value.
    Value(Value),
}

impl YamlContent {
    /// Origin type label used in `validation_type` strings.
    pub fn type_label(&self) -> &'static str {
        match self {
            YamlContent::Text(_) => "string",
            YamlContent::Snippets(_) => "list",
            YamlContent::Structured(_) => "mapping",
            YamlContent::Value(_) => "value",
        }
    }

    /// True when there is nothing to validate: blank text, an empty list,
    /// an empty mapping or a decoded null.
    pub fn is_empty(&self) -> bool {
        match self {
            YamlContent::Text(s) => s.trim().is_empty(),
            YamlContent::Snippets(items) => items.is_empty(),
            YamlContent::Structured(map) => map.is_empty(),
            YamlContent::Value(value) => value.is_null(),
        }
    }
}

impl From<&str> for YamlContent {
    fn from(text: &str) -> Self {
        YamlContent::Text(text.to_string())
    }
}

impl From<String> for YamlContent {
    fn from(text: String) -> Self {
        YamlContent::Text(text)
    }
}

impl From<Vec<String>> for YamlContent {
    fn from(snippets: Vec<String>) -> Self {
        YamlContent::Snippets(snippets)
    }
}

impl From<Vec<&str>> for YamlContent {
    fn from(snippets: Vec<&str>) -> Self {
        YamlContent::Snippets(snippets.into_iter().map(str::to_string).collect())
    }
}

impl From<Mapping> for YamlContent {
    fn from(map: Mapping) -> Self {
        YamlContent::Structured(map)
    }
}

impl From<Value> for YamlContent {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => YamlContent::Text(text),
            Value::Mapping(map) => YamlContent::Structured(map),
            Value::Sequence(items) if items.iter().all(Value::is_string) => {
                YamlContent::Snippets(
                    items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(s) => s,
                            _ => unreachable!("sequence checked to contain only strings"),
                        })
                        .collect(),
                )
            }
            other => YamlContent::Value(other),
        }
    }
}

/// Input shape decided by [`classify`].
#[derive(Debug, Clone)]
pub enum Shape {
    /// Nothing to validate.
    Empty,
    /// Raw text to be parsed, already normalized.
    RawText(String),
    /// List of snippets to validate individually.
    Snippets(Vec<String>),
    /// Associative data to round-trip through the codec.
    Structured(Mapping),
    /// A bare decoded scalar.
    Scalar(Value),
    /// A decoded value no strategy applies to.
    Unsupported(Value),
}

/// Classify content into the shape that selects its verification strategy.
pub fn classify(content: YamlContent) -> Shape {
    if content.is_empty() {
        return Shape::Empty;
    }
    match content {
        YamlContent::Text(text) => Shape::RawText(normalize_newlines(&text)),
        YamlContent::Snippets(items) => Shape::Snippets(items),
        YamlContent::Structured(map) => Shape::Structured(map),
        YamlContent::Value(value) => match value {
            Value::Bool(_) | Value::Number(_) => Shape::Scalar(value),
            Value::String(text) => Shape::RawText(normalize_newlines(&text)),
            other => Shape::Unsupported(other),
        },
    }
}

/// Replace literal escaped line-break sequences with real newlines.
///
/// Inputs arriving from textarea fields or serialized storage carry `\r\n`,
/// `\r` and `\n` as two-character backslash pairs instead of newline bytes.
/// The two-character CRLF pair is handled before the single-letter pairs so
/// it collapses to one newline.
pub fn normalize_newlines(input: &str) -> String {
    input
        .replace("\\r\\n", "\n")
        .replace("\\r", "\n")
        .replace("\\n", "\n")
}
