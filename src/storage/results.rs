//! Storage result types
//!
//! Defines result structures returned by storage operations.

/// Which operation is in progress, used to phrase failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Save,
}

impl Stage {
    /// Action label for composed messages.
    pub fn action(self) -> &'static str {
        match self {
            Stage::Load => "Loading",
            Stage::Save => "Saving",
        }
    }
}

/// Outcome of the last load or save operation.
///
/// Replaced at the start of every operation. Validator error codes are
/// forwarded verbatim, so `error_code` spans both taxonomies.
#[derive(Debug, Clone)]
pub struct OperationInfo {
    pub error_code: u8,
    pub error_text: String,
}

impl Default for OperationInfo {
    fn default() -> Self {
        OperationInfo {
            error_code: 0,
            error_text: String::new(),
        }
    }
}
