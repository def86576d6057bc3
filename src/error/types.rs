//! Error code taxonomies
//!
//! Defines the numeric error codes reported by the storage and validator
//! components. The numeric values are part of the public contract: storage
//! forwards validator codes verbatim, so the two ranges never overlap.

use std::fmt;

/// Error codes reported by [`crate::storage::YamlStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StorageCode {
    Success = 0,
    EmptyPath = 1,
    FileNotFound = 2,
    FileNotReadable = 3,
    FileNotWritable = 4,
    ReadFailed = 5,
    EmptyFile = 6,
    NoYamlData = 7,
    WriteFailed = 8,
    NoData = 9,
}

impl StorageCode {
    /// Numeric value stored in operation info records.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for StorageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageCode::Success => write!(f, "success"),
            StorageCode::EmptyPath => write!(f, "empty file path"),
            StorageCode::FileNotFound => write!(f, "file not found"),
            StorageCode::FileNotReadable => write!(f, "file not readable"),
            StorageCode::FileNotWritable => write!(f, "file not writable"),
            StorageCode::ReadFailed => write!(f, "file read failed"),
            StorageCode::EmptyFile => write!(f, "file is empty"),
            StorageCode::NoYamlData => write!(f, "no YAML data"),
            StorageCode::WriteFailed => write!(f, "file write failed"),
            StorageCode::NoData => write!(f, "no data provided"),
        }
    }
}

/// Error codes reported by [`crate::validator::YamlValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValidatorCode {
    Success = 0,
    ValidationFailed = 10,
    ScalarValue = 11,
    ParseFailed = 12,
    UnsupportedType = 13,
    NoData = 14,
}

impl ValidatorCode {
    /// Numeric value stored in result records.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ValidatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorCode::Success => write!(f, "YAML validation passed"),
            ValidatorCode::ValidationFailed => write!(f, "YAML validation failed"),
            ValidatorCode::ScalarValue => write!(f, "Scalar value"),
            ValidatorCode::ParseFailed => write!(f, "Conversion to yaml failed"),
            ValidatorCode::UnsupportedType => write!(f, "Unsupported input type"),
            ValidatorCode::NoData => write!(f, "No data to validate"),
        }
    }
}
