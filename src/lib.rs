//! YAML Toolkit
//!
//! Tolerant validation for heterogeneous YAML input, plus a file storage
//! service that loads and saves YAML documents and reports failures through
//! the log facade and a user-notification port.

pub mod config;
pub mod error;
pub mod messenger;
pub mod storage;
pub mod validator;

pub use error::{StorageCode, ValidatorCode};
pub use storage::YamlStorage;
pub use validator::YamlValidator;
pub use validator::content::YamlContent;
