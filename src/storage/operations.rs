//! Storage operations
//!
//! Loads and saves YAML files with content validation and uniform error
//! reporting. Every failure exits through the single `fail` funnel, so no
//! path skips logging or info recording.

use std::path::{Path, PathBuf};

use log::{error, info};
use serde_yaml::Value;

use crate::error::StorageCode;
use crate::messenger::{ConsoleMessenger, Messenger};
use crate::validator::YamlValidator;
use crate::validator::content::{YamlContent, normalize_newlines};
use crate::validator::results::ValidationResult;

use super::filesystem::{FileSystem, LocalFileSystem};
use super::results::{OperationInfo, Stage};
use super::scheme::{LocalSchemeDetector, SchemeDetector};

/// Logger channel used when the caller passes an empty one.
pub const DEFAULT_LOGGER_CHANNEL: &str = "default";

/// Loads and saves YAML files with validation and error reporting.
///
/// Operations are synchronous and request-scoped: one call fully completes
/// before returning, and the path and info fields are overwritten by each
/// call, so an instance must not be shared across concurrent operations.
pub struct YamlStorage {
    filesystem: Box<dyn FileSystem>,
    scheme_detector: Box<dyn SchemeDetector>,
    messenger: Box<dyn Messenger>,
    validator: YamlValidator,
    absolute_path: PathBuf,
    filename: String,
    logger_channel: String,
    verbose: bool,
    stage: Stage,
    info: OperationInfo,
}

impl Default for YamlStorage {
    fn default() -> Self {
        YamlStorage::new(
            Box::new(LocalFileSystem),
            Box::new(LocalSchemeDetector),
            Box::new(ConsoleMessenger),
        )
    }
}

impl YamlStorage {
    /// Build a storage service from explicitly injected ports.
    pub fn new(
        filesystem: Box<dyn FileSystem>,
        scheme_detector: Box<dyn SchemeDetector>,
        messenger: Box<dyn Messenger>,
    ) -> Self {
        YamlStorage {
            filesystem,
            scheme_detector,
            messenger,
            validator: YamlValidator::new(),
            absolute_path: PathBuf::new(),
            filename: String::new(),
            logger_channel: DEFAULT_LOGGER_CHANNEL.to_string(),
            verbose: false,
            stage: Stage::Load,
            info: OperationInfo::default(),
        }
    }

    /// Error code and message of the last operation.
    pub fn info(&self) -> &OperationInfo {
        &self.info
    }

    /// Load and validate a YAML file, returning the decoded document.
    pub fn load(
        &mut self,
        file_path: &str,
        logger_channel: &str,
        verbose: bool,
    ) -> Option<Value> {
        self.reset_state(logger_channel, verbose, Stage::Load);

        if file_path.is_empty() {
            self.fail(
                StorageCode::EmptyPath.code(),
                String::from("Empty file path provided"),
            );
            return None;
        }

        let absolute_path = self.prepare_file_path(file_path);

        if !self.check_file_exists(&absolute_path) || !self.check_file_readable(&absolute_path) {
            return None;
        }

        self.parse_yaml_file(&absolute_path)
    }

    /// Validate and save data as YAML to an existing file.
    ///
    /// The target file must already exist with write permission; this
    /// service does not create files.
    pub fn save(
        &mut self,
        file_path: &str,
        data: impl Into<YamlContent>,
        logger_channel: &str,
        verbose: bool,
    ) -> bool {
        self.reset_state(logger_channel, verbose, Stage::Save);

        if file_path.is_empty() {
            return self.fail(
                StorageCode::EmptyPath.code(),
                String::from("Empty file path provided"),
            );
        }

        let data = data.into();
        if data.is_empty() {
            return self.fail(
                StorageCode::NoData.code(),
                String::from("No data provided"),
            );
        }

        let absolute_path = self.prepare_file_path(file_path);

        if !self.check_file_exists(&absolute_path) || !self.check_file_writable(&absolute_path) {
            return false;
        }

        let data = match data {
            YamlContent::Text(text) => YamlContent::Text(normalize_newlines(&text)),
            other => other,
        };

        let success = self.validator.check_yaml(data);
        let details = self.validator.result().clone();
        if success {
            let yaml = details.yaml.unwrap_or_default();
            self.write_yaml_file(&absolute_path, &yaml)
        } else {
            let message = self.format_validation_error(&details);
            self.fail(details.error_code.code(), message)
        }
    }

    /// Reset per-operation state.
    fn reset_state(&mut self, logger_channel: &str, verbose: bool, stage: Stage) {
        self.info = OperationInfo::default();
        self.logger_channel = if logger_channel.is_empty() {
            DEFAULT_LOGGER_CHANNEL.to_string()
        } else {
            logger_channel.to_string()
        };
        self.verbose = verbose;
        self.stage = stage;
        self.absolute_path = PathBuf::new();
        self.filename = String::new();
    }

    /// Resolve the path to its canonical absolute form and record the
    /// basename for messages. Virtual paths are resolved to a real location
    /// first; a target that does not exist keeps the path as given.
    fn prepare_file_path(&mut self, file_path: &str) -> PathBuf {
        let mut path = PathBuf::from(file_path);
        if self.scheme_detector.scheme(file_path).is_some() {
            if let Some(real) = self.filesystem.realpath(&path) {
                path = real;
            }
        }
        let absolute = if self.filesystem.exists(&path) {
            self.filesystem.realpath(&path).unwrap_or(path)
        } else {
            path
        };
        self.absolute_path = absolute.clone();
        self.filename = self.filesystem.basename(&absolute);
        absolute
    }

    fn check_file_exists(&mut self, absolute_path: &Path) -> bool {
        if !self.filesystem.exists(absolute_path) {
            return self.fail(
                StorageCode::FileNotFound.code(),
                format!("File {} not found", self.filename),
            );
        }
        true
    }

    fn check_file_readable(&mut self, absolute_path: &Path) -> bool {
        if !self.filesystem.is_readable(absolute_path) {
            return self.fail(
                StorageCode::FileNotReadable.code(),
                format!("File {} is not readable", self.filename),
            );
        }
        true
    }

    fn check_file_writable(&mut self, absolute_path: &Path) -> bool {
        if !self.filesystem.is_writable(absolute_path) {
            return self.fail(
                StorageCode::FileNotWritable.code(),
                format!("File {} is not writable", self.filename),
            );
        }
        true
    }

    /// Read, normalize and validate the file content.
    fn parse_yaml_file(&mut self, absolute_path: &Path) -> Option<Value> {
        let content = match self.filesystem.read_to_string(absolute_path) {
            Ok(content) => content,
            Err(err) => {
                self.fail(
                    StorageCode::ReadFailed.code(),
                    format!("The file {} could not be read: {err}", self.filename),
                );
                return None;
            }
        };

        if content.trim().is_empty() {
            self.fail(
                StorageCode::EmptyFile.code(),
                format!("The file {} is empty", self.filename),
            );
            return None;
        }

        let content = normalize_newlines(&content);

        if content.trim().is_empty() {
            self.fail(
                StorageCode::NoYamlData.code(),
                format!("File {} has no YAML data", self.filename),
            );
            return None;
        }

        let success = self.validator.check_yaml(content);
        let details = self.validator.result().clone();
        if !success {
            let message = self.format_validation_error(&details);
            self.fail(details.error_code.code(), message);
            return None;
        }

        self.info = OperationInfo {
            error_code: StorageCode::Success.code(),
            error_text: String::from("YAML validation passed."),
        };
        info!(
            target: self.logger_channel.as_str(),
            "Loaded YAML file {}",
            absolute_path.display()
        );
        details.parsed
    }

    /// Write pre-validated YAML content, replacing existing content
    /// atomically.
    fn write_yaml_file(&mut self, absolute_path: &Path, yaml_content: &str) -> bool {
        if let Err(err) = self.filesystem.write_atomic(absolute_path, yaml_content) {
            return self.fail(
                StorageCode::WriteFailed.code(),
                format!("The file {} cannot be written: {err}", self.filename),
            );
        }

        self.info = OperationInfo {
            error_code: StorageCode::Success.code(),
            error_text: String::from("File saved successfully."),
        };
        info!(
            target: self.logger_channel.as_str(),
            "Saved YAML file {}",
            absolute_path.display()
        );
        true
    }

    /// Log the failure, notify the user in verbose mode, record the info
    /// snapshot and return the failure flag.
    fn fail(&mut self, code: u8, message: String) -> bool {
        if self.verbose {
            self.messenger.add_error(&message);
        }
        error!(
            target: self.logger_channel.as_str(),
            "{}\n\tFile: {}",
            message,
            self.absolute_path.display()
        );
        self.info = OperationInfo {
            error_code: code,
            error_text: message,
        };
        false
    }

    /// Compose the three-part message for validator-originated failures:
    /// short label, stage line with the filename, detailed description.
    fn format_validation_error(&self, details: &ValidationResult) -> String {
        format!(
            "{}\n{} the file: {}\n{}",
            details.error,
            self.stage.action(),
            self.filename,
            details.error_description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidatorCode;
    use crate::messenger::MessageSeverity;
    use serde_yaml::Mapping;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Messenger double that records every message it receives.
    struct RecordingMessenger {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl Messenger for RecordingMessenger {
        fn add_message(&self, _severity: MessageSeverity, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    /// File system double that can deny read or write permission, since
    /// real permission bits are unreliable when tests run privileged.
    struct RestrictedFileSystem {
        inner: LocalFileSystem,
        deny_read: bool,
        deny_write: bool,
    }

    impl FileSystem for RestrictedFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }
        fn is_readable(&self, path: &Path) -> bool {
            !self.deny_read && self.inner.is_readable(path)
        }
        fn is_writable(&self, path: &Path) -> bool {
            !self.deny_write && self.inner.is_writable(path)
        }
        fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            self.inner.read_to_string(path)
        }
        fn write_atomic(&self, path: &Path, contents: &str) -> std::io::Result<()> {
            self.inner.write_atomic(path, contents)
        }
        fn realpath(&self, path: &Path) -> Option<PathBuf> {
            self.inner.realpath(path)
        }
        fn basename(&self, path: &Path) -> String {
            self.inner.basename(path)
        }
    }

    fn storage() -> YamlStorage {
        YamlStorage::new(
            Box::new(LocalFileSystem),
            Box::new(LocalSchemeDetector),
            Box::new(crate::messenger::NullMessenger),
        )
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_empty_path() {
        let mut storage = storage();
        assert!(storage.load("", "default", false).is_none());
        assert_eq!(storage.info().error_code, StorageCode::EmptyPath.code());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yml");
        let mut storage = storage();
        assert!(storage.load(&path.to_string_lossy(), "default", false).is_none());
        assert_eq!(storage.info().error_code, StorageCode::FileNotFound.code());
    }

    #[test]
    fn test_load_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "unreadable.yml", "foo: bar\n");
        let mut storage = YamlStorage::new(
            Box::new(RestrictedFileSystem {
                inner: LocalFileSystem,
                deny_read: true,
                deny_write: false,
            }),
            Box::new(LocalSchemeDetector),
            Box::new(crate::messenger::NullMessenger),
        );
        assert!(storage.load(&path, "default", false).is_none());
        assert_eq!(
            storage.info().error_code,
            StorageCode::FileNotReadable.code()
        );
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "valid.yml", "foo: bar\n");
        let mut storage = storage();

        let parsed = storage.load(&path, "default", false).unwrap();
        assert_eq!(parsed["foo"], Value::String("bar".into()));
        assert_eq!(storage.info().error_code, StorageCode::Success.code());
    }

    #[test]
    fn test_load_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.yml", "   \n");
        let mut storage = storage();
        assert!(storage.load(&path, "default", false).is_none());
        assert_eq!(storage.info().error_code, StorageCode::EmptyFile.code());
    }

    #[test]
    fn test_load_file_that_normalizes_to_nothing() {
        let dir = TempDir::new().unwrap();
        // Literal backslash pairs, not newline bytes: survives the first
        // blank check, evaporates after normalization.
        let path = write_file(&dir, "escapes.yml", "\\n\\r\\n");
        let mut storage = storage();
        assert!(storage.load(&path, "default", false).is_none());
        assert_eq!(storage.info().error_code, StorageCode::NoYamlData.code());
    }

    #[test]
    fn test_load_invalid_yaml_forwards_validator_code() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "invalid.yml", "invalid: [unclosed\n");
        let mut storage = storage();

        assert!(storage.load(&path, "default", false).is_none());
        let info = storage.info();
        assert_eq!(info.error_code, ValidatorCode::ParseFailed.code());
        assert!(info.error_text.contains("Loading the file: invalid.yml"));
    }

    #[test]
    fn test_load_scalar_file_forwards_validator_code() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "scalar.yml", "42\n");
        let mut storage = storage();

        assert!(storage.load(&path, "default", false).is_none());
        assert_eq!(storage.info().error_code, ValidatorCode::ScalarValue.code());
    }

    #[test]
    fn test_save_empty_path() {
        let mut storage = storage();
        let mut map = Mapping::new();
        map.insert(Value::String("foo".into()), Value::String("bar".into()));
        assert!(!storage.save("", map, "default", false));
        assert_eq!(storage.info().error_code, StorageCode::EmptyPath.code());
    }

    #[test]
    fn test_save_empty_data_short_circuits_before_the_file_system() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("never-created.yml");
        let mut storage = storage();

        assert!(!storage.save(&path.to_string_lossy(), Mapping::new(), "default", false));
        // NoData, not FileNotFound: the path was never inspected.
        assert_eq!(storage.info().error_code, StorageCode::NoData.code());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_blank_string_data() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "target.yml", "old: value\n");
        let mut storage = storage();

        assert!(!storage.save(&path, "\n", "default", false));
        assert_eq!(storage.info().error_code, StorageCode::NoData.code());
        assert_eq!(fs::read_to_string(&path).unwrap(), "old: value\n");
    }

    #[test]
    fn test_save_requires_preexisting_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.yml");
        let mut storage = storage();
        let mut map = Mapping::new();
        map.insert(Value::String("foo".into()), Value::String("bar".into()));

        assert!(!storage.save(&path.to_string_lossy(), map, "default", false));
        assert_eq!(storage.info().error_code, StorageCode::FileNotFound.code());
    }

    #[test]
    fn test_save_unwritable_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "readonly.yml", "old: value\n");
        let mut storage = YamlStorage::new(
            Box::new(RestrictedFileSystem {
                inner: LocalFileSystem,
                deny_read: false,
                deny_write: true,
            }),
            Box::new(LocalSchemeDetector),
            Box::new(crate::messenger::NullMessenger),
        );

        let mut map = Mapping::new();
        map.insert(Value::String("foo".into()), Value::String("bar".into()));
        assert!(!storage.save(&path, map, "default", false));
        assert_eq!(
            storage.info().error_code,
            StorageCode::FileNotWritable.code()
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "old: value\n");
    }

    #[test]
    fn test_save_structured_data_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "target.yml", "old: value\n");
        let mut storage = storage();

        let mut map = Mapping::new();
        map.insert(Value::String("foo".into()), Value::String("bar".into()));
        assert!(storage.save(&path, map, "default", false));
        assert_eq!(storage.info().error_code, StorageCode::Success.code());

        let written = fs::read_to_string(&path).unwrap();
        let reloaded: Value = serde_yaml::from_str(&written).unwrap();
        assert_eq!(reloaded["foo"], Value::String("bar".into()));
    }

    #[test]
    fn test_save_string_data_with_escaped_newlines() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "target.yml", "old: value\n");
        let mut storage = storage();

        assert!(storage.save(&path, "foo: bar\\nbaz: qux", "default", false));

        let written = fs::read_to_string(&path).unwrap();
        let reloaded: Value = serde_yaml::from_str(&written).unwrap();
        assert_eq!(reloaded["baz"], Value::String("qux".into()));
    }

    #[test]
    fn test_save_scalar_data_forwards_validator_code_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "target.yml", "old: value\n");
        let mut storage = storage();

        assert!(!storage.save(&path, "123", "default", false));
        let info = storage.info();
        assert_eq!(info.error_code, ValidatorCode::ScalarValue.code());
        assert!(info.error_text.contains("Saving the file: target.yml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old: value\n");
    }

    #[test]
    fn test_verbose_failures_reach_the_messenger() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yml");

        let mut storage = YamlStorage::new(
            Box::new(LocalFileSystem),
            Box::new(LocalSchemeDetector),
            Box::new(RecordingMessenger {
                messages: Arc::clone(&messages),
            }),
        );

        assert!(storage.load(&path.to_string_lossy(), "default", true).is_none());
        let recorded = messages.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].contains("not found"));
    }

    #[test]
    fn test_silent_failures_skip_the_messenger() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let mut storage = YamlStorage::new(
            Box::new(LocalFileSystem),
            Box::new(LocalSchemeDetector),
            Box::new(RecordingMessenger {
                messages: Arc::clone(&messages),
            }),
        );

        assert!(storage.load("/no/such/file.yml", "default", false).is_none());
        assert!(messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sequential_operations_replace_info() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "valid.yml", "foo: bar\n");
        let mut storage = storage();

        assert!(storage.load("/no/such/file.yml", "default", false).is_none());
        assert_eq!(storage.info().error_code, StorageCode::FileNotFound.code());

        assert!(storage.load(&path, "default", false).is_some());
        assert_eq!(storage.info().error_code, StorageCode::Success.code());
    }
}
