//! User-facing notifications
//!
//! Port for surfacing operation outcomes to an end user, separate from the
//! log stream. Storage only notifies through it when an operation was
//! requested in verbose mode.

use log::warn;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Status,
    Warning,
    Error,
}

/// Notification sink for end-user messages.
pub trait Messenger {
    fn add_message(&self, severity: MessageSeverity, message: &str);

    fn add_error(&self, message: &str) {
        self.add_message(MessageSeverity::Error, message);
    }

    fn add_status(&self, message: &str) {
        self.add_message(MessageSeverity::Status, message);
    }
}

/// Writes messages to standard error, prefixed by severity.
#[derive(Debug, Default)]
pub struct ConsoleMessenger;

impl Messenger for ConsoleMessenger {
    fn add_message(&self, severity: MessageSeverity, message: &str) {
        match severity {
            MessageSeverity::Status => eprintln!("{message}"),
            MessageSeverity::Warning => eprintln!("Warning: {message}"),
            MessageSeverity::Error => eprintln!("Error: {message}"),
        }
    }
}

/// Discards every message. Useful when no user-facing surface exists.
#[derive(Debug, Default)]
pub struct NullMessenger;

impl Messenger for NullMessenger {
    fn add_message(&self, severity: MessageSeverity, message: &str) {
        if severity == MessageSeverity::Error {
            // Keep a trace of dropped errors in the log stream.
            warn!("dropped user message: {message}");
        }
    }
}
