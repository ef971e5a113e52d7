//! Observable events for the student registry
//!
//! Events are explicit and typed; each maps to one stable log name.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Database opened and table ensured
    StoreOpened,
    /// HTTP listener bound, ready for requests
    Serving,
    /// Listener stopped after a shutdown signal
    ShutdownComplete,

    // Writes
    /// Student inserted
    StudentCreated,
    /// Student fields overwritten
    StudentUpdated,
    /// Student removed
    StudentDeleted,
    /// Write refused by validation or a natural-key conflict
    WriteRejected,

    // Failures
    /// Unexpected storage error during a request
    StorageFailure,
    /// CLI command failed; the process exits non-zero
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "REGISTRY_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::StudentCreated => "STUDENT_CREATED",
            Event::StudentUpdated => "STUDENT_UPDATED",
            Event::StudentDeleted => "STUDENT_DELETED",
            Event::WriteRejected => "WRITE_REJECTED",

            Event::StorageFailure => "STORAGE_FAILURE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::WriteRejected => Severity::Warn,
            Event::StorageFailure => Severity::Error,
            Event::CommandFailed => Severity::Fatal,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
