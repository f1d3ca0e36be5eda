//! Sink traits - Dispatcher output interfaces
//!
//! Every channel hands its formatted lines to one of these collaborators.
//! Implementations open, use and release their platform resource within a
//! single call; nothing is held across dispatches.

use std::panic::Location;
use std::path::Path;

use crate::{ConsoleStream, ContractError, EntryType, SerialSettings};

/// One event log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventEntry<'a> {
    pub log_name: &'a str,
    pub source: &'a str,
    pub entry_type: EntryType,
    pub event_id: u32,
    pub message: &'a str,
}

/// OS event log writer
pub trait EventSink: Send + Sync {
    /// Write one entry
    ///
    /// # Errors
    /// `SourceMissing` when the source is not registered, any other variant
    /// for transport failures
    fn write(&self, entry: &EventEntry<'_>) -> Result<(), ContractError>;

    /// Register `source` under `log_name`
    ///
    /// # Errors
    /// `PermissionDenied` when the caller may not register sources
    fn create_source(&self, log_name: &str, source: &str) -> Result<(), ContractError>;
}

/// Append-only log file writer
pub trait FileSink: Send + Sync {
    /// Append one line, creating the file if absent
    ///
    /// # Errors
    /// `SinkUnavailable` when the parent directory is missing or the write fails
    fn append(&self, path: &Path, line: &str) -> Result<(), ContractError>;
}

/// Serial port writer
pub trait SerialSink: Send + Sync {
    /// Whether the host currently exposes a port with this name
    fn port_exists(&self, name: &str) -> bool;

    /// Open `port`, write one line, optionally block for one response line, close
    fn write(
        &self,
        port: &str,
        settings: &SerialSettings,
        data: &str,
        wait: bool,
    ) -> Result<Option<String>, ContractError>;
}

/// Interactive console
///
/// Console output is the last-resort channel: it has no error return.
pub trait ConsoleSink: Send + Sync {
    /// Write one line to a non-error stream
    fn write(&self, stream: ConsoleStream, line: &str);

    /// Report an error payload (possibly multi-line) raised at `location`
    fn report_error(&self, payload: &str, location: &'static Location<'static>);
}

/// Process termination
pub trait ProcessExit: Send + Sync {
    fn terminate(&self, code: i32);
}
