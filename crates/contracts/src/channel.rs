//! Output channels and the console streams they map to

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Severity;

/// One independent output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Console,
    EventLog,
    File,
    Serial,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Console,
        Channel::EventLog,
        Channel::File,
        Channel::Serial,
    ];

    /// Stable label for metrics and structured logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::EventLog => "event_log",
            Self::File => "file",
            Self::Serial => "serial",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLog => f.write_str("event log"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Non-error console stream
///
/// DEBUG, INFO and WARNING each have a stream; ERROR and FATAL share the
/// console's error-reporting path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleStream {
    Debug,
    Verbose,
    Warning,
}

impl ConsoleStream {
    /// Stream for a non-error severity, `None` for ERROR and FATAL
    pub fn for_severity(severity: Severity) -> Option<Self> {
        if severity.is_error() {
            return None;
        }
        match severity {
            Severity::Debug => Some(Self::Debug),
            Severity::Info => Some(Self::Verbose),
            _ => Some(Self::Warning),
        }
    }

    /// Label printed in front of terminal output
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Verbose => "VERBOSE",
            Self::Warning => "WARNING",
        }
    }
}

/// Event log entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryType {
    Information,
    Warning,
    Error,
}

impl From<Severity> for EntryType {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug | Severity::Info => Self::Information,
            Severity::Warning => Self::Warning,
            Severity::Error | Severity::Fatal => Self::Error,
        }
    }
}
