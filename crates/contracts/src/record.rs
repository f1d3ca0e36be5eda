//! LogRecord - one resolved log call, consumed by the dispatcher

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

use crate::Severity;

/// Per-call overrides of the configured defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub source: Option<String>,
    pub event_id: Option<u32>,
    pub log_file: Option<PathBuf>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn event_id(mut self, event_id: u32) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}

/// A normalized log call
///
/// Severity is fixed at construction; there is no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    severity: Severity,
    pub source: String,
    pub lines: Vec<String>,
    pub event_id: u32,
    pub log_file: Option<PathBuf>,
}

impl LogRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        severity: Severity,
        source: impl Into<String>,
        lines: Vec<String>,
        event_id: u32,
    ) -> Self {
        Self {
            timestamp,
            severity,
            source: source.into(),
            lines,
            event_id,
            log_file: None,
        }
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// RFC 3339 UTC timestamp with millisecond precision
    pub fn timestamp_str(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let record = LogRecord::new(ts, Severity::Info, "svc", vec!["a".into()], 1);
        assert_eq!(record.timestamp_str(), "2024-03-09T07:05:01.000Z");
        assert_eq!(record.severity(), Severity::Info);
    }

    #[test]
    fn test_options_builder() {
        let options = LogOptions::new().source("svc").event_id(7).log_file("/tmp/x.log");
        assert_eq!(options.source.as_deref(), Some("svc"));
        assert_eq!(options.event_id, Some(7));
        assert_eq!(options.log_file, Some(PathBuf::from("/tmp/x.log")));
    }
}
