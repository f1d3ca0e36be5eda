//! Layered error definitions
//!
//! Categorized by source: config / severity / sink

use thiserror::Error;

use crate::Channel;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// Unrecognized severity token
    #[error("unknown severity '{token}'")]
    UnknownSeverity { token: String },

    // ===== Sink Errors =====
    /// Event source is not registered with the event log
    #[error("event source '{source_name}' is not registered in log '{log_name}'")]
    SourceMissing {
        log_name: String,
        source_name: String,
    },

    /// Caller lacks permission (e.g. to register an event source)
    #[error("permission denied for '{target}': {message}")]
    PermissionDenied { target: String, message: String },

    /// Sink could not complete the write
    #[error("{channel} sink unavailable: {message}")]
    SinkUnavailable { channel: Channel, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create unknown severity error
    pub fn unknown_severity(token: impl Into<String>) -> Self {
        Self::UnknownSeverity {
            token: token.into(),
        }
    }

    /// Create missing event source error
    pub fn source_missing(log_name: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self::SourceMissing {
            log_name: log_name.into(),
            source_name: source_name.into(),
        }
    }

    /// Create permission denied error
    pub fn permission_denied(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create sink unavailable error
    pub fn sink_unavailable(channel: Channel, message: impl Into<String>) -> Self {
        Self::SinkUnavailable {
            channel,
            message: message.into(),
        }
    }

    /// Map an IO failure of a sink into `SinkUnavailable`
    ///
    /// `PermissionDenied` IO errors keep their own variant.
    pub fn from_sink_io(channel: Channel, target: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(target, err.to_string()),
            _ => Self::sink_unavailable(channel, format!("{target}: {err}")),
        }
    }
}
