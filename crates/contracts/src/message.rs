//! Message inputs accepted by the log entry points
//!
//! A log call carries a sequence of heterogeneous items: plain text (possibly
//! multi-line), structured error records, or arbitrary values that only know
//! how to render themselves.

use std::fmt::{self, Write};
use std::panic::Location;

/// Structured error description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Primary error message
    pub message: String,
    /// Numeric error code
    pub code: i64,
    /// Originating script/source file, `None` when raised interactively
    pub script: Option<String>,
    /// Line within `script`
    pub line: u32,
    /// Message of the inner cause, if any
    pub inner: Option<String>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 0,
            script: None,
            line: 0,
            inner: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn at(mut self, script: impl Into<String>, line: u32) -> Self {
        self.script = Some(script.into());
        self.line = line;
        self
    }

    pub fn with_inner(mut self, inner: impl Into<String>) -> Self {
        self.inner = Some(inner.into());
        self
    }

    /// Capture a Rust error at the caller's location
    ///
    /// The inner cause is the error's immediate `source()`. IO errors carry
    /// their OS error code.
    #[track_caller]
    pub fn capture(err: &(dyn std::error::Error + 'static)) -> Self {
        let location = Location::caller();
        let code = err
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::raw_os_error)
            .map(i64::from)
            .unwrap_or(0);

        Self {
            message: err.to_string(),
            code,
            script: Some(location.file().to_string()),
            line: location.line(),
            inner: err.source().map(ToString::to_string),
        }
    }
}

/// One item of a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    /// Text, split on any line ending during normalization
    Text(String),
    /// Structured error, rendered to a single line
    Error(ErrorRecord),
    /// Any other value, pre-rendered at construction
    Value {
        type_name: &'static str,
        rendered: Option<String>,
    },
}

impl MessageInput {
    /// Render a value through its `Display` impl
    ///
    /// A formatter failure leaves `rendered` empty so the normalizer can
    /// substitute a placeholder.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        let mut rendered = String::new();
        let ok = write!(rendered, "{value}").is_ok();
        Self::Value {
            type_name: std::any::type_name::<T>(),
            rendered: ok.then_some(rendered),
        }
    }

    /// A value with no text form
    pub fn opaque<T: ?Sized>(_value: &T) -> Self {
        Self::Value {
            type_name: std::any::type_name::<T>(),
            rendered: None,
        }
    }
}

impl From<&str> for MessageInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MessageInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for MessageInput {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<ErrorRecord> for MessageInput {
    fn from(value: ErrorRecord) -> Self {
        Self::Error(value)
    }
}

/// Ordered collection of inputs for a single log call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages(Vec<MessageInput>);

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: impl Into<MessageInput>) {
        self.0.push(input.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for Messages {
    type Item = MessageInput;
    type IntoIter = std::vec::IntoIter<MessageInput>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Into<MessageInput>> FromIterator<T> for Messages {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<MessageInput> for Messages {
    fn from(value: MessageInput) -> Self {
        Self(vec![value])
    }
}

impl From<&str> for Messages {
    fn from(value: &str) -> Self {
        Self(vec![value.into()])
    }
}

impl From<String> for Messages {
    fn from(value: String) -> Self {
        Self(vec![value.into()])
    }
}

impl From<ErrorRecord> for Messages {
    fn from(value: ErrorRecord) -> Self {
        Self(vec![value.into()])
    }
}

impl<T: Into<MessageInput>> From<Vec<T>> for Messages {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Into<MessageInput>, const N: usize> From<[T; N]> for Messages {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

/// Absent input is an empty message set
impl<T: Into<Messages>> From<Option<T>> for Messages {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
