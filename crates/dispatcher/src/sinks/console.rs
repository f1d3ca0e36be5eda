//! Console sinks - terminal streams or tracing events

use contracts::{ConsoleSink, ConsoleStream};
use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, warn};

type SharedWriter = Mutex<Box<dyn Write + Send>>;

/// Console that writes labelled lines to stdout / stderr
///
/// DEBUG and VERBOSE lines go to `out`; WARNING lines and error reports go to `err`.
pub struct TerminalConsole {
    out: SharedWriter,
    err: SharedWriter,
}

impl TerminalConsole {
    /// Console bound to the process stdout / stderr
    pub fn stdio() -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Console bound to arbitrary writers
    pub fn with_writers(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    fn emit(writer: &SharedWriter, text: &str) {
        let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
        // Console is the last-resort channel; a broken pipe has nowhere else to go.
        let _ = writeln!(writer, "{text}").and_then(|()| writer.flush());
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::stdio()
    }
}

impl ConsoleSink for TerminalConsole {
    fn write(&self, stream: ConsoleStream, line: &str) {
        let text = format!("{}: {}", stream.label(), line);
        match stream {
            ConsoleStream::Debug | ConsoleStream::Verbose => Self::emit(&self.out, &text),
            ConsoleStream::Warning => Self::emit(&self.err, &text),
        }
    }

    fn report_error(&self, payload: &str, location: &'static Location<'static>) {
        let text = format!("ERROR: {payload}\n    at {location}");
        Self::emit(&self.err, &text);
    }
}

/// Console that forwards every line as a tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn write(&self, stream: ConsoleStream, line: &str) {
        match stream {
            ConsoleStream::Debug => debug!(target: "fanlog::console", "{line}"),
            ConsoleStream::Verbose => info!(target: "fanlog::console", "{line}"),
            ConsoleStream::Warning => warn!(target: "fanlog::console", "{line}"),
        }
    }

    fn report_error(&self, payload: &str, location: &'static Location<'static>) {
        error!(
            target: "fanlog::console",
            file = location.file(),
            line = location.line(),
            "{payload}"
        );
    }
}
