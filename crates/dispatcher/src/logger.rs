//! Logger - caller-facing entry points
//!
//! One method per severity. Only `fatal` ends the process, after every
//! channel has been written.

use std::panic::Location;
use tracing::debug;

use contracts::{FanlogConfig, LogOptions, Messages, ProcessExit, Severity};

use crate::dispatcher::{create_dispatcher, Dispatcher};
use crate::error::DispatcherError;
use crate::sinks::ProcessTerminator;

pub struct Logger {
    dispatcher: Dispatcher,
    exit: Box<dyn ProcessExit>,
}

impl Logger {
    /// Logger that exits the real process on `fatal`
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self::with_exit(dispatcher, ProcessTerminator)
    }

    pub fn with_exit(dispatcher: Dispatcher, exit: impl ProcessExit + 'static) -> Self {
        Self {
            dispatcher,
            exit: Box::new(exit),
        }
    }

    /// Logger with platform sinks
    pub fn from_config(config: FanlogConfig) -> Result<Self, DispatcherError> {
        Ok(Self::new(create_dispatcher(config)?))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[track_caller]
    pub fn debug(&self, messages: impl Into<Messages>, options: &LogOptions) {
        self.log(Severity::Debug, messages, options);
    }

    #[track_caller]
    pub fn info(&self, messages: impl Into<Messages>, options: &LogOptions) {
        self.log(Severity::Info, messages, options);
    }

    #[track_caller]
    pub fn warning(&self, messages: impl Into<Messages>, options: &LogOptions) {
        self.log(Severity::Warning, messages, options);
    }

    #[track_caller]
    pub fn error(&self, messages: impl Into<Messages>, options: &LogOptions) {
        self.log(Severity::Error, messages, options);
    }

    /// Log at FATAL, then terminate with `exit_code` or the configured default
    #[track_caller]
    pub fn fatal(&self, messages: impl Into<Messages>, options: &LogOptions, exit_code: Option<i32>) {
        self.log(Severity::Fatal, messages, options);

        let code = exit_code.unwrap_or(self.dispatcher.config().exit.default_code);
        debug!(code, "Fatal log call complete");
        self.exit.terminate(code);
    }

    /// Log at any severity; never terminates, even for FATAL
    #[track_caller]
    pub fn log(&self, severity: Severity, messages: impl Into<Messages>, options: &LogOptions) {
        self.dispatcher
            .dispatch_at(messages.into(), severity, options, Location::caller());
    }

    /// Log with a textual severity such as `warning`, `W`, `[E]` or `3`
    ///
    /// # Errors
    /// An unrecognised token fails before anything is emitted.
    #[track_caller]
    pub fn log_token(
        &self,
        token: &str,
        messages: impl Into<Messages>,
        options: &LogOptions,
    ) -> Result<(), DispatcherError> {
        let severity: Severity = token.parse()?;
        self.log(severity, messages, options);
        Ok(())
    }
}
