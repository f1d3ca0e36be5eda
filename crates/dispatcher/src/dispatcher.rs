//! Dispatcher - fans one log call out to the four channels
//!
//! Each call runs a stateless linear pipeline:
//! normalize → resolve config → {gate, format, emit} per channel.

use chrono::Utc;
use std::panic::Location;
use tracing::{debug, instrument, trace, warn};

use contracts::{
    Channel, ConsoleMode, ConsoleSink, ConsoleStream, ContractError, EventEntry, EventSink,
    FanlogConfig, FileSink, LogOptions, LogRecord, Messages, SerialSink, Severity,
    FALLBACK_SOURCE,
};

use crate::error::DispatcherError;
use crate::format;
use crate::gate::should_emit;
use crate::normalizer::normalize;
use crate::sinks::{AppendFileSink, PortSerialSink, SyslogEventSink, TerminalConsole, TracingConsole};

/// The collaborators that perform I/O, one per channel
pub struct Sinks {
    pub console: Box<dyn ConsoleSink>,
    pub event: Box<dyn EventSink>,
    pub file: Box<dyn FileSink>,
    pub serial: Box<dyn SerialSink>,
}

impl Sinks {
    /// Platform sinks with the requested console mode
    pub fn platform(mode: ConsoleMode) -> Self {
        Self {
            console: match mode {
                ConsoleMode::Terminal => Box::new(TerminalConsole::stdio()),
                ConsoleMode::Tracing => Box::new(TracingConsole),
            },
            event: Box::new(SyslogEventSink::new()),
            file: Box::new(AppendFileSink::new()),
            serial: Box::new(PortSerialSink::new()),
        }
    }
}

/// Builder for creating a Dispatcher
///
/// Sinks that are not supplied default to the platform implementations.
pub struct DispatcherBuilder {
    config: FanlogConfig,
    console: Option<Box<dyn ConsoleSink>>,
    event: Option<Box<dyn EventSink>>,
    file: Option<Box<dyn FileSink>>,
    serial: Option<Box<dyn SerialSink>>,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(config: FanlogConfig) -> Self {
        Self {
            config,
            console: None,
            event: None,
            file: None,
            serial: None,
        }
    }

    pub fn console(mut self, sink: impl ConsoleSink + 'static) -> Self {
        self.console = Some(Box::new(sink));
        self
    }

    pub fn event(mut self, sink: impl EventSink + 'static) -> Self {
        self.event = Some(Box::new(sink));
        self
    }

    pub fn file(mut self, sink: impl FileSink + 'static) -> Self {
        self.file = Some(Box::new(sink));
        self
    }

    pub fn serial(mut self, sink: impl SerialSink + 'static) -> Self {
        self.serial = Some(Box::new(sink));
        self
    }

    /// Build the dispatcher
    ///
    /// # Errors
    /// `SinkCreation` when the serial settings cannot be applied to a port
    #[instrument(name = "dispatcher_builder_build", skip(self))]
    pub fn build(self) -> Result<Dispatcher, DispatcherError> {
        crate::sinks::serial_data_bits(self.config.serial.data_bits)
            .map_err(|e| DispatcherError::sink_creation(Channel::Serial.as_str(), e.to_string()))?;

        let mut sinks = Sinks::platform(self.config.console.mode);
        if let Some(console) = self.console {
            sinks.console = console;
        }
        if let Some(event) = self.event {
            sinks.event = event;
        }
        if let Some(file) = self.file {
            sinks.file = file;
        }
        if let Some(serial) = self.serial {
            sinks.serial = serial;
        }

        Ok(Dispatcher {
            config: self.config,
            sinks,
        })
    }
}

/// Convenience function to create a dispatcher with platform sinks
pub fn create_dispatcher(config: FanlogConfig) -> Result<Dispatcher, DispatcherError> {
    DispatcherBuilder::new(config).build()
}

/// The core fan-out
pub struct Dispatcher {
    config: FanlogConfig,
    sinks: Sinks,
}

impl Dispatcher {
    /// Create a dispatcher with custom sinks (for testing)
    pub fn with_sinks(config: FanlogConfig, sinks: Sinks) -> Self {
        Self { config, sinks }
    }

    pub fn config(&self) -> &FanlogConfig {
        &self.config
    }

    /// Dispatch one log call to every channel whose gate passes
    ///
    /// Sink failures are downgraded to console warnings; this never fails and
    /// never terminates the process. The console error path is tagged with
    /// the caller's location.
    #[track_caller]
    pub fn dispatch(&self, messages: impl Into<Messages>, severity: Severity, options: &LogOptions) {
        self.dispatch_at(messages.into(), severity, options, Location::caller());
    }

    /// Dispatch with an explicit caller location
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, messages, options, location),
        fields(severity = %severity)
    )]
    pub fn dispatch_at(
        &self,
        messages: Messages,
        severity: Severity,
        options: &LogOptions,
        location: &'static Location<'static>,
    ) {
        let lines: Vec<String> = normalize(messages).collect();
        if lines.is_empty() {
            trace!("No message content, nothing to dispatch");
            return;
        }

        let record = self.build_record(severity, options, lines);
        observability::record_dispatch(severity, record.lines.len());

        self.emit_event(&record);
        self.emit_file(&record);
        self.emit_serial(&record);
        self.emit_console(&record, location);
    }

    fn build_record(&self, severity: Severity, options: &LogOptions, lines: Vec<String>) -> LogRecord {
        let defaults = &self.config.defaults;

        let source = options
            .source
            .clone()
            .or_else(|| defaults.source.clone())
            .unwrap_or_else(|| FALLBACK_SOURCE.to_string());
        let event_id = options.event_id.unwrap_or(defaults.event_id);
        let log_file = options
            .log_file
            .clone()
            .or_else(|| defaults.log_file.clone());

        LogRecord::new(Utc::now(), severity, source, lines, event_id).with_log_file(log_file)
    }

    /// Configured serial port, if the channel is enabled and the port is present
    fn resolve_serial_port(&self) -> Option<&str> {
        self.config.thresholds.serial?;
        let port = self.config.defaults.serial_port.as_deref()?;

        if self.sinks.serial.port_exists(port) {
            Some(port)
        } else {
            debug!(port, "Serial port not present, skipping serial channel");
            None
        }
    }

    fn emit_event(&self, record: &LogRecord) {
        if !should_emit(record.severity(), self.config.thresholds.event) {
            return;
        }

        let body = format::event_body(record);
        let entry = EventEntry {
            log_name: &self.config.event_log.log_name,
            source: &record.source,
            entry_type: record.severity().into(),
            event_id: record.event_id,
            message: &body,
        };

        match self.sinks.event.write(&entry) {
            Ok(()) => observability::record_emission(Channel::EventLog, 1),
            Err(ContractError::SourceMissing { .. }) => self.heal_event_source(record, &entry),
            Err(e) => self.downgrade(record, Channel::EventLog, &e),
        }
    }

    /// Register the missing source once and retry the write once
    fn heal_event_source(&self, record: &LogRecord, entry: &EventEntry<'_>) {
        debug!(
            log = entry.log_name,
            source = entry.source,
            "Event source missing, attempting to create it"
        );

        if let Err(e) = self.sinks.event.create_source(entry.log_name, entry.source) {
            observability::record_source_created(false);
            self.downgrade(record, Channel::EventLog, &e);
            return;
        }
        observability::record_source_created(true);

        match self.sinks.event.write(entry) {
            Ok(()) => observability::record_emission(Channel::EventLog, 1),
            Err(e) => self.downgrade(record, Channel::EventLog, &e),
        }
    }

    fn emit_file(&self, record: &LogRecord) {
        if !should_emit(record.severity(), self.config.thresholds.file) {
            return;
        }
        let Some(path) = record.log_file.as_deref() else {
            return;
        };

        let timestamp = record.timestamp_str();
        let hostname = format::host_name(self.config.defaults.hostname.as_deref());

        for (written, line) in record.lines.iter().enumerate() {
            let text = format::file_line(record, &timestamp, &hostname, line);
            if let Err(e) = self.sinks.file.append(path, &text) {
                observability::record_emission(Channel::File, written);
                self.downgrade(record, Channel::File, &e);
                return;
            }
        }
        observability::record_emission(Channel::File, record.lines.len());
    }

    fn emit_serial(&self, record: &LogRecord) {
        let Some(port) = self.resolve_serial_port() else {
            return;
        };
        if !should_emit(record.severity(), self.config.thresholds.serial) {
            return;
        }

        let timestamp = record.timestamp_str();
        let settings = &self.config.serial;

        for (written, line) in record.lines.iter().enumerate() {
            let text = format::serial_line(record, &timestamp, line);
            match self
                .sinks
                .serial
                .write(port, settings, &text, settings.wait_for_response)
            {
                Ok(Some(response)) => debug!(port, response = %response, "Serial device answered"),
                Ok(None) => {}
                Err(e) => {
                    observability::record_emission(Channel::Serial, written);
                    self.downgrade(record, Channel::Serial, &e);
                    return;
                }
            }
        }
        observability::record_emission(Channel::Serial, record.lines.len());
    }

    fn emit_console(&self, record: &LogRecord, location: &'static Location<'static>) {
        if !should_emit(record.severity(), self.config.thresholds.console) {
            return;
        }

        match ConsoleStream::for_severity(record.severity()) {
            Some(stream) => {
                let timestamp = record.timestamp_str();
                for line in &record.lines {
                    self.sinks
                        .console
                        .write(stream, &format::console_line(&timestamp, line));
                }
                observability::record_emission(Channel::Console, record.lines.len());
            }
            None => {
                self.sinks
                    .console
                    .report_error(&format::error_payload(record), location);
                observability::record_emission(Channel::Console, 1);
            }
        }
    }

    /// Report a failed channel as a console warning and carry on
    fn downgrade(&self, record: &LogRecord, channel: Channel, err: &ContractError) {
        warn!(channel = channel.as_str(), error = %err, "Channel write failed, downgrading");
        observability::record_downgrade(channel);
        let warning = format!("Unable to write to {channel}: {err}");
        self.sinks.console.write(
            ConsoleStream::Warning,
            &format::console_line(&record.timestamp_str(), &warning),
        );
    }
}
