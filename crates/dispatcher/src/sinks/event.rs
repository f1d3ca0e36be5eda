//! SyslogEventSink - writes event log entries to the local syslog daemon
//!
//! Entries are framed as RFC 3164 datagrams:
//! `<PRI>Mmm dd hh:mm:ss TAG[pid]: [event_id] message`.
//! The event log name selects the facility and the entry type selects the
//! syslog severity.

use chrono::Local;
use contracts::{Channel, ContractError, EntryType, EventEntry, EventSink};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Well-known local syslog sockets, tried in order
const DEFAULT_SOCKETS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

/// Syslog facility codes used for event log names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Facility {
    User = 1,
    Daemon = 3,
    AuthPriv = 10,
    Local0 = 16,
}

impl Facility {
    /// Facility for an event log name
    ///
    /// `Application` maps to `user`, `System` to `daemon` and `Security` to
    /// `authpriv`; any custom log lands in `local0`.
    pub fn from_log_name(log_name: &str) -> Self {
        match log_name.to_ascii_lowercase().as_str() {
            "application" => Self::User,
            "system" => Self::Daemon,
            "security" => Self::AuthPriv,
            _ => Self::Local0,
        }
    }
}

/// Syslog severity for an entry type
fn syslog_severity(entry_type: EntryType) -> u8 {
    match entry_type {
        EntryType::Error => 3,
        EntryType::Warning => 4,
        EntryType::Information => 6,
    }
}

/// Syslog TAG: no whitespace or colon, at most 32 bytes
fn tag(source: &str) -> String {
    let mut tag: String = source
        .chars()
        .map(|c| if c.is_whitespace() || c == ':' { '_' } else { c })
        .collect();
    while tag.len() > 32 {
        tag.pop();
    }
    tag
}

/// Build one RFC 3164 datagram
pub fn frame(entry: &EventEntry<'_>, timestamp: &str, pid: u32) -> String {
    let priority =
        Facility::from_log_name(entry.log_name) as u8 * 8 + syslog_severity(entry.entry_type);
    format!(
        "<{}>{} {}[{}]: [{}] {}",
        priority,
        timestamp,
        tag(entry.source),
        pid,
        entry.event_id,
        entry.message
    )
}

/// Event sink backed by the syslog datagram socket
///
/// Syslog has no source registry, so every source is implicitly registered.
#[derive(Debug, Clone)]
pub struct SyslogEventSink {
    socket_paths: Vec<PathBuf>,
}

impl SyslogEventSink {
    /// Sink trying the platform's well-known sockets
    pub fn new() -> Self {
        Self {
            socket_paths: DEFAULT_SOCKETS.iter().map(PathBuf::from).collect(),
        }
    }

    /// Sink bound to one specific socket path
    pub fn with_socket_path(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_paths: vec![path.into()],
        }
    }

    #[cfg(unix)]
    fn send(&self, datagram: &[u8]) -> Result<(), ContractError> {
        use std::os::unix::net::UnixDatagram;

        let socket = UnixDatagram::unbound()
            .map_err(|e| ContractError::from_sink_io(Channel::EventLog, "syslog", e))?;

        let mut last_error = None;
        for path in &self.socket_paths {
            match socket.send_to(datagram, path) {
                Ok(_) => {
                    debug!(socket = %path.display(), bytes = datagram.len(), "Event sent");
                    return Ok(());
                }
                Err(e) => last_error = Some((path, e)),
            }
        }

        Err(match last_error {
            Some((path, e)) => {
                ContractError::from_sink_io(Channel::EventLog, &path.display().to_string(), e)
            }
            None => ContractError::sink_unavailable(Channel::EventLog, "no syslog socket configured"),
        })
    }

    #[cfg(not(unix))]
    fn send(&self, _datagram: &[u8]) -> Result<(), ContractError> {
        Err(ContractError::sink_unavailable(
            Channel::EventLog,
            "syslog sockets are not available on this platform",
        ))
    }
}

impl Default for SyslogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for SyslogEventSink {
    #[instrument(
        name = "event_sink_write",
        skip(self, entry),
        fields(log = entry.log_name, source = entry.source, event_id = entry.event_id)
    )]
    fn write(&self, entry: &EventEntry<'_>) -> Result<(), ContractError> {
        let timestamp = Local::now().format("%b %e %H:%M:%S").to_string();
        let datagram = frame(entry, &timestamp, std::process::id());
        self.send(datagram.as_bytes())
    }

    fn create_source(&self, log_name: &str, source: &str) -> Result<(), ContractError> {
        debug!(log = log_name, source, "Syslog sources need no registration");
        Ok(())
    }
}
