//! Sink implementations
//!
//! Contains the terminal/tracing consoles, the syslog event sink, the
//! append-only file sink, the serial port sink and the process terminator.

mod console;
mod event;
mod exit;
mod file;
mod serial;

pub use self::console::{TerminalConsole, TracingConsole};
pub use self::event::{Facility, SyslogEventSink};
pub use self::exit::ProcessTerminator;
pub use self::file::AppendFileSink;
pub use self::serial::{data_bits as serial_data_bits, PortSerialSink};
