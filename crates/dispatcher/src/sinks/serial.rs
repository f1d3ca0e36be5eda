//! PortSerialSink - writes log lines to a serial port

use contracts::{Channel, ContractError, Parity, SerialSettings, SerialSink, StopBits};
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Read timeout per poll while waiting for a response line
///
/// Timeouts are retried, so the wait itself is unbounded.
const READ_POLL: Duration = Duration::from_millis(500);

/// Serial sink backed by the `serialport` crate
///
/// The port is opened, written and closed within each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct PortSerialSink;

impl PortSerialSink {
    pub fn new() -> Self {
        Self
    }
}

/// Map configured data bits to the `serialport` enum
pub fn data_bits(bits: u8) -> Result<serialport::DataBits, ContractError> {
    match bits {
        5 => Ok(serialport::DataBits::Five),
        6 => Ok(serialport::DataBits::Six),
        7 => Ok(serialport::DataBits::Seven),
        8 => Ok(serialport::DataBits::Eight),
        other => Err(ContractError::config_validation(
            "serial.data_bits",
            format!("unsupported data bits: {other}"),
        )),
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Odd => serialport::Parity::Odd,
        Parity::Even => serialport::Parity::Even,
    }
}

fn stop_bits(stop_bits: StopBits) -> serialport::StopBits {
    match stop_bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}

fn port_error(port: &str, err: serialport::Error) -> ContractError {
    match err.kind() {
        serialport::ErrorKind::Io(kind) => {
            ContractError::from_sink_io(Channel::Serial, port, io::Error::new(kind, err.description))
        }
        _ => ContractError::sink_unavailable(Channel::Serial, format!("{port}: {}", err.description)),
    }
}

/// Read bytes until `\n`, retrying on timeouts
///
/// A trailing `\r` is stripped. End of stream before a newline returns what
/// was read so far.
fn read_response_line<R: Read + ?Sized>(reader: &mut R) -> io::Result<String> {
    let mut buffer = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) if byte[0] == b'\n' => break,
            Ok(_) => buffer.push(byte[0]),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {
                continue
            }
            Err(e) => return Err(e),
        }
    }

    if buffer.last() == Some(&b'\r') {
        buffer.pop();
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

impl SerialSink for PortSerialSink {
    fn port_exists(&self, name: &str) -> bool {
        match serialport::available_ports() {
            Ok(ports) => ports.iter().any(|p| p.port_name == name),
            Err(e) => {
                warn!(error = %e, "Failed to list serial ports");
                false
            }
        }
    }

    #[instrument(
        name = "serial_sink_write",
        skip(self, settings, data),
        fields(baud = settings.baud_rate)
    )]
    fn write(
        &self,
        port: &str,
        settings: &SerialSettings,
        data: &str,
        wait: bool,
    ) -> Result<Option<String>, ContractError> {
        let mut handle = serialport::new(port, settings.baud_rate)
            .parity(parity(settings.parity))
            .data_bits(data_bits(settings.data_bits)?)
            .stop_bits(stop_bits(settings.stop_bits))
            .timeout(READ_POLL)
            .open()
            .map_err(|e| port_error(port, e))?;

        let io_err = |e| ContractError::from_sink_io(Channel::Serial, port, e);

        handle.write_all(data.as_bytes()).map_err(io_err)?;
        handle.write_all(b"\n").map_err(io_err)?;
        handle.flush().map_err(io_err)?;

        if !wait {
            return Ok(None);
        }

        let response = read_response_line(&mut *handle).map_err(io_err)?;
        debug!(response = %response, "Serial response received");
        Ok(Some(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Reader that replays scripted results
    struct Scripted(VecDeque<io::Result<u8>>);

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                Some(Ok(b)) => {
                    buf[0] = b;
                    Ok(1)
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    fn scripted(items: Vec<io::Result<u8>>) -> Scripted {
        Scripted(items.into_iter().collect())
    }

    #[test]
    fn test_read_line_retries_timeouts() {
        let mut reader = scripted(vec![
            Err(io::Error::from(io::ErrorKind::TimedOut)),
            Ok(b'O'),
            Err(io::Error::from(io::ErrorKind::TimedOut)),
            Ok(b'K'),
            Ok(b'\r'),
            Ok(b'\n'),
            Ok(b'x'),
        ]);
        assert_eq!(read_response_line(&mut reader).unwrap(), "OK");
    }

    #[test]
    fn test_read_line_stops_at_eof() {
        let mut reader = scripted(vec![Ok(b'h'), Ok(b'i')]);
        assert_eq!(read_response_line(&mut reader).unwrap(), "hi");
    }

    #[test]
    fn test_read_line_propagates_errors() {
        let mut reader = scripted(vec![Err(io::Error::from(io::ErrorKind::BrokenPipe))]);
        assert!(read_response_line(&mut reader).is_err());
    }

    #[test]
    fn test_data_bits_mapping() {
        assert_eq!(data_bits(8).unwrap(), serialport::DataBits::Eight);
        assert_eq!(data_bits(5).unwrap(), serialport::DataBits::Five);
        assert!(data_bits(9).is_err());
    }

    #[test]
    fn test_missing_port_is_unavailable() {
        let sink = PortSerialSink::new();
        assert!(!sink.port_exists("/dev/fanlog-no-such-port"));
        let err = sink
            .write("/dev/fanlog-no-such-port", &SerialSettings::default(), "x", false)
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::SinkUnavailable { .. } | ContractError::PermissionDenied { .. }
        ));
    }
}
