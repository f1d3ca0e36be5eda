//! Channel line formatting

use contracts::LogRecord;

/// Single event body: severity tag followed by all lines joined with `\n`
pub fn event_body(record: &LogRecord) -> String {
    format!("{} {}", record.severity().tag(), record.lines.join("\n"))
}

/// Log file line: timestamp, host, `source:` and tag, tab separated, then the message
pub fn file_line(record: &LogRecord, timestamp: &str, hostname: &str, line: &str) -> String {
    let source = format!("{}:", record.source);
    [
        timestamp,
        hostname,
        source.as_str(),
        record.severity().tag(),
        line,
    ]
    .join("\t")
}

/// Serial line: `<timestamp> <source>: <tag> <message>`
pub fn serial_line(record: &LogRecord, timestamp: &str, line: &str) -> String {
    format!(
        "{} {}: {} {}",
        timestamp,
        record.source,
        record.severity().tag(),
        line
    )
}

/// Console stream line: `<timestamp> <message>`
pub fn console_line(timestamp: &str, line: &str) -> String {
    format!("{timestamp} {line}")
}

/// Console error payload: all lines as one multi-line block
pub fn error_payload(record: &LogRecord) -> String {
    record.lines.join("\n")
}

/// Host name written to the log file
///
/// The configured name wins; otherwise the OS host name, falling back to
/// `localhost` when it is not valid UTF-8 or empty.
pub fn host_name(configured: Option<&str>) -> String {
    if let Some(name) = configured {
        return name.to_string();
    }
    gethostname::gethostname()
        .into_string()
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
