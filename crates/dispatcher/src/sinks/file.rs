//! AppendFileSink - appends lines to a log file

use contracts::{Channel, ContractError, FileSink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{instrument, trace};

/// Sink that appends one line per call, creating the file on first use
///
/// The file handle is opened and closed within each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendFileSink;

impl AppendFileSink {
    pub fn new() -> Self {
        Self
    }

    fn check_parent(path: &Path) -> Result<(), ContractError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(ContractError::sink_unavailable(
                    Channel::File,
                    format!("directory '{}' does not exist", parent.display()),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl FileSink for AppendFileSink {
    #[instrument(name = "file_sink_append", skip(self, path, line), fields(path = %path.display()))]
    fn append(&self, path: &Path, line: &str) -> Result<(), ContractError> {
        Self::check_parent(path)?;

        let target = path.display().to_string();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ContractError::from_sink_io(Channel::File, &target, e))?;

        // single write per line so concurrent appenders never interleave
        file
            .write_all(format!("{line}\n").as_bytes())
            .map_err(|e| ContractError::from_sink_io(Channel::File, &target, e))?;
        trace!(bytes = line.len() + 1, "Line appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_creates_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let sink = AppendFileSink::new();

        sink.append(&path, "first").unwrap();
        sink.append(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_file_sink_keeps_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old\n").unwrap();

        AppendFileSink::new().append(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_file_sink_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");

        let err = AppendFileSink::new().append(&path, "line").unwrap_err();

        assert!(matches!(
            err,
            ContractError::SinkUnavailable {
                channel: Channel::File,
                ..
            }
        ));
        assert!(!path.exists());
    }
}
