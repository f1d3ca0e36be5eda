//! Config file formats
//!
//! A config file is TOML or JSON, chosen by its extension. Parse errors carry
//! the line and column of the offending input.

use std::path::Path;

use contracts::{ContractError, FanlogConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Format for a bare extension, case-insensitive
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Format of a config file path
    ///
    /// # Errors
    /// `ConfigParse` when the path has no extension or an unknown one.
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    /// Deserialize `content`; validation is left to the caller
    pub fn parse(self, content: &str) -> Result<FanlogConfig, ContractError> {
        match self {
            Self::Toml => toml::from_str(content).map_err(|e| {
                let at = e.span().map(|span| position(content, span.start));
                self.parse_error(at, e.message().to_string(), Box::new(e))
            }),
            Self::Json => serde_json::from_str(content).map_err(|e| {
                let at = (e.line() > 0).then(|| (e.line(), e.column()));
                self.parse_error(at, e.to_string(), Box::new(e))
            }),
        }
    }

    /// Serialize `config` in this format
    pub fn render(self, config: &FanlogConfig) -> Result<String, ContractError> {
        let rendered = match self {
            Self::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
            Self::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        };
        rendered.map_err(|e| {
            ContractError::config_parse(format!("{} serialize error: {e}", self.name()))
        })
    }

    fn parse_error(
        self,
        at: Option<(usize, usize)>,
        detail: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> ContractError {
        let message = match at {
            Some((line, column)) => {
                format!("{} parse error at line {line}, column {column}: {detail}", self.name())
            }
            None => format!("{} parse error: {detail}", self.name()),
        };
        ContractError::ConfigParse {
            message,
            source: Some(source),
        }
    }
}

/// 1-based line and column of a byte offset
fn position(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Parity, Severity};

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
[defaults]
source = "backup"
log_file = "/var/log/backup.log"

[thresholds]
console = "debug"
serial = "error"

[serial]
baud_rate = 115200
parity = "even"
"#;
        let config = ConfigFormat::Toml.parse(content).unwrap();
        assert_eq!(config.defaults.source.as_deref(), Some("backup"));
        assert_eq!(config.defaults.event_id, 1000);
        assert_eq!(config.thresholds.console, Some(Severity::Debug));
        assert_eq!(config.thresholds.event, Some(Severity::Warning));
        assert_eq!(config.thresholds.serial, Some(Severity::Error));
        assert_eq!(config.serial.baud_rate, 115200);
        assert_eq!(config.serial.parity, Parity::Even);
        assert_eq!(config.serial.data_bits, 8);
    }

    #[test]
    fn test_parse_empty_is_default() {
        let config = ConfigFormat::Toml.parse("").unwrap();
        assert_eq!(config, FanlogConfig::default());
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "defaults": { "serial_port": "/dev/ttyUSB0", "event_id": 42 },
            "thresholds": { "file": "off", "serial": 0 },
            "event_log": { "log_name": "System" }
        }"#;
        let config = ConfigFormat::Json.parse(content).unwrap();
        assert_eq!(config.defaults.event_id, 42);
        assert_eq!(config.thresholds.file, None);
        assert_eq!(config.thresholds.serial, Some(Severity::Debug));
        assert_eq!(config.event_log.log_name, "System");
    }

    #[test]
    fn test_toml_error_names_line() {
        let content = "[defaults]\nevent_id = 7\n[thresholds]\nconsole = \"shouty\"\n";
        let err = ConfigFormat::Toml.parse(content).unwrap_err();
        assert!(matches!(err, ContractError::ConfigParse { .. }));
        assert!(err.to_string().contains("line 4"), "{err}");
    }

    #[test]
    fn test_json_error_names_line() {
        let content = "{\n  \"defaults\": {\n    \"event_id\": \"many\"\n  }\n}";
        let err = ConfigFormat::Json.parse(content).unwrap_err();
        assert!(err.to_string().contains("JSON parse error at line 3"), "{err}");
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = ConfigFormat::Toml.parse("invalid toml [[[").unwrap_err();
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_position() {
        assert_eq!(position("abc", 0), (1, 1));
        assert_eq!(position("ab\ncd\nef", 4), (2, 2));
        assert_eq!(position("ab\n", 3), (2, 1));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("fanlog.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("/etc/fanlog.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("fanlog"))
            .unwrap_err()
            .to_string()
            .contains("cannot determine"));
        assert!(ConfigFormat::from_path(Path::new("fanlog.yaml"))
            .unwrap_err()
            .to_string()
            .contains("unsupported config format: .yaml"));
    }

    #[test]
    fn test_render_parses_back() {
        let mut config = FanlogConfig::default();
        config.defaults.source = Some("svc".to_string());
        for format in [ConfigFormat::Toml, ConfigFormat::Json] {
            let text = format.render(&config).unwrap();
            assert_eq!(format.parse(&text).unwrap(), config, "{}", format.name());
        }
    }
}
