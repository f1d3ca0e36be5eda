//! Severity - total-ordered log level shared by every channel

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Log severity
///
/// Ordering is numeric: `Debug < Info < Warning < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Numeric level (0-4)
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Upper-case name used in config files and diagnostics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Bracketed tag written in front of every channel line
    pub fn tag(self) -> &'static str {
        match self {
            Self::Debug => "[D]",
            Self::Info => "[I]",
            Self::Warning => "[W]",
            Self::Error => "[E]",
            Self::Fatal => "[F]",
        }
    }

    /// Whether the console reports this severity through its error path
    pub fn is_error(self) -> bool {
        self >= Self::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for Severity {
    type Error = ContractError;

    fn try_from(value: i64) -> Result<Self, ContractError> {
        match value {
            0 => Ok(Severity::Debug),
            1 => Ok(Severity::Info),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Error),
            4 => Ok(Severity::Fatal),
            other => Err(ContractError::unknown_severity(other.to_string())),
        }
    }
}

impl FromStr for Severity {
    type Err = ContractError;

    /// Accepts names (`warning`, `warn`), single-letter tags (`W`, `[W]`) and levels (`2`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let bare = token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(token);

        match bare.to_ascii_lowercase().as_str() {
            "debug" | "d" => Ok(Self::Debug),
            "info" | "i" | "information" | "verbose" => Ok(Self::Info),
            "warning" | "warn" | "w" => Ok(Self::Warning),
            "error" | "e" => Ok(Self::Error),
            "fatal" | "f" | "critical" => Ok(Self::Fatal),
            other => match other.parse::<i64>() {
                Ok(level) => Self::try_from(level),
                Err(_) => Err(ContractError::unknown_severity(token)),
            },
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Raw token as it appears in TOML/JSON
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityToken {
    Level(i64),
    Name(String),
}

impl SeverityToken {
    fn resolve(self) -> Result<Severity, ContractError> {
        match self {
            Self::Level(level) => Severity::try_from(level),
            Self::Name(name) => name.parse(),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SeverityToken::deserialize(deserializer)?
            .resolve()
            .map_err(serde::de::Error::custom)
    }
}

/// Serde helpers for an optional channel threshold
///
/// `"off"`, `"none"` and `"disabled"` deserialize to `None`.
pub mod threshold {
    use super::*;

    const DISABLED: [&str; 3] = ["off", "none", "disabled"];

    pub fn serialize<S: Serializer>(
        value: &Option<Severity>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(severity) => severity.serialize(serializer),
            None => serializer.serialize_str("off"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Severity>, D::Error> {
        match SeverityToken::deserialize(deserializer)? {
            SeverityToken::Name(name)
                if DISABLED.contains(&name.trim().to_ascii_lowercase().as_str()) =>
            {
                Ok(None)
            }
            token => token.resolve().map(Some).map_err(serde::de::Error::custom),
        }
    }

    /// Parse a threshold from a plain string (env vars, CLI flags)
    pub fn parse(token: &str) -> Result<Option<Severity>, ContractError> {
        if DISABLED.contains(&token.trim().to_ascii_lowercase().as_str()) {
            Ok(None)
        } else {
            token.parse().map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_numeric() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].level() + 1, pair[1].level());
        }
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("[E]".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("4".parse::<Severity>().unwrap(), Severity::Fatal);
        assert_eq!(" i ".parse::<Severity>().unwrap(), Severity::Info);
    }

    #[test]
    fn test_parse_unknown_token() {
        let err = "loud".parse::<Severity>().unwrap_err();
        assert!(matches!(err, ContractError::UnknownSeverity { .. }));
        assert!("7".parse::<Severity>().is_err());
        assert!(Severity::try_from(-1).is_err());
    }

    #[test]
    fn test_threshold_parse() {
        assert_eq!(threshold::parse("off").unwrap(), None);
        assert_eq!(threshold::parse("Disabled").unwrap(), None);
        assert_eq!(threshold::parse("error").unwrap(), Some(Severity::Error));
        assert!(threshold::parse("sometimes").is_err());
    }

    #[test]
    fn test_tags() {
        let tags: Vec<_> = Severity::ALL.iter().map(|s| s.tag()).collect();
        assert_eq!(tags, ["[D]", "[I]", "[W]", "[E]", "[F]"]);
    }

    #[test]
    fn test_is_error() {
        let errors: Vec<_> = Severity::ALL.into_iter().filter(|s| s.is_error()).collect();
        assert_eq!(errors, [Severity::Error, Severity::Fatal]);
    }
}
