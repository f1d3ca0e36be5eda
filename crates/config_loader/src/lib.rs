//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Apply `FANLOG_*` environment overrides
//! - Validate configuration legality
//! - Generate `FanlogConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("fanlog.toml")).unwrap();
//! println!("Event log: {}", config.event_log.log_name);
//! ```

mod env;
mod parser;
mod validator;

pub use contracts::FanlogConfig;
pub use env::{apply_overrides, apply_process_env, ENV_PREFIX};
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<FanlogConfig, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<FanlogConfig, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Load the effective configuration for a process
    ///
    /// Starts from `path` when given (defaults otherwise), applies the process
    /// environment, then validates the result.
    pub fn load_effective(path: Option<&Path>) -> Result<FanlogConfig, ContractError> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => FanlogConfig::default(),
        };
        apply_process_env(&mut config)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Validate an already-built configuration
    pub fn validate(config: &FanlogConfig) -> Result<(), ContractError> {
        validator::validate(config)
    }

    /// Serialize FanlogConfig to TOML string
    pub fn to_toml(config: &FanlogConfig) -> Result<String, ContractError> {
        ConfigFormat::Toml.render(config)
    }

    /// Serialize FanlogConfig to JSON string
    pub fn to_json(config: &FanlogConfig) -> Result<String, ContractError> {
        ConfigFormat::Json.render(config)
    }
}

impl ConfigLoader {
    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(content: &str, format: ConfigFormat) -> Result<FanlogConfig, ContractError> {
        let config = format.parse(content)?;
        validator::validate(&config)?;
        Ok(config)
    }
}
