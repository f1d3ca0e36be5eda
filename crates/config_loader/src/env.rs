//! Environment overrides
//!
//! `FANLOG_*` variables take precedence over file values. Unknown `FANLOG_*`
//! names are ignored with a debug trace.

use std::path::PathBuf;

use contracts::{threshold, Channel, ContractError, FanlogConfig};
use tracing::debug;

/// Prefix shared by every recognised variable
pub const ENV_PREFIX: &str = "FANLOG_";

/// Apply overrides from `vars` to `config`
///
/// # Errors
/// Invalid numeric values or severity tokens
pub fn apply_overrides<I, K, V>(config: &mut FanlogConfig, vars: I) -> Result<(), ContractError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, value) in vars {
        let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
            continue;
        };
        apply_one(config, name, value.as_ref())?;
    }
    Ok(())
}

/// Apply overrides from the process environment
pub fn apply_process_env(config: &mut FanlogConfig) -> Result<(), ContractError> {
    apply_overrides(config, std::env::vars())
}

fn apply_one(config: &mut FanlogConfig, name: &str, value: &str) -> Result<(), ContractError> {
    let field = || format!("{ENV_PREFIX}{name}");

    match name {
        "SOURCE" => config.defaults.source = Some(value.to_string()),
        "EVENT_ID" => {
            config.defaults.event_id = value.trim().parse().map_err(|e| {
                ContractError::config_validation(field(), format!("invalid event id: {e}"))
            })?;
        }
        "LOG_FILE" => config.defaults.log_file = Some(PathBuf::from(value)),
        "SERIAL_PORT" => config.defaults.serial_port = Some(value.to_string()),
        "HOSTNAME" => config.defaults.hostname = Some(value.to_string()),
        "EVENT_LOG_NAME" => config.event_log.log_name = value.to_string(),
        "CONSOLE_LEVEL" => set_threshold(config, Channel::Console, value)?,
        "EVENT_LEVEL" => set_threshold(config, Channel::EventLog, value)?,
        "FILE_LEVEL" => set_threshold(config, Channel::File, value)?,
        "SERIAL_LEVEL" => set_threshold(config, Channel::Serial, value)?,
        other => {
            debug!(variable = %format!("{ENV_PREFIX}{other}"), "Ignoring unknown variable");
            return Ok(());
        }
    }

    debug!(variable = %field(), "Applied environment override");
    Ok(())
}

fn set_threshold(
    config: &mut FanlogConfig,
    channel: Channel,
    value: &str,
) -> Result<(), ContractError> {
    let minimum = threshold::parse(value)?;
    config.thresholds.set(channel, minimum);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Severity;

    #[test]
    fn test_overrides_applied() {
        let mut config = FanlogConfig::default();
        let vars = [
            ("FANLOG_SOURCE", "nightly"),
            ("FANLOG_EVENT_ID", "77"),
            ("FANLOG_LOG_FILE", "/tmp/nightly.log"),
            ("FANLOG_SERIAL_PORT", "/dev/ttyACM0"),
            ("FANLOG_SERIAL_LEVEL", "warning"),
            ("FANLOG_CONSOLE_LEVEL", "off"),
            ("PATH", "/usr/bin"),
        ];

        apply_overrides(&mut config, vars).unwrap();

        assert_eq!(config.defaults.source.as_deref(), Some("nightly"));
        assert_eq!(config.defaults.event_id, 77);
        assert_eq!(
            config.defaults.log_file,
            Some(PathBuf::from("/tmp/nightly.log"))
        );
        assert_eq!(config.defaults.serial_port.as_deref(), Some("/dev/ttyACM0"));
        assert_eq!(config.thresholds.serial, Some(Severity::Warning));
        assert_eq!(config.thresholds.console, None);
    }

    #[test]
    fn test_invalid_event_id() {
        let mut config = FanlogConfig::default();
        let err = apply_overrides(&mut config, [("FANLOG_EVENT_ID", "many")]).unwrap_err();
        assert!(err.to_string().contains("FANLOG_EVENT_ID"));
    }

    #[test]
    fn test_invalid_level() {
        let mut config = FanlogConfig::default();
        let err = apply_overrides(&mut config, [("FANLOG_FILE_LEVEL", "loud")]).unwrap_err();
        assert!(matches!(err, ContractError::UnknownSeverity { .. }));
    }

    #[test]
    fn test_unknown_variable_ignored() {
        let mut config = FanlogConfig::default();
        apply_overrides(&mut config, [("FANLOG_COLOR", "always")]).unwrap();
        assert_eq!(config, FanlogConfig::default());
    }
}
