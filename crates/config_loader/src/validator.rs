//! 配置校验模块
//!
//! 校验规则：
//! - source / hostname / serial_port 若设置则不能为空
//! - log_file 若设置则不能为空路径
//! - event_log.log_name 不能为空
//! - serial.baud_rate > 0
//! - serial.data_bits 在 5..=8 之间

use contracts::{ContractError, FanlogConfig};

/// 校验 FanlogConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &FanlogConfig) -> Result<(), ContractError> {
    validate_defaults(config)?;
    validate_event_log(config)?;
    validate_serial(config)?;
    Ok(())
}

fn require_non_blank(field: &str, value: Option<&str>) -> Result<(), ContractError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ContractError::config_validation(
            field,
            "must not be empty when set",
        )),
        _ => Ok(()),
    }
}

/// 校验默认值
fn validate_defaults(config: &FanlogConfig) -> Result<(), ContractError> {
    let defaults = &config.defaults;
    require_non_blank("defaults.source", defaults.source.as_deref())?;
    require_non_blank("defaults.hostname", defaults.hostname.as_deref())?;
    require_non_blank("defaults.serial_port", defaults.serial_port.as_deref())?;

    if let Some(path) = &defaults.log_file {
        if path.as_os_str().is_empty() {
            return Err(ContractError::config_validation(
                "defaults.log_file",
                "must not be empty when set",
            ));
        }
    }
    Ok(())
}

/// 校验事件日志设置
fn validate_event_log(config: &FanlogConfig) -> Result<(), ContractError> {
    if config.event_log.log_name.trim().is_empty() {
        return Err(ContractError::config_validation(
            "event_log.log_name",
            "log name cannot be empty",
        ));
    }
    Ok(())
}

/// 校验串口参数
fn validate_serial(config: &FanlogConfig) -> Result<(), ContractError> {
    let serial = &config.serial;

    if serial.baud_rate == 0 {
        return Err(ContractError::config_validation(
            "serial.baud_rate",
            "baud_rate must be > 0",
        ));
    }

    if !(5..=8).contains(&serial.data_bits) {
        return Err(ContractError::config_validation(
            "serial.data_bits",
            format!("data_bits must be within 5..=8, got {}", serial.data_bits),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&FanlogConfig::default()).is_ok());
    }

    #[test]
    fn test_blank_source_rejected() {
        let mut config = FanlogConfig::default();
        config.defaults.source = Some("  ".to_string());
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("defaults.source"));
    }

    #[test]
    fn test_data_bits_range() {
        let mut config = FanlogConfig::default();
        config.serial.data_bits = 9;
        assert!(validate(&config).is_err());
        config.serial.data_bits = 5;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_baud_rate_rejected() {
        let mut config = FanlogConfig::default();
        config.serial.baud_rate = 0;
        let err = validate(&config).unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { .. }));
    }

    #[test]
    fn test_empty_log_name_rejected() {
        let mut config = FanlogConfig::default();
        config.event_log.log_name = String::new();
        assert!(validate(&config).is_err());
    }
}
