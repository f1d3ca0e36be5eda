//! FanlogConfig - Config Loader 输出
//!
//! 描述所有通道的默认值与阈值：source、事件 ID、日志文件、串口、事件日志名称。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{severity::threshold, Channel, Severity};

/// Identifier used when neither the call nor the config names a source
pub const FALLBACK_SOURCE: &str = "ps_log";

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FanlogConfig {
    /// 调用级参数的默认值
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// 各通道最低级别
    #[serde(default)]
    pub thresholds: ChannelThresholds,

    /// 事件日志设置
    #[serde(default)]
    pub event_log: EventLogConfig,

    /// 串口设置
    #[serde(default)]
    pub serial: SerialSettings,

    /// 控制台设置
    #[serde(default)]
    pub console: ConsoleConfig,

    /// FATAL 退出设置
    #[serde(default)]
    pub exit: ExitConfig,
}

/// Defaults for the per-call overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// 默认 source
    #[serde(default)]
    pub source: Option<String>,

    /// 默认事件 ID
    #[serde(default = "default_event_id")]
    pub event_id: u32,

    /// 默认日志文件 (None = 不写文件)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// 默认串口名称 (None = 不写串口)
    #[serde(default)]
    pub serial_port: Option<String>,

    /// 写入日志文件的主机名 (None = 查询系统)
    #[serde(default)]
    pub hostname: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            source: None,
            event_id: default_event_id(),
            log_file: None,
            serial_port: None,
            hostname: None,
        }
    }
}

fn default_event_id() -> u32 {
    1000
}

/// Per-channel minimum severity; `None` disables the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelThresholds {
    #[serde(default = "default_console_threshold", with = "threshold")]
    pub console: Option<Severity>,

    #[serde(default = "default_event_threshold", with = "threshold")]
    pub event: Option<Severity>,

    #[serde(default = "default_file_threshold", with = "threshold")]
    pub file: Option<Severity>,

    #[serde(default, with = "threshold")]
    pub serial: Option<Severity>,
}

impl ChannelThresholds {
    /// Every channel disabled
    pub fn disabled() -> Self {
        Self {
            console: None,
            event: None,
            file: None,
            serial: None,
        }
    }

    /// Every channel at the same minimum
    pub fn all(minimum: Severity) -> Self {
        Self {
            console: Some(minimum),
            event: Some(minimum),
            file: Some(minimum),
            serial: Some(minimum),
        }
    }

    pub fn get(&self, channel: Channel) -> Option<Severity> {
        match channel {
            Channel::Console => self.console,
            Channel::EventLog => self.event,
            Channel::File => self.file,
            Channel::Serial => self.serial,
        }
    }

    pub fn set(&mut self, channel: Channel, minimum: Option<Severity>) {
        match channel {
            Channel::Console => self.console = minimum,
            Channel::EventLog => self.event = minimum,
            Channel::File => self.file = minimum,
            Channel::Serial => self.serial = minimum,
        }
    }
}

impl Default for ChannelThresholds {
    fn default() -> Self {
        Self {
            console: default_console_threshold(),
            event: default_event_threshold(),
            file: default_file_threshold(),
            serial: None,
        }
    }
}

fn default_console_threshold() -> Option<Severity> {
    Some(Severity::Info)
}

fn default_event_threshold() -> Option<Severity> {
    Some(Severity::Warning)
}

fn default_file_threshold() -> Option<Severity> {
    Some(Severity::Warning)
}

/// 事件日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLogConfig {
    /// 事件日志名称 (映射到 syslog facility)
    #[serde(default = "default_log_name")]
    pub log_name: String,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_name: default_log_name(),
        }
    }
}

fn default_log_name() -> String {
    "Application".to_string()
}

/// Serial parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

/// Serial stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBits {
    #[default]
    One,
    Two,
}

/// 串口参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialSettings {
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default)]
    pub parity: Parity,

    /// 数据位 (5..=8)
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,

    #[serde(default)]
    pub stop_bits: StopBits,

    /// 写入后阻塞等待一行响应
    #[serde(default)]
    pub wait_for_response: bool,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: default_baud_rate(),
            parity: Parity::None,
            data_bits: default_data_bits(),
            stop_bits: StopBits::One,
            wait_for_response: false,
        }
    }
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_data_bits() -> u8 {
    8
}

/// Console rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleMode {
    /// stdout / stderr with stream labels
    #[default]
    Terminal,
    /// tracing events
    Tracing,
}

/// 控制台设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub mode: ConsoleMode,
}

/// FATAL 退出设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitConfig {
    #[serde(default = "default_exit_code")]
    pub default_code: i32,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self {
            default_code: default_exit_code(),
        }
    }
}

fn default_exit_code() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = ChannelThresholds::default();
        assert_eq!(thresholds.get(Channel::Console), Some(Severity::Info));
        assert_eq!(thresholds.get(Channel::EventLog), Some(Severity::Warning));
        assert_eq!(thresholds.get(Channel::File), Some(Severity::Warning));
        assert_eq!(thresholds.get(Channel::Serial), None);
    }

    #[test]
    fn test_info_stays_out_of_default_file() {
        let thresholds = FanlogConfig::default().thresholds;
        assert_eq!(thresholds.file, Some(Severity::Warning));
        assert!(thresholds.file.is_some_and(|min| Severity::Info < min));
        assert!(thresholds.console.is_some_and(|min| Severity::Info >= min));
    }

    #[test]
    fn test_thresholds_from_json() {
        let thresholds: ChannelThresholds =
            serde_json::from_str(r#"{ "console": "off", "serial": 3 }"#).unwrap();
        assert_eq!(thresholds.console, None);
        assert_eq!(thresholds.event, Some(Severity::Warning));
        assert_eq!(thresholds.serial, Some(Severity::Error));
    }

    #[test]
    fn test_thresholds_reject_unknown_token() {
        let result: Result<ChannelThresholds, _> =
            serde_json::from_str(r#"{ "file": "chatty" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serial_defaults() {
        let settings = SerialSettings::default();
        assert_eq!(settings.baud_rate, 9600);
        assert_eq!(settings.data_bits, 8);
        assert_eq!(settings.parity, Parity::None);
        assert_eq!(settings.stop_bits, StopBits::One);
        assert!(!settings.wait_for_response);
    }
}
