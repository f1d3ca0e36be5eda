//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{Channel, FanlogConfig};
use dispatcher::sinks::Facility;
use serde::Serialize;
use tracing::{info, warn};

use super::load_config;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    defaults: DefaultsInfo,
    thresholds: Vec<ThresholdInfo>,
    event_log: EventLogInfo,
    serial: SerialInfo,
    console_mode: String,
    fatal_exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    ports: Option<Vec<PortInfo>>,
}

#[derive(Serialize)]
struct DefaultsInfo {
    source: String,
    event_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serial_port: Option<String>,
    hostname: String,
}

#[derive(Serialize)]
struct ThresholdInfo {
    channel: &'static str,
    /// `None` when the channel is disabled
    minimum: Option<&'static str>,
}

#[derive(Serialize)]
struct EventLogInfo {
    log_name: String,
    facility: String,
}

#[derive(Serialize)]
struct SerialInfo {
    baud_rate: u32,
    parity: String,
    data_bits: u8,
    stop_bits: String,
    wait_for_response: bool,
}

#[derive(Serialize)]
struct PortInfo {
    name: String,
    port_type: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = ?args.config, "Loading configuration info");

    let config = load_config(args.config.as_deref()).context("Failed to resolve configuration")?;
    let ports = args.ports.then(list_ports);

    if args.json {
        let info = build_config_info(&config, ports);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config, ports.as_deref());
    }

    Ok(())
}

fn list_ports() -> Vec<PortInfo> {
    match serialport::available_ports() {
        Ok(ports) => ports
            .into_iter()
            .map(|p| PortInfo {
                name: p.port_name,
                port_type: format!("{:?}", p.port_type),
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "Failed to enumerate serial ports");
            Vec::new()
        }
    }
}

fn build_config_info(config: &FanlogConfig, ports: Option<Vec<PortInfo>>) -> ConfigInfo {
    let defaults = &config.defaults;

    ConfigInfo {
        defaults: DefaultsInfo {
            source: effective_source(config),
            event_id: defaults.event_id,
            log_file: defaults.log_file.as_ref().map(|p| p.display().to_string()),
            serial_port: defaults.serial_port.clone(),
            hostname: dispatcher::format::host_name(defaults.hostname.as_deref()),
        },
        thresholds: Channel::ALL
            .into_iter()
            .map(|channel| ThresholdInfo {
                channel: channel.as_str(),
                minimum: config.thresholds.get(channel).map(|s| s.as_str()),
            })
            .collect(),
        event_log: EventLogInfo {
            log_name: config.event_log.log_name.clone(),
            facility: format!("{:?}", Facility::from_log_name(&config.event_log.log_name)),
        },
        serial: SerialInfo {
            baud_rate: config.serial.baud_rate,
            parity: format!("{:?}", config.serial.parity),
            data_bits: config.serial.data_bits,
            stop_bits: format!("{:?}", config.serial.stop_bits),
            wait_for_response: config.serial.wait_for_response,
        },
        console_mode: format!("{:?}", config.console.mode),
        fatal_exit_code: config.exit.default_code,
        ports,
    }
}

fn effective_source(config: &FanlogConfig) -> String {
    config
        .defaults
        .source
        .clone()
        .unwrap_or_else(|| contracts::FALLBACK_SOURCE.to_string())
}

fn print_config_info(config: &FanlogConfig, ports: Option<&[PortInfo]>) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    fanlog Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let defaults = &config.defaults;
    println!("📝 Defaults");
    println!("   ├─ Source: {}", effective_source(config));
    println!("   ├─ Event ID: {}", defaults.event_id);
    match &defaults.log_file {
        Some(path) => println!("   ├─ Log file: {}", path.display()),
        None => println!("   ├─ Log file: (none)"),
    }
    println!(
        "   └─ Serial port: {}",
        defaults.serial_port.as_deref().unwrap_or("(none)")
    );

    println!("\n🎚  Thresholds");
    for (i, channel) in Channel::ALL.iter().enumerate() {
        let prefix = if i == Channel::ALL.len() - 1 { "└─" } else { "├─" };
        let minimum = config
            .thresholds
            .get(*channel)
            .map_or("off", |s| s.as_str());
        println!("   {} {}: {}", prefix, channel, minimum);
    }

    println!("\n📒 Event log");
    println!("   ├─ Name: {}", config.event_log.log_name);
    println!(
        "   └─ Facility: {:?}",
        Facility::from_log_name(&config.event_log.log_name)
    );

    let serial = &config.serial;
    println!("\n🔌 Serial");
    println!(
        "   ├─ {} baud, {} data bits, parity {:?}, stop bits {:?}",
        serial.baud_rate, serial.data_bits, serial.parity, serial.stop_bits
    );
    println!("   └─ Wait for response: {}", serial.wait_for_response);

    if let Some(ports) = ports {
        println!("\n🔍 Ports ({})", ports.len());
        for (i, port) in ports.iter().enumerate() {
            let prefix = if i == ports.len() - 1 { "└─" } else { "├─" };
            println!("   {} {} ({})", prefix, port.name, port.port_type);
        }
    }

    println!();
}
