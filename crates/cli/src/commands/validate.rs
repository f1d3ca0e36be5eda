//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{Channel, FanlogConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    source: String,
    log_name: String,
    enabled_channels: Vec<&'static str>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    source: config
                        .defaults
                        .source
                        .clone()
                        .unwrap_or_else(|| contracts::FALLBACK_SOURCE.to_string()),
                    log_name: config.event_log.log_name.clone(),
                    enabled_channels: Channel::ALL
                        .into_iter()
                        .filter(|c| config.thresholds.get(*c).is_some())
                        .map(Channel::as_str)
                        .collect(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &FanlogConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let thresholds = &config.thresholds;
    let defaults = &config.defaults;

    if Channel::ALL.iter().all(|c| thresholds.get(*c).is_none()) {
        warnings.push("Every channel is disabled - messages go nowhere".to_string());
    }

    if thresholds.file.is_some() && defaults.log_file.is_none() {
        warnings.push(
            "thresholds.file is set but defaults.log_file is not - only calls with a log file reach the file channel"
                .to_string(),
        );
    }

    match (thresholds.serial.is_some(), defaults.serial_port.is_some()) {
        (true, false) => warnings
            .push("thresholds.serial is set but defaults.serial_port is not - serial is skipped".to_string()),
        (false, true) => warnings
            .push("defaults.serial_port is set but thresholds.serial is off - serial is skipped".to_string()),
        _ => {}
    }

    if config.serial.wait_for_response && thresholds.serial.is_some() {
        warnings.push(
            "serial.wait_for_response blocks every dispatch until the device answers".to_string(),
        );
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Source: {}", summary.source);
            println!("  Event log: {}", summary.log_name);
            println!("  Channels: {}", summary.enabled_channels.join(", "));
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
