//! Command implementations.

mod info;
mod log;
mod pipe;
mod validate;

pub use info::run_info;
pub use log::run_log;
pub use pipe::run_pipe;
pub use validate::run_validate;

use std::path::Path;

use contracts::{FanlogConfig, LogOptions, Severity};
use dispatcher::Logger;
use tracing::info;

use crate::cli::DispatchArgs;
use crate::error::CliError;

/// Load file (if any) plus `FANLOG_*` overrides
fn load_config(path: Option<&Path>) -> Result<FanlogConfig, CliError> {
    if let Some(path) = path {
        if !path.exists() {
            return Err(CliError::config_not_found(path.display().to_string()));
        }
    }
    let config = config_loader::ConfigLoader::load_effective(path)?;
    info!(config = ?path, "Configuration loaded");
    Ok(config)
}

/// Parse the level and build the logger, before anything is emitted
fn prepare(args: &DispatchArgs) -> Result<(Severity, Logger), CliError> {
    let severity: Severity = args.level.parse()?;
    let config = load_config(args.config.as_deref())?;
    let logger = Logger::from_config(config)?;
    Ok((severity, logger))
}

fn log_options(args: &DispatchArgs) -> LogOptions {
    LogOptions {
        source: args.source.clone(),
        event_id: args.event_id,
        log_file: args.log_file.clone(),
    }
}
