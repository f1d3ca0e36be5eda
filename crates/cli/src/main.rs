//! # fanlog CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 单条消息分发 (`log`) 与逐行分发 (`pipe`)
//! - 配置验证与信息展示
//! - 诊断日志与可选 Prometheus 指标

mod cli;
mod commands;
mod error;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::debug;

use cli::{Cli, Commands};
use commands::{run_info, run_log, run_pipe, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize diagnostics based on CLI options
    observability::init_with_config(observability_config(&cli))?;

    debug!(version = env!("CARGO_PKG_VERSION"), "fanlog starting");

    let result = match &cli.command {
        Commands::Log(args) => run_log(args),
        Commands::Pipe(args) => run_pipe(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the verbosity flags
fn observability_config(cli: &Cli) -> ObservabilityConfig {
    let default_log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: None,
        default_log_level: default_log_level.to_string(),
    }
}
