//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fanlog - one log call, four channels
#[derive(Parser, Debug)]
#[command(
    name = "fanlog",
    author,
    version,
    about = "Fan a log message out to console, event log, file and serial port",
    long_about = "Writes one message to up to four channels: the console, the system event log,\n\
                  an append-only log file and a serial port.\n\n\
                  Every channel has its own minimum severity. A failing channel is reported\n\
                  as a console warning and never stops the others."
)]
pub struct Cli {
    /// Increase diagnostic verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FANLOG_VERBOSE")]
    pub verbose: u8,

    /// Suppress diagnostics except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Diagnostic output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "FANLOG_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one message
    Log(LogArgs),

    /// Dispatch every stdin line as its own message
    Pipe(PipeArgs),

    /// Validate a configuration file
    Validate(ValidateArgs),

    /// Display the resolved configuration
    Info(InfoArgs),
}

/// Options shared by the dispatching commands
#[derive(Args, Debug, Clone)]
pub struct DispatchArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "FANLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Severity: debug, info, warning, error, fatal (or D/I/W/E/F, 0-4)
    #[arg(short, long, default_value = "info")]
    pub level: String,

    /// Source name, overrides the configured default
    #[arg(short, long)]
    pub source: Option<String>,

    /// Event ID, overrides the configured default
    #[arg(short, long)]
    pub event_id: Option<u32>,

    /// Log file, overrides the configured default
    #[arg(short = 'f', long)]
    pub log_file: Option<PathBuf>,

    /// Exit code for fatal messages (defaults to `exit.default_code`)
    #[arg(long)]
    pub exit_code: Option<i32>,
}

/// Arguments for the `log` command
#[derive(Parser, Debug, Clone)]
pub struct LogArgs {
    #[command(flatten)]
    pub dispatch: DispatchArgs,

    /// Message text; read from stdin when omitted
    pub message: Vec<String>,
}

/// Arguments for the `pipe` command
#[derive(Parser, Debug, Clone)]
pub struct PipeArgs {
    #[command(flatten)]
    pub dispatch: DispatchArgs,

    /// Prometheus metrics port (0 = disabled)
    #[arg(long, default_value = "0", env = "FANLOG_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "fanlog.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file; defaults and environment only when omitted
    #[arg(short, long, env = "FANLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List serial ports present on this host
    #[arg(long)]
    pub ports: bool,
}

/// Diagnostic output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
