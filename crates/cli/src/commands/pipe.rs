//! `pipe` command implementation.

use anyhow::{Context, Result};
use contracts::{LogOptions, Messages, Severity};
use dispatcher::Logger;
use std::io::{self, BufRead};
use tracing::info;

use super::{log_options, prepare};
use crate::cli::PipeArgs;

/// Execute the `pipe` command
pub fn run_pipe(args: &PipeArgs) -> Result<()> {
    let (severity, logger) = prepare(&args.dispatch)?;

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let options = log_options(&args.dispatch);
    let count = pipe_lines(&logger, severity, &options, io::stdin().lock())
        .context("Failed to read from stdin")?;

    info!(severity = %severity, lines = count, "Input exhausted");

    if severity == Severity::Fatal {
        logger.fatal(Messages::new(), &options, args.dispatch.exit_code);
    }

    Ok(())
}

/// One dispatch per non-blank input line; returns the number dispatched
///
/// FATAL lines are logged without terminating; the caller exits once input ends.
fn pipe_lines(
    logger: &Logger,
    severity: Severity,
    options: &LogOptions,
    input: impl BufRead,
) -> io::Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        logger.log(severity, line, options);
        count += 1;
    }
    Ok(count)
}
