//! `log` command implementation.

use anyhow::{Context, Result};
use contracts::{Messages, Severity};
use std::io::{self, Read};
use tracing::info;

use super::{log_options, prepare};
use crate::cli::LogArgs;

/// Execute the `log` command
pub fn run_log(args: &LogArgs) -> Result<()> {
    let (severity, logger) = prepare(&args.dispatch)?;

    let text = message_text(&args.message, io::stdin().lock())
        .context("Failed to read message from stdin")?;
    let options = log_options(&args.dispatch);

    info!(severity = %severity, bytes = text.len(), "Dispatching message");

    // no text means nothing to emit, but fatal still exits
    let messages = if text.is_empty() {
        Messages::new()
    } else {
        Messages::from(text)
    };

    if severity == Severity::Fatal {
        logger.fatal(messages, &options, args.dispatch.exit_code);
    } else {
        logger.log(severity, messages, &options);
    }

    Ok(())
}

/// Message words joined by spaces, or all of `input` when there are none
///
/// One trailing line ending is dropped from `input`.
fn message_text(words: &[String], mut input: impl Read) -> io::Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }

    let mut text = String::new();
    input.read_to_string(&mut text)?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}
