//! Message normalization
//!
//! Turns the heterogeneous inputs of one log call into an ordered sequence of
//! single-line strings. Text is split on every line-ending convention and
//! empty lines are kept; structured errors collapse to one line.

use contracts::{ErrorRecord, MessageInput};

/// Script name used when an error has no originating file
pub const INTERACTIVE: &str = "INTERACTIVE";

/// Normalize inputs into lines, lazily and in order
pub fn normalize<I>(inputs: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = MessageInput>,
{
    inputs.into_iter().flat_map(normalize_one)
}

/// Normalize a single input item
pub fn normalize_one(input: MessageInput) -> std::vec::IntoIter<String> {
    let lines: Vec<String> = match input {
        MessageInput::Text(text) => split_lines(&text).map(str::to_string).collect(),
        MessageInput::Error(record) => vec![render_error(&record)],
        MessageInput::Value {
            rendered: Some(text),
            ..
        } => split_lines(&text).map(str::to_string).collect(),
        MessageInput::Value {
            type_name,
            rendered: None,
        } => vec![format!("<unprintable {type_name}>")],
    };
    lines.into_iter()
}

/// Render an error record as one line
///
/// `<inner>  : <message> {code, script:line}` when an inner cause exists,
/// `<message> {code, script:line}` otherwise.
pub fn render_error(record: &ErrorRecord) -> String {
    let script = record
        .script
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(INTERACTIVE);
    let position = format!("{{{}, {}:{}}}", record.code, script, record.line);
    let message = flatten(&record.message);

    match record.inner.as_deref() {
        Some(inner) => format!("{}  : {} {}", flatten(inner), message, position),
        None => format!("{message} {position}"),
    }
}

fn flatten(text: &str) -> String {
    split_lines(text).collect::<Vec<_>>().join(" ")
}

/// Split on `\r\n`, `\n` or `\r`
///
/// A trailing line ending yields a trailing empty line; empty text yields one
/// empty line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: Some(text) }
}

/// Iterator returned by [`split_lines`]
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                let eol_len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = Some(&rest[idx + eol_len..]);
                Some(&rest[..idx])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
