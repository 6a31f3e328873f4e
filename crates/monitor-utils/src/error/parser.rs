use crate::error::frame::{extract_frame, is_trace_line};
use crate::error::{ParseError, ParsedError, StackTrace};

/// Marks a wrapper line that some mini-program engines put in front of
/// the actual error text.
pub const PREAMBLE_MARKER: &str = "MiniProgramError";

/// Parses the text form of an error into its message, name and stack.
///
/// The text is expected to be laid out as:
///
/// ```text
/// [MiniProgramError]          (optional wrapper line)
/// <message>
/// <name>: <description>       (optional)
///     at <function> (<url>:<line>:<column>)
///     ...
/// ```
///
/// Only the line count is validated. Trace lines that can't be fully
/// understood produce sparse frames instead of failing the parse.
pub fn parse_error_string(raw: &str) -> Result<ParsedError, ParseError> {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() < 2 {
        return Err(ParseError::InsufficientLines { found: lines.len() });
    }

    let mut lines = lines.into_iter().peekable();

    // The marker may appear anywhere within the wrapper line.
    if lines.peek().is_some_and(|first| first.contains(PREAMBLE_MARKER)) {
        lines.next();
    }

    let message = lines.next().unwrap_or_default().to_string();

    // The line after the message names the error, unless the stack starts right away.
    let name = match lines.next_if(|line| !is_trace_line(line)) {
        Some(line) => line.split(':').next().unwrap_or_default().trim().to_string(),
        None => String::new(),
    };

    let stack: StackTrace = lines
        .filter(|line| !line.trim().is_empty())
        .map(extract_frame)
        .collect();

    Ok(ParsedError {
        message,
        name,
        stack,
    })
}
