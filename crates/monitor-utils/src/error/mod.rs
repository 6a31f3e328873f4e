mod frame;
mod parser;

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::is::Kind;

pub use frame::{extract_frame, MARKER_KEYWORD};
pub use parser::{parse_error_string, PREAMBLE_MARKER};

/// The function name used for frames whose function could not be recovered.
pub const UNKNOWN_FUNCTION: &str = "<unknown function>";

/// Errors that can occur when parsing error text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text does not contain a message line followed by anything else.
    #[error("insufficient lines in error text: expected at least 2, found {found}")]
    InsufficientLines { found: usize },

    /// The value handed in carries no error text to parse.
    #[error("value of kind {kind} does not carry error text")]
    NotErrorText { kind: Kind },
}

/// An error recovered from the text form produced by a host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedError {
    /// The error message
    pub message: String,

    /// The name of the error kind (e.g. "TypeError"), empty if not present
    pub name: String,

    /// The call stack, most recent call first
    pub stack: StackTrace,
}

/// A stack trace recovered from error text.
pub type StackTrace = Vec<StackFrame>;

/// A single call site within a recovered stack trace.
///
/// Fields which could not be extracted hold their sentinel value: an empty
/// url, `None` for positions and [`UNKNOWN_FUNCTION`] for the function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    #[serde(rename = "func")]
    pub function: String,

    /// The file or module locator
    pub url: String,

    /// The 1-based line number (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// The column number (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Call arguments. Never captured from text, so always empty.
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl StackFrame {
    /// Reports whether the frame carries no location information at all.
    pub fn is_degenerate(&self) -> bool {
        self.url.is_empty() && self.line.is_none() && self.column.is_none()
    }

    /// Reports whether the function name could not be recovered.
    pub fn is_unknown_function(&self) -> bool {
        self.function == UNKNOWN_FUNCTION
    }
}

impl Default for StackFrame {
    fn default() -> Self {
        Self {
            function: UNKNOWN_FUNCTION.to_string(),
            url: String::new(),
            line: None,
            column: None,
            args: Vec::new(),
        }
    }
}

impl FromStr for ParsedError {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_error_string(s)
    }
}

const MAX_FRAMES_TO_DISPLAY: usize = 6;
const STACK_TAB_SIZE: &str = "  ";

/// Write the stack trace to the given formatter.
pub fn write_stack_trace<W: std::fmt::Write>(stack: &StackTrace, f: &mut W) -> std::fmt::Result {
    if stack.is_empty() {
        return Ok(());
    }

    write!(f, "\n{}Stack:", STACK_TAB_SIZE)?;

    // Align the locations of the frames we are going to print
    let longest_func = stack
        .iter()
        .take(MAX_FRAMES_TO_DISPLAY)
        .map(|frame| frame.function.len())
        .max()
        .unwrap_or(0);

    for frame in stack.iter().take(MAX_FRAMES_TO_DISPLAY) {
        write!(
            f,
            "\n{}{}at {:<width$} {}",
            STACK_TAB_SIZE,
            STACK_TAB_SIZE,
            frame.function,
            Location(frame),
            width = longest_func
        )?;
    }

    if stack.len() > MAX_FRAMES_TO_DISPLAY {
        write!(
            f,
            "\n{}{}... remaining {} frames omitted...",
            STACK_TAB_SIZE,
            STACK_TAB_SIZE,
            stack.len() - MAX_FRAMES_TO_DISPLAY
        )?;
    }

    Ok(())
}

struct Location<'a>(&'a StackFrame);

impl Display for Location<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let frame = self.0;
        if frame.is_degenerate() {
            return write!(f, "<unknown location>");
        }

        write!(f, "{}", frame.url)?;
        match (frame.line, frame.column) {
            (Some(line), Some(col)) => write!(f, ":{}:{}", line, col),
            (Some(line), None) => write!(f, ":{}", line),
            (None, Some(col)) => write!(f, ":?:{}", col),
            (None, None) => Ok(()),
        }
    }
}

/// Display the error in a human readable format.
impl Display for ParsedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() || self.message.contains(self.name.as_str()) {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "{}: {}", self.name, self.message)?;
        }
        write_stack_trace(&self.stack, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(function: &str, url: &str, line: Option<u32>, column: Option<u32>) -> StackFrame {
        StackFrame {
            function: function.to_string(),
            url: url.to_string(),
            line,
            column,
            args: vec![],
        }
    }

    #[test]
    fn test_serialize_frame() {
        let value = serde_json::to_value(frame("foo", "app.js", Some(3), Some(9))).unwrap();
        assert_eq!(
            value,
            json!({"func": "foo", "url": "app.js", "line": 3, "column": 9, "args": []})
        );

        // Absent positions are left out rather than written as zero.
        let value = serde_json::to_value(StackFrame::default()).unwrap();
        assert_eq!(
            value,
            json!({"func": UNKNOWN_FUNCTION, "url": "", "args": []})
        );
    }

    #[test]
    fn test_deserialize_frame_without_positions() {
        let frame: StackFrame =
            serde_json::from_value(json!({"func": "bar", "url": "x.js"})).unwrap();
        assert_eq!(frame.line, None);
        assert_eq!(frame.column, None);
        assert!(frame.args.is_empty());
    }

    #[test]
    fn test_degenerate() {
        assert!(StackFrame::default().is_degenerate());
        assert!(StackFrame::default().is_unknown_function());
        assert!(!frame("f", "", Some(1), None).is_degenerate());
        assert!(!frame("f", "x.js", None, None).is_degenerate());
    }

    #[test]
    fn test_display() {
        let err = ParsedError {
            message: "Cannot read properties of undefined".into(),
            name: "TypeError".into(),
            stack: vec![
                frame("render", "https://x.com/app.js", Some(10), Some(3)),
                frame("main", "https://x.com/main.js", Some(2), None),
                StackFrame::default(),
            ],
        };

        let expected = [
            "TypeError: Cannot read properties of undefined",
            "  Stack:",
            "    at render             https://x.com/app.js:10:3",
            "    at main               https://x.com/main.js:2",
            "    at <unknown function> <unknown location>",
        ]
        .join("\n");
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_display_omits_frames() {
        let err = ParsedError {
            message: "TypeError: boom".into(),
            name: "TypeError".into(),
            stack: (1..=8)
                .map(|i| frame("f", "a.js", Some(i), Some(1)))
                .collect(),
        };

        let out = err.to_string();
        assert!(out.starts_with("TypeError: boom\n"));
        assert_eq!(out.matches("at f a.js").count(), MAX_FRAMES_TO_DISPLAY);
        assert!(out.ends_with("... remaining 2 frames omitted..."));
    }
}
