use crate::error::{StackFrame, UNKNOWN_FUNCTION};

/// The keyword that introduces a call site in a trace line.
pub const MARKER_KEYWORD: &str = "at";

/// Extracts a stack frame from a single line of trace text.
///
/// Frames are expected in one of the following formats (after whitespace):
/// - "at <function> (<url>:<line>:<column>)"
/// - "at <function> <url>:<line>:<column>"
/// - "at <url>:<line>:<column>"
///
/// Anything that can't be extracted is left at its sentinel value, so this
/// never fails. Whether the line is a trace line at all is up to the caller.
pub fn extract_frame(line: &str) -> StackFrame {
    let after_marker = strip_marker(line);

    let mut function = after_marker
        .and_then(|rest| rest.split_once('('))
        .and_then(|(name, _)| non_empty(name));

    let location = match parenthesized(line) {
        Some(location) => location,
        None => match after_marker {
            Some(rest) => {
                let (name, location) = split_unparenthesized(rest);
                function = function.or(name);
                location
            }
            None => "",
        },
    };

    let (url, line, column) = split_location(location);

    StackFrame {
        function: function.unwrap_or(UNKNOWN_FUNCTION).to_string(),
        url,
        line,
        column,
        args: Vec::new(),
    }
}

/// Reports whether the line opens with the marker keyword.
pub(crate) fn is_trace_line(line: &str) -> bool {
    let line = line.trim_start();
    line.strip_prefix(MARKER_KEYWORD)
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

/// Returns the text following the first standalone marker keyword,
/// with leading whitespace removed.
fn strip_marker(line: &str) -> Option<&str> {
    line.match_indices(MARKER_KEYWORD).find_map(|(idx, _)| {
        let standalone = line[..idx]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let rest = &line[idx + MARKER_KEYWORD.len()..];

        if standalone && rest.starts_with(char::is_whitespace) {
            Some(rest.trim_start())
        } else {
            None
        }
    })
}

/// Returns the text strictly between the first '(' and the next ')'.
fn parenthesized(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once('(')?;
    let (location, _) = rest.split_once(')')?;
    Some(location.trim())
}

/// Splits "<function> <location>" where the location carries no parentheses.
///
/// The last token is only taken as the location if it ends in a position,
/// otherwise the whole text is treated as the function name.
fn split_unparenthesized(rest: &str) -> (Option<&str>, &str) {
    let rest = rest.trim();
    let (head, last) = match rest.rsplit_once(char::is_whitespace) {
        Some((head, last)) => (head, last),
        None => ("", rest),
    };

    let last = last.trim_start_matches('(');
    if has_position(last) {
        (non_empty(head), last)
    } else {
        (non_empty(rest), "")
    }
}

fn has_position(location: &str) -> bool {
    location
        .rsplit_once(':')
        .is_some_and(|(_, tail)| parse_position(tail).is_some())
}

/// Splits "<url>:<line>:<column>" into its parts.
///
/// The last two segments are the positions. Everything before them is the url,
/// which may itself contain colons (e.g. "https://").
fn split_location(location: &str) -> (String, Option<u32>, Option<u32>) {
    let mut parts: Vec<&str> = location.split(':').collect();
    let column = parts.pop().and_then(parse_position);
    let line = parts.pop().and_then(parse_position);
    (parts.join(":"), line, column)
}

// Positions that don't fit in a u32 are treated as absent.
fn parse_position(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok()
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesized() {
        let frame = extract_frame("    at render (https://example.com/app.js:42:7)");
        assert_eq!(frame.function, "render");
        assert_eq!(frame.url, "https://example.com/app.js");
        assert_eq!(frame.line, Some(42));
        assert_eq!(frame.column, Some(7));
        assert!(frame.args.is_empty());
    }

    #[test]
    fn test_qualified_function_names() {
        let frame = extract_frame("at new Widget (widget.js:1:2)");
        assert_eq!(frame.function, "new Widget");

        let frame = extract_frame("at async Promise.all (index 0)");
        assert_eq!(frame.function, "async Promise.all");
        assert_eq!(frame.url, "");
        assert_eq!(frame.line, None);
        assert_eq!(frame.column, None);

        let frame = extract_frame("at Object.<anonymous> (/srv/app/index.js:3:11)");
        assert_eq!(frame.function, "Object.<anonymous>");
        assert_eq!(frame.url, "/srv/app/index.js");
    }

    #[test]
    fn test_missing_parentheses() {
        let frame = extract_frame("at myFunc https://x.js:10:3");
        assert_eq!(frame.function, "myFunc");
        assert_eq!(frame.url, "https://x.js");
        assert_eq!(frame.line, Some(10));
        assert_eq!(frame.column, Some(3));
    }

    #[test]
    fn test_anonymous_location_only() {
        let frame = extract_frame("    at https://x.js:10:3");
        assert_eq!(frame.function, UNKNOWN_FUNCTION);
        assert_eq!(frame.url, "https://x.js");
        assert_eq!(frame.line, Some(10));
        assert_eq!(frame.column, Some(3));
    }

    #[test]
    fn test_empty_parentheses() {
        let frame = extract_frame("at foo ()");
        assert_eq!(frame.function, "foo");
        assert!(frame.is_degenerate());
    }

    #[test]
    fn test_native_frame() {
        let frame = extract_frame("at Array.forEach (native)");
        assert_eq!(frame.function, "Array.forEach");
        assert_eq!(frame.url, "");
        assert_eq!(frame.line, None);
        assert_eq!(frame.column, None);
    }

    #[test]
    fn test_line_without_column() {
        // Only the last segment is numeric, so it is taken as the column.
        let frame = extract_frame("at foo (app.js:12)");
        assert_eq!(frame.url, "");
        assert_eq!(frame.line, None);
        assert_eq!(frame.column, Some(12));
    }

    #[test]
    fn test_no_position_keeps_function() {
        let frame = extract_frame("at someFunction");
        assert_eq!(frame.function, "someFunction");
        assert_eq!(frame.url, "");
        assert_eq!(frame.line, None);
        assert_eq!(frame.column, None);

        let frame = extract_frame("at foo bar");
        assert_eq!(frame.function, "foo bar");
        assert!(frame.is_degenerate());
    }

    #[test]
    fn test_unmatchable_line() {
        for line in ["", "   ", "something went wrong", "format the data"] {
            let frame = extract_frame(line);
            assert_eq!(frame, StackFrame::default(), "line {:?}", line);
        }
    }

    #[test]
    fn test_marker_must_be_standalone() {
        assert_eq!(strip_marker("format it"), None);
        assert_eq!(strip_marker("cat (x)"), None);
        assert_eq!(strip_marker("at\tfoo"), Some("foo"));
        assert_eq!(strip_marker("  thrown at  foo (x)"), Some("foo (x)"));
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let frame = extract_frame("at foo (https://x.js:1:2");
        assert_eq!(frame.function, "foo");
        assert_eq!(frame.url, "https://x.js");
        assert_eq!(frame.line, Some(1));
        assert_eq!(frame.column, Some(2));
    }

    #[test]
    fn test_position_overflow() {
        let frame = extract_frame("at foo (x.js:4294967296:1)");
        assert_eq!(frame.url, "x.js");
        assert_eq!(frame.line, None);
        assert_eq!(frame.column, Some(1));

        let frame = extract_frame("at foo (x.js:4294967295:1)");
        assert_eq!(frame.line, Some(u32::MAX));
    }

    #[test]
    fn test_is_trace_line() {
        assert!(is_trace_line("    at foo (x.js:1:1)"));
        assert!(is_trace_line("at x.js:1:1"));
        assert!(!is_trace_line("TypeError: at foo"));
        assert!(!is_trace_line("attempt failed"));
        assert!(!is_trace_line(""));
    }
}
