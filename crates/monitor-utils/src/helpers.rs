//! Small formatting and validation helpers shared across the SDK.

use crate::error::{parse_error_string, ParseError, ParsedError};
use crate::is::{is_undefined, kind_of, Kind};
use crate::log::{Fields, Logger};
use crate::value::Value;

/// The name reported for functions that don't have one.
pub const DEFAULT_FUNCTION_NAME: &str = "<anonymous>";

/// The number of characters of raw input echoed back in diagnostics.
const DIAGNOSTIC_INPUT_LENGTH: usize = 100;

/// Returns the name of the given function value.
pub fn function_name(value: &Value) -> &str {
    match value {
        Value::Function { name: Some(name) } if !name.is_empty() => name.as_str(),
        _ => DEFAULT_FUNCTION_NAME,
    }
}

/// Renders any value as a string: strings are kept as they are,
/// everything else is serialized as JSON.
pub fn unknown_to_string(value: &Value) -> String {
    if let Some(s) = value.as_str() {
        return s.to_string();
    }
    value
        .to_json()
        .map(|json| json.to_string())
        .unwrap_or_else(|| "undefined".to_string())
}

/// Truncates `s` to at most `len` characters, noting the truncation.
pub fn intercept_str(s: &str, len: usize) -> String {
    let mut chars = s.chars();
    let mut out: String = chars.by_ref().take(len).collect();
    if chars.next().is_some() {
        out.push_str(&format!(":truncated to first {} characters", len));
    }
    out
}

/// Returns the major version of a dotted version string.
pub fn big_version(version: &str) -> Option<u64> {
    version.split('.').next()?.trim().parse().ok()
}

/// Checks that an option has the expected kind.
///
/// A mismatch is reported as an error on the logger, except when the
/// option was left undefined, which just means it wasn't provided.
pub fn validate_option(target: &Value, target_name: &str, expected: Kind, logger: &Logger) -> bool {
    let actual = kind_of(target);
    if actual == expected {
        return true;
    }

    if !is_undefined(target) {
        logger.error(
            format!(
                "{} expected {}, got {}",
                target_name,
                expected,
                target.tag()
            ),
            Some(Fields::from([
                ("option".to_string(), target_name.into()),
                ("expected".to_string(), expected.to_string().into()),
                ("actual".to_string(), target.tag().into()),
            ])),
        );
    }
    false
}

/// Parses error text carried by a host value.
///
/// Strings (boxed or not) are parsed as-is. Error values are parsed from
/// their stack text, or taken over field by field when they have none.
pub fn parse_error_value(value: &Value) -> Result<ParsedError, ParseError> {
    if let Some(text) = value.as_str() {
        return parse_error_string(text);
    }

    match value {
        Value::Error(err) => match &err.stack {
            Some(stack) => {
                let mut parsed = parse_error_string(stack)?;
                if parsed.name.is_empty() {
                    parsed.name = err.name.clone();
                }
                Ok(parsed)
            }
            None => Ok(ParsedError {
                message: err.message.clone(),
                name: err.name.clone(),
                stack: Vec::new(),
            }),
        },
        _ => Err(ParseError::NotErrorText {
            kind: kind_of(value),
        }),
    }
}

/// Parses error text, reporting degenerate results to the logger.
///
/// A complete failure is logged as a warning and yields `None`. Frames
/// without any location are logged at debug level but kept.
pub fn diagnose_error_string(raw: &str, logger: &Logger) -> Option<ParsedError> {
    match parse_error_string(raw) {
        Ok(parsed) => {
            for (idx, frame) in parsed.stack.iter().enumerate() {
                if frame.is_degenerate() {
                    logger.debug(
                        "unable to resolve stack frame location",
                        Some(Fields::from([
                            ("frame".to_string(), idx.into()),
                            ("func".to_string(), frame.function.clone().into()),
                        ])),
                    );
                }
            }
            Some(parsed)
        }
        Err(err) => {
            logger.warn(
                format!("unable to parse error text: {}", err),
                Some(Fields::from([(
                    "input".to_string(),
                    intercept_str(raw, DIAGNOSTIC_INPUT_LENGTH).into(),
                )])),
            );
            None
        }
    }
}
