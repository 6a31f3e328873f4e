//! Diagnostic utilities for the monitoring SDK.
//!
//! The centerpiece is [`parse_error_string`], which recovers a structured
//! error (message, name and call stack) from the text form of an error as
//! reported by a host runtime:
//!
//! ```
//! use monitor_utils::parse_error_string;
//!
//! let raw = "Uncaught TypeError: x is not a function
//! TypeError: x is not a function
//!     at onClick (https://example.com/app.js:42:7)
//!     at https://example.com/vendor.js:1:300";
//!
//! let err = parse_error_string(raw).unwrap();
//! assert_eq!(err.name, "TypeError");
//! assert_eq!(err.stack[0].function, "onClick");
//! assert_eq!(err.stack[0].url, "https://example.com/app.js");
//! assert_eq!(err.stack[0].line, Some(42));
//! assert_eq!(err.stack[1].column, Some(300));
//! ```
//!
//! Around it sit the runtime type checks in [`is`], the formatting helpers
//! in [`helpers`] and the diagnostic [`log::Logger`].

pub mod error;
pub mod helpers;
pub mod is;
pub mod log;
pub mod value;

#[cfg(test)]
mod testutil;

pub use error::{
    extract_frame, parse_error_string, ParseError, ParsedError, StackFrame, StackTrace,
    UNKNOWN_FUNCTION,
};
pub use is::{kind_of, Kind};
pub use value::Value;
