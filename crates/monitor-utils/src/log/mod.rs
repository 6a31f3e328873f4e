//! The diagnostic logger used by the SDK helpers.
//!
//! A [`Logger`] is always built from an explicit [`LoggerConfig`] and handed
//! to the code that needs it; nothing in this crate installs a global logger.

mod config;
mod consolewriter;
mod levels;
mod logger;
mod writers;

pub use config::{LogFormat, LoggerConfig};
pub use consolewriter::{ConsoleWriter, PREFIX};
pub use levels::{LogLevel, UnknownLogLevel};
pub use logger::{Fields, Logger};
pub use writers::{default_writer, JsonWriter, Writer};

pub(crate) const TIMESTAMP_FIELD: &str = "time";
pub(crate) const LEVEL_FIELD: &str = "level";
pub(crate) const MESSAGE_FIELD: &str = "message";
