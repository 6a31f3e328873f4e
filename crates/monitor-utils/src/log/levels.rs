use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;

/// The LogLevel represents the log level of a log message.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    #[default]
    Trace = 1,
    Debug,
    Info,
    Warn,
    Error,
    Disabled = 99,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0:?}")]
pub struct UnknownLogLevel(pub String);

impl LogLevel {
    /// Returns the lowercase name used for the level in structured output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Disabled => "disabled",
        }
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" | "trc" => Ok(LogLevel::Trace),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" | "log" => Ok(LogLevel::Info),
            "warn" | "wrn" | "warning" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            "disabled" | "dis" | "none" | "off" => Ok(LogLevel::Disabled),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = UnknownLogLevel;

    fn try_from(value: String) -> Result<Self, UnknownLogLevel> {
        value.parse()
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Allows conversion of a `log::Level` into to a `LogLevel`
impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => LogLevel::Trace,
            log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Error => LogLevel::Error,
        }
    }
}
