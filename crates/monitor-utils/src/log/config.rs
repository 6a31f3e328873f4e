use std::env;

use serde::Deserialize;

use crate::log::LogLevel;

/// The output format of the diagnostic logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines, prefixed with the logger name.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

/// LoggerConfig controls whether and how the diagnostic logger emits output.
///
/// The config is fixed when a [`Logger`](crate::log::Logger) is built;
/// there is no process wide switch to turn logging on or off.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enabled: bool,
    pub level: LogLevel,
    pub format: LogFormat,
}

impl LoggerConfig {
    /// Returns a config that is enabled iff `debug` is set.
    pub fn debug(debug: bool) -> Self {
        Self {
            enabled: debug,
            ..Self::default()
        }
    }

    /// Builds a config from the environment.
    ///
    /// - `MONITOR_DEBUG` enables logging when set to anything but "", "0" or "false".
    /// - `MONITOR_LOG_LEVEL`, `LOG_LEVEL` or `RUST_LOG` set the minimum level,
    ///   the first one holding a valid level wins.
    /// - `MONITOR_LOG_FORMAT` selects "json" or "console" output.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("MONITOR_DEBUG")
            .is_some_and(|v| !matches!(v.trim().to_lowercase().as_str(), "" | "0" | "false"));

        let level = ["MONITOR_LOG_LEVEL", "LOG_LEVEL", "RUST_LOG"]
            .into_iter()
            .find_map(|var| lookup(var).and_then(|v| v.parse::<LogLevel>().ok()))
            .unwrap_or_default();

        let format = match lookup("MONITOR_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Console,
        };

        Self {
            enabled,
            level,
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_default_is_disabled() {
        let config = LoggerConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Console);
        assert!(LoggerConfig::debug(true).enabled);
    }

    #[test]
    fn test_from_lookup() {
        let config = LoggerConfig::from_lookup(lookup(&[
            ("MONITOR_DEBUG", "1"),
            ("LOG_LEVEL", "nonsense"),
            ("RUST_LOG", "warn"),
            ("MONITOR_LOG_FORMAT", "json"),
        ]));
        assert_eq!(
            config,
            LoggerConfig {
                enabled: true,
                level: LogLevel::Warn,
                format: LogFormat::Json,
            }
        );

        let config = LoggerConfig::from_lookup(lookup(&[("MONITOR_DEBUG", "false")]));
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_deserialize() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"enabled": true, "level": "err"}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.level, LogLevel::Error);
        assert_eq!(config.format, LogFormat::Console);

        let err = serde_json::from_str::<LoggerConfig>(r#"{"level": "loud"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown log level"));
    }
}
