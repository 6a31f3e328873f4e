use crate::log::writers::{default_writer, Writer};
use crate::log::{LogLevel, LoggerConfig, LEVEL_FIELD, MESSAGE_FIELD, TIMESTAMP_FIELD};
use anyhow::Context;
use log::{Log, Metadata, Record};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::SystemTime;

pub type Fields = BTreeMap<String, serde_json::Value>;

/// Logger is a structured logger for SDK diagnostics.
///
/// Whether it emits anything is decided by the [`LoggerConfig`] it was
/// built with. A disabled logger drops every message.
#[derive(Debug, Clone)]
pub struct Logger {
    config: LoggerConfig,
    writer: Arc<dyn Writer>,
    extra_fields: Fields,
}

impl Logger {
    /// New returns a new logger writing to stderr in the configured format.
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            writer: default_writer(config.format),
            config,
            extra_fields: Fields::new(),
        }
    }

    /// Returns a new logger with the given log level.
    pub fn with_level(&self, level: LogLevel) -> Self {
        let mut replacement = self.clone();
        replacement.config.level = level;
        replacement
    }

    /// Returns a new logger that is enabled or disabled.
    pub fn with_enabled(&self, enabled: bool) -> Self {
        let mut replacement = self.clone();
        replacement.config.enabled = enabled;
        replacement
    }

    /// Returns a new logger with the given writer.
    pub fn with_writer(&self, writer: Arc<dyn Writer>) -> Self {
        Self {
            writer,
            ..self.clone()
        }
    }

    /// Returns a new logger with the given fields added to the context
    /// that the logger will use when emitting logs as extra fields
    pub fn with(&self, fields: Fields) -> Self {
        let mut replacement = self.clone();
        replacement.extra_fields.extend(fields);
        replacement
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Reports whether the logger emits anything at all.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.config.level != LogLevel::Disabled
    }

    /// Reports whether a message at the given level would be emitted.
    pub fn enabled_for(&self, level: LogLevel) -> bool {
        self.is_enabled() && level != LogLevel::Disabled && level >= self.config.level
    }

    /// Takes the given message and attempts to log it to the configured writer.
    pub fn try_log(
        &self,
        level: LogLevel,
        msg: impl Display,
        fields: Option<Fields>,
    ) -> anyhow::Result<()> {
        if !self.enabled_for(level) {
            return Ok(());
        }

        let mut values = self.extra_fields.clone();
        if let Some(fields) = fields {
            values.extend(fields);
        }

        // Now add the standard fields.
        values.insert(
            LEVEL_FIELD.to_string(),
            serde_json::Value::from(level.as_str()),
        );
        values.insert(TIMESTAMP_FIELD.to_string(), iso8601_now());
        values.insert(
            MESSAGE_FIELD.to_string(),
            serde_json::Value::from(msg.to_string()),
        );

        self.writer
            .write(level, &values)
            .context("unable to write")?;

        Ok(())
    }

    fn emit(&self, level: LogLevel, msg: impl Display, fields: Option<Fields>) {
        self.try_log(level, msg, fields).unwrap_or_else(|e| {
            eprintln!("failed to log: {:#}", e);
        });
    }

    pub fn trace(&self, msg: impl Display, fields: Option<Fields>) {
        self.emit(LogLevel::Trace, msg, fields)
    }

    pub fn debug(&self, msg: impl Display, fields: Option<Fields>) {
        self.emit(LogLevel::Debug, msg, fields)
    }

    pub fn info(&self, msg: impl Display, fields: Option<Fields>) {
        self.emit(LogLevel::Info, msg, fields)
    }

    /// Same as [`Logger::info`].
    pub fn log(&self, msg: impl Display, fields: Option<Fields>) {
        self.emit(LogLevel::Info, msg, fields)
    }

    pub fn warn(&self, msg: impl Display, fields: Option<Fields>) {
        self.emit(LogLevel::Warn, msg, fields)
    }

    pub fn error(&self, msg: impl Display, fields: Option<Fields>) {
        self.emit(LogLevel::Error, msg, fields)
    }

    /// Takes a `log::Record` and attempts to log it to the configured writer.
    fn try_log_record(&self, record: &Record) -> anyhow::Result<()> {
        let mut visitor = KeyValueVisitor(BTreeMap::new());
        let _ = record.key_values().visit(&mut visitor);

        let mut fields = visitor.0;
        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            fields.insert(
                "caller".into(),
                serde_json::Value::from(format!("{}:{}", file, line)),
            );
        }

        self.try_log(record.level().into(), record.args(), Some(fields))
    }
}

/// Returns the current time as an RFC 3339 timestamp with millisecond precision.
#[inline]
fn iso8601_now() -> serde_json::Value {
    let date = chrono::DateTime::<chrono::Utc>::from(SystemTime::now());
    serde_json::Value::from(date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

/// Lets the logger sit behind the `log` facade, should a caller choose to
/// install it with `log::set_boxed_logger`.
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.enabled_for(metadata.level().into())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.try_log_record(record).unwrap_or_else(|e| {
                eprintln!("failed to log: {:#}", e);
            });
        }
    }

    fn flush(&self) {}
}

/// A visitor that can be used to visit key-value pairs and insert them into a `BTreeMap`.
/// after converting them from the `log::kv::Value` type to `serde_json::Value`.
struct KeyValueVisitor(BTreeMap<String, serde_json::Value>);

impl log::kv::Visitor<'_> for KeyValueVisitor {
    #[inline]
    fn visit_pair(
        &mut self,
        key: log::kv::Key,
        value: log::kv::Value,
    ) -> Result<(), log::kv::Error> {
        match serde_json::to_value(&value) {
            Ok(value) => {
                self.0.insert(key.to_string(), value);
                Ok(())
            }
            Err(e) => Err(log::kv::Error::boxed(e)),
        }
    }
}
