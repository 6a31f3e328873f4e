use std::io::Write;
use std::sync::Mutex;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value;

use crate::log::writers::Writer;
use crate::log::{Fields, LogLevel, LEVEL_FIELD, MESSAGE_FIELD, TIMESTAMP_FIELD};

/// The prefix every console line starts with.
pub const PREFIX: &str = "Monitor Logger";

/// ConsoleWriter writes human readable log lines, e.g.
/// `Monitor Logger[Warn]: something happened key=value`.
pub struct ConsoleWriter<W: Write + Send + 'static> {
    color: bool,
    mu: Mutex<W>,
}

impl<W: Write + Send + 'static> ConsoleWriter<W> {
    /// Creates a writer that colors its output when the terminal supports it.
    pub fn new(w: W) -> Self {
        Self {
            color: colored::control::SHOULD_COLORIZE.should_colorize(),
            mu: Mutex::new(w),
        }
    }

    /// Returns the writer with coloring forced on or off.
    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }

    fn write_prefix(&self, buf: &mut Vec<u8>, level: LogLevel) -> anyhow::Result<()> {
        let label = match level {
            LogLevel::Trace => "Trace",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Log",
            LogLevel::Warn => "Warn",
            LogLevel::Error => "Error",
            LogLevel::Disabled => "???",
        };
        let prefix = format!("{}[{}]:", PREFIX, label);

        let written = if self.color {
            let prefix = match level {
                LogLevel::Trace => prefix.magenta(),
                LogLevel::Debug => prefix.yellow(),
                LogLevel::Info => prefix.green(),
                LogLevel::Warn => prefix.red(),
                LogLevel::Error | LogLevel::Disabled => prefix.red().bold(),
            };
            write!(buf, "{}", prefix)
        } else {
            write!(buf, "{}", prefix)
        };
        written.context("unable to write prefix")
    }

    fn write_fields(&self, buf: &mut Vec<u8>, values: &Fields) -> anyhow::Result<()> {
        for (key, value) in values {
            if key == TIMESTAMP_FIELD || key == LEVEL_FIELD || key == MESSAGE_FIELD {
                continue;
            }

            let key = format!("{}=", key);
            let written = if self.color {
                write!(buf, " {}", key.cyan())
            } else {
                write!(buf, " {}", key)
            };
            written.with_context(|| format!("unable to write field key {}", key))?;

            let value_to_print = match value {
                // Strings are printed bare unless they need quoting to stay on one token.
                Value::String(s) => {
                    if s.contains([' ', '\t', '\n', '\r', '\\', '"']) || s.is_empty() {
                        value.to_string()
                    } else {
                        s.clone()
                    }
                }
                _ => value.to_string(),
            };
            write!(buf, "{}", value_to_print)
                .with_context(|| format!("unable to write field value {}", key))?;
        }

        Ok(())
    }
}

impl<W: Write + Send + 'static> Writer for ConsoleWriter<W> {
    fn write(&self, level: LogLevel, values: &Fields) -> anyhow::Result<()> {
        let mut buf = Vec::with_capacity(256);

        self.write_prefix(&mut buf, level)?;
        if let Some(msg) = values.get(MESSAGE_FIELD) {
            let written = match msg {
                Value::String(s) => write!(buf, " {}", s),
                other => write!(buf, " {}", other),
            };
            written.context("unable to write message")?;
        }
        self.write_fields(&mut buf, values)?;

        buf.write_all(b"\n").context("new line")?;

        match self.mu.lock() {
            Ok(mut w) => {
                w.write_all(&buf).context("write")?;
                Ok(())
            }
            Err(poisoned) => Err(anyhow::anyhow!("poisoned mutex: {:?}", poisoned)),
        }
    }
}
