use crate::log::consolewriter::ConsoleWriter;
use crate::log::{Fields, LogFormat, LogLevel};
use anyhow::Context;
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// A log writer.
pub trait Writer: Send + Sync + 'static {
    /// Write the given key-value pairs to the log.
    fn write(&self, level: LogLevel, values: &Fields) -> anyhow::Result<()>;
}

impl Debug for dyn Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writer").finish()
    }
}

/// default_writer returns a writer to stderr for the given format.
pub fn default_writer(format: LogFormat) -> Arc<dyn Writer> {
    match format {
        LogFormat::Console => Arc::new(ConsoleWriter::new(std::io::stderr())),
        LogFormat::Json => Arc::new(JsonWriter::default()),
    }
}

/// A Writer implementation that writes logs in JSON format,
/// blocking until the write is complete.
#[derive(Debug)]
pub struct JsonWriter<W: Write + Send + 'static> {
    mu: Mutex<W>,
}

impl<W: Write + Send + 'static> JsonWriter<W> {
    pub fn new(w: W) -> Self {
        Self { mu: Mutex::new(w) }
    }
}

impl Default for JsonWriter<std::io::Stderr> {
    fn default() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send + 'static> Writer for JsonWriter<W> {
    fn write(&self, _: LogLevel, values: &Fields) -> anyhow::Result<()> {
        let mut buf = Vec::with_capacity(256);
        serde_json::to_writer(&mut buf, values)
            .map_err(std::io::Error::from)
            .context("serde_writer")?;
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
