use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::log::{JsonWriter, Logger, LoggerConfig};

/// An in-memory sink that can be handed to a writer while the test keeps a handle to it.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Parses every written line as a JSON log record.
    pub fn records(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Returns a logger writing JSON records into the returned buffer.
pub fn capture(config: LoggerConfig) -> (Logger, SharedBuf) {
    let buf = SharedBuf::default();
    let logger = Logger::new(config).with_writer(Arc::new(JsonWriter::new(buf.clone())));
    (logger, buf)
}
