//! Console sink: same entry format as the file sink, on stderr or stdout.

use super::{LogRecord, Sink};
use crate::error::{LogError, Result};
use serde::Deserialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Output stream for console channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stderr,
    Stdout,
}

impl ConsoleStream {
    fn name(self) -> &'static str {
        match self {
            ConsoleStream::Stderr => "<stderr>",
            ConsoleStream::Stdout => "<stdout>",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleSinkConfig {
    #[serde(default)]
    pub stream: ConsoleStream,
}

#[derive(Debug)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new(cfg: ConsoleSinkConfig) -> Self {
        Self { stream: cfg.stream }
    }

    pub fn from_options(options: &toml::Table) -> Result<Self> {
        let cfg: ConsoleSinkConfig = toml::Value::Table(options.clone())
            .try_into()
            .map_err(|e: toml::de::Error| LogError::InvalidOption {
                engine: "ConsoleLog".to_string(),
                reason: e.to_string().trim().to_string(),
            })?;
        Ok(Self::new(cfg))
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let entry = record.format_entry();
        let written = match self.stream {
            ConsoleStream::Stderr => io::stderr().lock().write_all(entry.as_bytes()),
            ConsoleStream::Stdout => io::stdout().lock().write_all(entry.as_bytes()),
        };
        written.map_err(|source| LogError::Io {
            path: PathBuf::from(self.stream.name()),
            source,
        })
    }
}
