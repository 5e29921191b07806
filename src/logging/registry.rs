//! Named channel registry
//!
//! Owns the ordered list of channels (name -> filter + sink) and routes every
//! write to the channels whose filter accepts the level. When a write arrives
//! and nothing is configured, a `default` file channel is created on the spot.
//!
//! One mutex guards the channel list for configure, drop and write dispatch, so
//! a registry can be shared behind an `Arc` by any number of writers.

use super::{
    EngineTable, FileSink, FileSinkConfig, Level, LevelFilter, LogRecord, Sink, SinkConfig, Trace,
};
use crate::constants::{DEFAULT_CHANNEL, DEFAULT_LOG_DIR};
use crate::error::{LogError, Result, SinkFailure};
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

struct Channel {
    name: String,
    filter: LevelFilter,
    sink: Box<dyn Sink>,
}

pub struct LogRegistry {
    engines: EngineTable,
    default_dir: PathBuf,
    include_trace: AtomicBool,
    channels: Mutex<Vec<Channel>>,
}

impl LogRegistry {
    /// Registry with the built-in engines; the lazy default channel writes to `default_dir`
    pub fn new(default_dir: impl Into<PathBuf>) -> Self {
        Self::with_engines(EngineTable::builtin(), default_dir)
    }

    pub fn with_engines(engines: EngineTable, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            engines,
            default_dir: default_dir.into(),
            include_trace: AtomicBool::new(false),
            channels: Mutex::new(Vec::new()),
        }
    }

    pub fn engines(&self) -> &EngineTable {
        &self.engines
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Attach the caller's stack to every record written through `write`
    pub fn set_include_trace(&self, enabled: bool) {
        self.include_trace.store(enabled, Ordering::Relaxed);
    }

    pub fn include_trace(&self) -> bool {
        self.include_trace.load(Ordering::Relaxed)
    }

    // === Channels ===

    /// Build the sink for `cfg` and store it under `name`.
    ///
    /// An existing channel of the same name is replaced in place (it keeps its
    /// position) and its old sink is dropped. On error nothing changes.
    pub fn configure(&self, name: &str, cfg: &SinkConfig) -> Result<()> {
        let sink = self.engines.build(name, cfg)?;
        let channel = Channel {
            name: name.to_string(),
            filter: LevelFilter::only(cfg.levels.iter().copied()),
            sink,
        };

        let mut channels = self.channels.lock();
        match channels.iter_mut().find(|c| c.name == name) {
            Some(existing) => *existing = channel,
            None => channels.push(channel),
        }
        debug!(channel = name, engine = ?cfg.engine, "log channel configured");
        Ok(())
    }

    /// Channel names in insertion order
    pub fn configured(&self) -> Vec<String> {
        self.channels.lock().iter().map(|c| c.name.clone()).collect()
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.channels.lock().iter().any(|c| c.name == name)
    }

    /// Remove a channel. Returns false (and does nothing) if it was absent.
    pub fn drop(&self, name: &str) -> bool {
        let mut channels = self.channels.lock();
        let before = channels.len();
        channels.retain(|c| c.name != name);
        let removed = channels.len() != before;
        if removed {
            debug!(channel = name, "log channel dropped");
        }
        removed
    }

    /// Remove every channel
    pub fn drop_all(&self) {
        self.channels.lock().clear();
    }

    // === Writes ===

    /// Write a message to every channel accepting `level`.
    ///
    /// Returns `LogError::Delivery` if any sink failed; the remaining sinks
    /// still receive the record.
    #[track_caller]
    pub fn write(&self, level: Level, message: impl Into<String>) -> Result<()> {
        let mut record = LogRecord::new(level, message);
        if self.include_trace() {
            record = record.with_trace(Trace::capture());
        }
        self.dispatch(&record)
    }

    /// Write with caller-supplied trace frames, regardless of the trace flag
    pub fn write_with_trace(
        &self,
        level: Level,
        message: impl Into<String>,
        trace: Trace,
    ) -> Result<()> {
        self.dispatch(&LogRecord::new(level, message).with_trace(trace))
    }

    /// Deliver a prepared record
    pub fn dispatch(&self, record: &LogRecord) -> Result<()> {
        let mut channels = self.channels.lock();
        if channels.is_empty() {
            channels.push(self.default_channel()?);
            debug!(dir = %self.default_dir.display(), "default log channel created");
        }

        let mut failures = Vec::new();
        for channel in channels.iter_mut() {
            if !channel.filter.matches(record.level) {
                continue;
            }
            if let Err(error) = channel.sink.write(record) {
                warn!(channel = %channel.name, %error, "log sink write failed");
                failures.push(SinkFailure {
                    channel: channel.name.clone(),
                    error,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LogError::Delivery { failures })
        }
    }

    fn default_channel(&self) -> Result<Channel> {
        let sink = FileSink::new(FileSinkConfig::new(&self.default_dir))?;
        Ok(Channel {
            name: DEFAULT_CHANNEL.to_string(),
            filter: LevelFilter::default(),
            sink: Box::new(sink),
        })
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_DIR)
    }
}

impl fmt::Debug for LogRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRegistry")
            .field("engines", &self.engines)
            .field("default_dir", &self.default_dir)
            .field("include_trace", &self.include_trace())
            .field("channels", &self.configured())
            .finish()
    }
}
