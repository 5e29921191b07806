//! Engine table: engine name -> sink constructor
//!
//! A channel config names its engine as a string (`engine = "FileLog"`).
//! Resolution is a plain table lookup populated at startup; an unknown name
//! is a configuration error, never a runtime lookup failure later on.

use super::{ConsoleSink, FileSink, Level, Sink};
use crate::constants::{CONSOLE_ENGINE, CONSOLE_ENGINE_ALIAS, FILE_ENGINE, FILE_ENGINE_ALIAS};
use crate::error::{LogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Constructor for one engine. Receives the engine-specific options.
pub type SinkFactory = Box<dyn Fn(&toml::Table) -> Result<Box<dyn Sink>> + Send + Sync>;

/// Configuration of one channel's sink
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Engine name; required by `configure`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Levels this channel records (empty = all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<Level>,
    /// Engine-specific options, passed through untouched
    #[serde(flatten)]
    pub options: toml::Table,
}

impl SinkConfig {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: Some(engine.into()),
            ..Default::default()
        }
    }

    /// File engine writing under `dir`
    pub fn file(dir: impl AsRef<Path>) -> Self {
        Self::new(FILE_ENGINE).option("path", dir.as_ref().to_string_lossy().to_string())
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn levels(mut self, levels: impl IntoIterator<Item = Level>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }
}

pub struct EngineTable {
    factories: HashMap<String, SinkFactory>,
}

impl EngineTable {
    /// Table with no engines at all
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Table with the file and console engines
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for name in [FILE_ENGINE, FILE_ENGINE_ALIAS] {
            table.register(name, |options| {
                Ok(Box::new(FileSink::from_options(options)?) as Box<dyn Sink>)
            });
        }
        for name in [CONSOLE_ENGINE, CONSOLE_ENGINE_ALIAS] {
            table.register(name, |options| {
                Ok(Box::new(ConsoleSink::from_options(options)?) as Box<dyn Sink>)
            });
        }
        table
    }

    /// Add or replace an engine
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&toml::Table) -> Result<Box<dyn Sink>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered engine names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct the sink for `channel`
    pub fn build(&self, channel: &str, cfg: &SinkConfig) -> Result<Box<dyn Sink>> {
        let engine = cfg
            .engine
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| LogError::MissingEngine {
                channel: channel.to_string(),
            })?;

        let factory = self
            .factories
            .get(engine)
            .ok_or_else(|| LogError::UnknownEngine {
                channel: channel.to_string(),
                engine: engine.to_string(),
            })?;

        factory(&cfg.options)
    }
}

impl Default for EngineTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for EngineTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineTable")
            .field("engines", &self.names())
            .finish()
    }
}
