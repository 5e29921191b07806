//! Named log channels with pluggable sinks
//!
//! A [`LogRegistry`] holds named channels, each backed by a [`Sink`] built by a
//! named engine. Writes go to every channel whose level filter accepts them;
//! writing to an empty registry creates a `default` file channel first.
//!
//! ```no_run
//! use log_registry::{Level, LogRegistry, SinkConfig};
//!
//! let registry = LogRegistry::new("logs");
//! registry.configure("file", &SinkConfig::file("logs"))?;
//! registry.write(Level::Warning, "Test warning")?;
//! # Ok::<(), log_registry::LogError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod reporter;

pub use error::{LogError, Result, SinkFailure};
pub use logging::{
    EngineTable, Frame, Level, LevelFilter, LogRecord, LogRegistry, Sink, SinkConfig, Trace,
};
pub use reporter::{ErrorReporter, Severity};
