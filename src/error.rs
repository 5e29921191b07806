//! Centralized error types for the log registry
//!
//! All registry errors are represented by the `LogError` enum.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LogError>`.

use std::fmt;
use std::path::PathBuf;

/// A single sink that failed during a write
#[derive(Debug)]
pub struct SinkFailure {
    /// Channel the sink is registered under
    pub channel: String,
    pub error: LogError,
}

/// All registry errors
#[derive(Debug)]
pub enum LogError {
    // === Configuration ===
    /// Channel config has no `engine` key
    MissingEngine { channel: String },
    /// `engine` does not name a registered sink engine
    UnknownEngine { channel: String, engine: String },
    /// Engine rejected its options
    InvalidOption { engine: String, reason: String },
    /// Level string could not be parsed
    InvalidLevel { value: String },

    // === IO ===
    /// Sink could not persist a message
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// One or more sinks failed during a write
    Delivery { failures: Vec<SinkFailure> },

    // === Config file ===
    /// Failed to read the config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for `Config`
    ConfigParse { path: PathBuf, reason: String },
}

impl LogError {
    /// True for errors raised while configuring a channel
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingEngine { .. } | Self::UnknownEngine { .. } | Self::InvalidOption { .. }
        )
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::ConfigRead { source, .. } => Some(source),
            Self::Delivery { failures } => failures
                .first()
                .map(|f| &f.error as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEngine { channel } => {
                write!(f, "Missing engine for log channel '{}'", channel)
            }
            Self::UnknownEngine { channel, engine } => write!(
                f,
                "Could not load engine '{}' for log channel '{}'",
                engine, channel
            ),
            Self::InvalidOption { engine, reason } => {
                write!(f, "Invalid {} options: {}", engine, reason)
            }
            Self::InvalidLevel { value } => write!(f, "Unknown log level: {}", value),
            Self::Io { path, source } => write!(f, "IO error: {}: {}", path.display(), source),
            Self::Delivery { failures } => {
                let channels: Vec<&str> = failures.iter().map(|f| f.channel.as_str()).collect();
                write!(
                    f,
                    "Log write failed on {} channel(s): {}",
                    failures.len(),
                    channels.join(", ")
                )
            }
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config file: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config file {}: {}", path.display(), reason)
            }
        }
    }
}

/// Alias for Result with LogError
pub type Result<T> = std::result::Result<T, LogError>;
