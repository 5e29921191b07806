//! Severity levels
//!
//! Syslog severities, numbered the way syslog numbers them (lower is more severe).

use crate::error::{LogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// Human-readable name written into log lines (`Warning`, `Notice`, ...)
    pub fn name(self) -> &'static str {
        match self {
            Level::Emergency => "Emergency",
            Level::Alert => "Alert",
            Level::Critical => "Critical",
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Notice => "Notice",
            Level::Info => "Info",
            Level::Debug => "Debug",
        }
    }

    /// Syslog severity number
    pub fn severity(self) -> u8 {
        self as u8
    }

    pub fn from_severity(severity: u8) -> Option<Level> {
        Level::ALL.get(severity as usize).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if let Ok(n) = value.parse::<u8>() {
            return Level::from_severity(n).ok_or_else(|| LogError::InvalidLevel {
                value: s.to_string(),
            });
        }

        let level = match value.to_ascii_lowercase().as_str() {
            "emergency" | "emerg" => Level::Emergency,
            "alert" => Level::Alert,
            "critical" | "crit" => Level::Critical,
            "error" | "err" => Level::Error,
            "warning" | "warn" => Level::Warning,
            "notice" => Level::Notice,
            "info" => Level::Info,
            "debug" => Level::Debug,
            _ => {
                return Err(LogError::InvalidLevel {
                    value: s.to_string(),
                })
            }
        };
        Ok(level)
    }
}

impl TryFrom<String> for Level {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.name().to_ascii_lowercase()
    }
}
