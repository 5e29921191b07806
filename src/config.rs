//! Configuration management
//!
//! Channels are declared in a TOML file, in the order they should be configured:
//!
//! ```toml
//! [logs]
//! path = "logs"
//! include_trace = false
//!
//! [[channels]]
//! name = "file"
//! engine = "FileLog"
//! path = "logs"
//! levels = ["warning", "error"]
//! ```

use crate::constants::DEFAULT_LOG_DIR;
use crate::error::{LogError, Result};
use crate::logging::{LogRegistry, SinkConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logs: LogsConfig,
    pub channels: Vec<ChannelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    /// Directory used by the lazy `default` channel
    pub path: PathBuf,
    /// Attach the call stack to every entry
    pub include_trace: bool,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_DIR),
            include_trace: false,
        }
    }
}

/// One `[[channels]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub name: String,
    #[serde(flatten)]
    pub sink: SinkConfig,
}

impl Config {
    /// Build a registry and configure every channel in file order
    pub fn build_registry(&self) -> Result<LogRegistry> {
        let registry = LogRegistry::new(&self.logs.path);
        apply(self, &registry)?;
        Ok(registry)
    }
}

/// Parse config text; `path` is only used for error messages
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    toml::from_str(content).map_err(|e| LogError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string().trim().to_string(),
    })
}

/// Load config from file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| LogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, path)
}

/// Load config from file, falling back to defaults on any error
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Save config to file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| LogError::ConfigParse {
        path: path.to_path_buf(),
        reason: format!("cannot serialize: {}", e),
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LogError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| LogError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Apply the trace flag and configure every channel, stopping at the first error
pub fn apply(config: &Config, registry: &LogRegistry) -> Result<()> {
    registry.set_include_trace(config.logs.include_trace);
    for channel in &config.channels {
        registry.configure(&channel.name, &channel.sink)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Level;

    fn unique_temp_dir(tag: &str) -> PathBuf {
        let base = std::env::temp_dir();
        let pid = std::process::id();
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.join(format!("log-registry-config-{}-{}-{}", tag, pid, ts))
    }

    #[test]
    fn test_default_logs_config_values() {
        let config = LogsConfig::default();

        assert_eq!(config.path, PathBuf::from("logs"));
        assert!(!config.include_trace);
    }

    #[test]
    fn test_config_empty_file() {
        let config = parse("", Path::new("empty.toml")).unwrap();

        assert_eq!(config.logs.path, PathBuf::from("logs"));
        assert!(config.channels.is_empty());
    }

    #[test]
    fn test_channels_keep_file_order() {
        let config = parse(
            r#"
[logs]
include_trace = true

[[channels]]
name = "zeta"
engine = "console"

[[channels]]
name = "alpha"
engine = "FileLog"
path = "var/logs"
levels = ["error"]
"#,
            Path::new("order.toml"),
        )
        .unwrap();

        assert!(config.logs.include_trace);
        let names: Vec<&str> = config.channels.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(config.channels[1].sink.levels, vec![Level::Error]);
        assert_eq!(
            config.channels[1]
                .sink
                .options
                .get("path")
                .and_then(|v| v.as_str()),
            Some("var/logs")
        );
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse("[[channels]]\nengine = \"file\"", Path::new("bad.toml")).unwrap_err();

        assert!(matches!(err, LogError::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_build_registry_configures_in_order() {
        let dir = unique_temp_dir("build");
        let mut config = Config::default();
        config.logs.include_trace = true;
        config.channels.push(ChannelConfig {
            name: "console".into(),
            sink: SinkConfig::new("console"),
        });
        config.channels.push(ChannelConfig {
            name: "file".into(),
            sink: SinkConfig::file(&dir),
        });

        let registry = config.build_registry().unwrap();

        assert_eq!(registry.configured(), vec!["console", "file"]);
        assert!(registry.include_trace());
    }

    #[test]
    fn test_build_registry_stops_on_unknown_engine() {
        let mut config = Config::default();
        config.channels.push(ChannelConfig {
            name: "fail".into(),
            sink: SinkConfig::new("stdClass"),
        });

        let err = config.build_registry().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_save_then_load() {
        let dir = unique_temp_dir("save");
        let path = dir.join("logreg.toml");
        let mut config = Config::default();
        config.channels.push(ChannelConfig {
            name: "file".into(),
            sink: SinkConfig::file("logs").levels([Level::Warning]),
        });

        save(&config, &path).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.channels, config.channels);
        assert_eq!(restored.logs.path, config.logs.path);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = load_or_default(Path::new("/nonexistent/logreg.toml"));
        assert!(config.channels.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = load(Path::new("/nonexistent/logreg.toml")).unwrap_err();
        assert!(matches!(err, LogError::ConfigRead { .. }));
    }
}
