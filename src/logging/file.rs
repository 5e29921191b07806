//! File sink with optional size-based rotation.
//!
//! Every write opens the target in append mode and writes the whole entry with
//! a single `write_all`, so entries are visible on return and concurrent
//! appenders never interleave partial lines.

use super::{Level, LogRecord, Sink};
use crate::constants::{DEBUG_LOG_FILE, DEFAULT_MAX_FILES, ERROR_LOG_FILE};
use crate::error::{LogError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Options accepted by the file engine. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSinkConfig {
    /// Directory holding the log files
    pub path: PathBuf,
    /// Level name -> file name overrides (e.g. `warning = "warn.log"`)
    #[serde(default)]
    pub files: HashMap<String, String>,
    /// Rotate a file once it reaches this size
    #[serde(default)]
    pub max_bytes: Option<u64>,
    /// Rotated generations kept (`<file>.1` .. `<file>.N`)
    #[serde(default)]
    pub max_files: Option<usize>,
}

impl FileSinkConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            files: HashMap::new(),
            max_bytes: None,
            max_files: None,
        }
    }
}

#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
    files: HashMap<Level, String>,
    max_bytes: Option<u64>,
    max_files: usize,
}

impl FileSink {
    pub fn new(cfg: FileSinkConfig) -> Result<Self> {
        let mut files = HashMap::with_capacity(cfg.files.len());
        for (level, name) in cfg.files {
            let level: Level = level.parse().map_err(|_| LogError::InvalidOption {
                engine: "FileLog".to_string(),
                reason: format!("unknown level '{}' in `files`", level),
            })?;
            if !is_plain_file_name(&name) {
                return Err(LogError::InvalidOption {
                    engine: "FileLog".to_string(),
                    reason: format!("file '{}' for {} must stay inside `path`", name, level),
                });
            }
            files.insert(level, name);
        }

        Ok(Self {
            dir: cfg.path,
            files,
            max_bytes: cfg.max_bytes.filter(|&n| n > 0),
            max_files: cfg.max_files.unwrap_or(DEFAULT_MAX_FILES),
        })
    }

    /// Build from an engine option table
    pub fn from_options(options: &toml::Table) -> Result<Self> {
        let cfg: FileSinkConfig = toml::Value::Table(options.clone())
            .try_into()
            .map_err(|e: toml::de::Error| LogError::InvalidOption {
                engine: "FileLog".to_string(),
                reason: e.to_string().trim().to_string(),
            })?;
        Self::new(cfg)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File receiving entries of `level`
    pub fn path_for(&self, level: Level) -> PathBuf {
        if let Some(name) = self.files.get(&level) {
            return self.dir.join(name);
        }
        let name = match level {
            Level::Error | Level::Warning => ERROR_LOG_FILE.to_string(),
            Level::Notice | Level::Info | Level::Debug => DEBUG_LOG_FILE.to_string(),
            other => format!("{}.log", other.name().to_ascii_lowercase()),
        };
        self.dir.join(name)
    }

    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if let Some(max_bytes) = self.max_bytes {
            let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            if size >= max_bytes {
                rotate_files(path, self.max_files)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(bytes)
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let path = self.path_for(record.level);
        let entry = record.format_entry();
        self.append(&path, entry.as_bytes())
            .map_err(|source| LogError::Io { path, source })
    }
}

/// Relative name made of normal components only
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components().peekable();
    components.peek().is_some()
        && components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    fs::remove_file(path).or_else(|e| match e.kind() {
        io::ErrorKind::NotFound => Ok(()),
        _ => Err(e),
    })
}

fn rotate_files(path: &Path, max_files: usize) -> io::Result<()> {
    if max_files == 0 {
        // Nothing kept: start the active file over.
        return remove_if_present(path);
    }

    let stem = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ERROR_LOG_FILE.to_string());
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    // Remove the oldest.
    remove_if_present(&dir.join(format!("{}.{}", stem, max_files)))?;

    // Shift: N-1 -> N, ... 1 -> 2.
    for i in (1..max_files).rev() {
        let src = dir.join(format!("{}.{}", stem, i));
        if src.exists() {
            fs::rename(&src, dir.join(format!("{}.{}", stem, i + 1)))?;
        }
    }

    // Active -> .1
    if path.exists() {
        fs::rename(path, dir.join(format!("{}.1", stem)))?;
    }

    Ok(())
}
