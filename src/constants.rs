//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Channels
// =============================================================================

/// Name of the channel created lazily on the first write to an empty registry
pub const DEFAULT_CHANNEL: &str = "default";

/// Directory used by the lazy default channel when none is configured
pub const DEFAULT_LOG_DIR: &str = "logs";

// =============================================================================
// Engines
// =============================================================================

/// Built-in file engine name (and its short alias)
pub const FILE_ENGINE: &str = "FileLog";
pub const FILE_ENGINE_ALIAS: &str = "file";

/// Built-in console engine name (and its short alias)
pub const CONSOLE_ENGINE: &str = "ConsoleLog";
pub const CONSOLE_ENGINE_ALIAS: &str = "console";

// =============================================================================
// Files
// =============================================================================

/// File receiving `Error` and `Warning` entries
pub const ERROR_LOG_FILE: &str = "error.log";

/// File receiving `Notice`, `Info` and `Debug` entries
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Rotated generations kept when `max_bytes` is set without `max_files`
pub const DEFAULT_MAX_FILES: usize = 5;

// =============================================================================
// Format
// =============================================================================

/// Timestamp prefix of every entry (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header line that opens a trace block
pub const TRACE_HEADER: &str = "Trace:";
