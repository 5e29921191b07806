//! Log record types
//!
//! A record is what the registry hands to every sink: timestamp, level,
//! message and an optional trace.

use super::Level;
use crate::constants::{TIMESTAMP_FORMAT, TRACE_HEADER};
use chrono::{DateTime, Local};
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;

/// Functions whose frames sit between the caller and the captured backtrace
const INTERNAL_FRAMES: &[&str] = &[
    "log_registry::logging::entry::Trace::",
    "log_registry::logging::registry::LogRegistry::",
    "log_registry::reporter::ErrorReporter::",
];

/// Everything from here outward belongs to the runtime, not the program
const RUNTIME_ENTRY: &str = "__rust_begin_short_backtrace";

/// One trace frame, rendered as `#<index> <location>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub location: String,
}

impl Frame {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl From<&Location<'_>> for Frame {
    fn from(loc: &Location<'_>) -> Self {
        Self::new(format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
    }
}

/// Ordered frames, innermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    frames: Vec<Frame>,
}

impl Trace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Call stack of whoever called this function, innermost first.
    ///
    /// Frame `#0` is the caller location. The outer frames come from a
    /// backtrace with the registry's own frames cut off; they are source
    /// locations when debug info is available and function names otherwise.
    #[track_caller]
    pub fn capture() -> Self {
        let caller = Location::caller();
        let stack = parse_backtrace(&Backtrace::force_capture().to_string());

        let mut frames = vec![Frame::from(caller)];
        frames.extend(outer_frames(&stack, caller).iter().map(StackEntry::frame));
        Self::new(frames)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<Frame> for Trace {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One symbol of a rendered `std::backtrace::Backtrace`
#[derive(Debug, Clone, PartialEq, Eq)]
struct StackEntry {
    function: String,
    location: Option<String>,
}

impl StackEntry {
    fn frame(&self) -> Frame {
        match &self.location {
            Some(location) => Frame::new(location.clone()),
            None => Frame::new(self.function.clone()),
        }
    }

    fn is_internal(&self) -> bool {
        INTERNAL_FRAMES.iter().any(|p| self.function.starts_with(p))
    }

    fn is_at(&self, loc: &Location<'_>) -> bool {
        let Some(location) = &self.location else {
            return false;
        };
        let mut parts = location.rsplitn(3, ':');
        let _column = parts.next();
        let line = parts.next().and_then(|l| l.parse::<u32>().ok());
        let file = parts.next().unwrap_or_default();
        line == Some(loc.line()) && file.ends_with(loc.file())
    }
}

/// Parse the `N: function` / `at file:line:col` lines of a rendered backtrace
fn parse_backtrace(rendered: &str) -> Vec<StackEntry> {
    let mut entries: Vec<StackEntry> = Vec::new();
    for line in rendered.lines().map(str::trim) {
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = entries.last_mut() {
                let location = location.strip_prefix("./").unwrap_or(location);
                last.location = Some(location.to_string());
            }
        } else if let Some((index, function)) = line.split_once(": ") {
            if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                entries.push(StackEntry {
                    function: function.to_string(),
                    location: None,
                });
            }
        }
    }
    entries
}

/// Entries above the caller's own frame, up to the runtime entry point.
///
/// The caller's frame follows the last of the leading internal frames. When
/// those were inlined away, it is found by matching the caller location.
fn outer_frames<'s>(stack: &'s [StackEntry], caller: &Location<'_>) -> &'s [StackEntry] {
    let caller_index = match stack.iter().position(StackEntry::is_internal) {
        Some(first) => stack[first..]
            .iter()
            .position(|e| !e.is_internal())
            .map(|n| first + n),
        None => stack.iter().position(|e| e.is_at(caller)),
    };
    let Some(caller_index) = caller_index else {
        return &[];
    };

    let outer = &stack[caller_index + 1..];
    let end = outer
        .iter()
        .position(|e| e.function.contains(RUNTIME_ENTRY))
        .unwrap_or(outer.len());
    &outer[..end]
}

/// A leveled message with its creation time
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub trace: Option<Trace>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Render the full entry, newline terminated.
    ///
    /// ```text
    /// 2026-10-18 09:14:03 Warning: disk almost full
    /// Trace:
    /// #0 src/app.rs:42:9
    /// ```
    pub fn format_entry(&self) -> String {
        let mut out = format!(
            "{} {}: {}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            self.message
        );
        if let Some(trace) = self.trace.as_ref().filter(|t| !t.is_empty()) {
            out.push_str(TRACE_HEADER);
            out.push('\n');
            for (i, frame) in trace.frames().iter().enumerate() {
                out.push_str(&format!("#{} {}\n", i, frame.location));
            }
        }
        out
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.format_entry().trim_end_matches('\n'))
    }
}
