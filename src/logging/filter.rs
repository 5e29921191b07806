//! Per-channel level filtering
//!
//! Each channel decides on its own which levels it records.

use super::Level;
use std::collections::HashSet;

/// Level filter attached to a channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelFilter {
    pub levels: HashSet<Level>, // Empty = all allowed
}

impl LevelFilter {
    /// Filter accepting only the given levels
    pub fn only(levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    /// Check if a level passes the filter
    pub fn matches(&self, level: Level) -> bool {
        self.levels.is_empty() || self.levels.contains(&level)
    }
}
