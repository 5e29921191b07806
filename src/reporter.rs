//! Error reporting through the registry
//!
//! Turns runtime errors into log entries:
//!
//! ```text
//! 2026-10-18 09:14:03 Notice: Notice (8): Undefined variable: out in [src/app.rs, line 12]
//! 2026-10-18 09:14:03 Error: [app::LoadError] config unreadable: No such file or directory
//! ```

use crate::error::Result;
use crate::logging::{Level, LogRegistry};
use std::error::Error;
use std::fmt;

/// Error severity as reported by an error handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Fatal,
    Warning,
    Notice,
    Strict,
    Deprecated,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Fatal => "Fatal Error",
            Severity::Warning => "Warning",
            Severity::Notice => "Notice",
            Severity::Strict => "Strict",
            Severity::Deprecated => "Deprecated",
        }
    }

    /// Level the entry is logged at
    pub fn level(self) -> Level {
        match self {
            Severity::Fatal => Level::Error,
            Severity::Warning => Level::Warning,
            Severity::Notice | Severity::Strict | Severity::Deprecated => Level::Notice,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct ErrorReporter<'a> {
    registry: &'a LogRegistry,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(registry: &'a LogRegistry) -> Self {
        Self { registry }
    }

    /// Log `<Label> (<code>): <description> in [<file>, line <line>]`.
    ///
    /// With the registry's trace flag set, the trace points at the caller.
    #[track_caller]
    pub fn report(
        &self,
        severity: Severity,
        code: i32,
        description: &str,
        file: &str,
        line: u32,
    ) -> Result<()> {
        let message = format!(
            "{} ({}): {} in [{}, line {}]",
            severity, code, description, file, line
        );
        self.registry.write(severity.level(), message)
    }

    /// Log `[<type>] <message>: <cause>: ...` at `Error`, following the source chain.
    ///
    /// With the registry's trace flag set, the trace is the caller's stack.
    #[track_caller]
    pub fn report_failure<E: Error>(&self, err: &E) -> Result<()> {
        let mut message = format!("[{}] {}", std::any::type_name::<E>(), err);
        for cause in std::iter::successors(err.source(), |&e| e.source()) {
            message.push_str(&format!(": {}", cause));
        }
        self.registry.write(Level::Error, message)
    }
}
