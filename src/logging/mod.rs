//! Named log channels
//!
//! Centralizes all log-related types and utilities:
//! - `Level` / `LogRecord` / `Trace` - what gets written
//! - `Sink` - capability implemented by every output (`FileSink`, `ConsoleSink`)
//! - `EngineTable` - engine name -> sink constructor
//! - `LogRegistry` - ordered channels, lazy default, write dispatch

pub mod console;
pub mod engine;
pub mod entry;
pub mod file;
pub mod filter;
pub mod level;
pub mod registry;
pub mod sink;

pub use console::{ConsoleSink, ConsoleSinkConfig, ConsoleStream};
pub use engine::{EngineTable, SinkConfig, SinkFactory};
pub use entry::{Frame, LogRecord, Trace};
pub use file::{FileSink, FileSinkConfig};
pub use filter::LevelFilter;
pub use level::Level;
pub use registry::LogRegistry;
pub use sink::Sink;

/// Initialize internal tracing for the crate's own diagnostics
///
/// Call early in main() before any logging occurs.
/// Set `verbose` to true for debug-level output.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
