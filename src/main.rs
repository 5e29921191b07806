//! logreg - write to named log channels from the command line
//!
//! Usage:
//!   logreg write -l warning Disk almost full     Write one entry
//!   logreg -c logreg.toml channels               List configured channels
//!   logreg engines                               List available engines
//!   logreg init [FILE]                           Write a starter config

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use log_registry::config::{self, ChannelConfig, Config};
use log_registry::{Level, LogRegistry, Result, SinkConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    log_registry::logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("logreg: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Command::Init { path } = &cli.command {
        config::save(&starter_config(), path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let cfg = match &cli.config {
        Some(path) => config::load(path)?,
        None => Config::default(),
    };
    let registry = cfg.build_registry()?;
    if cli.trace {
        registry.set_include_trace(true);
    }

    match cli.command {
        Command::Write { level, message } => registry.write(level, message.join(" ")),
        Command::Channels => {
            print_channels(&registry);
            Ok(())
        }
        Command::Engines => {
            for name in registry.engines().names() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Init { .. } => Ok(()),
    }
}

fn print_channels(registry: &LogRegistry) {
    let names = registry.configured();
    if names.is_empty() {
        println!(
            "(none; first write creates 'default' in {})",
            registry.default_dir().display()
        );
    }
    for name in names {
        println!("{}", name);
    }
}

fn starter_config() -> Config {
    let mut cfg = Config::default();
    cfg.channels.push(ChannelConfig {
        name: "file".to_string(),
        sink: SinkConfig::file(&cfg.logs.path),
    });
    cfg.channels.push(ChannelConfig {
        name: "console".to_string(),
        sink: SinkConfig::new("console").levels([
            Level::Emergency,
            Level::Alert,
            Level::Critical,
            Level::Error,
        ]),
    });
    cfg
}
