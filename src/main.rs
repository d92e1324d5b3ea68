// src/main.rs

//! The main entry point for the gradebridge server application.

use anyhow::Result;
use gradebridge::config::Config;
use gradebridge::server;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{filter::EnvFilter, prelude::*, reload};

const DEFAULT_CONFIG_PATH: &str = "gradebridge.toml";

#[tokio::main]
async fn main() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--version") {
        println!("gradebridge version {VERSION}");
        return Ok(());
    }

    let stdio_mode = args.iter().any(|a| a == "--stdio");

    // An explicit --config must exist. Without one, the default file is used only
    // if present, otherwise built-in defaults apply.
    let explicit_config = match args.iter().position(|a| a == "--config") {
        Some(i) => match args.get(i + 1) {
            Some(path) => Some(path.clone()),
            None => {
                eprintln!("--config flag requires a value");
                std::process::exit(1);
            }
        },
        None => None,
    };
    let config_path = explicit_config.or_else(|| {
        Path::new(DEFAULT_CONFIG_PATH)
            .exists()
            .then(|| DEFAULT_CONFIG_PATH.to_string())
    });

    let mut config = match config_path.as_deref() {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e:#}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    // Override port if provided as a command-line argument.
    if let Some(port_index) = args.iter().position(|arg| arg == "--port") {
        match args.get(port_index + 1).map(|s| s.parse::<u16>()) {
            Some(Ok(port)) if port != 0 => config.port = port,
            Some(_) => {
                eprintln!("Invalid port number: {}", args[port_index + 1]);
                std::process::exit(1);
            }
            None => {
                eprintln!("--port flag requires a value");
                std::process::exit(1);
            }
        }
    }

    // Initial log level comes from RUST_LOG or the config; the filter sits behind a
    // reload layer so SIGHUP can change it later.
    let initial_log_level = env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    let (filter, reload_handle) = reload::Layer::new(EnvFilter::new(initial_log_level));

    // In stdio mode stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(!stdio_mode)
                .with_writer(std::io::stderr),
        )
        .init();

    let reload_handle = Arc::new(reload_handle);

    let outcome = if stdio_mode {
        server::run_stdio(config, config_path, reload_handle).await
    } else {
        server::run(config, config_path, reload_handle).await
    };

    if let Err(e) = &outcome {
        error!("Bridge runtime error: {:#}", e);
    }
    outcome
}
