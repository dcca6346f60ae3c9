//! Binary entry point: resolve directories, start file logging, open the
//! ledger database, and hand control to the terminal UI.
use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::Context;
use shop_ledger::{open_database, run_app, App, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::resolve()?;
    init_logging(&config)?;

    let conn = open_database(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    info!(db = %config.db_path.display(), exports = %config.export_dir.display(), "Starting");

    let mut app = App::new(conn, config);
    run_app(&mut app)
}

/// The terminal belongs to the UI, so log lines go to a file in the data
/// directory. `RUST_LOG` overrides the default `info` level.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    fs::create_dir_all(config.data_dir())
        .with_context(|| format!("failed to create {}", config.data_dir().display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
