// src/logging.rs

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.as_str());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// `<data_local_dir>/phishscope`, or `./.data` when no home directory can be found.
pub fn get_data_dir() -> PathBuf {
    ProjectDirs::from("com", "phishscope", env!("CARGO_PKG_NAME"))
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".").join(".data"))
}

/// `RUST_LOG` wins over `PHISHSCOPE_LOGLEVEL`; with neither set only this crate logs, at `info`.
fn log_filter(rust_log: Option<String>, app_level: Option<String>) -> String {
    let set = |directive: &String| !directive.trim().is_empty();
    rust_log
        .filter(set)
        .or(app_level.filter(set))
        .unwrap_or_else(|| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Sends all tracing output to a log file; the terminal belongs to the UI.
///
/// The file is appended to, so earlier sessions stay readable after a crash.
/// Each run starts with a marker line carrying the version. Returns the path
/// of the log file.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)
        .wrap_err_with(|| format!("cannot create log directory {}", directory.display()))?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("cannot open log file {}", log_path.display()))?;

    let filter = log_filter(std::env::var("RUST_LOG").ok(), std::env::var(LOG_ENV.as_str()).ok());
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(&filter));

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), filter = %filter, "---- new session ----");
    Ok(log_path)
}
