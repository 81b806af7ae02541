//! Tracing subscriber initialisation.
//!
//! The terminal belongs to the UI, so events go to a log file instead of
//! stderr. `RUST_LOG` overrides the level derived from `-v`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to initialise tracing: {0}")]
    Subscriber(String),
}

/// Installs the global subscriber. Call once, before the UI starts.
pub fn init_logging(log_file: &Path, verbose: u8) -> Result<(), LoggingError> {
    let level = derive_level(verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bloom_pizza={level}")));

    let file = open_log_file(log_file)?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_thread_names(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))
}

/// Opens `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open_error = |source: io::Error| LoggingError::OpenLogFile { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(open_error)?;
    }
    OpenOptions::new().create(true).append(true).open(path).map_err(open_error)
}

fn derive_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
