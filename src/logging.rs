//! File logging.
//!
//! The terminal belongs to the UI, so tracing output goes to
//! `<data-dir>/daylist.log`. `DAYLIST_LOG` overrides the level filter.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "daylist.log";
const LOG_ENV_VAR: &str = "DAYLIST_LOG";

/// Path of the log file inside `data_dir`.
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE_NAME)
}

/// Install the global subscriber. Fails if the log file can't be opened or
/// a subscriber is already set.
pub fn init_logging(data_dir: &Path, level: &str) -> Result<PathBuf, String> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| format!("failed to create data directory {}: {e}", data_dir.display()))?;

    let path = log_path(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("failed to open log file {}: {e}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))?;

    Ok(path)
}
