//! Log file setup
//!
//! The terminal belongs to the UI, so logs go to a file: by default
//! `tripguide.log` in the XDG cache directory. `RUST_LOG` controls the level.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Level used when `RUST_LOG` is unset or invalid
const DEFAULT_LEVEL: &str = "info";

/// Errors that can occur while installing the logger
#[derive(Debug, Error)]
pub enum LoggingError {
    /// No home directory to derive a cache location from
    #[error("Could not determine a log directory")]
    NoLogDirectory,

    /// The log file could not be created or opened
    #[error("Failed to open log file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// A global subscriber is already installed
    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Default log file location (`~/.cache/tripguide/tripguide.log` on Linux)
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "tripguide")?;
    Some(project_dirs.cache_dir().join("tripguide.log"))
}

/// Opens the log file for appending, creating parent directories
pub fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let open = || -> io::Result<File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    };
    open().map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Installs the global subscriber writing to `path` or the default location
///
/// # Returns
/// * `Ok(PathBuf)` - the file logs are written to
/// * `Err(LoggingError)` - if no file could be opened or a subscriber exists
pub fn init(path: Option<&Path>) -> Result<PathBuf, LoggingError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_log_path().ok_or(LoggingError::NoLogDirectory)?,
    };
    let file = open_log_file(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| LoggingError::Install(err.to_string()))?;

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(path)
}
