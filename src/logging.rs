use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to a file; the terminal belongs to the UI.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_path().ok_or_else(|| eyre!("no data directory for the log file"))?,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = File::create(&path)
        .wrap_err_with(|| format!("creating log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("installing log subscriber: {e}"))?;

    Ok(path)
}

fn default_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("org-calendar").join("org-calendar.log"))
}
