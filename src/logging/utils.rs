//! Log file location and timestamp formatting.
use std::fs;
use std::path::PathBuf;

use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

/// Subdirectory of the user cache directory that holds the log files.
const APP_DIR: &str = "dist-overlay";

/// Return `<cache>/dist-overlay/`, creating it if needed.
///
/// `<cache>` is `$XDG_CACHE_HOME` when set, otherwise the platform cache
/// directory.
fn cache_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::cache_dir)?;
    let dir = base.join(APP_DIR);
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path for `command` under the cache directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(format!("{command}.log")))
}

/// Timer for the file layer: UTC wall-clock time as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct UtcTime;

impl FormatTime for UtcTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Utc::now().format("%H:%M:%S"))
    }
}
