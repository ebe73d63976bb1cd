// Filesystem locations for folio's log and export files.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "folio")
}

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the base data directory (~/.local/share/folio on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Path to the log file written while the TUI owns the terminal.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("folio.log"))
}

/// Default path for exported portfolio data.
pub fn export_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("portfolio-data.json"))
}
