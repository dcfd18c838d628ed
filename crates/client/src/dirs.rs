//! Platform-specific directories.
//!
//! - Logs: `~/.cache/cybercity/logs` on Linux, the platform cache dir elsewhere
//! - Saves: `~/.local/share/cybercity` on Linux, the platform data dir elsewhere

use std::path::PathBuf;

const APPLICATION: &str = "cybercity";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APPLICATION)
}

pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join(APPLICATION))
        .join("logs")
}

pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Save file used when neither a flag nor `CYBERCITY_SAVE` names one.
pub fn default_save_path() -> PathBuf {
    data_dir().join("campaign.json")
}
