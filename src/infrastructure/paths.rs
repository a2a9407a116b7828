//! Platform directories and the files snapshare keeps in them.
//!
//! Locations come from `directories::ProjectDirs`, e.g. on Linux:
//!
//! | File | Path |
//! |---|---|
//! | config | `~/.config/snapshare/config.toml` |
//! | session | `~/.local/share/snapshare/session.json` |
//! | offline store | `~/.local/share/snapshare/db.json` |
//! | traces | `~/.local/share/snapshare/snapshare-otlp.json` |

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const SESSION_FILE: &str = "session.json";
pub const OFFLINE_DB_FILE: &str = "db.json";
pub const TRACE_FILE: &str = "snapshare-otlp.json";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "snapshare", "snapshare")
}

/// Per-user data directory.
///
/// Falls back to `.snapshare` in the working directory when the platform
/// reports no home directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    project_dirs().map_or_else(|| PathBuf::from(".snapshare"), |dirs| dirs.data_dir().to_path_buf())
}

/// Default config file location, if the platform has a config directory.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[must_use]
pub fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

#[must_use]
pub fn offline_db_file(data_dir: &Path) -> PathBuf {
    data_dir.join(OFFLINE_DB_FILE)
}

#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_data_dir() {
        let dir = Path::new("/tmp/snap");
        assert_eq!(session_file(dir), PathBuf::from("/tmp/snap/session.json"));
        assert_eq!(offline_db_file(dir), PathBuf::from("/tmp/snap/db.json"));
        assert_eq!(trace_file(dir), PathBuf::from("/tmp/snap/snapshare-otlp.json"));
    }
}
