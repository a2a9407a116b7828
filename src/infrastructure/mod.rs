//! Infrastructure layer: filesystem locations and store construction.
//!
//! Everything that depends on where snapshare runs (platform directories,
//! online versus offline store) is resolved here so the layers above only see
//! trait objects.

pub mod paths;

pub use paths::{default_config_file, get_data_dir};

use crate::domain::error::Result;
use crate::remote::{HttpStore, MemoryStore, RemoteStore};
use crate::storage::{JsonSessionStore, SessionStore};
use crate::Config;
use std::sync::Arc;

/// Data directory from the config, or the platform default.
#[must_use]
pub fn data_dir(config: &Config) -> std::path::PathBuf {
    config.data_dir.clone().unwrap_or_else(get_data_dir)
}

/// The remote store the config asks for.
///
/// Offline mode uses a file-backed [`MemoryStore`] in the data directory
/// instead of the network.
///
/// # Errors
///
/// Returns a configuration error for an unusable base URL, or the error from
/// opening the offline database.
pub fn open_remote_store(config: &Config) -> Result<Arc<dyn RemoteStore>> {
    if config.offline {
        let path = paths::offline_db_file(&data_dir(config));
        tracing::debug!(path = %path.display(), "using offline store");
        Ok(Arc::new(MemoryStore::open(path)?))
    } else {
        tracing::debug!(base_url = %config.base_url, "using http store");
        Ok(Arc::new(HttpStore::new(&config.base_url)?.with_timeout(config.timeout())))
    }
}

/// The persisted session file in the data directory.
///
/// # Errors
///
/// Returns an I/O error if the data directory cannot be created.
pub fn open_session_store(config: &Config) -> Result<Arc<dyn SessionStore>> {
    let path = paths::session_file(&data_dir(config));
    Ok(Arc::new(JsonSessionStore::new(path)?))
}
