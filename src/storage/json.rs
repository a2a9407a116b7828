//! JSON file-based session persistence.
//!
//! The session lives in a small JSON document written atomically
//! (write-to-temp + rename) so a crash never leaves a half-written file.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "currentUser": {
//!     "id": "4f7c…",
//!     "username": "ana",
//!     "email": "ana@example.com",
//!     "password": "…",
//!     "avatar": "https://via.placeholder.com/150",
//!     "createdAt": "2024-05-01T12:30:00.000Z"
//!   }
//! }
//! ```

use crate::domain::error::{Result, SnapshareError};
use crate::domain::User;
use crate::storage::backend::SessionStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version of the file layout, for future migrations.
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    version: u32,
    current_user: Option<User>,
}

/// Session store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    file_path: PathBuf,
}

impl JsonSessionStore {
    /// Creates a store at `file_path`, creating parent directories.
    ///
    /// The file itself is only created by the first [`SessionStore::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "initializing session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { file_path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<User>> {
        let _span = tracing::debug_span!("session_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no persisted session");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let file: SessionFile = serde_json::from_str(&contents)
            .map_err(|e| SnapshareError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(version = file.version, found = file.current_user.is_some(), "loaded session");
        Ok(file.current_user)
    }

    fn save(&self, user: &User) -> Result<()> {
        let _span = tracing::debug_span!("session_save", user_id = %user.id).entered();

        let file = SessionFile {
            version: FORMAT_VERSION,
            current_user: Some(user.clone()),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| SnapshareError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => {
                tracing::debug!("session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Registration;

    fn user() -> User {
        Registration {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        }
        .into_user()
    }

    #[test]
    fn save_load_clear_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::new(dir.path().join("nested").join("session.json")).unwrap();

        assert_eq!(store.load().unwrap(), None);

        let ana = user();
        store.save(&ana).unwrap();
        assert_eq!(store.load().unwrap(), Some(ana));
        assert!(!store.path().with_extension("tmp").exists());

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonSessionStore::new(&path).unwrap();
        assert!(matches!(store.load(), Err(SnapshareError::Storage(_))));
    }
}
