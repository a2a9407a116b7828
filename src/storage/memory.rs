//! Process-local session store.

use crate::domain::error::{Result, SnapshareError};
use crate::domain::User;
use crate::storage::backend::SessionStore;
use std::sync::{Mutex, MutexGuard};

/// Keeps the current user in memory only. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<User>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `user` already persisted, as if from an earlier run.
    #[must_use]
    pub fn with_user(user: User) -> Self {
        Self {
            user: Mutex::new(Some(user)),
        }
    }

    fn slot(&self) -> Result<MutexGuard<'_, Option<User>>> {
        self.user
            .lock()
            .map_err(|e| SnapshareError::Storage(format!("session lock poisoned: {e}")))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<User>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, user: &User) -> Result<()> {
        *self.slot()? = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}
