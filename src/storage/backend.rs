//! Session persistence abstraction.
//!
//! This module defines the [`SessionStore`] trait: the one durable key that
//! holds the logged-in user between runs. It is read once when a session
//! hydrates, written on login/registration, and cleared on logout.

use crate::domain::error::Result;
use crate::domain::User;

/// Durable storage for the current-user record.
///
/// # Implementations
///
/// - [`JsonSessionStore`](crate::storage::JsonSessionStore): JSON file with atomic writes
/// - [`MemorySessionStore`](crate::storage::MemorySessionStore): process-local, for tests
pub trait SessionStore: Send + Sync {
    /// Reads the persisted user, `Ok(None)` if nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be read or parsed.
    fn load(&self) -> Result<Option<User>>;

    /// Replaces the persisted user.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&self, user: &User) -> Result<()>;

    /// Removes the persisted user. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear(&self) -> Result<()>;
}
