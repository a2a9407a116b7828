//! User accounts.

use crate::domain::id::Id;
use crate::domain::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar assigned to every account at registration.
pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150";

/// A registered user as stored in the `users` collection.
///
/// The password travels and is stored as plain text because that is what the
/// backend compares against. The record persisted as the session carries it too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(with = "time::wire")]
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Builds the record to insert: fresh id, default avatar, creation time now.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: Id::generate(),
            username: self.username,
            email: self.email,
            password: self.password,
            avatar: DEFAULT_AVATAR.to_string(),
            created_at: time::now(),
        }
    }
}
