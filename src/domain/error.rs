//! Error types for the snapshare client.
//!
//! This module defines the centralized error type [`SnapshareError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Not every failure reaches the caller: list fetches and existence checks in the
//! service layer log and degrade to empty results. Single-entity operations
//! (login, register, create/update/delete post) return these errors.

use crate::domain::validation::FieldErrors;
use thiserror::Error;

/// The main error type for snapshare operations.
///
/// # Examples
///
/// ```
/// use snapshare::SnapshareError;
///
/// fn check(found: bool) -> Result<(), SnapshareError> {
///     if found { Ok(()) } else { Err(SnapshareError::NotFound("post 42".to_string())) }
/// }
/// assert!(check(false).is_err());
/// ```
#[derive(Debug, Error)]
pub enum SnapshareError {
    /// No user matched the supplied email and password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration was attempted with an email that is already taken.
    #[error("User already exists")]
    UserAlreadyExists,

    /// The requested record does not exist in the remote store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure or an unexpected response from the remote store.
    ///
    /// Deliberately undifferentiated: the string carries whatever detail the
    /// transport produced.
    #[error("Network or server failure: {0}")]
    Network(String),

    /// The remote store refused a create because the id is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The operation needs a logged-in user and there is none.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The logged-in user does not own the targeted record.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Form input failed client-side validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Reading or writing the persisted session failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SnapshareError {
    /// Returns `true` for failures that came from talking to the remote store.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Network(_) | Self::NotFound(_) | Self::Conflict(_))
    }
}

/// A specialized `Result` type for snapshare operations.
pub type Result<T> = std::result::Result<T, SnapshareError>;
