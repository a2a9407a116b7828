//! Authentication against the `users` collection.
//!
//! Credentials are checked by querying for an exact email + password match.
//! The matched record becomes the persisted session.

use crate::domain::error::{Result, SnapshareError};
use crate::domain::{Registration, User};
use crate::remote::{Collection, Query, RemoteStore, RemoteStoreExt};
use crate::storage::SessionStore;
use std::sync::Arc;

/// Login, registration and the persisted current user.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn RemoteStore>,
    persisted: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn RemoteStore>, persisted: Arc<dyn SessionStore>) -> Self {
        Self { store, persisted }
    }

    /// Logs in with email and password.
    ///
    /// The first matching user is persisted as the session. Nothing is
    /// persisted on failure.
    ///
    /// # Errors
    ///
    /// - [`SnapshareError::InvalidCredentials`] if no user matches
    /// - [`SnapshareError::Network`] if the store cannot be queried
    /// - [`SnapshareError::Storage`] if the session cannot be persisted
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let _span = tracing::debug_span!("auth_login", email = %email).entered();

        let query = Query::new().eq("email", email).eq("password", password);
        let matches: Vec<User> = self.store.fetch_all(Collection::Users, &query).map_err(|e| {
            tracing::warn!(error = %e, "login request failed");
            SnapshareError::Network("Login failed".to_string())
        })?;

        let user = matches.into_iter().next().ok_or_else(|| {
            tracing::debug!("no user matched credentials");
            SnapshareError::InvalidCredentials
        })?;

        self.persisted.save(&user)?;
        tracing::debug!(user_id = %user.id, "logged in");
        Ok(user)
    }

    /// Creates an account and logs it in.
    ///
    /// The email is checked for existing users first. The check and the insert
    /// are separate requests, so two simultaneous registrations can both pass it.
    ///
    /// # Errors
    ///
    /// - [`SnapshareError::UserAlreadyExists`] if the email is taken
    /// - [`SnapshareError::Network`] if the store cannot be reached
    /// - [`SnapshareError::Storage`] if the session cannot be persisted
    pub fn register(&self, registration: Registration) -> Result<User> {
        let _span = tracing::debug_span!("auth_register", email = %registration.email).entered();

        let existing: Vec<User> = self
            .store
            .fetch_all(Collection::Users, &Query::new().eq("email", &registration.email))
            .map_err(registration_failed)?;
        if !existing.is_empty() {
            tracing::debug!("email already registered");
            return Err(SnapshareError::UserAlreadyExists);
        }

        let user = self
            .store
            .insert(Collection::Users, &registration.into_user())
            .map_err(registration_failed)?;

        self.persisted.save(&user)?;
        tracing::debug!(user_id = %user.id, "registered");
        Ok(user)
    }

    /// Forgets the persisted session. Never fails; storage errors are logged.
    pub fn logout(&self) {
        if let Err(e) = self.persisted.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// Reads the persisted session, `None` if absent or unreadable.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.persisted.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read persisted session");
            None
        })
    }
}

fn registration_failed(error: SnapshareError) -> SnapshareError {
    tracing::warn!(error = %error, "registration request failed");
    SnapshareError::Network("Registration failed".to_string())
}
