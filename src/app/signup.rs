//! Signup and login forms.

use crate::app::actions::{Action, Route};
use crate::app::session::Session;
use crate::domain::error::{Result, SnapshareError};
use crate::domain::validation::{self, FieldErrors, SignupForm};
use crate::domain::Registration;

/// Splits a validation outcome into per-field messages and a banner.
fn record(result: Result<()>, field_errors: &mut FieldErrors, error: &mut Option<String>) -> bool {
    *error = None;
    match result {
        Ok(()) => {
            *field_errors = FieldErrors::default();
            true
        }
        Err(SnapshareError::Validation(errors)) => {
            *field_errors = errors;
            false
        }
        Err(e) => {
            *error = Some(e.to_string());
            false
        }
    }
}

/// Controller of the signup page.
#[derive(Debug, Clone, Default)]
pub struct Signup {
    pub form: SignupForm,
    field_errors: FieldErrors,
    error: Option<String>,
}

impl Signup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates and registers; a new account is logged in and sent home.
    ///
    /// `User already exists` and `Registration failed` land in the banner.
    pub fn submit(&mut self, session: &mut Session) -> Vec<Action> {
        let valid = record(
            validation::validate_signup(&self.form),
            &mut self.field_errors,
            &mut self.error,
        );
        if !valid {
            return Vec::new();
        }

        let registration = Registration {
            username: self.form.username.trim().to_string(),
            email: self.form.email.trim().to_string(),
            password: self.form.password.clone(),
        };
        match session.register(registration) {
            Ok(_) => vec![Action::Navigate(Route::Home)],
            Err(e) => {
                self.error = Some(match e {
                    SnapshareError::UserAlreadyExists => e.to_string(),
                    _ => "Registration failed".to_string(),
                });
                Vec::new()
            }
        }
    }
}

/// Controller of the login page.
#[derive(Debug, Clone, Default)]
pub struct Login {
    pub email: String,
    pub password: String,
    field_errors: FieldErrors,
    error: Option<String>,
}

impl Login {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates and logs in; success goes home.
    ///
    /// `Invalid credentials` and `Login failed` land in the banner.
    pub fn submit(&mut self, session: &mut Session) -> Vec<Action> {
        let valid = record(
            validation::validate_login(&self.email, &self.password),
            &mut self.field_errors,
            &mut self.error,
        );
        if !valid {
            return Vec::new();
        }

        match session.login(self.email.trim(), &self.password) {
            Ok(_) => vec![Action::Navigate(Route::Home)],
            Err(e) => {
                self.error = Some(match e {
                    SnapshareError::InvalidCredentials => e.to_string(),
                    _ => "Login failed".to_string(),
                });
                Vec::new()
            }
        }
    }
}
