//! Client-side form validation.
//!
//! Mirrors the constraints the forms enforce before anything is sent to the
//! store. Each check yields at most one message per field, in the same order
//! the form schema declares them: required first, then length or format.

use crate::domain::error::{Result, SnapshareError};
use crate::domain::post::PostDraft;
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;
pub const USERNAME_MIN: usize = 3;
pub const PASSWORD_MIN: usize = 6;

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Records `message` for `field` unless the field already has one.
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshareError::Validation`] carrying these messages.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SnapshareError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

fn check_length(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) {
    let len = value.chars().count();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
    } else if len < min {
        errors.add(field, format!("{label} must be at least {min} characters"));
    } else if let Some(max) = max.filter(|max| len > *max) {
        errors.add(field, format!("{label} must be less than {max} characters"));
    }
}

/// Returns `true` for absolute `http`, `https` or `ftp` URLs with a host.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https" | "ftp") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Loose email shape check: `local@domain.tld`, no whitespace.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Validates the add/edit post form.
///
/// # Errors
///
/// Returns [`SnapshareError::Validation`] listing every failing field.
pub fn validate_post(draft: &PostDraft) -> Result<()> {
    let mut errors = FieldErrors::default();
    check_length(&mut errors, "title", "Title", &draft.title, TITLE_MIN, Some(TITLE_MAX));
    check_length(
        &mut errors,
        "description",
        "Description",
        &draft.description,
        DESCRIPTION_MIN,
        Some(DESCRIPTION_MAX),
    );
    if draft.image.is_empty() {
        errors.add("image", "Image is required");
    } else if !is_valid_url(&draft.image) {
        errors.add("image", "Please enter a valid image URL");
    }
    errors.into_result()
}

/// Values of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validates the signup form.
///
/// # Errors
///
/// Returns [`SnapshareError::Validation`] listing every failing field.
pub fn validate_signup(form: &SignupForm) -> Result<()> {
    let mut errors = FieldErrors::default();
    check_length(&mut errors, "username", "Username", &form.username, USERNAME_MIN, None);
    if form.email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(&form.email) {
        errors.add("email", "Invalid email address");
    }
    check_length(&mut errors, "password", "Password", &form.password, PASSWORD_MIN, None);
    if form.confirm_password.is_empty() {
        errors.add("confirm_password", "Confirm password is required");
    } else if form.confirm_password != form.password {
        errors.add("confirm_password", "Passwords must match");
    }
    errors.into_result()
}

/// Validates the login form: both fields must be filled in.
///
/// # Errors
///
/// Returns [`SnapshareError::Validation`] listing every empty field.
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    let mut errors = FieldErrors::default();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Invalid email address");
    }
    if password.is_empty() {
        errors.add("password", "Password is required");
    }
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, description: &str, image: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            description: description.to_string(),
            image: image.to_string(),
        }
    }

    fn field_errors(result: Result<()>) -> FieldErrors {
        match result {
            Err(SnapshareError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_post() {
        let ok = draft("Sunset", "Golden hour at the beach", "https://example.com/a.jpg");
        assert!(validate_post(&ok).is_ok());
    }

    #[test]
    fn post_length_bounds() {
        let errors = field_errors(validate_post(&draft("ab", "too short", "https://example.com/a.jpg")));
        assert_eq!(errors.get("title"), Some("Title must be at least 3 characters"));
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters")
        );

        let long_title = "x".repeat(TITLE_MAX + 1);
        let long_description = "y".repeat(DESCRIPTION_MAX + 1);
        let errors = field_errors(validate_post(&draft(&long_title, &long_description, "https://e.com/x")));
        assert_eq!(errors.get("title"), Some("Title must be less than 100 characters"));
        assert_eq!(
            errors.get("description"),
            Some("Description must be less than 500 characters")
        );

        let edge = draft(&"x".repeat(TITLE_MAX), &"y".repeat(DESCRIPTION_MAX), "https://e.com/x");
        assert!(validate_post(&edge).is_ok());
    }

    #[test]
    fn post_requires_fields_and_url() {
        let errors = field_errors(validate_post(&PostDraft::default()));
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("image"), Some("Image is required"));

        let errors = field_errors(validate_post(&draft("Sunset", "Golden hour at the beach", "not a url")));
        assert_eq!(errors.get("image"), Some("Please enter a valid image URL"));
        assert!(errors.get("title").is_none());
    }

    #[test]
    fn url_and_email_shapes() {
        assert!(is_valid_url("http://example.com/photo.png"));
        assert!(!is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("/relative/path.png"));

        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn signup_rules() {
        let form = SignupForm {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        assert!(validate_signup(&form).is_ok());

        let bad = SignupForm {
            username: "an".to_string(),
            email: "nope".to_string(),
            password: "123".to_string(),
            confirm_password: "1234".to_string(),
        };
        let errors = field_errors(validate_signup(&bad));
        assert_eq!(errors.get("username"), Some("Username must be at least 3 characters"));
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));
        assert_eq!(errors.get("confirm_password"), Some("Passwords must match"));
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = field_errors(validate_login("", ""));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert!(validate_login("ana@example.com", "x").is_ok());
    }
}
