//! Actions representing side effects requested by page controllers.
//!
//! Controllers never navigate or show notifications themselves. They return a
//! `Vec<Action>` and the front end (the CLI, or any other shell) carries them
//! out in order.
//!
//! # Example
//!
//! ```rust
//! use snapshare::app::{Action, Notice, Route};
//!
//! let actions = vec![
//!     Action::Notify(Notice::success("Post added successfully!")),
//!     Action::Navigate(Route::Home),
//! ];
//! assert_eq!(actions[1], Action::Navigate(Route::Home));
//! ```

use crate::domain::Id;
use std::fmt;
use url::form_urlencoded;

/// Commands produced by controllers for the front end to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch to another page.
    Navigate(Route),

    /// Show a transient notification.
    Notify(Notice),

    /// The action needs a logged-in user; ask the visitor to log in.
    PromptLogin,
}

/// Pages of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Home page filtered by a search term.
    HomeSearch(String),
    Login,
    Signup,
    AddPost,
    EditPost(Id),
    Bookmarks,
}

impl Route {
    /// Location path, with the search term percent-encoded.
    ///
    /// ```
    /// use snapshare::app::Route;
    ///
    /// assert_eq!(Route::HomeSearch("sun beach".into()).path(), "/?search=sun+beach");
    /// assert_eq!(Route::EditPost("42".into()).path(), "/edit-post/42");
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::HomeSearch(term) => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("search", term)
                    .finish();
                format!("/?{query}")
            }
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::AddPost => "/add-post".to_string(),
            Self::EditPost(id) => {
                let encoded: String = form_urlencoded::byte_serialize(id.as_str().as_bytes()).collect();
                format!("/edit-post/{encoded}")
            }
            Self::Bookmarks => "/bookmarks".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
