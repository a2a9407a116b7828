//! Snapshare: client library and CLI for a photo/post sharing service.
//!
//! Snapshare talks to a json-server style REST store holding four collections
//! (`users`, `posts`, `likes`, `bookmarks`) and provides:
//! - Account registration and login with a persisted session
//! - Post creation, editing and deletion by their author
//! - Likes and bookmarks as idempotent join records
//! - Client-side search over titles and descriptions
//! - Page controllers that return navigation and notification actions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs)                                      │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Session (hydrate / login / logout)               │
//! │  - Page controllers → Vec<Action>                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Services      │   │ Storage Layer │
//! │ (ui/)         │   │ (services/)   │   │ (storage/)    │
//! │ - View models │   │ - Auth, posts │   │ - Session file│
//! │ - Text render │   │ - Likes, bkmk │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                             │
//! ┌─────────────────────────────────────────────────────┐
//! │  Remote Store (remote/)                             │
//! │  - HttpStore (json-server over HTTP)                │
//! │  - MemoryStore (tests, offline mode)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! │  - Records, ids, validation, errors (domain/)       │
//! │  - Platform paths, store wiring (infrastructure/)   │
//! │  - OpenTelemetry file export (observability/)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! `config.toml` in the platform config directory (or the file passed with
//! `--config`):
//!
//! ```toml
//! base_url = "http://localhost:3001"
//! trace_level = "debug"
//! offline = false
//! timeout_secs = 10
//! ```
//!
//! `SNAPSHARE_BASE_URL` overrides `base_url`.
//!
//! # Example
//!
//! ```rust
//! use snapshare::app::Homepage;
//! use snapshare::domain::{PostDraft, Registration};
//! use snapshare::remote::MemoryStore;
//! use snapshare::storage::MemorySessionStore;
//! use snapshare::Client;
//! use std::sync::Arc;
//!
//! let mut client = Client::new(Arc::new(MemoryStore::new()), Arc::new(MemorySessionStore::new()));
//! let user = client.session.register(Registration {
//!     username: "ana".into(),
//!     email: "ana@example.com".into(),
//!     password: "secret1".into(),
//! })?;
//! client.services.posts.create_post(&user, PostDraft {
//!     title: "Sunset Beach".into(),
//!     description: "Golden hour by the sea".into(),
//!     image: "https://example.com/sunset.jpg".into(),
//! })?;
//!
//! let mut home = Homepage::new(client.services.clone());
//! home.load(client.session.user());
//! assert_eq!(home.visible().len(), 1);
//! # Ok::<(), snapshare::SnapshareError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod remote;
pub mod services;
pub mod storage;
pub mod ui;

pub use app::{Action, Notice, Route, Session};
pub use domain::{Result, SnapshareError};
pub use services::Services;

use remote::RemoteStore;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::SessionStore;

/// Environment variable overriding [`Config::base_url`].
pub const BASE_URL_ENV: &str = "SNAPSHARE_BASE_URL";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Origin of the REST store.
    pub base_url: String,

    /// Where the session, offline store and traces live. Platform default when
    /// unset.
    pub data_dir: Option<PathBuf>,

    /// `tracing` filter directive, e.g. `"debug"` or `"snapshare=trace"`.
    pub trace_level: Option<String>,

    /// Use the file-backed store in the data directory instead of HTTP.
    pub offline: bool,

    /// HTTP request timeout.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            data_dir: None,
            trace_level: None,
            offline: false,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// ```rust
    /// use snapshare::Config;
    ///
    /// let config = Config::from_toml_str("base_url = \"http://api.test\"\noffline = true")?;
    /// assert_eq!(config.base_url, "http://api.test");
    /// assert!(config.offline);
    /// assert_eq!(config.timeout_secs, 10);
    /// # Ok::<(), snapshare::SnapshareError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SnapshareError::Config(e.to_string()))
    }

    /// Loads `path`, or the default config file when `path` is `None`, then
    /// applies environment overrides.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error for an unreadable explicit file, or a
    /// configuration error for invalid contents.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_toml_str(&std::fs::read_to_string(path)?)?,
            None => match infrastructure::default_config_file().filter(|p| p.exists()) {
                Some(default) => Self::from_toml_str(&std::fs::read_to_string(default)?)?,
                None => Self::default(),
            },
        };
        Ok(config.with_env())
    }

    /// Applies `SNAPSHARE_BASE_URL` when set and non-empty.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = base_url;
        }
        self
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Services plus the hydrated session.
pub struct Client {
    pub services: Services,
    pub session: Session,
}

impl Client {
    /// Wires services over `store` and hydrates the session from `persisted`.
    pub fn new(store: Arc<dyn RemoteStore>, persisted: Arc<dyn SessionStore>) -> Self {
        let services = Services::new(store, persisted);
        let session = Session::restore(services.auth.clone());
        Self { services, session }
    }
}

/// Opens the stores `config` describes and returns a ready client.
///
/// # Errors
///
/// Returns a configuration error for an unusable base URL, or an I/O or
/// storage error if the data directory or offline store cannot be opened.
pub fn initialize(config: &Config) -> Result<Client> {
    tracing::debug!(offline = config.offline, "initializing snapshare");
    let store = infrastructure::open_remote_store(config)?;
    let persisted = infrastructure::open_session_store(config)?;
    Ok(Client::new(store, persisted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("scan_depth = 4"),
            Err(SnapshareError::Config(_))
        ));
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = Config::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(config.base_url, "http://localhost:3001");

        let config = Config::default().with_base_url_override(Some("http://api.test".to_string()));
        assert_eq!(config.base_url, "http://api.test");
    }

    #[test]
    fn offline_initialize_uses_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            offline: true,
            ..Config::default()
        };

        let client = initialize(&config).unwrap();
        assert!(!client.session.is_loading());
        assert!(client.session.user().is_none());
    }
}
