//! Application layer: session state and page controllers.
//!
//! This module sits between the front end (the CLI in `main.rs`) and the
//! service layer. Controllers hold page-local state, call services, and return
//! [`Action`]s describing the navigation and notifications the front end
//! should perform.
//!
//! # Architecture
//!
//! ```text
//! User Input → Controller → Services → Remote Store
//!                  │
//!                  ├── local state (cards, forms, banners)
//!                  └── Vec<Action> → front end (navigate, notify, prompt login)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by controllers
//! - [`session`]: The logged-in user, hydrated from persisted storage
//! - [`search`]: Search term parsing and post filtering
//! - [`post_card`]: Per-post like/bookmark/ownership state
//! - [`feed`]: Card list shared by the home and bookmarks pages
//! - [`homepage`], [`bookmarks`]: List pages
//! - [`post_form`]: Add and edit forms
//! - [`signup`]: Signup and login forms
//! - [`delete`]: Delete confirmation
//! - [`navbar`]: Menu, search box and logout
//!
//! # Example
//!
//! ```rust
//! use snapshare::app::{Homepage, Session};
//! use snapshare::remote::MemoryStore;
//! use snapshare::services::Services;
//! use snapshare::storage::MemorySessionStore;
//! use std::sync::Arc;
//!
//! let services = Services::new(Arc::new(MemoryStore::new()), Arc::new(MemorySessionStore::new()));
//! let session = Session::restore(services.auth.clone());
//! let mut home = Homepage::new(services);
//! home.load(session.user());
//! assert!(home.visible().is_empty());
//! ```

pub mod actions;
pub mod bookmarks;
pub mod delete;
pub mod feed;
pub mod homepage;
pub mod navbar;
pub mod post_card;
pub mod post_form;
pub mod search;
pub mod session;
pub mod signup;

pub use actions::{Action, Notice, NoticeLevel, Route};
pub use bookmarks::BookmarksPage;
pub use delete::DeleteFlow;
pub use feed::Feed;
pub use homepage::Homepage;
pub use post_card::PostCard;
pub use post_form::{AddPost, EditPost, PostForm};
pub use session::{Session, SubscriptionId};
pub use signup::{Login, Signup};
