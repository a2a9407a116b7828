//! View model types representing renderable page state.
//!
//! View models are computed from page controllers (for example
//! [`Homepage::compute_viewmodel`](crate::app::Homepage::compute_viewmodel))
//! and consumed by the renderer. They carry display-ready strings and flags
//! and no business logic.
//!
//! # Example
//!
//! ```rust
//! use snapshare::ui::viewmodel::{FeedViewModel, HeaderInfo};
//!
//! let vm = FeedViewModel {
//!     header: HeaderInfo { title: "Latest Posts".to_string() },
//!     cards: vec![],
//!     empty_state: None,
//!     error: None,
//!     loading: false,
//!     show_add_button: true,
//!     confirm_delete: None,
//! };
//! assert!(vm.cards.is_empty());
//! ```

use crate::app::PostCard;
use crate::domain::time;

/// Title of the delete confirmation prompt.
pub const CONFIRM_DELETE_TITLE: &str = "Confirm Deletion";

/// Body of the delete confirmation prompt.
pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this post? This action cannot be undone.";

/// A page listing post cards (home, search results, bookmarks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewModel {
    /// Heading above the list.
    pub header: HeaderInfo,

    /// Cards to show, in display order.
    pub cards: Vec<CardView>,

    /// Shown instead of the list when there are no cards.
    pub empty_state: Option<EmptyState>,

    /// Error banner text.
    pub error: Option<String>,

    /// Data is still being fetched.
    pub loading: bool,

    /// Whether the "add post" button is offered (logged-in viewers only).
    pub show_add_button: bool,

    /// Open delete prompt, if any.
    pub confirm_delete: Option<ConfirmDialog>,
}

/// Display information for one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: String,

    /// Creation date, e.g. `Mar 5, 2024`.
    pub date: String,

    pub likes_count: usize,
    pub liked: bool,
    pub bookmarked: bool,

    /// Edit and delete controls are offered.
    pub can_edit: bool,
}

impl From<&PostCard> for CardView {
    fn from(card: &PostCard) -> Self {
        Self {
            id: card.post.id.to_string(),
            title: card.post.title.clone(),
            description: card.post.description.clone(),
            image: card.post.image.clone(),
            author: card.post.username.clone(),
            date: time::display_date(&card.post.created_at),
            likes_count: card.likes_count,
            liked: card.liked,
            bookmarked: card.bookmarked,
            can_edit: card.is_owner,
        }
    }
}

/// Heading text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Message shown when a list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// Delete confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,

    /// Post the prompt refers to.
    pub post_id: String,
}

impl ConfirmDialog {
    #[must_use]
    pub fn delete_post(post_id: impl Into<String>) -> Self {
        Self {
            title: CONFIRM_DELETE_TITLE.to_string(),
            message: CONFIRM_DELETE_MESSAGE.to_string(),
            post_id: post_id.into(),
        }
    }
}

/// An add or edit post form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFormViewModel {
    /// "Create New Post" or "Edit Post".
    pub heading: String,
    pub title: String,
    pub description: String,
    pub image: String,

    /// Per-field validation messages, `(field, message)`.
    pub field_errors: Vec<(String, String)>,

    /// Error banner text.
    pub error: Option<String>,

    /// Image URL to preview, present once the entered URL is valid.
    pub preview: Option<String>,
}
