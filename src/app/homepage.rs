//! Home page: every post, newest first, filtered by the location's search term.
//!
//! Posts are fetched once per [`Homepage::load`]. Changing the search term
//! re-derives the visible cards from the loaded ones without another fetch.
//!
//! # Example
//!
//! ```rust
//! use snapshare::app::Homepage;
//! use snapshare::remote::MemoryStore;
//! use snapshare::services::Services;
//! use snapshare::storage::MemorySessionStore;
//! use std::sync::Arc;
//!
//! let services = Services::new(Arc::new(MemoryStore::new()), Arc::new(MemorySessionStore::new()));
//! let mut home = Homepage::new(services);
//! home.set_location_query("?search=beach");
//! home.load(None);
//! let vm = home.compute_viewmodel(None);
//! assert_eq!(vm.header.title, "Search Results for \"beach\"");
//! ```

use crate::app::actions::Action;
use crate::app::feed::Feed;
use crate::app::post_card::PostCard;
use crate::app::search;
use crate::domain::error::Result;
use crate::domain::{Id, User};
use crate::services::Services;
use crate::ui::viewmodel::{CardView, ConfirmDialog, EmptyState, FeedViewModel, HeaderInfo};

/// Controller of the home page.
pub struct Homepage {
    services: Services,
    feed: Feed,
    search_query: String,
}

impl Homepage {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self {
            services,
            feed: Feed::new(),
            search_query: String::new(),
        }
    }

    /// Fetches all posts and their per-viewer state.
    ///
    /// A failed fetch clears the list and sets the `Failed to load posts`
    /// banner.
    pub fn load(&mut self, viewer: Option<&User>) {
        let _span = tracing::debug_span!("homepage_load").entered();
        self.feed.begin_load();
        match self.services.posts.try_all_posts() {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "homepage loaded");
                self.feed.replace(posts, &self.services, viewer);
            }
            Err(e) => {
                tracing::warn!(error = %e, "error loading posts");
                self.feed.fail_load("Failed to load posts");
            }
        }
    }

    /// Takes the search term from a location query string such as `?search=sun`.
    pub fn set_location_query(&mut self, query: &str) {
        self.search_query = search::term_from_query(query);
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_query = term.into();
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn feed(&self) -> &Feed {
        &self.feed
    }

    /// Loaded cards matching the search term, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&PostCard> {
        search::filter_by(self.feed.cards(), &self.search_query, |card| &card.post)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not loaded.
    pub fn toggle_like(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.feed.toggle_like(post_id, &self.services, viewer)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not loaded.
    pub fn toggle_bookmark(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.feed.toggle_bookmark(post_id, &self.services, viewer)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not loaded, `Forbidden` for a post the
    /// viewer does not own.
    pub fn edit(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.feed.edit(post_id, viewer)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not loaded, `Forbidden` for a post the
    /// viewer does not own.
    pub fn request_delete(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.feed.request_delete(post_id, viewer)
    }

    pub fn cancel_delete(&mut self) {
        self.feed.cancel_delete();
    }

    pub fn confirm_delete(&mut self) -> Vec<Action> {
        self.feed.confirm_delete(&self.services)
    }

    /// Builds the renderable page.
    #[must_use]
    pub fn compute_viewmodel(&self, viewer: Option<&User>) -> FeedViewModel {
        let searching = !self.search_query.trim().is_empty();
        let cards: Vec<CardView> = self.visible().into_iter().map(CardView::from).collect();

        let empty_state = (cards.is_empty() && !self.feed.is_loading()).then(|| EmptyState {
            message: if searching {
                "No posts found matching your search.".to_string()
            } else {
                "No posts yet. Be the first to share a photo!".to_string()
            },
        });

        let title = if searching {
            format!("Search Results for \"{}\"", self.search_query)
        } else {
            "Latest Posts".to_string()
        };

        FeedViewModel {
            header: HeaderInfo { title },
            cards,
            empty_state,
            error: self.feed.error().map(str::to_string),
            loading: self.feed.is_loading(),
            show_add_button: viewer.is_some(),
            confirm_delete: self
                .feed
                .delete_flow()
                .pending()
                .map(|id| ConfirmDialog::delete_post(id.as_str())),
        }
    }
}
