//! Bookmarks page: the viewer's bookmarked posts.

use crate::app::actions::Action;
use crate::app::feed::Feed;
use crate::domain::error::Result;
use crate::domain::{Id, User};
use crate::services::Services;
use crate::ui::viewmodel::{CardView, ConfirmDialog, EmptyState, FeedViewModel, HeaderInfo};
use std::collections::HashSet;

/// Controller of the bookmarks page.
///
/// Bookmarks are join records, so the page reads them first and then
/// intersects the full post list by id. Bookmarks of deleted posts are
/// silently skipped.
pub struct BookmarksPage {
    services: Services,
    feed: Feed,
}

impl BookmarksPage {
    #[must_use]
    pub fn new(services: Services) -> Self {
        Self {
            services,
            feed: Feed::new(),
        }
    }

    /// Loads the viewer's bookmarked posts. Without a viewer nothing happens.
    ///
    /// No bookmarks means no post fetch. A failed post fetch sets the
    /// `Failed to load bookmarked posts` banner.
    pub fn load(&mut self, viewer: Option<&User>) {
        let Some(user) = viewer else {
            return;
        };
        let _span = tracing::debug_span!("bookmarks_load", user_id = %user.id).entered();
        self.feed.begin_load();

        let bookmarks = self.services.bookmarks.bookmarks_for_user(&user.id);
        if bookmarks.is_empty() {
            tracing::debug!("no bookmarks");
            self.feed.clear();
            return;
        }

        let wanted: HashSet<&Id> = bookmarks.iter().map(|b| &b.post_id).collect();
        match self.services.posts.try_all_posts() {
            Ok(posts) => {
                let posts: Vec<_> = posts.into_iter().filter(|p| wanted.contains(&p.id)).collect();
                tracing::debug!(bookmarks = bookmarks.len(), posts = posts.len(), "bookmarks loaded");
                self.feed.replace(posts, &self.services, Some(user));
            }
            Err(e) => {
                tracing::warn!(error = %e, "error loading bookmarked posts");
                self.feed.fail_load("Failed to load bookmarked posts");
            }
        }
    }

    #[must_use]
    pub const fn feed(&self) -> &Feed {
        &self.feed
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page.
    pub fn toggle_like(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.feed.toggle_like(post_id, &self.services, viewer)
    }

    /// Toggles the bookmark; a post whose bookmark is removed leaves the page.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page.
    pub fn toggle_bookmark(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        let actions = self.feed.toggle_bookmark(post_id, &self.services, viewer)?;
        if self.feed.card(post_id).is_some_and(|card| !card.bookmarked) && viewer.is_some() {
            self.feed.prune(post_id);
        }
        Ok(actions)
    }

    /// Removes the viewer's bookmark on `post_id` and drops it from the page.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page.
    pub fn remove_bookmark(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        match self.feed.card(post_id) {
            Some(card) if !card.bookmarked => {
                self.feed.prune(post_id);
                Ok(Vec::new())
            }
            _ => self.toggle_bookmark(post_id, viewer),
        }
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page, `Forbidden` for a
    /// post the viewer does not own.
    pub fn edit(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.feed.edit(post_id, viewer)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page, `Forbidden` for a
    /// post the viewer does not own.
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
        let cards: Vec<CardView> = self.feed.cards().iter().map(CardView::from).collect();
        let empty_state = (cards.is_empty() && !self.feed.is_loading()).then(|| EmptyState {
            message: "No bookmarks yet. Start saving your favorite posts!".to_string(),
        });

        FeedViewModel {
            header: HeaderInfo {
                title: "Your Bookmarks".to_string(),
            },
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
