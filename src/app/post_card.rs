//! Per-post view state: like and bookmark flags, like count, ownership.
//!
//! A [`PostCard`] is created for every post a page shows. Toggles are applied
//! optimistically and rolled back when the store rejects them. Every action
//! that needs a user answers [`Action::PromptLogin`] when there is none.

use crate::app::actions::{Action, Notice, Route};
use crate::domain::error::{Result, SnapshareError};
use crate::domain::{Post, User};
use crate::services::Services;

/// View state of one post for the current viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub post: Post,
    pub liked: bool,
    pub bookmarked: bool,
    pub likes_count: usize,
    /// `true` iff the viewer's id equals the post's `userId`.
    pub is_owner: bool,
}

impl PostCard {
    /// Card with ownership resolved and relation state not yet loaded.
    #[must_use]
    pub fn new(post: Post, viewer: Option<&User>) -> Self {
        let is_owner = viewer.is_some_and(|user| post.is_owned_by(user));
        Self {
            post,
            liked: false,
            bookmarked: false,
            likes_count: 0,
            is_owner,
        }
    }

    /// Card with relation state fetched from the services.
    #[must_use]
    pub fn load(post: Post, services: &Services, viewer: Option<&User>) -> Self {
        let mut card = Self::new(post, viewer);
        card.refresh(services, viewer);
        card
    }

    /// Re-reads like and bookmark state. Without a viewer everything resets.
    ///
    /// Failed reads degrade to "not liked", "not bookmarked", zero likes.
    pub fn refresh(&mut self, services: &Services, viewer: Option<&User>) {
        self.is_owner = viewer.is_some_and(|user| self.post.is_owned_by(user));
        let Some(user) = viewer else {
            self.liked = false;
            self.bookmarked = false;
            self.likes_count = 0;
            return;
        };

        let _span = tracing::debug_span!("card_refresh", post_id = %self.post.id).entered();
        self.likes_count = services.likes.likes_for_post(&self.post.id).len();
        self.liked = services.likes.has_user_liked(&self.post.id, &user.id);
        self.bookmarked = services.bookmarks.has_user_bookmarked(&self.post.id, &user.id);
    }

    /// Flips the like and adjusts the count, reverting if the store fails.
    pub fn toggle_like(&mut self, services: &Services, viewer: Option<&User>) -> Vec<Action> {
        let Some(user) = viewer else {
            return vec![Action::PromptLogin];
        };

        let was_liked = self.liked;
        self.set_liked(!was_liked);

        let result = if was_liked {
            services.likes.unlike(&self.post.id, &user.id)
        } else {
            services.likes.like(&self.post.id, &user.id).map(|_| ())
        };

        match result {
            Ok(()) => Vec::new(),
            Err(e) => {
                tracing::warn!(post_id = %self.post.id, error = %e, "like toggle failed");
                self.set_liked(was_liked);
                vec![Action::Notify(Notice::error("Failed to update like"))]
            }
        }
    }

    /// Flips the bookmark, reverting if the store fails.
    pub fn toggle_bookmark(&mut self, services: &Services, viewer: Option<&User>) -> Vec<Action> {
        let Some(user) = viewer else {
            return vec![Action::PromptLogin];
        };

        let was_bookmarked = self.bookmarked;
        self.bookmarked = !was_bookmarked;

        let result = if was_bookmarked {
            services.bookmarks.remove_bookmark(&self.post.id, &user.id)
        } else {
            services.bookmarks.bookmark(&self.post.id, &user.id).map(|_| ())
        };

        match result {
            Ok(()) => Vec::new(),
            Err(e) => {
                tracing::warn!(post_id = %self.post.id, error = %e, "bookmark toggle failed");
                self.bookmarked = was_bookmarked;
                vec![Action::Notify(Notice::error("Failed to update bookmark"))]
            }
        }
    }

    /// Navigates to the edit page of an owned post.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshareError::Forbidden`] when the viewer is not the author.
    pub fn edit(&self, viewer: Option<&User>) -> Result<Vec<Action>> {
        if viewer.is_none() {
            return Ok(vec![Action::PromptLogin]);
        }
        self.ensure_owner()?;
        Ok(vec![Action::Navigate(Route::EditPost(self.post.id.clone()))])
    }

    /// Rejects a viewer that does not own the post.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshareError::Forbidden`] when the viewer is not the author.
    pub fn ensure_owner(&self) -> Result<()> {
        if self.is_owner {
            Ok(())
        } else {
            Err(SnapshareError::Forbidden(format!("post {} belongs to another user", self.post.id)))
        }
    }

    fn set_liked(&mut self, liked: bool) {
        if liked != self.liked {
            self.liked = liked;
            self.likes_count = if liked {
                self.likes_count + 1
            } else {
                self.likes_count.saturating_sub(1)
            };
        }
    }
}
