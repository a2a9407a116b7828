//! Card list state shared by the home and bookmarks pages.

use crate::app::actions::{Action, Notice};
use crate::app::delete::DeleteFlow;
use crate::app::post_card::PostCard;
use crate::domain::error::{Result, SnapshareError};
use crate::domain::{Id, Post, User};
use crate::services::Services;

/// Loaded cards plus the page-level banner and delete prompt.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    cards: Vec<PostCard>,
    loading: bool,
    error: Option<String>,
    delete: DeleteFlow,
}

impl Feed {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    #[must_use]
    pub fn card(&self, post_id: &Id) -> Option<&PostCard> {
        self.cards.iter().find(|card| card.post.id == *post_id)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error banner text, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn delete_flow(&self) -> &DeleteFlow {
        &self.delete
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replaces the cards, keeping the order of `posts`.
    pub(crate) fn replace(&mut self, posts: Vec<Post>, services: &Services, viewer: Option<&User>) {
        self.cards = posts
            .into_iter()
            .map(|post| PostCard::load(post, services, viewer))
            .collect();
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn fail_load(&mut self, message: &str) {
        self.cards.clear();
        self.error = Some(message.to_string());
        self.loading = false;
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn prune(&mut self, post_id: &Id) {
        self.cards.retain(|card| card.post.id != *post_id);
    }

    fn card_mut(&mut self, post_id: &Id) -> Result<&mut PostCard> {
        self.cards
            .iter_mut()
            .find(|card| card.post.id == *post_id)
            .ok_or_else(|| SnapshareError::NotFound(format!("post {post_id} is not on this page")))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page.
    pub fn toggle_like(&mut self, post_id: &Id, services: &Services, viewer: Option<&User>) -> Result<Vec<Action>> {
        Ok(self.card_mut(post_id)?.toggle_like(services, viewer))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page.
    pub fn toggle_bookmark(
        &mut self,
        post_id: &Id,
        services: &Services,
        viewer: Option<&User>,
    ) -> Result<Vec<Action>> {
        Ok(self.card_mut(post_id)?.toggle_bookmark(services, viewer))
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page, `Forbidden` if the
    /// viewer does not own it.
    pub fn edit(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        self.card_mut(post_id)?.edit(viewer)
    }

    /// Opens the delete prompt for an owned post.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the post is not on the page, `Forbidden` if the
    /// viewer does not own it.
    pub fn request_delete(&mut self, post_id: &Id, viewer: Option<&User>) -> Result<Vec<Action>> {
        if viewer.is_none() {
            return Ok(vec![Action::PromptLogin]);
        }
        self.card_mut(post_id)?.ensure_owner()?;
        self.delete.request(post_id.clone());
        Ok(Vec::new())
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    /// Deletes the pending post, prunes it and reports the outcome.
    ///
    /// Does nothing when no delete is pending.
    pub fn confirm_delete(&mut self, services: &Services) -> Vec<Action> {
        let Some(post_id) = self.delete.confirm() else {
            return Vec::new();
        };

        match services.posts.delete_post(&post_id) {
            Ok(()) => {
                self.prune(&post_id);
                vec![Action::Notify(Notice::success("Post deleted successfully!"))]
            }
            Err(e) => {
                tracing::warn!(%post_id, error = %e, "delete failed");
                self.error = Some("Failed to delete post".to_string());
                vec![Action::Notify(Notice::error("Failed to delete post."))]
            }
        }
    }
}
