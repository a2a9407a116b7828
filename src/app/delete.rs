//! Confirmation step shared by every page that can delete a post.

use crate::domain::Id;

/// Two-step delete: request opens a prompt, confirm or cancel closes it.
///
/// The flow performs no mutation itself. [`confirm`](Self::confirm) hands the
/// pending id back to the page, which deletes and prunes.
///
/// ```
/// use snapshare::app::DeleteFlow;
///
/// let mut flow = DeleteFlow::default();
/// flow.request("7".into());
/// assert!(flow.is_open());
/// assert_eq!(flow.confirm().map(|id| id.to_string()), Some("7".to_string()));
/// assert!(!flow.is_open());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteFlow {
    pending: Option<Id>,
}

impl DeleteFlow {
    /// Opens the prompt for `id`, replacing any earlier request.
    pub fn request(&mut self, id: Id) {
        tracing::debug!(post_id = %id, "delete requested");
        self.pending = Some(id);
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&Id> {
        self.pending.as_ref()
    }

    /// Closes the prompt and returns the id to delete, if one was pending.
    pub fn confirm(&mut self) -> Option<Id> {
        self.pending.take()
    }

    /// Closes the prompt without deleting anything.
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            tracing::debug!(post_id = %id, "delete cancelled");
        }
    }
}
