//! Post CRUD against the `posts` collection.

use crate::domain::error::Result;
use crate::domain::{Id, Post, PostDraft, PostPatch, User};
use crate::remote::{Collection, Query, RemoteStore, RemoteStoreExt};
use std::sync::Arc;

/// Fetching and mutating posts.
///
/// List reads never fail: errors are logged and an empty list is returned.
/// Single-post operations return their errors.
#[derive(Clone)]
pub struct PostsService {
    store: Arc<dyn RemoteStore>,
}

impl PostsService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Every post, newest first.
    #[must_use]
    pub fn all_posts(&self) -> Vec<Post> {
        let _span = tracing::debug_span!("posts_all").entered();
        self.list_or_empty(Query::new().sort_desc("createdAt"))
    }

    /// Posts written by `user_id`, newest first.
    #[must_use]
    pub fn posts_by_user(&self, user_id: &Id) -> Vec<Post> {
        let _span = tracing::debug_span!("posts_by_user", %user_id).entered();
        self.list_or_empty(Query::new().eq("userId", user_id).sort_desc("createdAt"))
    }

    /// Like [`all_posts`](Self::all_posts) but surfaces the failure.
    ///
    /// # Errors
    ///
    /// Returns the store error.
    pub fn try_all_posts(&self) -> Result<Vec<Post>> {
        self.store
            .fetch_all(Collection::Posts, &Query::new().sort_desc("createdAt"))
    }

    fn list_or_empty(&self, query: Query) -> Vec<Post> {
        match self.store.fetch_all(Collection::Posts, &query) {
            Ok(posts) => {
                tracing::debug!(count = posts.len(), "fetched posts");
                posts
            }
            Err(e) => {
                tracing::warn!(error = %e, "error fetching posts");
                Vec::new()
            }
        }
    }

    /// One post by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist, `Network` on transport failure.
    pub fn get_post(&self, id: &Id) -> Result<Post> {
        let _span = tracing::debug_span!("posts_get", %id).entered();
        self.store.fetch_one(Collection::Posts, id)
    }

    /// Publishes a new post written by `author`.
    ///
    /// # Errors
    ///
    /// Returns the store error; the failure is also logged.
    pub fn create_post(&self, author: &User, draft: PostDraft) -> Result<Post> {
        let _span = tracing::debug_span!("posts_create", user_id = %author.id).entered();

        let post = draft.into_post(author);
        self.store
            .insert(Collection::Posts, &post)
            .inspect(|created| tracing::debug!(post_id = %created.id, "post created"))
            .inspect_err(|e| tracing::warn!(error = %e, "error creating post"))
    }

    /// Applies a partial update. `updatedAt` is always refreshed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or the store error.
    pub fn update_post(&self, id: &Id, patch: PostPatch) -> Result<Post> {
        let _span = tracing::debug_span!("posts_update", %id).entered();

        let patch = PostPatch {
            updated_at: crate::domain::time::now(),
            ..patch
        };
        self.store
            .update(Collection::Posts, id, &patch)
            .inspect_err(|e| tracing::warn!(error = %e, "error updating post"))
    }

    /// Removes a post.
    ///
    /// Likes and bookmarks pointing at it are left in place.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or the store error.
    pub fn delete_post(&self, id: &Id) -> Result<()> {
        let _span = tracing::debug_span!("posts_delete", %id).entered();

        self.store
            .delete(Collection::Posts, id)
            .inspect(|_| tracing::debug!("post deleted"))
            .inspect_err(|e| tracing::warn!(error = %e, "error deleting post"))
    }
}
