//! Likes and bookmarks: user-to-post join records.
//!
//! Both relationships share one implementation, [`RelationService`], keyed by a
//! [`RelationKind`] marker. A join record's id is derived from its
//! `(postId, userId)` pair (see [`Id::for_join`]), which turns toggling into
//! keyed operations the store settles on its own:
//!
//! - adding inserts under the derived id; a second add hits `Conflict` and
//!   returns the record already there, so a pair never gets two records;
//! - removing deletes the derived id; `NotFound` means already absent.
//!
//! Records written by older clients carry arbitrary ids. Removal also sweeps
//! those, found by querying the pair.

use crate::domain::error::{Result, SnapshareError};
use crate::domain::{time, Id, JoinRecord};
use crate::remote::{Collection, Query, RemoteStore, RemoteStoreExt};
use std::marker::PhantomData;
use std::sync::Arc;

/// Names the collection a relationship lives in.
pub trait RelationKind {
    const COLLECTION: Collection;
}

/// Marker for the `likes` collection.
#[derive(Debug, Clone, Copy)]
pub enum LikeKind {}

/// Marker for the `bookmarks` collection.
#[derive(Debug, Clone, Copy)]
pub enum BookmarkKind {}

impl RelationKind for LikeKind {
    const COLLECTION: Collection = Collection::Likes;
}

impl RelationKind for BookmarkKind {
    const COLLECTION: Collection = Collection::Bookmarks;
}

/// Toggles and queries one kind of user-to-post relationship.
pub struct RelationService<K> {
    store: Arc<dyn RemoteStore>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for RelationService<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            kind: PhantomData,
        }
    }
}

/// Likes of posts.
pub type LikesService = RelationService<LikeKind>;

/// Bookmarked posts.
pub type BookmarksService = RelationService<BookmarkKind>;

impl<K: RelationKind> RelationService<K> {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            kind: PhantomData,
        }
    }

    /// Records matching `query`, or empty on failure.
    fn list_or_empty(&self, query: &Query) -> Vec<JoinRecord> {
        self.store
            .fetch_all(K::COLLECTION, query)
            .unwrap_or_else(|e| {
                tracing::warn!(collection = %K::COLLECTION, error = %e, "error fetching join records");
                Vec::new()
            })
    }

    /// Every record pointing at `post_id`. Empty on failure.
    #[must_use]
    pub fn for_post(&self, post_id: &Id) -> Vec<JoinRecord> {
        self.list_or_empty(&Query::new().eq("postId", post_id))
    }

    /// Every record owned by `user_id`. Empty on failure.
    #[must_use]
    pub fn for_user(&self, user_id: &Id) -> Vec<JoinRecord> {
        self.list_or_empty(&Query::new().eq("userId", user_id))
    }

    /// Whether the pair is present. `false` on failure.
    #[must_use]
    pub fn exists(&self, post_id: &Id, user_id: &Id) -> bool {
        let _span = tracing::debug_span!("relation_exists", collection = %K::COLLECTION, %post_id, %user_id).entered();
        !self.list_or_empty(&pair_query(post_id, user_id)).is_empty()
    }

    /// Makes the pair present. Adding a present pair returns its record.
    ///
    /// # Errors
    ///
    /// Returns the store error if the insert fails for a reason other than the
    /// record already existing.
    pub fn add(&self, post_id: &Id, user_id: &Id) -> Result<JoinRecord> {
        let _span = tracing::debug_span!("relation_add", collection = %K::COLLECTION, %post_id, %user_id).entered();

        let record = JoinRecord {
            id: Id::for_join(K::COLLECTION.as_str(), post_id, user_id),
            post_id: post_id.clone(),
            user_id: user_id.clone(),
            created_at: time::now(),
        };

        match self.store.insert(K::COLLECTION, &record) {
            Ok(created) => {
                tracing::debug!(id = %created.id, "join record created");
                Ok(created)
            }
            Err(SnapshareError::Conflict(_)) => {
                tracing::debug!(id = %record.id, "already present");
                self.store.fetch_one(K::COLLECTION, &record.id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error adding join record");
                Err(e)
            }
        }
    }

    /// Makes the pair absent. Removing an absent pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the store error if a delete fails. A failed lookup of legacy
    /// records is logged and ignored once the keyed record is gone.
    pub fn remove(&self, post_id: &Id, user_id: &Id) -> Result<()> {
        let _span = tracing::debug_span!("relation_remove", collection = %K::COLLECTION, %post_id, %user_id).entered();

        let keyed = Id::for_join(K::COLLECTION.as_str(), post_id, user_id);
        ignore_missing(self.store.delete(K::COLLECTION, &keyed))?;

        let leftovers: Vec<JoinRecord> = match self.store.fetch_all(K::COLLECTION, &pair_query(post_id, user_id)) {
            Ok(leftovers) => leftovers,
            Err(e) => {
                tracing::warn!(error = %e, "legacy sweep skipped");
                return Ok(());
            }
        };
        for record in &leftovers {
            tracing::debug!(id = %record.id, "removing legacy join record");
            ignore_missing(self.store.delete(K::COLLECTION, &record.id))?;
        }
        Ok(())
    }
}

impl LikesService {
    /// All likes of a post.
    #[must_use]
    pub fn likes_for_post(&self, post_id: &Id) -> Vec<JoinRecord> {
        self.for_post(post_id)
    }

    #[must_use]
    pub fn has_user_liked(&self, post_id: &Id, user_id: &Id) -> bool {
        self.exists(post_id, user_id)
    }

    /// # Errors
    ///
    /// See [`RelationService::add`].
    pub fn like(&self, post_id: &Id, user_id: &Id) -> Result<JoinRecord> {
        self.add(post_id, user_id)
    }

    /// # Errors
    ///
    /// See [`RelationService::remove`].
    pub fn unlike(&self, post_id: &Id, user_id: &Id) -> Result<()> {
        self.remove(post_id, user_id)
    }
}

impl BookmarksService {
    /// All bookmarks a user holds.
    #[must_use]
    pub fn bookmarks_for_user(&self, user_id: &Id) -> Vec<JoinRecord> {
        self.for_user(user_id)
    }

    #[must_use]
    pub fn has_user_bookmarked(&self, post_id: &Id, user_id: &Id) -> bool {
        self.exists(post_id, user_id)
    }

    /// # Errors
    ///
    /// See [`RelationService::add`].
    pub fn bookmark(&self, post_id: &Id, user_id: &Id) -> Result<JoinRecord> {
        self.add(post_id, user_id)
    }

    /// # Errors
    ///
    /// See [`RelationService::remove`].
    pub fn remove_bookmark(&self, post_id: &Id, user_id: &Id) -> Result<()> {
        self.remove(post_id, user_id)
    }
}

fn pair_query(post_id: &Id, user_id: &Id) -> Query {
    Query::new().eq("postId", post_id).eq("userId", user_id)
}

fn ignore_missing(result: Result<()>) -> Result<()> {
    match result {
        Err(SnapshareError::NotFound(_)) => Ok(()),
        other => other,
    }
}
