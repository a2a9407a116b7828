//! Service layer: domain operations translated into remote store calls.
//!
//! Each service wraps a shared [`RemoteStore`]. [`Services`] bundles them so
//! controllers can be handed one value.

pub mod auth;
pub mod posts;
pub mod relations;

pub use auth::AuthService;
pub use posts::PostsService;
pub use relations::{BookmarkKind, BookmarksService, LikeKind, LikesService, RelationKind, RelationService};

use crate::remote::RemoteStore;
use crate::storage::SessionStore;
use std::sync::Arc;

/// All services over one store.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub posts: PostsService,
    pub likes: LikesService,
    pub bookmarks: BookmarksService,
}

impl Services {
    pub fn new(store: Arc<dyn RemoteStore>, persisted: Arc<dyn SessionStore>) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&store), persisted),
            posts: PostsService::new(Arc::clone(&store)),
            likes: LikesService::new(Arc::clone(&store)),
            bookmarks: BookmarksService::new(store),
        }
    }
}
