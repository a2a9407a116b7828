//! Join records linking users to posts.

use crate::domain::id::Id;
use crate::domain::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `likes` or `bookmarks` collection.
///
/// Both collections share this shape; which relationship a record expresses is
/// decided by the collection it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRecord {
    pub id: Id,
    pub post_id: Id,
    pub user_id: Id,
    #[serde(with = "time::wire")]
    pub created_at: DateTime<Utc>,
}

/// A like of a post by a user.
pub type Like = JoinRecord;

/// A bookmark of a post by a user.
pub type Bookmark = JoinRecord;
