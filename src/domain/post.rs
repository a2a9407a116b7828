//! Posts and the inputs that create or change them.

use crate::domain::id::Id;
use crate::domain::time;
use crate::domain::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A photo post as stored in the `posts` collection.
///
/// `username` is copied from the author at creation time and is not kept in
/// sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Id,
    pub user_id: Id,
    pub username: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(with = "time::wire")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "time::wire")]
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Returns `true` if `user` authored this post.
    #[must_use]
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }
}

/// The user-editable fields of a post, as entered in the add/edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl PostDraft {
    /// Stamps the draft with a fresh id, the author, and creation times.
    #[must_use]
    pub fn into_post(self, author: &User) -> Post {
        let now = time::now();
        Post {
            id: Id::generate(),
            user_id: author.id.clone(),
            username: author.username.clone(),
            title: self.title,
            description: self.description,
            image: self.image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            image: post.image.clone(),
        }
    }
}

/// Partial update sent with `PATCH /posts/{id}`.
///
/// Fields left `None` are omitted from the body and keep their stored value.
/// `updated_at` is always sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(with = "time::wire")]
    pub updated_at: DateTime<Utc>,
}

impl PostPatch {
    /// An empty patch that only refreshes `updatedAt`.
    #[must_use]
    pub fn touch() -> Self {
        Self {
            title: None,
            description: None,
            image: None,
            updated_at: time::now(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl From<PostDraft> for PostPatch {
    fn from(draft: PostDraft) -> Self {
        Self::touch()
            .title(draft.title)
            .description(draft.description)
            .image(draft.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_omits_unset_fields() {
        let patch = PostPatch::touch().title("New title");
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["title"], "New title");
        assert!(json.get("description").is_none());
        assert!(json.get("image").is_none());
        assert!(json["updatedAt"].is_string());
    }

    #[test]
    fn reads_original_client_records() {
        let json = r#"{
            "id": 1712345678901,
            "userId": 1712345000000,
            "username": "ana",
            "title": "Sunset Beach",
            "description": "Golden hour at the shore",
            "image": "https://example.com/sunset.jpg",
            "createdAt": "2024-04-05T19:34:38.901Z",
            "updatedAt": "2024-04-05T19:34:38.901Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id.as_str(), "1712345678901");
        assert_eq!(post.user_id.as_str(), "1712345000000");
    }
}
