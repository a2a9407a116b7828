//! Record identifiers.
//!
//! Records written by this crate carry UUID identifiers. Stores seeded by older
//! clients hold numeric ids (`Date.now()` style), so [`Id`] deserializes from
//! either a JSON string or a JSON number and always serializes as a string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Namespace for deterministic join-record ids.
const JOIN_NAMESPACE: Uuid = Uuid::from_u128(0x6f3b_2c1e_9a4d_4b7e_8c55_0d1f_a2e3_b4c5);

/// Identifier of a user, post, like or bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Derives the identifier of the join record linking `post_id` and `user_id`
    /// in `collection`.
    ///
    /// The same triple always yields the same id, which lets the store reject a
    /// second insert for the pair instead of the client checking first.
    ///
    /// ```
    /// use snapshare::domain::Id;
    ///
    /// let post = Id::from("7");
    /// let user = Id::from("3");
    /// assert_eq!(
    ///     Id::for_join("likes", &post, &user),
    ///     Id::for_join("likes", &post, &user),
    /// );
    /// assert_ne!(
    ///     Id::for_join("likes", &post, &user),
    ///     Id::for_join("bookmarks", &post, &user),
    /// );
    /// ```
    #[must_use]
    pub fn for_join(collection: &str, post_id: &Self, user_id: &Self) -> Self {
        let name = format!("{collection}/{}/{}", post_id.0, user_id.0);
        Self(Uuid::new_v5(&JOIN_NAMESPACE, name.as_bytes()).to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Int(n) => Self(n.to_string()),
            Raw::Float(f) => Self(f.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_read_as_strings() {
        let id: Id = serde_json::from_str("1712345678901").unwrap();
        assert_eq!(id.as_str(), "1712345678901");

        let id: Id = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, Id::from("abc"));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&Id::from("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(Id::generate(), Id::generate());
    }
}
