//! Remote store abstraction.
//!
//! This module defines the [`RemoteStore`] trait over the REST resource server.
//! The trait speaks raw JSON records so that one implementation serves every
//! collection; [`RemoteStoreExt`] layers typed helpers on top.
//!
//! # Implementations
//!
//! - [`HttpStore`](crate::remote::HttpStore): json-server over HTTP
//! - [`MemoryStore`](crate::remote::MemoryStore): in-process, optionally file-backed

use crate::domain::error::{Result, SnapshareError};
use crate::domain::Id;
use crate::remote::query::Query;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The collections exposed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Users,
    Posts,
    Likes,
    Bookmarks,
}

impl Collection {
    pub const ALL: [Self; 4] = [Self::Users, Self::Posts, Self::Likes, Self::Bookmarks];

    /// URL path segment and top-level key in a `db.json` document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Likes => "likes",
            Self::Bookmarks => "bookmarks",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstraction over the REST resource server.
///
/// Implementations must map a missing record to [`SnapshareError::NotFound`] and
/// an insert whose `id` is already taken to [`SnapshareError::Conflict`]. Every
/// other failure is [`SnapshareError::Network`].
pub trait RemoteStore: Send + Sync {
    /// Lists records matching every filter in `query`, sorted if requested.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or answers unexpectedly.
    fn list(&self, collection: Collection, query: &Query) -> Result<Vec<Value>>;

    /// Fetches one record by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    fn get(&self, collection: Collection, id: &Id) -> Result<Value>;

    /// Inserts a record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the record's `id` already exists.
    fn create(&self, collection: Collection, record: &Value) -> Result<Value>;

    /// Shallow-merges `changes` into the record and returns the result.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    fn patch(&self, collection: Collection, id: &Id, changes: &Value) -> Result<Value>;

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    fn delete(&self, collection: Collection, id: &Id) -> Result<()>;
}

/// Typed convenience methods for any [`RemoteStore`].
pub trait RemoteStoreExt: RemoteStore {
    /// Lists and decodes records.
    ///
    /// # Errors
    ///
    /// Fails on store errors or when a record does not decode as `T`.
    fn fetch_all<T: DeserializeOwned>(&self, collection: Collection, query: &Query) -> Result<Vec<T>> {
        self.list(collection, query)?
            .into_iter()
            .map(|raw| decode(collection, raw))
            .collect()
    }

    /// Fetches and decodes one record.
    ///
    /// # Errors
    ///
    /// Fails on store errors or when the record does not decode as `T`.
    fn fetch_one<T: DeserializeOwned>(&self, collection: Collection, id: &Id) -> Result<T> {
        decode(collection, self.get(collection, id)?)
    }

    /// Encodes, inserts and decodes the stored record.
    ///
    /// # Errors
    ///
    /// Fails on store errors or encoding problems.
    fn insert<T: Serialize + DeserializeOwned>(&self, collection: Collection, record: &T) -> Result<T> {
        let stored = self.create(collection, &encode(record)?)?;
        decode(collection, stored)
    }

    /// Sends a partial update and decodes the merged record.
    ///
    /// # Errors
    ///
    /// Fails on store errors or encoding problems.
    fn update<P: Serialize, T: DeserializeOwned>(&self, collection: Collection, id: &Id, changes: &P) -> Result<T> {
        let merged = self.patch(collection, id, &encode(changes)?)?;
        decode(collection, merged)
    }
}

impl<S: RemoteStore + ?Sized> RemoteStoreExt for S {}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| SnapshareError::Network(format!("failed to encode record: {e}")))
}

fn decode<T: DeserializeOwned>(collection: Collection, raw: Value) -> Result<T> {
    serde_json::from_value(raw)
        .map_err(|e| SnapshareError::Network(format!("malformed {collection} record: {e}")))
}

/// String form of a scalar JSON value, used for id and filter comparison.
///
/// json-server compares query parameters as strings, so `7` and `"7"` match.
#[must_use]
pub fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
