//! In-process remote store with json-server query semantics.
//!
//! [`MemoryStore`] keeps every collection as a JSON array, exactly like a
//! json-server `db.json` document. It backs the test suite and the CLI's
//! offline mode. When opened on a file it persists after each mutation using
//! atomic writes (write-to-temp + rename).
//!
//! # File Format
//!
//! ```json
//! {
//!   "users": [{ "id": "…", "email": "ana@example.com", "…": "…" }],
//!   "posts": [],
//!   "likes": [],
//!   "bookmarks": []
//! }
//! ```
//!
//! Top-level keys other than the four known collections are preserved.

use crate::domain::error::{Result, SnapshareError};
use crate::domain::Id;
use crate::remote::backend::{scalar_key, Collection, RemoteStore};
use crate::remote::query::{Order, Query};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

struct Inner {
    data: Map<String, Value>,
    file_path: Option<PathBuf>,
    dirty: bool,
}

impl Inner {
    fn records(&self, collection: Collection) -> Result<&[Value]> {
        match self.data.get(collection.as_str()) {
            None => Ok(&[][..]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(_) => Err(malformed(collection)),
        }
    }

    fn records_mut(&mut self, collection: Collection) -> Result<&mut Vec<Value>> {
        self.data
            .entry(collection.as_str())
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| malformed(collection))
    }

    fn position(&self, collection: Collection, id: &Id) -> Result<Option<usize>> {
        Ok(self
            .records(collection)?
            .iter()
            .position(|record| record_id(record).as_deref() == Some(id.as_str())))
    }

    /// Saves a mutation of `collection`. If the write fails the collection
    /// goes back to `previous` so memory never holds an unreported change.
    fn commit(&mut self, collection: Collection, previous: Option<Value>) -> Result<()> {
        self.dirty = true;
        let Err(e) = self.save() else {
            return Ok(());
        };
        tracing::warn!(%collection, error = %e, "write failed, rolling back");
        match previous {
            Some(records) => {
                self.data.insert(collection.as_str().to_string(), records);
            }
            None => {
                self.data.remove(collection.as_str());
            }
        }
        self.dirty = false;
        Err(e)
    }

    fn snapshot(&self, collection: Collection) -> Option<Value> {
        self.data.get(collection.as_str()).cloned()
    }

    fn save(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }
        let Some(path) = self.file_path.clone() else {
            self.dirty = false;
            return Ok(());
        };

        tracing::debug!(path = ?path, "saving store data");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| SnapshareError::Storage(format!("failed to serialize store: {e}")))?;
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &path)?;

        self.dirty = false;
        Ok(())
    }
}

/// In-memory (optionally file-backed) implementation of [`RemoteStore`].
///
/// # Examples
///
/// ```
/// use snapshare::remote::{Collection, MemoryStore, Query, RemoteStore};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// store.create(Collection::Users, &json!({"id": "1", "email": "ana@example.com"}))?;
/// let found = store.list(Collection::Users, &Query::new().eq("email", "ana@example.com"))?;
/// assert_eq!(found.len(), 1);
/// # Ok::<(), snapshare::SnapshareError>(())
/// ```
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty, purely in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::from_data(Map::new(), None)
    }

    /// Creates a store from a `db.json`-shaped document.
    ///
    /// # Errors
    ///
    /// Returns an error if `seed` is not a JSON object.
    pub fn with_seed(seed: Value) -> Result<Self> {
        match seed {
            Value::Object(data) => Ok(Self::from_data(data, None)),
            _ => Err(SnapshareError::Storage("seed must be a JSON object".to_string())),
        }
    }

    /// Opens a file-backed store, creating the file's parent directory if needed.
    ///
    /// A missing file starts empty and is written on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file exists
    /// but is not a JSON object.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening file-backed store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            Map::new()
        };

        Ok(Self::from_data(data, Some(file_path)))
    }

    fn from_data(data: Map<String, Value>, file_path: Option<PathBuf>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                data,
                file_path,
                dirty: false,
            }),
        }
    }

    fn load_from_file(path: &Path) -> Result<Map<String, Value>> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str(&contents) {
            Ok(Value::Object(data)) => Ok(data),
            Ok(_) => Err(SnapshareError::Storage("store file must hold a JSON object".to_string())),
            Err(e) => Err(SnapshareError::Storage(format!("failed to parse JSON: {e}"))),
        }
    }

    /// Snapshot of every record in a collection, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is not an array.
    pub fn records(&self, collection: Collection) -> Result<Vec<Value>> {
        Ok(self.lock()?.records(collection)?.to_vec())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| SnapshareError::Storage(format!("store lock poisoned: {e}")))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

impl RemoteStore for MemoryStore {
    fn list(&self, collection: Collection, query: &Query) -> Result<Vec<Value>> {
        let _span = tracing::debug_span!("memory_list", %collection).entered();

        let inner = self.lock()?;
        let mut found: Vec<Value> = inner
            .records(collection)?
            .iter()
            .filter(|record| matches_filters(record, query.filters()))
            .cloned()
            .collect();

        if let Some((field, order)) = query.sort_key() {
            found.sort_by(|a, b| {
                let ordering = compare_field(a.get(field), b.get(field));
                match order {
                    Order::Asc => ordering,
                    Order::Desc => ordering.reverse(),
                }
            });
        }

        tracing::debug!(count = found.len(), "listed records");
        Ok(found)
    }

    fn get(&self, collection: Collection, id: &Id) -> Result<Value> {
        let inner = self.lock()?;
        let index = inner
            .position(collection, id)?
            .ok_or_else(|| not_found(collection, id))?;
        Ok(inner.records(collection)?[index].clone())
    }

    fn create(&self, collection: Collection, record: &Value) -> Result<Value> {
        let _span = tracing::debug_span!("memory_create", %collection).entered();

        let Value::Object(fields) = record else {
            return Err(SnapshareError::Network(format!("{collection} record must be an object")));
        };

        let mut inner = self.lock()?;
        let mut stored = fields.clone();
        let id = match stored.get("id").and_then(scalar_key) {
            Some(id) => Id::from(id),
            None => {
                let id = Id::generate();
                stored.insert("id".to_string(), Value::String(id.to_string()));
                id
            }
        };

        if inner.position(collection, &id)?.is_some() {
            tracing::debug!(%id, "duplicate id rejected");
            return Err(SnapshareError::Conflict(format!("{collection}/{id} already exists")));
        }

        let stored = Value::Object(stored);
        let previous = inner.snapshot(collection);
        inner.records_mut(collection)?.push(stored.clone());
        inner.commit(collection, previous)?;

        tracing::debug!(%id, "record created");
        Ok(stored)
    }

    fn patch(&self, collection: Collection, id: &Id, changes: &Value) -> Result<Value> {
        let _span = tracing::debug_span!("memory_patch", %collection, %id).entered();

        let Value::Object(changes) = changes else {
            return Err(SnapshareError::Network("patch body must be an object".to_string()));
        };

        let mut inner = self.lock()?;
        let index = inner
            .position(collection, id)?
            .ok_or_else(|| not_found(collection, id))?;

        let previous = inner.snapshot(collection);
        let record = &mut inner.records_mut(collection)?[index];
        if let Value::Object(fields) = record {
            for (key, value) in changes {
                if key != "id" {
                    fields.insert(key.clone(), value.clone());
                }
            }
        }
        let merged = record.clone();

        inner.commit(collection, previous)?;
        Ok(merged)
    }

    fn delete(&self, collection: Collection, id: &Id) -> Result<()> {
        let _span = tracing::debug_span!("memory_delete", %collection, %id).entered();

        let mut inner = self.lock()?;
        let index = inner
            .position(collection, id)?
            .ok_or_else(|| not_found(collection, id))?;
        let previous = inner.snapshot(collection);
        inner.records_mut(collection)?.remove(index);
        inner.commit(collection, previous)
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        if let Ok(inner) = self.inner.get_mut() {
            if inner.dirty {
                tracing::debug!("saving dirty store on drop");
                if let Err(e) = inner.save() {
                    tracing::error!(error = %e, "failed to save on drop");
                }
            }
        }
    }
}

fn record_id(record: &Value) -> Option<String> {
    record.get("id").and_then(scalar_key)
}

fn matches_filters(record: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(field, wanted)| record.get(field).and_then(scalar_key).as_deref() == Some(wanted.as_str()))
}

/// Orders two field values: timestamps chronologically, numbers numerically,
/// everything else by string form. Missing values sort last.
fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (as_timestamp(a), as_timestamp(b)) {
                return x.cmp(&y);
            }
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
            scalar_key(a).cmp(&scalar_key(b))
        }
    }
}

fn as_timestamp(value: &Value) -> Option<DateTime<chrono::FixedOffset>> {
    value.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

fn not_found(collection: Collection, id: &Id) -> SnapshareError {
    SnapshareError::NotFound(format!("{collection}/{id}"))
}

fn malformed(collection: Collection) -> SnapshareError {
    SnapshareError::Storage(format!("collection {collection} is not an array"))
}
