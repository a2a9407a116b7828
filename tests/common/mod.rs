#![allow(dead_code)] // shared by several test binaries, not all use every helper
use serde_json::{json, Value};
use snapshare::domain::{Id, Registration, User};
use snapshare::remote::{Collection, MemoryStore, Query, RemoteStore};
use snapshare::storage::MemorySessionStore;
use snapshare::{Client, Services, SnapshareError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Ana owns posts 1 and 3, Ben owns post 2. Post 3 is the newest.
pub fn seed() -> Value {
    json!({
        "users": [
            {
                "id": 1,
                "username": "ana",
                "email": "ana@example.com",
                "password": "secret1",
                "avatar": "https://via.placeholder.com/150",
                "createdAt": "2024-01-01T08:00:00.000Z"
            },
            {
                "id": 2,
                "username": "ben",
                "email": "ben@example.com",
                "password": "secret2",
                "avatar": "https://via.placeholder.com/150",
                "createdAt": "2024-01-02T08:00:00.000Z"
            }
        ],
        "posts": [
            {
                "id": 1,
                "userId": 1,
                "username": "ana",
                "title": "Sunset Beach",
                "description": "Golden hour by the sea",
                "image": "https://example.com/sunset.jpg",
                "createdAt": "2024-03-01T18:00:00.000Z",
                "updatedAt": "2024-03-01T18:00:00.000Z"
            },
            {
                "id": 2,
                "userId": 2,
                "username": "ben",
                "title": "Mountain Lake",
                "description": "Still water at dawn",
                "image": "https://example.com/lake.jpg",
                "createdAt": "2024-03-02T06:00:00.000Z",
                "updatedAt": "2024-03-02T06:00:00.000Z"
            },
            {
                "id": 3,
                "userId": 1,
                "username": "ana",
                "title": "City Lights",
                "description": "Downtown after the rain",
                "image": "https://example.com/city.jpg",
                "createdAt": "2024-03-03T21:00:00.000Z",
                "updatedAt": "2024-03-03T21:00:00.000Z"
            }
        ],
        "likes": [],
        "bookmarks": []
    })
}

pub fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_seed(seed()).unwrap())
}

/// Client over the seeded store with nobody logged in.
pub fn seeded_client() -> Client {
    Client::new(seeded_store(), Arc::new(MemorySessionStore::new()))
}

/// Client over an empty store with nobody logged in.
pub fn empty_client() -> Client {
    Client::new(Arc::new(MemoryStore::new()), Arc::new(MemorySessionStore::new()))
}

pub fn services(store: Arc<MemoryStore>) -> Services {
    Services::new(store, Arc::new(MemorySessionStore::new()))
}

pub fn login(client: &mut Client, email: &str, password: &str) -> User {
    client.session.login(email, password).unwrap()
}

pub fn ana(client: &mut Client) -> User {
    login(client, "ana@example.com", "secret1")
}

pub fn ben(client: &mut Client) -> User {
    login(client, "ben@example.com", "secret2")
}

pub fn registration(username: &str, email: &str) -> Registration {
    Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
    }
}

pub fn id(raw: &str) -> Id {
    Id::from(raw)
}

/// Store that can be told to fail, standing in for an unreachable server.
///
/// Lists fail per collection; creates, patches and deletes fail together.
/// Single-record reads always go through.
pub struct FlakyStore {
    inner: Arc<MemoryStore>,
    failing_lists: Mutex<HashSet<Collection>>,
    failing_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            failing_lists: Mutex::new(HashSet::new()),
            failing_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_lists(&self, collections: &[Collection]) {
        self.failing_lists.lock().unwrap().extend(collections.iter().copied());
    }

    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.failing_lists.lock().unwrap().clear();
        self.fail_writes(false);
    }

    fn check_write(&self) -> snapshare::Result<()> {
        if self.failing_writes.load(Ordering::SeqCst) {
            Err(SnapshareError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RemoteStore for FlakyStore {
    fn list(&self, collection: Collection, query: &Query) -> snapshare::Result<Vec<Value>> {
        if self.failing_lists.lock().unwrap().contains(&collection) {
            return Err(SnapshareError::Network("connection refused".to_string()));
        }
        self.inner.list(collection, query)
    }

    fn get(&self, collection: Collection, id: &Id) -> snapshare::Result<Value> {
        self.inner.get(collection, id)
    }

    fn create(&self, collection: Collection, record: &Value) -> snapshare::Result<Value> {
        self.check_write()?;
        self.inner.create(collection, record)
    }

    fn patch(&self, collection: Collection, id: &Id, changes: &Value) -> snapshare::Result<Value> {
        self.check_write()?;
        self.inner.patch(collection, id, changes)
    }

    fn delete(&self, collection: Collection, id: &Id) -> snapshare::Result<()> {
        self.check_write()?;
        self.inner.delete(collection, id)
    }
}

/// Client over a flaky wrapper of the seeded store, plus the wrapper itself.
pub fn flaky_client() -> (Client, Arc<FlakyStore>) {
    let store = Arc::new(FlakyStore::new(seeded_store()));
    let client = Client::new(store.clone(), Arc::new(MemorySessionStore::new()));
    (client, store)
}
