//! Remote store layer: the REST resource server behind every service.
//!
//! # Modules
//!
//! - `backend`: [`RemoteStore`] trait, [`Collection`] names, typed helpers
//! - `query`: json-server filter/sort parameters
//! - `http`: blocking HTTP implementation
//! - `memory`: in-process implementation (tests, offline mode)

pub mod backend;
pub mod http;
pub mod memory;
pub mod query;

pub use backend::{Collection, RemoteStore, RemoteStoreExt};
pub use http::HttpStore;
pub use memory::MemoryStore;
pub use query::{Order, Query};
