//! Storage layer for the persisted login session.
//!
//! # Modules
//!
//! - `backend`: [`SessionStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::SessionStore;
pub use json::JsonSessionStore;
pub use memory::MemorySessionStore;
