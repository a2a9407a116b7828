//! Domain layer: records, identifiers, errors and form rules.
//!
//! Nothing here talks to the network or the filesystem. The types mirror the
//! camelCase JSON records of the remote store.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`id`]: Record identifiers (UUID, tolerant of legacy numeric ids)
//! - [`user`], [`post`], [`relation`]: Store records
//! - [`validation`]: Client-side form validation
//! - [`time`]: Timestamp wire format

pub mod error;
pub mod id;
pub mod post;
pub mod relation;
pub mod time;
pub mod user;
pub mod validation;

pub use error::{Result, SnapshareError};
pub use id::Id;
pub use post::{Post, PostDraft, PostPatch};
pub use relation::{Bookmark, JoinRecord, Like};
pub use user::{Registration, User, DEFAULT_AVATAR};
pub use validation::{FieldErrors, SignupForm};
