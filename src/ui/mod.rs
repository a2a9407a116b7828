//! User interface layer: view models and their plain-text rendering.
//!
//! # Architecture
//!
//! ```text
//! Controller → compute_viewmodel → FeedViewModel / PostFormViewModel → render_* → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable page state
//! - [`renderer`]: Text renderers used by the CLI

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render_feed, render_form, render_notice};
pub use viewmodel::{CardView, ConfirmDialog, EmptyState, FeedViewModel, HeaderInfo, PostFormViewModel};
