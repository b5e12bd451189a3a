//! Services backing the UI
//!
//! - Site content loading and validation
//! - Asset path resolution

pub mod content;

pub use content::{load_site, resolve_asset};
