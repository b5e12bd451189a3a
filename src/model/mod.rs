//! Model layer - state and content types
//!
//! This module contains all state-related types:
//! - `NavigationState` - Home/Project mode, tabs and the projects dropdown
//! - `GalleryState` - Which gallery item is enlarged
//! - `Site` / `Panel` / `Block` - Static content
//! - `ModalStack` - Application overlays
//! - `AppMode` - Splash or running

pub mod content;
pub mod gallery;
pub mod modal;
pub mod navigation;
pub mod ui;

// Re-export commonly used types
pub use content::{Block, ImageRef, Panel, ProjectCard, Site};
pub use gallery::{GalleryItem, GalleryState};
pub use modal::{Modal, ModalStack};
pub use navigation::{HomeTab, Mode, NavigationState, ProjectId, ProjectTab, View};
pub use ui::AppMode;
