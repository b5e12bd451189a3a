//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components and document listeners emit Actions in response to events,
//! and the App processes them to update state.

use crate::model::{HomeTab, ProjectId, ProjectTab};
use std::fmt;

/// Operation on one gallery's lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryOp {
    Open(usize),
    Close,
    Next,
    Prev,
}

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Transition from splash to the portfolio
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch to Home mode on a tab
    GoHome(HomeTab),
    /// The "Projects ▾" nav control was activated
    PressProjects,
    /// Open a project on its Introduction tab
    OpenProject(ProjectId),
    /// Select a project tab
    SetProjectTab(ProjectTab),
    /// Move to the next project tab
    NextProjectTab,
    /// Move to the previous project tab
    PrevProjectTab,
    /// Close the projects dropdown
    CloseMenu,
    /// Highlight the next dropdown entry
    MenuNext,
    /// Highlight the previous dropdown entry
    MenuPrev,

    // ─────────────────────────────────────────────────────────────────────────
    // Panel
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the panel up one line
    ScrollUp,
    /// Scroll the panel down one line
    ScrollDown,
    /// Scroll the panel up one page
    PageUp,
    /// Scroll the panel down one page
    PageDown,
    /// Jump to the top of the panel
    ScrollTop,
    /// Focus the next interactive target (thumbnail or project card)
    FocusNext,
    /// Focus the previous interactive target
    FocusPrev,
    /// Activate the focused target
    ActivateFocus,

    // ─────────────────────────────────────────────────────────────────────────
    // Gallery
    // ─────────────────────────────────────────────────────────────────────────
    /// Operate the lightbox of the panel's n-th gallery
    Gallery { gallery: usize, op: GalleryOp },

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog
    OpenHelp,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::GoHome(tab) => write!(f, "GoHome({})", tab.id()),
            Action::PressProjects => write!(f, "PressProjects"),
            Action::OpenProject(id) => write!(f, "OpenProject({})", id),
            Action::SetProjectTab(tab) => write!(f, "SetProjectTab({})", tab.id()),
            Action::NextProjectTab => write!(f, "NextProjectTab"),
            Action::PrevProjectTab => write!(f, "PrevProjectTab"),
            Action::CloseMenu => write!(f, "CloseMenu"),
            Action::MenuNext => write!(f, "MenuNext"),
            Action::MenuPrev => write!(f, "MenuPrev"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::ScrollTop => write!(f, "ScrollTop"),
            Action::FocusNext => write!(f, "FocusNext"),
            Action::FocusPrev => write!(f, "FocusPrev"),
            Action::ActivateFocus => write!(f, "ActivateFocus"),
            Action::Gallery { gallery, op } => write!(f, "Gallery({}, {:?})", gallery, op),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_carry_payload() {
        assert_eq!(
            Action::OpenProject(ProjectId::new("csci5612")).to_string(),
            "OpenProject(csci5612)"
        );
        assert_eq!(
            Action::SetProjectTab(ProjectTab::DataPrepEda).to_string(),
            "SetProjectTab(dataprep_eda)"
        );
        assert_eq!(
            Action::Gallery {
                gallery: 1,
                op: GalleryOp::Open(3)
            }
            .to_string(),
            "Gallery(1, Open(3))"
        );
    }
}
