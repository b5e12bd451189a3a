//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod image;
pub mod layout;
pub mod lightbox;
pub mod markup;
pub mod panel;
pub mod quit_dialog;
pub mod shell;
pub mod splash;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_shell_layout, centered_popup};
pub use panel::PanelView;
pub use quit_dialog::QuitDialog;
pub use shell::{Shell, ShellRenderContext};
pub use splash::SplashComponent;
