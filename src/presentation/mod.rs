//! Presentation layer rendering core state for the command line.

/// Menu rendering.
pub mod menu_view;

pub use menu_view::render_menu;
