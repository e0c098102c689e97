//! sdash-tui - Terminal UI for the SDFBS dashboard
//!
//! This crate is the view binder: it creates an Engine from sdash-app, polls
//! crossterm for input and commits the renderer's fragments to the terminal
//! with ratatui widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
