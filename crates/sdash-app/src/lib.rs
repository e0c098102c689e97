//! sdash-app - Application state and orchestration for the SDFBS dashboard
//!
//! This crate implements the TEA (The Elm Architecture) pattern: `AppState`
//! is the model, `handler::update` the update function and `view` the pure
//! renderer. Side effects leave the update function as `UpdateAction`s and
//! return as `Message`s. The `Engine` ties the loop together for both the
//! TUI and headless frontends.

pub mod actions;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod notice;
pub mod process;
pub mod signals;
pub mod state;
pub mod upload;
pub mod view;

// Re-export primary types
pub use config::Settings;
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::{Message, ModePayload};
pub use notice::{Notice, NoticeLevel, Notices};
pub use state::{AppState, DataHealth, LoadTicket, UiMode};
pub use view::{mode_view, ModeView};
