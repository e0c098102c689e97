//! Theme for the dashboard
//!
//! - `palette`: raw color constants and per-mode accents
//! - `styles`: semantic style builders

pub mod palette;
pub mod styles;
