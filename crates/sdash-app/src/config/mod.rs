//! Configuration file parsing for the dashboard
//!
//! Supports `<config_dir>/sdfbs-dashboard/config.toml` (or an explicit path).

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings};
pub use types::*;
