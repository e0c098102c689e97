//! SDFBS Dashboard Library
//!
//! Terminal dashboard for the SDFBS file-storage backend. The TUI lives in
//! `sdash-tui`; this crate adds the headless JSON frontend.

pub mod headless;

pub use headless::{run_headless, snapshot, Snapshot};
pub use sdash_tui::run;
