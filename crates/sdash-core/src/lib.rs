//! # sdash-core - Core Domain Types
//!
//! Foundation crate for the SDFBS dashboard. Provides domain types, error
//! handling, logging setup and display formatting helpers.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Mode`] - The four API namespaces (simple, distributed, production, secure)
//! - [`FileRecord`], [`NodeRecord`] - Entities listed by every mode
//! - [`ClusterSnapshot`], [`NodeSummary`] - Production master/slave view
//! - [`LogEntry`] - Replication log line
//! - [`Session`], [`User`] - Secure-mode authentication state
//! - [`ModeStats`] - Per-mode aggregate statistics
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ### Formatting (`format`)
//! - [`format_kb()`], [`format_mb()`] - Byte unit conversion with two decimals
//! - [`format_timestamp()`] - Local timestamp rendering with a fallback label
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use sdash_core::prelude::*;
//! ```

pub mod error;
pub mod format;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all dashboard crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use format::{format_clock, format_kb, format_mb, format_mb_value, format_timestamp};
pub use types::{
    parse_timestamp, ClusterSnapshot, FaultTolerance, FileRecord, HealthReport, LogEntry, Mode,
    ModeStats, NodeRecord, NodeSummary, ProductionStats, RedistributeReport, SecureStats, Session,
    StorageStats, Timestamp, UploadReceipt, User,
};
