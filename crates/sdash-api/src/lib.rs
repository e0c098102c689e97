//! # sdash-api - Storage Backend Gateway
//!
//! Typed access to the four API namespaces of the SDFBS storage server
//! (`{server}/simple`, `/distributed`, `/production`, `/secure`).
//!
//! Depends on [`sdash_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Client
//! - [`StorageApi`] - Async operations over every endpoint (Send variant)
//! - [`HttpApi`] - `reqwest` implementation; one attempt per call, no retries
//! - [`Endpoints`] - URL construction for a server base URL
//!
//! ### Authentication
//! - [`LoginOutcome`] - User and bearer token from a successful login
//! - [`validate_login()`], [`validate_registration()`] - Client-side checks
//!   performed before any request is issued
//!
//! ### Test Support (`test-helpers` feature)
//! - `test_utils::FakeApi` - Scripted in-memory backend with a call log

pub mod auth;
pub mod client;
mod decode;
pub mod endpoints;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use auth::{validate_login, validate_registration, LoginOutcome};
pub use client::{HttpApi, LocalStorageApi, StorageApi};
pub use endpoints::Endpoints;
