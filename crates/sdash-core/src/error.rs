//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Backend/HTTP Errors
    // ─────────────────────────────────────────────────────────────
    /// The request never produced an HTTP response (connection refused,
    /// timeout, DNS failure, ...)
    #[error("Network error: {message}")]
    Transport { message: String },

    /// Non-2xx response. `message` is the server-provided error text when
    /// the body carried one.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response decoded but had the wrong shape (e.g. object where an array
    /// was expected)
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("Invalid server URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Authentication Errors
    // ─────────────────────────────────────────────────────────────
    /// Rejected client-side before any request was made
    #[error("{message}")]
    Validation { message: String },

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Unknown mode '{value}' (expected simple, distributed, production or secure)")]
    InvalidMode { value: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_mode(value: impl Into<String>) -> Self {
        Self::InvalidMode {
            value: value.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Short text suitable for a status line or notice.
    ///
    /// Server errors show only the server's own message, the way the upload
    /// status log reports `name: <error>`.
    pub fn summary(&self) -> String {
        match self {
            Error::Server { message, .. } => message.clone(),
            Error::Transport { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::Server { .. }
                | Error::MalformedResponse { .. }
                | Error::Validation { .. }
                | Error::Unauthenticated
                | Error::ChannelSend { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");

        let err = Error::server(404, "File not found");
        assert_eq!(err.to_string(), "Server error (404): File not found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_summary_uses_server_message_verbatim() {
        assert_eq!(
            Error::server(400, "No file provided").summary(),
            "No file provided"
        );
        assert_eq!(
            Error::validation("Passwords do not match").summary(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::transport("timeout").is_recoverable());
        assert!(Error::server(500, "boom").is_recoverable());
        assert!(Error::malformed("/files", "expected array").is_recoverable());
        assert!(Error::Unauthenticated.is_recoverable());
        assert!(!Error::invalid_url("::", "relative URL without a base").is_recoverable());
    }

    #[test]
    fn test_invalid_mode_lists_choices() {
        let err = Error::invalid_mode("turbo");
        assert!(err.to_string().contains("turbo"));
        assert!(err.to_string().contains("production"));
    }
}
