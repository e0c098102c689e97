//! Secure-namespace authentication payloads and client-side validation

use serde::{Deserialize, Serialize};

use sdash_core::prelude::*;
use sdash_core::User;

/// Successful `/secure/login`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: User,
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LoginResponse {
    pub(crate) fn into_outcome(self) -> Result<LoginOutcome> {
        match (self.success, self.user) {
            (true, Some(user)) => Ok(LoginOutcome {
                user,
                token: self.token,
            }),
            _ => Err(Error::server(
                200,
                self.error
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reject a login attempt with an empty field.
pub fn validate_login(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(Error::validation("Please fill in all fields"));
    }
    Ok(())
}

/// Reject a registration with an empty field or mismatched passwords.
pub fn validate_registration(username: &str, password: &str, confirm: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(Error::validation("Please fill in all fields"));
    }
    if password != confirm {
        return Err(Error::validation("Passwords do not match"));
    }
    Ok(())
}
