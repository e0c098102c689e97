//! Secure-mode login, registration and logout

use sdash_api::{validate_login, validate_registration, LoginOutcome};
use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::state::{AppState, AuthView};

use super::mode::{request_reload, Trigger};
use super::{UpdateAction, UpdateResult};

/// Submit whichever form is showing
pub(crate) fn submit(state: &mut AppState) -> UpdateResult {
    if state.auth.submitting {
        return UpdateResult::none();
    }
    match state.auth.view {
        AuthView::Login => submit_login(state),
        AuthView::Register => submit_register(state),
    }
}

fn submit_login(state: &mut AppState) -> UpdateResult {
    let form = &state.auth;
    if let Err(e) = validate_login(&form.username, &form.password) {
        state.notices.error(e.summary());
        return UpdateResult::none();
    }

    let username = form.username.trim().to_string();
    let password = form.password.clone();
    state.auth.submitting = true;
    info!("Logging in as {}", username);

    UpdateResult::action(UpdateAction::Login { username, password })
}

fn submit_register(state: &mut AppState) -> UpdateResult {
    let form = &state.auth;
    if let Err(e) = validate_registration(&form.username, &form.password, &form.confirm) {
        state.notices.error(e.summary());
        return UpdateResult::none();
    }

    let action = UpdateAction::Register {
        username: form.username.trim().to_string(),
        password: form.password.clone(),
        is_admin: form.is_admin,
    };
    state.auth.submitting = true;
    UpdateResult::action(action)
}

pub(crate) fn handle_login_succeeded(state: &mut AppState, outcome: LoginOutcome) -> UpdateResult {
    info!(
        "Logged in as {} (admin: {})",
        outcome.user.username, outcome.user.is_admin
    );
    state.session.sign_in(outcome.user, outcome.token);
    state.auth.reset();
    state.notices.success("Login successful");

    if state.mode == Mode::Secure {
        request_reload(state, Mode::Secure, Trigger::User)
    } else {
        UpdateResult::none()
    }
}

pub(crate) fn handle_login_failed(
    state: &mut AppState,
    status: Option<u16>,
    message: String,
) -> UpdateResult {
    state.auth.submitting = false;
    state.auth.clear_secrets();
    match status {
        Some(status) => {
            warn!("Login rejected ({}): {}", status, message);
            state.notices.error("Invalid credentials");
        }
        None => {
            warn!("Login failed: {}", message);
            state.notices.error(format!("Login failed: {message}"));
        }
    }
    UpdateResult::none()
}

pub(crate) fn handle_register_succeeded(state: &mut AppState, message: String) -> UpdateResult {
    info!("Registration succeeded: {}", message);
    state.auth.submitting = false;
    state.auth.is_admin = false;
    if state.auth.view == AuthView::Register {
        state.auth.toggle_view();
    }
    state
        .notices
        .success("Registration successful! Please login.");
    UpdateResult::none()
}

pub(crate) fn handle_register_failed(state: &mut AppState, message: String) -> UpdateResult {
    warn!("Registration failed: {}", message);
    state.auth.submitting = false;
    state.notices.error(format!("Registration failed: {message}"));
    UpdateResult::none()
}

pub(crate) fn logout(state: &mut AppState) -> UpdateResult {
    if !state.session.is_authenticated() {
        return UpdateResult::none();
    }
    info!("Logging out {}", state.session.username().unwrap_or("?"));
    state.session.clear();
    state.clear_mode(Mode::Secure);
    state.auth.reset();
    if state.mode == Mode::Secure {
        state.selected = 0;
    }
    state.notices.info("Logged out");
    UpdateResult::none()
}
