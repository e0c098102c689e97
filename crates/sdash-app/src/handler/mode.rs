//! Mode switching, reload requests and load results

use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::fallback;
use crate::message::ModePayload;
use crate::state::{AppState, DataHealth, LoadTicket, UiMode};

use super::{UpdateAction, UpdateResult};

/// Who asked for a reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    /// Key press, mode switch, login or post-upload; supersedes a pending reload
    User,
    /// Refresh timer; skipped while a reload is pending
    Timer,
}

/// Make `target` the active mode and reload it. No-op when already active.
pub(crate) fn switch_mode(state: &mut AppState, target: Mode) -> UpdateResult {
    if target == state.mode {
        return UpdateResult::none();
    }

    let previous = state.mode;
    if state.data_mut(previous).pending.take().is_some() {
        debug!("Abandoning in-flight {} reload", previous);
    }

    state.mode = target;
    state.ui_mode = UiMode::Normal;
    state.selected = 0;
    info!("Switched mode {} -> {}", previous, target);
    state
        .notices
        .success(format!("Switched to {} Mode", target.title()));

    request_reload(state, target, Trigger::User)
}

/// Issue a reload of `mode` unless it cannot or need not run
pub(crate) fn request_reload(state: &mut AppState, mode: Mode, trigger: Trigger) -> UpdateResult {
    if mode == Mode::Secure && !state.session.is_authenticated() {
        debug!("Secure mode reload skipped: not logged in");
        return UpdateResult::none();
    }

    if trigger == Trigger::Timer && state.data(mode).is_loading() {
        debug!("Refresh skipped: {} reload still in flight", mode);
        return UpdateResult::none();
    }

    let ticket = state.issue_ticket(mode);
    debug!("Reloading {} (generation {})", mode, ticket.generation);

    UpdateResult::action(UpdateAction::LoadMode {
        ticket,
        token: state.session.token.clone(),
        include_health: mode == Mode::Secure && state.session.is_admin(),
    })
}

pub(crate) fn handle_loaded(
    state: &mut AppState,
    ticket: LoadTicket,
    payload: ModePayload,
) -> UpdateResult {
    if !state.is_current_ticket(ticket) {
        debug!(
            "Discarding stale {} response (generation {})",
            ticket.mode, ticket.generation
        );
        return UpdateResult::none();
    }

    let data = state.data_mut(ticket.mode);
    data.pending = None;
    data.apply(payload);

    if ticket.mode == state.mode {
        state.clamp_selection();
    }
    UpdateResult::none()
}

pub(crate) fn handle_failed(state: &mut AppState, ticket: LoadTicket, error: String) -> UpdateResult {
    if !state.is_current_ticket(ticket) {
        debug!(
            "Discarding stale {} failure (generation {}): {}",
            ticket.mode, ticket.generation, error
        );
        return UpdateResult::none();
    }

    let placeholder = state.settings.behavior.placeholder_on_failure;
    let mode = ticket.mode;
    let data = state.data_mut(mode);
    data.pending = None;
    data.files.clear();
    data.files_error = Some(format!("Error loading files: {error}"));

    if placeholder {
        warn!("Loading mock data for {} mode: {}", mode, error);
        fallback::apply_placeholder(mode, data);
    } else {
        warn!("Failed to load {} mode: {}", mode, error);
    }

    data.health = DataHealth::Degraded {
        reason: error,
        placeholder,
    };

    if mode == state.mode {
        state.clamp_selection();
    }
    UpdateResult::none()
}
