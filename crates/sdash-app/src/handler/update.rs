//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::state::AppState;

use super::{auth, files, keys::handle_key, mode, upload, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            state.notices.expire(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Mode Controller
        // ─────────────────────────────────────────────────────────
        Message::SwitchMode(target) => mode::switch_mode(state, target),
        Message::NextMode => {
            let target = state.mode.next();
            mode::switch_mode(state, target)
        }
        Message::PrevMode => {
            let target = state.mode.prev();
            mode::switch_mode(state, target)
        }
        Message::ReloadMode => {
            let active = state.mode;
            mode::request_reload(state, active, mode::Trigger::User)
        }
        Message::RefreshTick => {
            let active = state.mode;
            mode::request_reload(state, active, mode::Trigger::Timer)
        }
        Message::ModeDataLoaded { ticket, payload } => mode::handle_loaded(state, ticket, *payload),
        Message::ModeDataFailed { ticket, error } => mode::handle_failed(state, ticket, error),

        // ─────────────────────────────────────────────────────────
        // File List
        // ─────────────────────────────────────────────────────────
        Message::SelectNext => {
            state.select_next();
            UpdateResult::none()
        }
        Message::SelectPrev => {
            state.select_prev();
            UpdateResult::none()
        }
        Message::DownloadSelected => files::download_selected(state),
        Message::DownloadFinished {
            filename,
            url,
            result,
        } => files::handle_download_finished(state, filename, url, result),
        Message::DeleteSelected => files::delete_selected(state),
        Message::DeleteFinished { result } => files::handle_delete_finished(state, result),
        Message::Redistribute => files::redistribute(state),
        Message::RedistributeFinished { result } => {
            files::handle_redistribute_finished(state, result)
        }

        // ─────────────────────────────────────────────────────────
        // Upload Coordinator
        // ─────────────────────────────────────────────────────────
        Message::OpenUploadPrompt => upload::open_prompt(state),
        Message::CancelUploadPrompt => upload::cancel_prompt(state),
        Message::UploadInput(c) => {
            state.upload.input.push(c);
            UpdateResult::none()
        }
        Message::UploadBackspace => {
            state.upload.input.pop();
            UpdateResult::none()
        }
        Message::SubmitUpload => upload::submit_prompt(state),
        Message::StartUpload { files } => upload::start_batch(state, files),
        Message::UploadBatchStarted {
            batch_id,
            mode,
            total,
        } => upload::handle_batch_started(state, batch_id, mode, total),
        Message::UploadFileStarted {
            batch_id,
            index,
            filename,
        } => upload::handle_file_started(state, batch_id, index, filename),
        Message::UploadFileFinished {
            batch_id,
            index,
            total,
            filename,
            error,
        } => upload::handle_file_finished(state, batch_id, index, total, filename, error),
        Message::UploadBatchFinished { batch_id, mode } => {
            upload::handle_batch_finished(state, batch_id, mode)
        }
        Message::UploadRejected { batch_id, error } => {
            upload::handle_batch_rejected(state, batch_id, error)
        }

        // ─────────────────────────────────────────────────────────
        // Auth Flow
        // ─────────────────────────────────────────────────────────
        Message::AuthInput(c) => {
            state.auth.input_char(c);
            UpdateResult::none()
        }
        Message::AuthBackspace => {
            state.auth.backspace();
            UpdateResult::none()
        }
        Message::AuthFocusNext => {
            state.auth.focus_next();
            UpdateResult::none()
        }
        Message::AuthFocusPrev => {
            state.auth.focus_prev();
            UpdateResult::none()
        }
        Message::ToggleAuthForm => {
            state.auth.toggle_view();
            UpdateResult::none()
        }
        Message::SubmitAuth => auth::submit(state),
        Message::LoginSucceeded(outcome) => auth::handle_login_succeeded(state, outcome),
        Message::LoginFailed { status, message } => {
            auth::handle_login_failed(state, status, message)
        }
        Message::RegisterSucceeded(message) => auth::handle_register_succeeded(state, message),
        Message::RegisterFailed(message) => auth::handle_register_failed(state, message),
        Message::Logout => auth::logout(state),
    }
}
