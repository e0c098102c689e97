//! Upload prompt and batch progress

use std::path::PathBuf;

use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::state::{AppState, UiMode, UploadLine};
use crate::upload::UploadJob;

use super::mode::{request_reload, Trigger};
use super::{UpdateAction, UpdateResult};

pub(crate) fn open_prompt(state: &mut AppState) -> UpdateResult {
    if state.auth_form_active() {
        state.notices.error("Please login first");
        return UpdateResult::none();
    }
    state.upload.input.clear();
    state.ui_mode = UiMode::UploadPrompt;
    UpdateResult::none()
}

pub(crate) fn cancel_prompt(state: &mut AppState) -> UpdateResult {
    state.upload.input.clear();
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

pub(crate) fn submit_prompt(state: &mut AppState) -> UpdateResult {
    let files = parse_paths(&state.upload.input);
    state.upload.input.clear();
    state.ui_mode = UiMode::Normal;
    start_batch(state, files)
}

/// Split prompt text into paths (whitespace or comma separated)
pub(crate) fn parse_paths(input: &str) -> Vec<PathBuf> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Queue `files` for upload to the active mode
pub(crate) fn start_batch(state: &mut AppState, files: Vec<PathBuf>) -> UpdateResult {
    if files.is_empty() {
        state.notices.error("Please select at least one file");
        return UpdateResult::none();
    }
    if state.auth_form_active() {
        state.notices.error("Please login first");
        return UpdateResult::none();
    }

    let batch_id = state.upload.next_batch_id();
    let job = UploadJob {
        batch_id,
        mode: state.mode,
        files: files.clone(),
        token: state.session.token.clone(),
    };
    info!(
        "Queueing upload batch {} ({} files) for {}",
        batch_id,
        files.len(),
        state.mode
    );
    state.upload.selection = files;
    state.upload.queued += 1;

    UpdateResult::action(UpdateAction::EnqueueUpload(job))
}

pub(crate) fn handle_batch_started(
    state: &mut AppState,
    batch_id: u64,
    mode: Mode,
    total: usize,
) -> UpdateResult {
    state.upload.begin(batch_id, mode, total);
    UpdateResult::none()
}

pub(crate) fn handle_file_started(
    state: &mut AppState,
    batch_id: u64,
    index: usize,
    filename: String,
) -> UpdateResult {
    if state.upload.batch_id == Some(batch_id) {
        debug!("Uploading {} ({}/{})", filename, index + 1, state.upload.total);
        state.upload.current = Some(filename);
    }
    UpdateResult::none()
}

pub(crate) fn handle_file_finished(
    state: &mut AppState,
    batch_id: u64,
    index: usize,
    total: usize,
    filename: String,
    error: Option<String>,
) -> UpdateResult {
    if state.upload.batch_id != Some(batch_id) {
        return UpdateResult::none();
    }
    match &error {
        None => info!("Uploaded {}", filename),
        Some(e) => warn!("Upload of {} failed: {}", filename, e),
    }
    let upload = &mut state.upload;
    upload.lines.push(UploadLine { filename, error });
    upload.completed = index + 1;
    upload.total = total;
    upload.current = None;
    UpdateResult::none()
}

/// Batch done: clear the selection and reload the batch's mode once
pub(crate) fn handle_batch_finished(
    state: &mut AppState,
    batch_id: u64,
    mode: Mode,
) -> UpdateResult {
    let upload = &mut state.upload;
    upload.queued = upload.queued.saturating_sub(1);
    upload.current = None;
    if upload.queued == 0 {
        upload.selection.clear();
    }

    if upload.batch_id == Some(batch_id) {
        let failed = upload.lines.iter().filter(|l| !l.is_success()).count();
        let succeeded = upload.lines.len() - failed;
        if failed == 0 {
            state
                .notices
                .success(format!("Uploaded {succeeded} file(s)"));
        } else {
            state.notices.error(format!(
                "Upload finished: {succeeded} succeeded, {failed} failed"
            ));
        }
    }

    request_reload(state, mode, Trigger::User)
}

/// The worker never accepted the batch: release its slot and tell the user
pub(crate) fn handle_batch_rejected(
    state: &mut AppState,
    batch_id: u64,
    error: String,
) -> UpdateResult {
    warn!("Upload batch {} rejected: {}", batch_id, error);
    let upload = &mut state.upload;
    upload.queued = upload.queued.saturating_sub(1);
    if upload.queued == 0 {
        upload.selection.clear();
    }
    state.notices.error(format!("Upload failed: {error}"));
    UpdateResult::none()
}
