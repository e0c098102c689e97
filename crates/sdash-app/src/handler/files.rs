//! Download, delete and redistribute

use std::path::PathBuf;

use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::state::AppState;

use super::mode::{request_reload, Trigger};
use super::{UpdateAction, UpdateResult};

pub(crate) fn download_selected(state: &mut AppState) -> UpdateResult {
    let Some(file) = state.selected_file() else {
        state.notices.error("No file selected");
        return UpdateResult::none();
    };

    let notice = format!("Downloading {}...", file.filename);
    let action = UpdateAction::Download {
        mode: state.mode,
        file_id: file.file_id.clone(),
        filename: file.filename.clone(),
        token: state.session.token.clone(),
    };
    state.notices.info(notice);
    UpdateResult::action(action)
}

pub(crate) fn handle_download_finished(
    state: &mut AppState,
    filename: String,
    url: String,
    result: std::result::Result<PathBuf, String>,
) -> UpdateResult {
    match result {
        Ok(path) => {
            info!("Downloaded {} from {} to {:?}", filename, url, path);
            state
                .notices
                .success(format!("Downloaded {} to {} ({})", filename, path.display(), url));
        }
        Err(e) => {
            warn!("Download of {} failed: {}", filename, e);
            state.notices.error(format!("Download failed: {e}"));
        }
    }
    UpdateResult::none()
}

/// Delete the selected file (secure mode, logged in)
pub(crate) fn delete_selected(state: &mut AppState) -> UpdateResult {
    if state.mode != Mode::Secure || !state.session.is_authenticated() {
        return UpdateResult::none();
    }
    let Some(file) = state.selected_file() else {
        state.notices.error("No file selected");
        return UpdateResult::none();
    };

    info!("Deleting {} ({})", file.filename, file.file_id);
    UpdateResult::action(UpdateAction::DeleteFile {
        file_id: file.file_id.clone(),
        token: state.session.token.clone(),
    })
}

pub(crate) fn handle_delete_finished(
    state: &mut AppState,
    result: std::result::Result<String, String>,
) -> UpdateResult {
    match result {
        Ok(message) => {
            state.notices.success(message);
            request_reload(state, Mode::Secure, Trigger::User)
        }
        Err(e) => {
            state.notices.error(format!("Delete failed: {e}"));
            UpdateResult::none()
        }
    }
}

/// Rebalance chunks across active nodes (distributed mode)
pub(crate) fn redistribute(state: &mut AppState) -> UpdateResult {
    if state.mode != Mode::Distributed {
        return UpdateResult::none();
    }
    state.notices.info("Redistributing chunks...");
    UpdateResult::action(UpdateAction::Redistribute)
}

pub(crate) fn handle_redistribute_finished(
    state: &mut AppState,
    result: std::result::Result<String, String>,
) -> UpdateResult {
    match result {
        Ok(message) => {
            state.notices.success(message);
            request_reload(state, Mode::Distributed, Trigger::User)
        }
        Err(e) => {
            state.notices.error(format!("Redistribution failed: {e}"));
            UpdateResult::none()
        }
    }
}
