//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `mode`: Mode switching, reload requests and load results
//! - `auth`: Secure-mode login/register/logout
//! - `upload`: Upload prompt and batch progress
//! - `files`: Download, delete and redistribute

pub(crate) mod auth;
pub(crate) mod files;
pub(crate) mod keys;
pub(crate) mod mode;
pub(crate) mod update;
pub(crate) mod upload;


use sdash_core::Mode;

use crate::message::Message;
use crate::state::LoadTicket;
use crate::upload::UploadJob;

pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Fetch one mode's data group; answers with `ModeDataLoaded`/`ModeDataFailed`
    LoadMode {
        ticket: LoadTicket,
        token: Option<String>,
        /// Also fetch `/health` (secure administrators)
        include_health: bool,
    },

    Login {
        username: String,
        password: String,
    },

    Register {
        username: String,
        password: String,
        is_admin: bool,
    },

    /// Hand a batch to the upload worker
    EnqueueUpload(UploadJob),

    Download {
        mode: Mode,
        file_id: String,
        filename: String,
        token: Option<String>,
    },

    DeleteFile {
        file_id: String,
        token: Option<String>,
    },

    Redistribute,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
