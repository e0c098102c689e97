//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use sdash_api::LoginOutcome;
use sdash_core::{
    ClusterSnapshot, FileRecord, HealthReport, LogEntry, Mode, NodeRecord, ProductionStats,
    SecureStats, StorageStats,
};

use crate::input_key::InputKey;
use crate::state::LoadTicket;

/// Data fetched by one mode reload
#[derive(Debug, Clone)]
pub enum ModePayload {
    /// Simple and distributed modes
    Storage {
        files: Vec<FileRecord>,
        nodes: Vec<NodeRecord>,
        stats: StorageStats,
    },
    Production {
        stats: ProductionStats,
        cluster: ClusterSnapshot,
        logs: Vec<LogEntry>,
    },
    Secure {
        stats: SecureStats,
        files: Vec<FileRecord>,
        health: Option<HealthReport>,
    },
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Periodic tick from the event loop (notice expiry)
    Tick,

    /// Quit immediately (signal handler, Ctrl+C)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Mode Controller
    // ─────────────────────────────────────────────────────────
    SwitchMode(Mode),
    NextMode,
    PrevMode,

    /// User-requested reload of the active mode
    ReloadMode,

    /// Refresh timer fired
    RefreshTick,

    ModeDataLoaded {
        ticket: LoadTicket,
        payload: Box<ModePayload>,
    },

    ModeDataFailed {
        ticket: LoadTicket,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // File List
    // ─────────────────────────────────────────────────────────
    SelectNext,
    SelectPrev,

    DownloadSelected,
    DownloadFinished {
        filename: String,
        url: String,
        result: Result<PathBuf, String>,
    },

    DeleteSelected,
    DeleteFinished {
        result: Result<String, String>,
    },

    Redistribute,
    RedistributeFinished {
        result: Result<String, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Upload Coordinator
    // ─────────────────────────────────────────────────────────
    OpenUploadPrompt,
    CancelUploadPrompt,
    UploadInput(char),
    UploadBackspace,
    SubmitUpload,

    /// Queue a batch directly (headless, tests)
    StartUpload {
        files: Vec<PathBuf>,
    },

    UploadBatchStarted {
        batch_id: u64,
        mode: Mode,
        total: usize,
    },

    UploadFileStarted {
        batch_id: u64,
        index: usize,
        filename: String,
    },

    UploadFileFinished {
        batch_id: u64,
        index: usize,
        total: usize,
        filename: String,
        /// `None` on success
        error: Option<String>,
    },

    UploadBatchFinished {
        batch_id: u64,
        mode: Mode,
    },

    /// The upload worker refused the batch; nothing was sent
    UploadRejected {
        batch_id: u64,
        error: String,
    },

    // ─────────────────────────────────────────────────────────
    // Auth Flow
    // ─────────────────────────────────────────────────────────
    AuthInput(char),
    AuthBackspace,
    AuthFocusNext,
    AuthFocusPrev,
    ToggleAuthForm,
    SubmitAuth,

    LoginSucceeded(LoginOutcome),
    LoginFailed {
        /// HTTP status when the server answered
        status: Option<u16>,
        message: String,
    },

    RegisterSucceeded(String),
    RegisterFailed(String),

    Logout,
}
