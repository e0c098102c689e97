//! Application state (Model in TEA pattern)

use std::path::PathBuf;

use chrono::Local;

use sdash_core::{
    ClusterSnapshot, FileRecord, HealthReport, LogEntry, Mode, ModeStats, NodeRecord, Session,
    Timestamp,
};

use crate::config::Settings;
use crate::message::ModePayload;
use crate::notice::Notices;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Normal dashboard view
    #[default]
    Normal,
    /// Typing file paths for an upload batch
    UploadPrompt,
}

/// Identifies one issued reload of one mode.
///
/// A response is applied only if its ticket equals the mode's recorded
/// pending ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub mode: Mode,
    pub generation: u64,
}

/// Whether a mode's cached data came from the server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataHealth {
    /// Nothing loaded yet
    #[default]
    Unloaded,
    /// Last reload succeeded
    Live,
    /// Last reload failed; `placeholder` is set when synthetic data is shown
    Degraded { reason: String, placeholder: bool },
}

impl DataHealth {
    pub fn is_degraded(&self) -> bool {
        matches!(self, DataHealth::Degraded { .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            DataHealth::Degraded {
                placeholder: true,
                ..
            }
        )
    }
}

/// Cached entities for one mode. Only that mode's reload cycle writes here.
#[derive(Debug, Clone, Default)]
pub struct ModeData {
    pub files: Vec<FileRecord>,
    pub nodes: Vec<NodeRecord>,
    pub stats: Option<ModeStats>,
    pub cluster: Option<ClusterSnapshot>,
    pub logs: Vec<LogEntry>,
    /// Server health, secure mode for administrators only
    pub server_health: Option<HealthReport>,
    /// Inline message shown instead of the file list
    pub files_error: Option<String>,
    pub health: DataHealth,
    pub pending: Option<LoadTicket>,
    pub last_updated: Option<Timestamp>,
}

impl ModeData {
    /// Replace cached collections wholesale with a fresh payload
    pub fn apply(&mut self, payload: ModePayload) {
        match payload {
            ModePayload::Storage {
                files,
                nodes,
                stats,
            } => {
                self.files = files;
                self.nodes = nodes;
                self.stats = Some(ModeStats::Storage(stats));
            }
            ModePayload::Production {
                stats,
                cluster,
                logs,
            } => {
                self.stats = Some(ModeStats::Production(stats));
                self.cluster = Some(cluster);
                self.logs = logs;
            }
            ModePayload::Secure {
                stats,
                files,
                health,
            } => {
                self.stats = Some(ModeStats::Secure(stats));
                self.files = files;
                self.server_health = health;
            }
        }
        self.files_error = None;
        self.health = DataHealth::Live;
        self.last_updated = Some(Local::now());
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// Which secure-mode form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthView {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    #[default]
    Username,
    Password,
    Confirm,
    Admin,
}

/// Login/register form contents
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub view: AuthView,
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub is_admin: bool,
    pub focus: AuthField,
    /// A login or register request is in flight
    pub submitting: bool,
}

impl AuthForm {
    pub fn fields(&self) -> &'static [AuthField] {
        match self.view {
            AuthView::Login => &[AuthField::Username, AuthField::Password],
            AuthView::Register => &[
                AuthField::Username,
                AuthField::Password,
                AuthField::Confirm,
                AuthField::Admin,
            ],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(i + 1) % fields.len()];
    }

    pub fn focus_prev(&mut self) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(i + fields.len() - 1) % fields.len()];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            AuthField::Username => Some(&mut self.username),
            AuthField::Password => Some(&mut self.password),
            AuthField::Confirm => Some(&mut self.confirm),
            AuthField::Admin => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.focus == AuthField::Admin {
            if c == ' ' {
                self.is_admin = !self.is_admin;
            }
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Switch between login and register
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            AuthView::Login => AuthView::Register,
            AuthView::Register => AuthView::Login,
        };
        self.focus = AuthField::Username;
        self.clear_secrets();
    }

    pub fn clear_secrets(&mut self) {
        self.password.clear();
        self.confirm.clear();
    }

    pub fn reset(&mut self) {
        *self = AuthForm::default();
    }
}

/// One line of the upload status log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLine {
    pub filename: String,
    /// `None` on success, otherwise the failure text
    pub error: Option<String>,
}

impl UploadLine {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Progress of the batch currently handled by the upload worker
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    /// Text typed into the upload prompt
    pub input: String,
    /// Files of the most recently submitted batch
    pub selection: Vec<PathBuf>,
    /// Batch being reported on
    pub batch_id: Option<u64>,
    pub mode: Option<Mode>,
    pub lines: Vec<UploadLine>,
    pub completed: usize,
    pub total: usize,
    /// File currently being sent
    pub current: Option<String>,
    /// Batches submitted but not yet finished
    pub queued: usize,
    next_batch: u64,
}

impl UploadState {
    pub fn next_batch_id(&mut self) -> u64 {
        self.next_batch += 1;
        self.next_batch
    }

    /// Reset the status log for a batch the worker just picked up
    pub fn begin(&mut self, batch_id: u64, mode: Mode, total: usize) {
        self.batch_id = Some(batch_id);
        self.mode = Some(mode);
        self.lines.clear();
        self.completed = 0;
        self.total = total;
        self.current = None;
    }

    /// Fraction of the current batch done, `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn in_progress(&self) -> bool {
        self.queued > 0
    }
}

/// Complete application state (Model in TEA pattern)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    /// Active mode; exactly one at a time
    pub mode: Mode,
    data: [ModeData; 4],
    pub session: Session,
    pub auth: AuthForm,
    pub upload: UploadState,
    pub notices: Notices,
    /// Selected row in the active mode's file list
    pub selected: usize,
    pub settings: Settings,
    next_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Running,
            ui_mode: UiMode::Normal,
            mode: settings.behavior.start_mode,
            data: Default::default(),
            session: Session::default(),
            auth: AuthForm::default(),
            upload: UploadState::default(),
            notices: Notices::new(settings.ui.notification_ttl()),
            selected: 0,
            settings,
            next_generation: 0,
        }
    }

    pub fn data(&self, mode: Mode) -> &ModeData {
        &self.data[mode.index()]
    }

    pub fn data_mut(&mut self, mode: Mode) -> &mut ModeData {
        &mut self.data[mode.index()]
    }

    pub fn current(&self) -> &ModeData {
        self.data(self.mode)
    }

    /// Issue a fresh ticket for `mode`, superseding any pending one
    pub fn issue_ticket(&mut self, mode: Mode) -> LoadTicket {
        self.next_generation += 1;
        let ticket = LoadTicket {
            mode,
            generation: self.next_generation,
        };
        self.data_mut(mode).pending = Some(ticket);
        ticket
    }

    /// True if `ticket` is the one `ticket.mode` is waiting on
    pub fn is_current_ticket(&self, ticket: LoadTicket) -> bool {
        self.data(ticket.mode).pending == Some(ticket)
    }

    /// Drop cached secure data (logout)
    pub fn clear_mode(&mut self, mode: Mode) {
        *self.data_mut(mode) = ModeData::default();
    }

    /// Secure mode shows the login/register form instead of content
    pub fn auth_form_active(&self) -> bool {
        self.mode == Mode::Secure && !self.session.is_authenticated()
    }

    pub fn selected_file(&self) -> Option<&FileRecord> {
        self.current().files.get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.current().files.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.current().files.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Keep the selection inside the active file list
    pub fn clamp_selection(&mut self) {
        let len = self.current().files.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }
}
