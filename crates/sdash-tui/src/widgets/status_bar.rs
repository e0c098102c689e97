//! Key binding hints for the current screen

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use sdash_app::state::{AppState, UiMode};
use sdash_core::Mode;

use crate::theme::styles;

pub struct KeyHints<'a> {
    state: &'a AppState,
}

impl<'a> KeyHints<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.state.ui_mode == UiMode::UploadPrompt {
            return vec![("Enter", "upload"), ("Esc", "cancel")];
        }
        if self.state.auth_form_active() {
            return vec![
                ("Enter", "submit"),
                ("Tab", "next field"),
                ("Ctrl+R", "login/register"),
                ("F1-F4", "mode"),
                ("Esc", "back"),
            ];
        }

        let mut hints = vec![
            ("1-4", "mode"),
            ("r", "reload"),
            ("u", "upload"),
            ("d", "download"),
        ];
        match self.state.mode {
            Mode::Distributed => hints.push(("R", "redistribute")),
            Mode::Secure => {
                hints.push(("x", "delete"));
                hints.push(("o", "logout"));
            }
            _ => {}
        }
        hints.push(("q", "quit"));
        hints
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode = self.state.mode;
        let mut spans = Vec::new();
        for (key, label) in self.hints() {
            spans.push(Span::styled(format!(" {key}"), styles::accent(mode)));
            spans.push(Span::styled(format!(" {label} "), styles::text_muted()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
