//! Notification bar showing the most recent notice

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use sdash_app::{NoticeLevel, Notices};

use crate::theme::styles;

pub struct NoticeBar<'a> {
    notices: &'a Notices,
}

impl<'a> NoticeBar<'a> {
    pub fn new(notices: &'a Notices) -> Self {
        Self { notices }
    }
}

impl Widget for NoticeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(notice) = self.notices.latest() else {
            return;
        };
        let icon = match notice.level {
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Success => "✓",
            NoticeLevel::Error => "✗",
        };
        let mut spans = vec![Span::styled(
            format!(" {icon} {}", notice.message),
            styles::notice(notice.level),
        )];
        let older = self.notices.len() - 1;
        if older > 0 {
            spans.push(Span::styled(format!("  (+{older})"), styles::text_muted()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_latest_notice_shown() {
        let mut notices = Notices::default();
        notices.info("first");
        notices.success("Switched to Production Mode");

        let mut term = TestTerminal::with_size(60, 1);
        term.render_widget(NoticeBar::new(&notices), term.area());
        assert!(term.buffer_contains("Switched to Production Mode"));
        assert!(term.buffer_contains("(+1)"));
    }
}
