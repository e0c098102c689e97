//! Header bar: title, mode tabs and the data health badge

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use sdash_app::view::HealthBadge;
use sdash_core::Mode;

use crate::theme::{palette, styles};

/// Main header showing the app title, the four mode tabs and the health badge
pub struct ModeHeader<'a> {
    active: Mode,
    health: &'a HealthBadge,
    user: Option<&'a str>,
}

impl<'a> ModeHeader<'a> {
    pub fn new(active: Mode, health: &'a HealthBadge) -> Self {
        Self {
            active,
            health,
            user: None,
        }
    }

    /// Show the signed-in user next to the badge
    pub fn with_user(mut self, user: Option<&'a str>) -> Self {
        self.user = user;
        self
    }

    fn tabs(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "SDFBS ",
            styles::accent_bold(self.active),
        )];
        for (i, mode) in Mode::ALL.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, mode.title());
            let style = if *mode == self.active {
                styles::selected_highlight(*mode)
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(label, style));
        }
        Line::from(spans)
    }

    fn badge(&self) -> Line<'static> {
        let (icon, label, style) = styles::health_indicator(self.health);
        let mut spans = Vec::new();
        if let Some(user) = self.user {
            spans.push(Span::styled(format!("{user}  "), styles::text_secondary()));
        }
        spans.push(Span::styled(format!("{icon} {label}"), style));
        Line::from(spans)
    }
}

impl Widget for ModeHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block =
            styles::glass_block(false, self.active).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [left, right] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(36)]).areas(inner);
        Paragraph::new(self.tabs()).render(left, buf);
        Paragraph::new(self.badge())
            .right_aligned()
            .render(right, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_shows_all_modes() {
        let mut term = TestTerminal::with_size(100, 3);
        let health = HealthBadge::Loading;
        term.render_widget(ModeHeader::new(Mode::Simple, &health), term.area());

        for title in ["Simple", "Distributed", "Production", "Secure"] {
            assert!(term.buffer_contains(title), "missing {title}");
        }
        assert!(term.buffer_contains("loading"));
    }

    #[test]
    fn test_header_flags_placeholder() {
        let mut term = TestTerminal::with_size(100, 3);
        let health = HealthBadge::Degraded {
            reason: "down".into(),
            placeholder: true,
        };
        term.render_widget(ModeHeader::new(Mode::Distributed, &health), term.area());
        assert!(term.buffer_contains("placeholder"));
    }
}
