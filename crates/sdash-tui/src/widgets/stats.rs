//! Stats tiles and the admin health summary

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use sdash_app::view::{AdminPanel, StatTile};
use sdash_core::Mode;

use crate::theme::styles;

/// One bordered tile per statistic, side by side
pub struct StatsPanel<'a> {
    tiles: &'a [StatTile],
    mode: Mode,
}

impl<'a> StatsPanel<'a> {
    pub fn new(tiles: &'a [StatTile], mode: Mode) -> Self {
        Self { tiles, mode }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.tiles.is_empty() || area.height == 0 {
            return;
        }

        let columns = Layout::horizontal(
            self.tiles
                .iter()
                .map(|_| Constraint::Ratio(1, self.tiles.len() as u32)),
        )
        .split(area);

        for (tile, column) in self.tiles.iter().zip(columns.iter()) {
            let block = styles::glass_block(false, self.mode);
            let inner = block.inner(*column);
            block.render(*column, buf);

            let lines = vec![
                Line::from(Span::styled(tile.value.clone(), styles::accent_bold(self.mode)))
                    .centered(),
                Line::from(Span::styled(tile.label, styles::text_muted())).centered(),
            ];
            Paragraph::new(lines).render(inner, buf);
        }
    }
}

/// Server health for administrators
pub struct AdminSummary<'a> {
    panel: &'a AdminPanel,
}

impl<'a> AdminSummary<'a> {
    pub fn new(panel: &'a AdminPanel) -> Self {
        Self { panel }
    }
}

impl Widget for AdminSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Admin", false, Mode::Secure);
        let status_style = if self.panel.status == "healthy" {
            styles::status_green()
        } else {
            styles::status_red()
        };
        let lines = vec![
            Line::from(vec![
                Span::styled("Server: ", styles::text_muted()),
                Span::styled(self.panel.status.clone(), status_style),
            ]),
            Line::from(Span::styled(self.panel.message.clone(), styles::text_primary())),
            Line::from(vec![
                Span::styled("Modes: ", styles::text_muted()),
                Span::raw(self.panel.modes.clone()),
            ]),
        ];
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
