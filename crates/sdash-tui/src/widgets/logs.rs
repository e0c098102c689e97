//! Replication log stream

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use sdash_app::view::LogLine;
use sdash_core::Mode;

use crate::theme::styles;

pub struct ReplicationLog<'a> {
    lines: &'a [LogLine],
}

impl<'a> ReplicationLog<'a> {
    pub fn new(lines: &'a [LogLine]) -> Self {
        Self { lines }
    }
}

impl Widget for ReplicationLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Replication Log", false, Mode::Production);
        let lines: Vec<Line> = self
            .lines
            .iter()
            .map(|log| {
                Line::from(vec![
                    Span::styled(log.timestamp.clone(), styles::text_muted()),
                    Span::raw(" | "),
                    Span::styled(log.message.clone(), styles::log_category(&log.category)),
                ])
            })
            .collect();
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
