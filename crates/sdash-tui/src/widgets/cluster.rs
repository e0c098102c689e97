//! Production cluster grid: one master block then one block per slave

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use sdash_app::view::{ClusterBlock, NodeRole};
use sdash_core::Mode;

use crate::theme::styles;

/// Widest a single block is drawn
const MAX_BLOCK_WIDTH: u16 = 28;

pub struct ClusterGrid<'a> {
    blocks: &'a [ClusterBlock],
}

impl<'a> ClusterGrid<'a> {
    pub fn new(blocks: &'a [ClusterBlock]) -> Self {
        Self { blocks }
    }
}

fn render_block(block: &ClusterBlock, area: Rect, buf: &mut Buffer) {
    let focused = block.role == NodeRole::Master;
    let frame = styles::titled_block(&block.title, focused, Mode::Production);
    let lines = vec![
        Line::from(format!("Files: {}", block.files)),
        Line::from(format!("Chunks: {}", block.chunks)),
        Line::from(format!("Status: {}", block.status)),
        Line::from(format!("Last Sync: {}", block.last_sync)),
        Line::from(vec![
            Span::styled("● ", styles::status_class(block.class)),
            Span::styled(block.class.as_str(), styles::status_class(block.class)),
        ]),
    ];
    Paragraph::new(lines).block(frame).render(area, buf);
}

impl Widget for ClusterGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.blocks.is_empty() {
            let block = styles::titled_block("Cluster", false, Mode::Production);
            Paragraph::new(Span::styled("No cluster data", styles::text_muted()))
                .block(block)
                .render(area, buf);
            return;
        }

        let count = self.blocks.len() as u16;
        let width = (area.width / count.max(1)).min(MAX_BLOCK_WIDTH);
        let columns =
            Layout::horizontal(self.blocks.iter().map(|_| Constraint::Length(width))).split(area);

        for (block, column) in self.blocks.iter().zip(columns.iter()) {
            if column.width > 0 {
                render_block(block, *column, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use sdash_api::test_utils::test_cluster;
    use sdash_app::view::render_cluster;

    #[test]
    fn test_master_and_slave_blocks() {
        let blocks = render_cluster(&test_cluster());
        let mut term = TestTerminal::with_size(80, 8);
        term.render_widget(ClusterGrid::new(&blocks), term.area());
        assert!(term.buffer_contains("Master Node m1"));
        assert!(term.buffer_contains("Slave Node s1"));
        assert!(term.buffer_contains("healthy"));
    }
}
