//! Storage node cards

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Widget},
};

use sdash_app::view::NodeCard;
use sdash_core::Mode;

use crate::theme::styles;

pub struct NodeList<'a> {
    cards: &'a [NodeCard],
    mode: Mode,
}

impl<'a> NodeList<'a> {
    pub fn new(cards: &'a [NodeCard], mode: Mode) -> Self {
        Self { cards, mode }
    }
}

fn card_item(card: &NodeCard) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(vec![
            Span::styled("● ", styles::status_class(card.class)),
            Span::styled(card.title.clone(), styles::text_primary()),
        ]),
        Line::from(vec![
            Span::styled("  Status: ", styles::text_muted()),
            Span::styled(card.status.clone(), styles::status_class(card.class)),
        ]),
        Line::from(Span::styled(
            format!("  Files: {} | Storage: {}", card.files, card.storage),
            styles::text_secondary(),
        )),
        Line::from(Span::styled(
            format!("  Last Heartbeat: {}", card.heartbeat),
            styles::text_muted(),
        )),
    ])
}

impl Widget for NodeList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Nodes", false, self.mode);
        if self.cards.is_empty() {
            Paragraph::new(Span::styled("No nodes reported", styles::text_muted()))
                .block(block)
                .render(area, buf);
            return;
        }
        List::new(self.cards.iter().map(card_item))
            .block(block)
            .render(area, buf);
    }
}
