//! File list panel

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use sdash_app::view::{FileItem, FileListView};
use sdash_core::Mode;

use crate::theme::styles;

pub struct FileList<'a> {
    view: &'a FileListView,
    selected: usize,
    mode: Mode,
    title: &'a str,
}

impl<'a> FileList<'a> {
    pub fn new(view: &'a FileListView, selected: usize, mode: Mode) -> Self {
        Self {
            view,
            selected,
            mode,
            title: "Files",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

fn file_item(file: &FileItem) -> ListItem<'static> {
    let mut details = format!(
        "Size: {} | Node: {} | Uploaded: {}",
        file.size, file.node, file.uploaded
    );
    if let Some(owner) = &file.owner {
        details.push_str(&format!(" | Owner: {owner}"));
    }

    let mut lines = vec![
        Line::from(Span::styled(file.filename.clone(), styles::text_primary())),
        Line::from(Span::styled(details, styles::text_muted())),
    ];
    if let Some(ft) = &file.fault_tolerance {
        lines.push(Line::from(Span::styled(
            format!("Fault tolerance: {ft}"),
            styles::text_secondary(),
        )));
    }
    ListItem::new(lines)
}

impl Widget for FileList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block(self.title, true, self.mode);

        match self.view {
            FileListView::Error(message) => {
                Paragraph::new(Span::styled(format!("✗ {message}"), styles::status_red()))
                    .wrap(Wrap { trim: true })
                    .block(block)
                    .render(area, buf);
            }
            FileListView::Items(items) if items.is_empty() => {
                Paragraph::new(Span::styled("No files yet", styles::text_muted()))
                    .block(block)
                    .render(area, buf);
            }
            FileListView::Items(items) => {
                let list = List::new(items.iter().map(file_item))
                    .block(block)
                    .highlight_style(styles::selected_highlight(self.mode))
                    .highlight_symbol("▶ ");
                let mut state = ListState::default().with_selected(Some(self.selected));
                StatefulWidget::render(list, area, buf, &mut state);
            }
        }
    }
}
