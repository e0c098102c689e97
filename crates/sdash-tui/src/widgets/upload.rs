//! Upload prompt, progress gauge and per-file status log

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use sdash_app::state::UploadState;
use sdash_core::Mode;

use crate::theme::styles;

pub struct UploadPanel<'a> {
    upload: &'a UploadState,
    prompt_active: bool,
    mode: Mode,
}

impl<'a> UploadPanel<'a> {
    pub fn new(upload: &'a UploadState, prompt_active: bool, mode: Mode) -> Self {
        Self {
            upload,
            prompt_active,
            mode,
        }
    }

    fn prompt_line(&self) -> Line<'static> {
        if self.prompt_active {
            Line::from(vec![
                Span::styled("Files: ", styles::accent_bold(self.mode)),
                Span::styled(self.upload.input.clone(), styles::text_primary()),
                Span::styled("█", styles::accent(self.mode)),
            ])
        } else if let Some(current) = &self.upload.current {
            Line::from(Span::styled(
                format!("Uploading {current}..."),
                styles::text_secondary(),
            ))
        } else if self.upload.queued > 1 {
            Line::from(Span::styled(
                format!("{} batches queued", self.upload.queued),
                styles::text_secondary(),
            ))
        } else {
            Line::from(Span::styled("Press u to upload files", styles::text_muted()))
        }
    }

    fn status_lines(&self) -> Vec<Line<'static>> {
        self.upload
            .lines
            .iter()
            .map(|line| match &line.error {
                None => Line::from(Span::styled(
                    format!("✓ {} uploaded successfully", line.filename),
                    styles::status_green(),
                )),
                Some(error) => Line::from(Span::styled(
                    format!("✗ {}: {}", line.filename, error),
                    styles::status_red(),
                )),
            })
            .collect()
    }
}

impl Widget for UploadPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::titled_block("Upload", self.prompt_active, self.mode);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let [prompt, gauge, log] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        Paragraph::new(self.prompt_line()).render(prompt, buf);

        if self.upload.total > 0 {
            Gauge::default()
                .gauge_style(styles::accent(self.mode))
                .ratio(self.upload.progress().clamp(0.0, 1.0))
                .label(format!("{}/{}", self.upload.completed, self.upload.total))
                .render(gauge, buf);
        }

        // Most recent outcomes when the log overflows
        let lines = self.status_lines();
        let skip = lines.len().saturating_sub(log.height as usize);
        Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()).render(log, buf);
    }
}
