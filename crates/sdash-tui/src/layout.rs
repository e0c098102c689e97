//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, mode tabs and data health badge
    pub header: Rect,
    pub stats: Rect,
    /// Mode-specific panels
    pub body: Rect,
    /// Upload prompt, progress and status log; zero height when idle
    pub upload: Rect,
    pub notice: Rect,
    pub status: Rect,
}

const HEADER_HEIGHT: u16 = 3;
const STATS_HEIGHT: u16 = 4;
const UPLOAD_HEIGHT: u16 = 7;

/// Create the main screen layout
///
/// `show_stats` is false while the login form replaces secure content.
pub fn create(area: Rect, show_stats: bool, show_upload: bool) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(if show_stats { STATS_HEIGHT } else { 0 }),
        Constraint::Min(3),
        Constraint::Length(if show_upload { UPLOAD_HEIGHT } else { 0 }),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        stats: chunks[1],
        body: chunks[2],
        upload: chunks[3],
        notice: chunks[4],
        status: chunks[5],
    }
}

/// Centered rectangle of at most `width` x `height`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_with_stats() {
        let layout = create(Rect::new(0, 0, 80, 24), true, false);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.stats.height, 4);
        assert_eq!(layout.body.y, 7);
        assert_eq!(layout.body.height, 15); // 24 - 3 - 4 - 1 - 1
        assert_eq!(layout.upload.height, 0);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_layout_with_upload_panel() {
        let layout = create(Rect::new(0, 0, 80, 24), true, true);
        assert_eq!(layout.upload.height, 7);
        assert_eq!(layout.body.height, 8);
    }

    #[test]
    fn test_layout_without_stats() {
        let layout = create(Rect::new(0, 0, 80, 24), false, false);
        assert_eq!(layout.stats.height, 0);
        assert_eq!(layout.body.y, 3);
    }

    #[test]
    fn test_centered_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, 60, 6);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.y, 2);
    }
}
