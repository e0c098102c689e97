//! Semantic style builders

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use sdash_app::view::{HealthBadge, StatusClass};
use sdash_app::NoticeLevel;
use sdash_core::Mode;

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Accent styles ---
pub fn accent(mode: Mode) -> Style {
    Style::default().fg(palette::mode_accent(mode))
}

pub fn accent_bold(mode: Mode) -> Style {
    accent(mode).add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn status_class(class: StatusClass) -> Style {
    match class {
        StatusClass::Healthy => status_green(),
        StatusClass::Unhealthy => status_red(),
    }
}

pub fn notice(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(palette::STATUS_BLUE),
        NoticeLevel::Success => status_green(),
        NoticeLevel::Error => status_red(),
    }
}

/// Log line color by category
pub fn log_category(category: &str) -> Style {
    match category {
        "success" => status_green(),
        "error" => status_red(),
        "warning" => status_yellow(),
        "replication" => Style::default().fg(palette::STATUS_BLUE),
        _ => text_secondary(),
    }
}

/// Icon, label and style for the data health badge
pub fn health_indicator(badge: &HealthBadge) -> (&'static str, String, Style) {
    match badge {
        HealthBadge::Loading => ("◐", "loading".to_string(), status_yellow()),
        HealthBadge::Live { updated } => ("●", format!("live {updated}"), status_green()),
        HealthBadge::Degraded {
            placeholder: true, ..
        } => ("▲", "offline (placeholder data)".to_string(), status_red()),
        HealthBadge::Degraded { .. } => ("▲", "offline".to_string(), status_red()),
    }
}

pub fn selected_highlight(mode: Mode) -> Style {
    Style::default()
        .bg(palette::SELECTED_BG)
        .fg(palette::mode_accent(mode))
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool, mode: Mode) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            accent(mode)
        } else {
            Style::default().fg(palette::BORDER_DIM)
        })
}

/// Glass block with a title
pub fn titled_block(title: &str, focused: bool, mode: Mode) -> Block<'static> {
    glass_block(focused, mode).title(format!(" {title} "))
}
