//! Color palette

use ratatui::style::Color;
use sdash_core::Mode;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Selection ---
pub const SELECTED_BG: Color = Color::Rgb(40, 40, 50);

/// Accent color of a mode's theme
pub fn mode_accent(mode: Mode) -> Color {
    let (r, g, b) = mode.accent_rgb();
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_accent_is_cyan() {
        assert_eq!(mode_accent(Mode::Secure), Color::Rgb(0, 255, 255));
    }
}
