//! Color palette and styles.
//!
//! Charcoal background with a warm yellow accent; result colors come from
//! the band table so the TUI matches stored `color` values.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::Band;

/// Calculator theme palette.
pub struct Theme;

impl Theme {
    /// Warm yellow - primary accent
    pub const ACCENT: Color = Color::Rgb(255, 211, 102); // #FFD366

    /// Charcoal background
    pub const BG_DARK: Color = Color::Rgb(66, 66, 66); // #424242

    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);

    pub const TEXT_SECONDARY: Color = Color::Rgb(189, 189, 189); // #BDBDBD

    pub const TEXT_MUTED: Color = Color::Rgb(136, 136, 136); // #888888

    pub const BORDER: Color = Color::Rgb(117, 117, 117); // #757575

    pub const DANGER: Color = Color::Rgb(255, 18, 0); // #FF1200

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for the selected history row
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Band color as a terminal color.
    #[must_use]
    pub fn band_color(band: Band) -> Color {
        let (r, g, b) = band.rgb();
        Color::Rgb(r, g, b)
    }

    /// Foreground style for a band.
    #[must_use]
    pub fn band(band: Band) -> Style {
        Style::default().fg(Self::band_color(band))
    }
}
