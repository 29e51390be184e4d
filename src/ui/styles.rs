//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Panel and form styles
// =============================================================================

/// Border of the focused input field.
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn unfocused_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Panel title (bold, bright).
pub fn panel_title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn key_hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Transcript styles
// =============================================================================

pub fn user_label_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn bot_label_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

// =============================================================================
// Profile and notices
// =============================================================================

pub fn profile_label_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD)
}

pub fn notice_error_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn notice_info_style() -> Style {
    Style::default().fg(Color::Green)
}
