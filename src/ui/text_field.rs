//! Single-line input field rendering shared by the forms and the chat box.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::text_input::TextInput;

use super::styles;

/// Renders a bordered field. The terminal cursor is placed only in the
/// focused field.
pub fn render_text_field(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    input: &TextInput,
    placeholder: Option<&str>,
    focused: bool,
) {
    let border_style = if focused {
        styles::focused_border_style()
    } else {
        styles::unfocused_border_style()
    };

    let paragraph = Paragraph::new(field_line(input, placeholder, focused)).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    if focused {
        let inner_width = area.width.saturating_sub(2);
        let offset = cursor_offset(input).min(usize::from(inner_width.saturating_sub(1)));
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
        frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
    }
}

fn field_line(input: &TextInput, placeholder: Option<&str>, focused: bool) -> Line<'static> {
    match placeholder {
        Some(placeholder) if !focused && input.text().is_empty() => Line::from(Span::styled(
            placeholder.to_owned(),
            styles::placeholder_style(),
        )),
        _ => Line::from(Span::styled(
            input.display_text(),
            styles::input_text_style(),
        )),
    }
}

/// Display columns between the start of the field and the cursor.
fn cursor_offset(input: &TextInput) -> usize {
    let shown = input.display_text();
    let before: String = shown.chars().take(input.cursor()).collect();
    before.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn placeholder_only_when_unfocused_and_empty() {
        let input = TextInput::default();

        assert_eq!(
            line_text(&field_line(&input, Some("Type a message..."), false)),
            "Type a message..."
        );
        assert_eq!(line_text(&field_line(&input, Some("Type a message..."), true)), "");
    }

    #[test]
    fn masked_field_never_shows_its_text() {
        let mut input = TextInput::masked();
        for ch in "hunter2".chars() {
            input.insert_char(ch);
        }

        let text = line_text(&field_line(&input, None, true));

        assert!(!text.contains("hunter2"));
        assert_eq!(text.chars().count(), 7);
    }

    #[test]
    fn cursor_offset_counts_display_columns() {
        let mut input = TextInput::default();
        for ch in "a你b".chars() {
            input.insert_char(ch);
        }
        input.move_left();

        assert_eq!(cursor_offset(&input), 3);
    }
}
