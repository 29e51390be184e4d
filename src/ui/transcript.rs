//! Transcript rendering: one list item per chat message.

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::message::{ChatMessage, ChatRole};

use super::styles;

const INDENT: &str = "  ";

pub fn transcript_items(messages: &[ChatMessage]) -> Vec<ListItem<'static>> {
    messages.iter().map(message_item).collect()
}

fn message_item(message: &ChatMessage) -> ListItem<'static> {
    ListItem::new(message_lines(message))
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let label_style = match message.role {
        ChatRole::User => styles::user_label_style(),
        ChatRole::Bot => styles::bot_label_style(),
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("{}:", message.role.display_label()),
        label_style,
    ))];

    // Content is shown as plain text, never interpreted.
    for text_line in message.content.lines() {
        lines.push(Line::from(vec![
            Span::raw(INDENT.to_owned()),
            Span::styled(text_line.to_owned(), styles::message_text_style()),
        ]));
    }

    if message.content.is_empty() {
        lines.push(Line::from(vec![
            Span::raw(INDENT.to_owned()),
            Span::styled("[Empty message]".to_owned(), styles::placeholder_style()),
        ]));
    }

    lines.push(Line::default());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_item_per_message_in_order() {
        let items = transcript_items(&[
            ChatMessage::user("hi"),
            ChatMessage::bot("hello\nthere"),
        ]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].height(), 3);
        assert_eq!(items[1].height(), 4);
    }

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn label_precedes_indented_content() {
        let lines = message_lines(&ChatMessage::user("hello"));

        assert_eq!(texts(&lines), vec!["You:", "  hello", ""]);
    }

    #[test]
    fn markup_is_kept_verbatim() {
        let lines = message_lines(&ChatMessage::bot("<b>bold</b>"));

        assert_eq!(texts(&lines)[1], "  <b>bold</b>");
    }

    #[test]
    fn empty_content_gets_a_marker() {
        let lines = message_lines(&ChatMessage::bot(""));

        assert_eq!(texts(&lines), vec!["Bot:", "  [Empty message]", ""]);
    }
}
