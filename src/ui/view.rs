use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListState, Paragraph, Wrap},
    Frame,
};

use crate::domain::{
    forms::{LoginField, RegisterField},
    notice::{Notice, NoticeKind},
    profile::ProfileRecord,
    shell_state::ShellState,
    view::View,
};

use super::{styles, text_field::render_text_field, transcript::transcript_items};

const FORM_WIDTH: u16 = 50;
const FIELD_HEIGHT: u16 = 3;
const CHAT_PLACEHOLDER: &str = "Type your message...";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [header_area, content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    frame.render_widget(Paragraph::new(header_line(state)), header_area);

    match state.view() {
        View::Login => render_login(frame, content_area, state),
        View::Register => render_register(frame, content_area, state),
        View::Chat => render_chat(frame, content_area, state),
        View::Profile => render_profile(frame, content_area, state),
    }

    frame.render_widget(
        Paragraph::new(status_line(state)).style(styles::key_hint_style()),
        status_area,
    );

    if let Some(notice) = state.notice() {
        render_notice(frame, frame.area(), notice);
    }
}

fn header_line(state: &ShellState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("CareChat | {}", state.view().title()),
        styles::panel_title_style(),
    )];

    if !state.view().is_public() {
        if let Some(profile) = state.profile() {
            spans.push(Span::raw(format!("  signed in as {}", profile.username)));
        }
    }

    Line::from(spans)
}

fn render_login(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let form = state.login_form();
    let [username_area, password_area] = form_rows(area);

    render_text_field(
        frame,
        username_area,
        "Username",
        &form.username,
        None,
        form.focus() == LoginField::Username,
    );
    render_text_field(
        frame,
        password_area,
        "Password",
        &form.password,
        None,
        form.focus() == LoginField::Password,
    );
}

fn render_register(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let form = state.register_form();
    let [username_area, email_area, password_area] = form_rows(area);

    render_text_field(
        frame,
        username_area,
        "Username",
        &form.username,
        None,
        form.focus() == RegisterField::Username,
    );
    render_text_field(
        frame,
        email_area,
        "Email",
        &form.email,
        None,
        form.focus() == RegisterField::Email,
    );
    render_text_field(
        frame,
        password_area,
        "Password",
        &form.password,
        None,
        form.focus() == RegisterField::Password,
    );
}

/// Stacks `N` input fields in a centered column.
fn form_rows<const N: usize>(area: Rect) -> [Rect; N] {
    let [column] = Layout::horizontal([Constraint::Length(FORM_WIDTH)])
        .flex(Flex::Center)
        .areas(area);
    Layout::vertical([Constraint::Length(FIELD_HEIGHT); N])
        .flex(Flex::Center)
        .areas(column)
}

fn render_chat(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let [messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(FIELD_HEIGHT)])
        .areas(area);

    let block = Block::default()
        .title(View::Chat.title())
        .borders(Borders::ALL)
        .border_style(styles::unfocused_border_style());

    if state.transcript().is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No messages yet. Say hello!",
            styles::placeholder_style(),
        ))
        .block(block);
        frame.render_widget(empty, messages_area);
    } else {
        let items = transcript_items(state.transcript());
        // Selecting the last entry keeps the newest message in view.
        let mut list_state = ListState::default();
        list_state.select(Some(items.len() - 1));
        frame.render_stateful_widget(List::new(items).block(block), messages_area, &mut list_state);
    }

    render_text_field(
        frame,
        input_area,
        "Message",
        state.chat_input(),
        Some(CHAT_PLACEHOLDER),
        state.notice().is_none(),
    );
}

fn render_profile(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let lines = match state.profile() {
        Some(profile) => profile_lines(profile),
        None => vec![Line::from(Span::styled(
            "Loading account information...",
            styles::placeholder_style(),
        ))],
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(View::Profile.title())
            .borders(Borders::ALL)
            .border_style(styles::unfocused_border_style()),
    );
    frame.render_widget(paragraph, area);
}

fn profile_lines(profile: &ProfileRecord) -> Vec<Line<'static>> {
    profile
        .display_rows()
        .into_iter()
        .map(|row| {
            Line::from(vec![
                Span::styled(format!("{}: ", row.label), styles::profile_label_style()),
                Span::raw(row.value),
            ])
        })
        .collect()
}

fn render_notice(frame: &mut Frame<'_>, area: Rect, notice: &Notice) {
    let (title, style) = match notice.kind {
        NoticeKind::Error => ("Error", styles::notice_error_style()),
        NoticeKind::Info => ("Notice", styles::notice_info_style()),
    };

    let popup = popup_area(area, 60, 7);
    let body = vec![
        Line::from(Span::styled(notice.text.clone(), style)),
        Line::default(),
        Line::from(Span::styled("Press any key to continue", styles::key_hint_style())),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(style),
        ),
        popup,
    );
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

const RESTORED_SESSION_HINTS: &str = "Ctrl+T: chat | Ctrl+P: profile";

fn status_line(state: &ShellState) -> String {
    let hints = match state.view() {
        View::Login => "Enter: sign in | Tab: next field | Ctrl+R: register | Ctrl+C: quit",
        View::Register => "Enter: register | Tab: next field | Esc: back to login | Ctrl+C: quit",
        View::Chat => "Enter: send | Ctrl+P: profile | Ctrl+L: clear | Ctrl+O: logout | Ctrl+C: quit",
        View::Profile => "c: chat | r: refresh | o: logout | q: quit",
    };

    match (state.view(), state.synced_at()) {
        (View::Chat, Some(synced_at)) => {
            format!("history synced {} | {hints}", synced_at.format("%H:%M"))
        }
        // A validated identity on Login means the stored session was restored.
        (View::Login, _) if state.profile().is_some() => {
            format!("{RESTORED_SESSION_HINTS} | {hints}")
        }
        _ => hints.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        domain::{message::ChatMessage, transcript::Transcript},
        usecases::contracts::ViewSurface,
    };

    fn screen_text(state: &ShellState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal
            .draw(|frame| render(frame, state))
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn status_line_shows_view_hints() {
        let mut state = ShellState::default();
        assert!(status_line(&state).contains("Ctrl+R: register"));

        state.show_view(View::Profile);
        assert!(status_line(&state).contains("o: logout"));
    }

    #[test]
    fn status_line_offers_restored_session_on_login() {
        let mut state = ShellState::default();
        assert!(!status_line(&state).contains("Ctrl+T"));

        state.render_profile(&ProfileRecord {
            username: "alice".to_owned(),
            ..ProfileRecord::default()
        });

        assert!(status_line(&state).starts_with("Ctrl+T: chat | Ctrl+P: profile"));
    }

    #[test]
    fn status_line_shows_sync_time_on_chat() {
        let mut state = ShellState::default();
        state.show_view(View::Chat);
        let mut transcript = Transcript::default();
        transcript.replace(vec![ChatMessage::bot("hello")]);
        state.render_transcript(&transcript);

        assert!(status_line(&state).starts_with("history synced "));
    }

    #[test]
    fn profile_lines_use_placeholders() {
        let profile = ProfileRecord {
            username: "alice".to_owned(),
            ..ProfileRecord::default()
        };

        let lines: Vec<String> = profile_lines(&profile).iter().map(line_text).collect();

        assert!(lines.contains(&"Username: alice".to_owned()));
        assert!(lines.contains(&"Payment Method: Not set".to_owned()));
        assert!(lines.contains(&"Auto Pay: Disabled".to_owned()));
    }

    #[test]
    fn popup_is_centered_and_clamped() {
        let popup = popup_area(Rect::new(0, 0, 100, 30), 60, 7);
        assert_eq!((popup.x, popup.width, popup.height), (20, 60, 7));
        assert!((11..=12).contains(&popup.y));

        let small = popup_area(Rect::new(0, 0, 40, 5), 60, 7);
        assert!(small.width <= 40 && small.height <= 5);
    }

    #[test]
    fn login_screen_hides_password() {
        let mut state = ShellState::default();
        for ch in "secret".chars() {
            state.login_form_mut().password.insert_char(ch);
        }

        let text = screen_text(&state);

        assert!(text.contains("Username"));
        assert!(!text.contains("secret"));
    }

    #[test]
    fn notice_is_drawn_over_the_view() {
        let mut state = ShellState::default();
        state.notify(Notice::error("Invalid credentials"));

        let text = screen_text(&state);

        assert!(text.contains("Invalid credentials"));
        assert!(text.contains("Press any key to continue"));
    }

    #[test]
    fn chat_screen_shows_transcript() {
        let mut state = ShellState::default();
        state.show_view(View::Chat);
        let mut transcript = Transcript::default();
        transcript.replace(vec![ChatMessage::user("hi there"), ChatMessage::bot("hello")]);
        state.render_transcript(&transcript);

        let text = screen_text(&state);

        assert!(text.contains("You:"));
        assert!(text.contains("hi there"));
        assert!(text.contains("Bot:"));
    }
}
