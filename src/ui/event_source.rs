use std::{
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::{contracts::AppEventSource, requests::ApiCompletion},
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Merges request completions from the worker with terminal key presses.
/// Completions are drained first so replies are never starved by typing.
pub struct TerminalEventSource {
    completions: Receiver<ApiCompletion>,
    worker_gone_reported: bool,
}

impl TerminalEventSource {
    pub fn new(completions: Receiver<ApiCompletion>) -> Self {
        Self {
            completions,
            worker_gone_reported: false,
        }
    }

    fn next_completion(&mut self) -> Option<AppEvent> {
        match self.completions.try_recv() {
            Ok(completion) => Some(AppEvent::RequestCompleted(completion)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.worker_gone_reported {
                    tracing::warn!("request worker disconnected");
                    self.worker_gone_reported = true;
                }
                None
            }
        }
    }
}

impl AppEventSource for TerminalEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.next_completion() {
            return Ok(Some(event));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppEvent::QuitRequested);
    }

    let name = match key.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Delete => "delete".to_owned(),
        KeyCode::Esc => "esc".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        _ => return None,
    };

    Some(AppEvent::InputKey(KeyInput::new(name, ctrl)))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::KeyEventState;

    use super::*;
    use crate::usecases::{auth::RegisterError, requests::ApiCompletion};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn ctrl_c_maps_to_quit() {
        assert_eq!(
            map_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::QuitRequested)
        );
    }

    #[test]
    fn named_and_printable_keys_map_to_key_input() {
        assert_eq!(
            map_key(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppEvent::InputKey(KeyInput::new("enter", false)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            Some(AppEvent::InputKey(KeyInput::new("p", true)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(AppEvent::InputKey(KeyInput::new("Q", false)))
        );
        assert_eq!(map_key(press(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert_eq!(map_key(key), None);
    }

    #[test]
    fn pending_completion_is_delivered_before_input() {
        let (completion_tx, completion_rx) = mpsc::channel();
        let completion = ApiCompletion::Register(Err(RegisterError::Unavailable));
        completion_tx
            .send(completion.clone())
            .expect("channel open");
        let mut source = TerminalEventSource::new(completion_rx);

        assert_eq!(
            source.next_completion(),
            Some(AppEvent::RequestCompleted(completion))
        );
        assert_eq!(source.next_completion(), None);
    }

    #[test]
    fn mock_source_produces_quit_event() {
        let mut source = MockEventSource::from(vec![AppEvent::QuitRequested]);
        let event = source.next_event().expect("must read mock event");

        assert_eq!(event, Some(AppEvent::QuitRequested));
    }
}
