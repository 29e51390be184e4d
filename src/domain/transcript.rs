use chrono::{DateTime, Local};

use super::message::ChatMessage;

/// Ordered chat messages currently shown in the chat view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    synced_at: Option<DateTime<Local>>,
}

impl Transcript {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Time of the last wholesale replacement from server history.
    pub fn synced_at(&self) -> Option<DateTime<Local>> {
        self.synced_at
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Replaces every entry with the server history. No merge is attempted.
    pub fn replace(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.synced_at = Some(Local::now());
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.synced_at = None;
    }
}
