//! Use case for sending a chat message to the support bot.
//!
//! Provides the `MessageSender` trait and the `send_message` function which
//! validates the text and returns the bot reply.

use crate::domain::session::Credential;

use super::contracts::ApiError;

const SEND_REJECTED_FALLBACK: &str = "Failed to send message";
const SEND_UNAVAILABLE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub credential: Option<Credential>,
    pub text: String,
}

/// Domain-level errors for the send operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// The server refused the message (expired credential, bad request).
    Rejected { detail: Option<String> },
    /// The request did not complete or the reply was unreadable.
    TemporarilyUnavailable,
}

impl SendMessageError {
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyMessage => String::new(),
            Self::Rejected { detail } => detail
                .clone()
                .unwrap_or_else(|| SEND_REJECTED_FALLBACK.to_owned()),
            Self::TemporarilyUnavailable => SEND_UNAVAILABLE.to_owned(),
        }
    }
}

pub trait MessageSender {
    /// Posts `text` and returns the bot's reply.
    fn send_chat(&self, credential: Option<&Credential>, text: &str) -> Result<String, ApiError>;
}

impl<T: MessageSender + ?Sized> MessageSender for &T {
    fn send_chat(&self, credential: Option<&Credential>, text: &str) -> Result<String, ApiError> {
        (*self).send_chat(credential, text)
    }
}

/// Sends a message and returns the bot reply.
///
/// # Errors
/// Returns `SendMessageError::EmptyMessage` if text is empty/whitespace.
/// Maps source errors to domain errors for other failure cases.
pub fn send_message(
    sender: &dyn MessageSender,
    command: &SendMessageCommand,
) -> Result<String, SendMessageError> {
    let text = command.text.trim();
    if text.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    sender
        .send_chat(command.credential.as_ref(), text)
        .map_err(map_source_error)
}

fn map_source_error(error: ApiError) -> SendMessageError {
    match error {
        ApiError::Rejected { detail, .. } => SendMessageError::Rejected { detail },
        ApiError::Transport | ApiError::InvalidData => SendMessageError::TemporarilyUnavailable,
    }
}
