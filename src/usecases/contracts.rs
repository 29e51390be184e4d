use anyhow::Result;

use crate::domain::{
    events::AppEvent, notice::Notice, profile::ProfileRecord, shell_state::ShellState,
    transcript::Transcript, view::View,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    /// Runs startup work (credential restore) before the first frame.
    fn start(&mut self);
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
}

/// Rendering seam between the client logic and whatever draws it.
pub trait ViewSurface {
    fn show_view(&mut self, view: View);
    fn render_transcript(&mut self, transcript: &Transcript);
    fn render_profile(&mut self, profile: &ProfileRecord);
    fn clear_profile(&mut self);
    /// Blocking user-facing notification.
    fn notify(&mut self, notice: Notice);
    fn clear_chat_input(&mut self);
    fn reset_form(&mut self, form: FormKind);
}

/// Failure reported by a backend source, before use-case mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never completed (connect failure, timeout, broken body).
    Transport,
    /// Non-success status, with the server `detail` when one was sent.
    Rejected { status: u16, detail: Option<String> },
    /// Success status whose body does not match the endpoint contract.
    InvalidData,
}

impl ApiError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
