use chrono::{DateTime, Local};

use super::{
    forms::{LoginForm, RegisterForm},
    message::ChatMessage,
    notice::Notice,
    profile::ProfileRecord,
    text_input::TextInput,
    transcript::Transcript,
    view::View,
};
use crate::usecases::contracts::{FormKind, ViewSurface};

/// Everything the terminal shell draws. Mutated by the client through
/// [`ViewSurface`] and by the orchestrator for local editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    view: View,
    login_form: LoginForm,
    register_form: RegisterForm,
    chat_input: TextInput,
    transcript: Vec<ChatMessage>,
    synced_at: Option<DateTime<Local>>,
    profile: Option<ProfileRecord>,
    notice: Option<Notice>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            view: View::Login,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            chat_input: TextInput::default(),
            transcript: Vec::new(),
            synced_at: None,
            profile: None,
            notice: None,
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login_form
    }

    pub fn login_form_mut(&mut self) -> &mut LoginForm {
        &mut self.login_form
    }

    pub fn register_form(&self) -> &RegisterForm {
        &self.register_form
    }

    pub fn register_form_mut(&mut self) -> &mut RegisterForm {
        &mut self.register_form
    }

    pub fn chat_input(&self) -> &TextInput {
        &self.chat_input
    }

    pub fn chat_input_mut(&mut self) -> &mut TextInput {
        &mut self.chat_input
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn synced_at(&self) -> Option<DateTime<Local>> {
        self.synced_at
    }

    pub fn profile(&self) -> Option<&ProfileRecord> {
        self.profile.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

impl ViewSurface for ShellState {
    fn show_view(&mut self, view: View) {
        self.view = view;
    }

    fn render_transcript(&mut self, transcript: &Transcript) {
        self.transcript = transcript.messages().to_vec();
        self.synced_at = transcript.synced_at();
    }

    fn render_profile(&mut self, profile: &ProfileRecord) {
        self.profile = Some(profile.clone());
    }

    fn clear_profile(&mut self) {
        self.profile = None;
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn clear_chat_input(&mut self) {
        self.chat_input.clear();
    }

    fn reset_form(&mut self, form: FormKind) {
        match form {
            FormKind::Login => self.login_form.reset_secret(),
            FormKind::Register => self.register_form.reset(),
        }
    }
}
