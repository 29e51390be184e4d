//! Client controller: the panel state machine plus the handlers that apply
//! request completions to the session, the transcript and the surface.

use crate::{
    domain::{message::ChatMessage, notice::Notice, session::Session, transcript::Transcript, view::View},
    infra::{config::ChatConfig, contracts::CredentialStore},
};

use super::{
    auth::{LoginCommand, RegisterCommand},
    contracts::{FormKind, ViewSurface},
    requests::{ApiCompletion, ApiRequest, DispatchError, RequestDispatcher},
    send_message::{SendMessageCommand, SendMessageError},
    session::SessionManager,
};

const REGISTRATION_SUCCEEDED: &str = "Registration successful! Please login.";
const REQUEST_DISPATCH_FAILED: &str = "CLIENT_REQUEST_DISPATCH_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    pub optimistic_send: bool,
    pub guard_concurrent_sends: bool,
    pub surface_history_errors: bool,
}

impl From<&ChatConfig> for ClientOptions {
    fn from(config: &ChatConfig) -> Self {
        Self {
            optimistic_send: config.optimistic_send,
            guard_concurrent_sends: config.guard_concurrent_sends,
            surface_history_errors: config.surface_history_errors,
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::from(&ChatConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank text: nothing sent, nothing changed.
    Ignored,
    /// Another send is still in flight and the guard is on.
    Busy,
    Dispatched,
}

pub struct ChatClient<S, D>
where
    S: CredentialStore,
    D: RequestDispatcher,
{
    view: View,
    session: SessionManager<S>,
    transcript: Transcript,
    dispatcher: D,
    options: ClientOptions,
    sends_in_flight: usize,
}

impl<S, D> ChatClient<S, D>
where
    S: CredentialStore,
    D: RequestDispatcher,
{
    pub fn new(session: SessionManager<S>, dispatcher: D, options: ClientOptions) -> Self {
        Self {
            view: View::Login,
            session,
            transcript: Transcript::default(),
            dispatcher,
            options,
            sends_in_flight: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn sends_in_flight(&self) -> usize {
        self.sends_in_flight
    }

    #[cfg(test)]
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    #[cfg(test)]
    pub fn session_manager(&self) -> &SessionManager<S> {
        &self.session
    }

    /// Shows Login and, when a credential was stored by an earlier run,
    /// validates it with a profile fetch. The view is not forced anywhere
    /// on success.
    pub fn start(&mut self, surface: &mut dyn ViewSurface) {
        self.transition(View::Login, surface);

        if self.session.restore() {
            self.fetch_profile(surface);
        }
    }

    pub fn show_login(&mut self, surface: &mut dyn ViewSurface) {
        self.transition(View::Login, surface);
    }

    pub fn show_register(&mut self, surface: &mut dyn ViewSurface) {
        self.transition(View::Register, surface);
    }

    pub fn show_chat(&mut self, surface: &mut dyn ViewSurface) {
        self.transition(View::Chat, surface);
        self.load_chat_history(surface);
    }

    pub fn show_profile(&mut self, surface: &mut dyn ViewSurface) {
        self.transition(View::Profile, surface);
        self.render_profile(surface);
    }

    pub fn login(&mut self, command: LoginCommand, surface: &mut dyn ViewSurface) {
        if let Err(error) = command.validate() {
            surface.notify(Notice::error(error.user_message()));
            return;
        }

        self.dispatch(ApiRequest::Login(command), surface);
    }

    pub fn register(&mut self, command: RegisterCommand, surface: &mut dyn ViewSurface) {
        if let Err(error) = command.validate() {
            surface.notify(Notice::error(error.user_message()));
            return;
        }

        self.dispatch(ApiRequest::Register(command), surface);
    }

    pub fn send_message(&mut self, text: &str, surface: &mut dyn ViewSurface) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        if self.options.guard_concurrent_sends && self.sends_in_flight > 0 {
            tracing::debug!(
                in_flight = self.sends_in_flight,
                "send ignored while previous send is pending"
            );
            return SendOutcome::Busy;
        }

        if self.options.optimistic_send {
            self.transcript.push(ChatMessage::user(text));
            surface.render_transcript(&self.transcript);
        }

        self.sends_in_flight += 1;
        let command = SendMessageCommand {
            credential: self.session.credential().cloned(),
            text: text.to_owned(),
        };
        self.dispatch(ApiRequest::SendMessage(command), surface);

        SendOutcome::Dispatched
    }

    pub fn load_chat_history(&mut self, surface: &mut dyn ViewSurface) {
        let credential = self.session.credential().cloned();
        self.dispatch(ApiRequest::LoadHistory { credential }, surface);
    }

    pub fn fetch_profile(&mut self, surface: &mut dyn ViewSurface) {
        let credential = self.session.credential().cloned();
        self.dispatch(ApiRequest::FetchProfile { credential }, surface);
    }

    /// Renders the current identity; no-op without one.
    pub fn render_profile(&self, surface: &mut dyn ViewSurface) {
        if let Some(identity) = self.session.identity() {
            surface.render_profile(identity);
        }
    }

    /// Empties the local transcript only; server history is untouched.
    pub fn clear_transcript(&mut self, surface: &mut dyn ViewSurface) {
        self.transcript.clear();
        surface.render_transcript(&self.transcript);
    }

    pub fn logout(&mut self, surface: &mut dyn ViewSurface) {
        self.session.clear();
        self.transcript.reset();
        surface.render_transcript(&self.transcript);
        surface.clear_profile();
        self.transition(View::Login, surface);
    }

    pub fn handle_completion(&mut self, completion: ApiCompletion, surface: &mut dyn ViewSurface) {
        match completion {
            ApiCompletion::Login(Ok(grant)) => {
                tracing::info!(username = %grant.identity.username, "login succeeded");
                self.session.sign_in(grant.credential, grant.identity);
                surface.reset_form(FormKind::Login);
                self.show_chat(surface);
            }
            ApiCompletion::Login(Err(error)) => {
                tracing::warn!(error = ?error, "login failed");
                surface.notify(Notice::error(error.user_message()));
            }
            ApiCompletion::Register(Ok(())) => {
                tracing::info!("registration succeeded");
                surface.notify(Notice::info(REGISTRATION_SUCCEEDED));
                surface.reset_form(FormKind::Register);
                self.show_login(surface);
            }
            ApiCompletion::Register(Err(error)) => {
                tracing::warn!(error = ?error, "registration failed");
                surface.notify(Notice::error(error.user_message()));
            }
            ApiCompletion::SendMessage { text, result } => {
                self.sends_in_flight = self.sends_in_flight.saturating_sub(1);
                self.on_send_completed(text, result, surface);
            }
            ApiCompletion::LoadHistory(Ok(messages)) => {
                tracing::debug!(count = messages.len(), "chat history loaded");
                self.transcript.replace(messages);
                surface.render_transcript(&self.transcript);
            }
            ApiCompletion::LoadHistory(Err(error)) => {
                tracing::warn!(error = ?error, "chat history load failed");
                if self.options.surface_history_errors {
                    surface.notify(Notice::error(error.user_message()));
                }
            }
            ApiCompletion::FetchProfile(Ok(profile)) => {
                if self.session.accept_identity(profile) {
                    self.render_profile(surface);
                } else {
                    tracing::debug!("profile arrived without a credential; ignored");
                }
            }
            ApiCompletion::FetchProfile(Err(error)) => {
                tracing::warn!(error = ?error, "profile fetch failed; dropping credential");
                self.logout(surface);
            }
        }
    }

    fn on_send_completed(
        &mut self,
        text: String,
        result: Result<String, SendMessageError>,
        surface: &mut dyn ViewSurface,
    ) {
        match result {
            Ok(reply) => {
                if !self.options.optimistic_send {
                    self.transcript.push(ChatMessage::user(text));
                }
                self.transcript.push(ChatMessage::bot(reply));
                surface.render_transcript(&self.transcript);
                surface.clear_chat_input();
            }
            Err(SendMessageError::EmptyMessage) => {}
            Err(error) => {
                tracing::warn!(error = ?error, "send failed");
                surface.notify(Notice::error(error.user_message()));
            }
        }
    }

    fn transition(&mut self, view: View, surface: &mut dyn ViewSurface) {
        tracing::debug!(
            from = ?self.view,
            to = ?view,
            authenticated = self.session.session().is_authenticated(),
            "view transition"
        );
        self.view = view;
        surface.show_view(view);
    }

    fn dispatch(&mut self, request: ApiRequest, surface: &mut dyn ViewSurface) {
        let label = request.label();
        tracing::debug!(request = label, "dispatching request");

        if let Err(DispatchError(request)) = self.dispatcher.dispatch(request) {
            tracing::error!(
                code = REQUEST_DISPATCH_FAILED,
                request = label,
                "request worker is unavailable"
            );
            self.handle_completion(request.into_unavailable(), surface);
        }
    }
}
