//! Requests handed to the network worker and the completions it returns.

use crate::domain::{message::ChatMessage, profile::ProfileRecord, session::Credential};

use super::{
    auth::{self, AuthApi, LoginCommand, LoginError, LoginGrant, RegisterCommand, RegisterError},
    load_history::{self, HistorySource, LoadHistoryError},
    profile::{self, ProfileError, ProfileSource},
    send_message::{self, MessageSender, SendMessageCommand, SendMessageError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Login(LoginCommand),
    Register(RegisterCommand),
    SendMessage(SendMessageCommand),
    LoadHistory { credential: Option<Credential> },
    FetchProfile { credential: Option<Credential> },
}

impl ApiRequest {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::SendMessage(_) => "send_message",
            Self::LoadHistory { .. } => "load_history",
            Self::FetchProfile { .. } => "fetch_profile",
        }
    }

    /// The completion reported when the request could not even be handed
    /// to the worker.
    pub fn into_unavailable(self) -> ApiCompletion {
        match self {
            Self::Login(_) => ApiCompletion::Login(Err(LoginError::Unavailable)),
            Self::Register(_) => ApiCompletion::Register(Err(RegisterError::Unavailable)),
            Self::SendMessage(command) => ApiCompletion::SendMessage {
                text: command.text,
                result: Err(SendMessageError::TemporarilyUnavailable),
            },
            Self::LoadHistory { .. } => {
                ApiCompletion::LoadHistory(Err(LoadHistoryError::TemporarilyUnavailable))
            }
            Self::FetchProfile { .. } => ApiCompletion::FetchProfile(Err(ProfileError::Unavailable)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCompletion {
    Login(Result<LoginGrant, LoginError>),
    Register(Result<(), RegisterError>),
    SendMessage {
        /// The text as submitted, echoed back for the transcript.
        text: String,
        result: Result<String, SendMessageError>,
    },
    LoadHistory(Result<Vec<ChatMessage>, LoadHistoryError>),
    FetchProfile(Result<ProfileRecord, ProfileError>),
}

/// The worker is gone; the request is handed back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError(pub ApiRequest);

pub trait RequestDispatcher {
    fn dispatch(&mut self, request: ApiRequest) -> Result<(), DispatchError>;
}

/// Everything the worker needs to serve every request kind.
pub trait ClientApi: AuthApi + MessageSender + HistorySource + ProfileSource {}

impl<T> ClientApi for T where T: AuthApi + MessageSender + HistorySource + ProfileSource {}

/// Runs one request to completion against `api`.
pub fn execute<A: ClientApi>(api: &A, request: ApiRequest) -> ApiCompletion {
    match request {
        ApiRequest::Login(command) => ApiCompletion::Login(auth::login(api, &command)),
        ApiRequest::Register(command) => ApiCompletion::Register(auth::register(api, &command)),
        ApiRequest::SendMessage(command) => {
            let result = send_message::send_message(api, &command);
            ApiCompletion::SendMessage {
                text: command.text.trim().to_owned(),
                result,
            }
        }
        ApiRequest::LoadHistory { credential } => ApiCompletion::LoadHistory(
            load_history::load_history(api, credential.as_ref()),
        ),
        ApiRequest::FetchProfile { credential } => {
            ApiCompletion::FetchProfile(profile::fetch_profile(api, credential.as_ref()))
        }
    }
}
