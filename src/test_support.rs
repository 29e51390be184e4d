use std::{
    ffi::OsString,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use crate::{
    domain::{
        message::ChatMessage, notice::Notice, profile::ProfileRecord, session::Credential,
        transcript::Transcript, view::View,
    },
    usecases::{
        auth::{AuthApi, LoginGrant},
        contracts::{ApiError, FormKind, ViewSurface},
        load_history::HistorySource,
        profile::ProfileSource,
        requests::{ApiRequest, DispatchError, RequestDispatcher},
        send_message::MessageSender,
    },
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().expect("env lock should not be poisoned")
}

/// Runs `f` with `XDG_CONFIG_HOME` pointed at `path`, restoring the previous
/// value afterwards. Callers must hold [`env_lock`].
pub fn with_xdg_config_home<T>(path: &Path, f: impl FnOnce() -> T) -> T {
    let previous: Option<OsString> = std::env::var_os("XDG_CONFIG_HOME");
    // SAFETY: env is guarded by the process-wide test mutex.
    unsafe { std::env::set_var("XDG_CONFIG_HOME", path) };

    let output = f();

    match previous {
        // SAFETY: restoring env while the guard is held.
        Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
        // SAFETY: restoring env while the guard is held.
        None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
    }
    output
}

/// Backend stand-in: fixed history and profile, echoing chat replies.
/// Records the credential each authenticated call carried.
#[derive(Debug)]
pub struct StubApi {
    pub history: Vec<ChatMessage>,
    pub profile: ProfileRecord,
    pub seen_credentials: Mutex<Vec<Option<String>>>,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            history: vec![ChatMessage::user("hi"), ChatMessage::bot("hello")],
            profile: ProfileRecord {
                username: "alice".to_owned(),
                email: "alice@example.com".to_owned(),
                ..ProfileRecord::default()
            },
            seen_credentials: Mutex::new(Vec::new()),
        }
    }
}

impl StubApi {
    fn record(&self, credential: Option<&Credential>) {
        self.seen_credentials
            .lock()
            .expect("stub lock")
            .push(credential.map(|c| c.as_str().to_owned()));
    }
}

impl AuthApi for StubApi {
    fn login(&self, username: &str, _password: &str) -> Result<LoginGrant, ApiError> {
        Ok(LoginGrant {
            credential: Credential::parse("stub-token").expect("credential"),
            identity: ProfileRecord {
                username: username.to_owned(),
                ..self.profile.clone()
            },
        })
    }

    fn register(&self, _username: &str, _email: &str, _password: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

impl MessageSender for StubApi {
    fn send_chat(&self, credential: Option<&Credential>, text: &str) -> Result<String, ApiError> {
        self.record(credential);
        Ok(format!("echo: {text}"))
    }
}

impl HistorySource for StubApi {
    fn chat_history(&self, credential: Option<&Credential>) -> Result<Vec<ChatMessage>, ApiError> {
        self.record(credential);
        Ok(self.history.clone())
    }
}

impl ProfileSource for StubApi {
    fn profile(&self, credential: Option<&Credential>) -> Result<ProfileRecord, ApiError> {
        self.record(credential);
        Ok(self.profile.clone())
    }
}

/// Captures dispatched requests; a closed dispatcher rejects everything.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pub requests: Vec<ApiRequest>,
    pub closed: bool,
}

impl RecordingDispatcher {
    pub fn closed() -> Self {
        Self {
            requests: Vec::new(),
            closed: true,
        }
    }
}

impl RequestDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, request: ApiRequest) -> Result<(), DispatchError> {
        if self.closed {
            return Err(DispatchError(request));
        }
        self.requests.push(request);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub views: Vec<View>,
    pub current_view: Option<View>,
    pub transcript: Vec<ChatMessage>,
    pub transcript_renders: usize,
    pub profile: Option<ProfileRecord>,
    pub notices: Vec<Notice>,
    pub chat_input_clears: usize,
    pub form_resets: Vec<FormKind>,
}

impl ViewSurface for RecordingSurface {
    fn show_view(&mut self, view: View) {
        self.views.push(view);
        self.current_view = Some(view);
    }

    fn render_transcript(&mut self, transcript: &Transcript) {
        self.transcript = transcript.messages().to_vec();
        self.transcript_renders += 1;
    }

    fn render_profile(&mut self, profile: &ProfileRecord) {
        self.profile = Some(profile.clone());
    }

    fn clear_profile(&mut self) {
        self.profile = None;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn clear_chat_input(&mut self) {
        self.chat_input_clears += 1;
    }

    fn reset_form(&mut self, form: FormKind) {
        self.form_resets.push(form);
    }
}
