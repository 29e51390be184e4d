use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tokio::runtime::{Builder, Runtime};

use crate::{
    domain::{message::ChatMessage, profile::ProfileRecord, session::Credential},
    infra::{config::ServerConfig, error::AppError},
    usecases::{
        auth::{AuthApi, LoginGrant},
        contracts::ApiError,
        load_history::HistorySource,
        profile::ProfileSource,
        send_message::MessageSender,
    },
};

use super::wire::{self, ChatBody, LoginBody, RawResponse, RegisterBody};

const HTTP_REQUEST_FAILED: &str = "BACKEND_HTTP_REQUEST_FAILED";

/// Blocking facade over the async `reqwest` client. Owns a current-thread
/// runtime, so it is meant to live on the request worker thread.
pub struct HttpBackend {
    runtime: Runtime,
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if config.request_timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.request_timeout_ms));
        }
        let client = builder.build().map_err(|error| AppError::HttpClientInit {
            details: error.to_string(),
        })?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| AppError::HttpClientInit {
                details: error.to_string(),
            })?;

        Ok(Self {
            runtime,
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn execute(&self, endpoint: &'static str, request: RequestBuilder) -> Result<RawResponse, ApiError> {
        let outcome = self.runtime.block_on(async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse::new(status, body))
        });

        match outcome {
            Ok(response) => {
                tracing::debug!(endpoint, status = response.status, "backend responded");
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(
                    code = HTTP_REQUEST_FAILED,
                    endpoint,
                    timeout = error.is_timeout(),
                    error = %error,
                    "backend request did not complete"
                );
                Err(ApiError::Transport)
            }
        }
    }
}

fn with_bearer(request: RequestBuilder, credential: Option<&Credential>) -> RequestBuilder {
    match credential {
        Some(credential) => request.bearer_auth(credential.as_str()),
        None => request,
    }
}

impl AuthApi for HttpBackend {
    fn login(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError> {
        let request = self
            .client
            .post(self.url("/login"))
            .json(&LoginBody { username, password });
        let response = self.execute("/login", request)?;
        wire::decode_login(&response, username)
    }

    fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/register")).json(&RegisterBody {
            username,
            email,
            password,
        });
        let response = self.execute("/register", request)?;
        wire::decode_register(&response)
    }
}

impl MessageSender for HttpBackend {
    fn send_chat(&self, credential: Option<&Credential>, text: &str) -> Result<String, ApiError> {
        let request = with_bearer(self.client.post(self.url("/chat")), credential)
            .json(&ChatBody { message: text });
        let response = self.execute("/chat", request)?;
        wire::decode_chat(&response)
    }
}

impl HistorySource for HttpBackend {
    fn chat_history(&self, credential: Option<&Credential>) -> Result<Vec<ChatMessage>, ApiError> {
        let request = with_bearer(self.client.get(self.url("/chat-history")), credential);
        let response = self.execute("/chat-history", request)?;
        wire::decode_history(&response)
    }
}

impl ProfileSource for HttpBackend {
    fn profile(&self, credential: Option<&Credential>) -> Result<ProfileRecord, ApiError> {
        let request = with_bearer(self.client.get(self.url("/profile")), credential);
        let response = self.execute("/profile", request)?;
        wire::decode_profile(&response)
    }
}
