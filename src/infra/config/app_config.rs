use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file name, relative to the app log directory unless absolute.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: "carechat.log".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub base_url: String,
    /// Per-request timeout; `0` leaves the transport default in place.
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_owned(),
            request_timeout_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    /// Show the user's message before the server confirms it.
    pub optimistic_send: bool,
    /// Ignore new sends while one is still in flight.
    pub guard_concurrent_sends: bool,
    /// Show history-load failures as notices instead of only logging them.
    pub surface_history_errors: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            optimistic_send: false,
            guard_concurrent_sends: true,
            surface_history_errors: false,
        }
    }
}
