//! HTTP access to the chat backend and the worker thread that drives it.

pub mod http;
pub mod wire;
pub mod worker;

pub use http::HttpBackend;
pub use worker::RequestWorker;

/// Returns the backend module name for smoke checks.
pub fn module_name() -> &'static str {
    "backend"
}
