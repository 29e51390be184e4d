//! Use case layer: application workflows and orchestration.

pub mod auth;
pub mod bootstrap;
pub mod cli_login;
pub mod client;
pub mod context;
pub mod contracts;
pub mod load_history;
pub mod logout;
pub mod profile;
pub mod requests;
pub mod send_message;
pub mod session;
pub mod shell;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
