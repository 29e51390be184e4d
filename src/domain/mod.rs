//! Domain layer: core entities and view state.

pub mod events;
pub mod forms;
pub mod message;
pub mod notice;
pub mod profile;
pub mod session;
pub mod shell_state;
pub mod text_input;
pub mod transcript;
pub mod view;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
