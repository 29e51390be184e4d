//! UI layer: terminal rendering and input for the shell.

mod event_source;
pub mod shell;
mod styles;
mod terminal;
mod text_field;
mod transcript;
mod view;

pub(crate) use event_source::TerminalEventSource;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
