use std::path::Path;

use anyhow::Result;

use crate::{
    backend::{self, HttpBackend},
    cli::{Cli, Command},
    domain,
    infra::{self, credential_store::FileCredentialStore},
    ui,
    usecases::{
        self, bootstrap,
        cli_login::{run_cli_login, CliLoginOutcome, StdTerminal},
        logout::logout_stored_credential,
    },
};

const TUI_SHELL_FAILED: &str = "APP_TUI_SHELL_FAILED";

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(cli.config.as_deref())?;
            log_module_boundaries();

            let mut shell = bootstrap::compose_shell(&context)?;
            if let Err(error) = ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            ) {
                tracing::error!(code = TUI_SHELL_FAILED, error = ?error, "TUI shell failed");
                return Err(error);
            }
        }
        Command::Login { username } => {
            let context = bootstrap::bootstrap(cli.config.as_deref())?;
            let api = HttpBackend::new(&context.config.server)?;
            let mut store = FileCredentialStore::from_layout(&context.layout);
            tracing::debug!(path = %store.path().display(), "cli login credential store");

            let outcome =
                run_cli_login(&mut StdTerminal, &api, &mut store, username.as_deref())?;
            if outcome == CliLoginOutcome::Cancelled {
                tracing::info!("cli login cancelled");
            }
        }
        Command::Logout => {
            init_logging_for_logout(cli.config.as_deref());
            let outcome = logout_stored_credential()?;
            tracing::info!(
                credential_removed = outcome.credential_removed,
                "logout completed"
            );
            println!("{}", logout_message(outcome.credential_removed));
        }
    }

    Ok(())
}

fn log_module_boundaries() {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        backend = backend::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );
}

/// Logout must work with a broken config, so bootstrap failures only warn.
fn init_logging_for_logout(config_path: Option<&Path>) {
    if let Err(error) = bootstrap::bootstrap(config_path) {
        tracing::warn!(
            error = ?error,
            "logout fallback: bootstrap failed, continuing with local cleanup"
        );
    }
}

fn logout_message(credential_removed: bool) -> &'static str {
    if credential_removed {
        "Logged out. Stored credential removed."
    } else {
        "Already logged out. No stored credential found."
    }
}
