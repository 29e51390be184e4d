use std::io;

use anyhow::{bail, Context, Result};

use crate::infra::contracts::CredentialStore;

use super::auth::{self, AuthApi, LoginCommand};

pub trait AuthTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

pub struct StdTerminal;

impl AuthTerminal for StdTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        println!("{line}");
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        use std::io::Write;

        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        let bytes = io::stdin().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_owned()))
    }

    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match rpassword::prompt_password(prompt) {
            // Passwords are sent as typed; only the line ending is dropped.
            Ok(password) => Ok(Some(password.trim_end_matches(['\r', '\n']).to_owned())),
            Err(source) if source.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(source) => Err(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliLoginOutcome {
    SignedIn { username: String },
    Cancelled,
}

/// Prompts for whatever is missing, performs one login exchange and
/// persists the credential. Server rejections surface as errors carrying
/// the user-facing message.
pub fn run_cli_login<S: CredentialStore>(
    terminal: &mut dyn AuthTerminal,
    api: &dyn AuthApi,
    store: &mut S,
    username: Option<&str>,
) -> Result<CliLoginOutcome> {
    let username = match username {
        Some(name) => name.to_owned(),
        None => match terminal.prompt_line("Username: ")? {
            Some(name) => name,
            None => {
                terminal.print_line("Input cancelled (EOF). Run carechat login again to retry.")?;
                return Ok(CliLoginOutcome::Cancelled);
            }
        },
    };

    let Some(password) = terminal.prompt_secret("Password: ")? else {
        terminal.print_line("Input cancelled (EOF). Run carechat login again to retry.")?;
        return Ok(CliLoginOutcome::Cancelled);
    };

    let command = LoginCommand { username, password };
    let grant = match auth::login(api, &command) {
        Ok(grant) => grant,
        Err(error) => {
            tracing::warn!(error = ?error, "cli login failed");
            bail!(error.user_message());
        }
    };

    store
        .save(&grant.credential)
        .context("login succeeded but the credential could not be stored")?;

    let username = grant.identity.username;
    tracing::info!(username = %username, "cli login stored credential");
    terminal.print_line(&format!("Signed in as {username}. Credential saved."))?;

    Ok(CliLoginOutcome::SignedIn { username })
}
