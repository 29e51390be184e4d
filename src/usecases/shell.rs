use anyhow::Result;

use crate::{
    domain::{
        events::{AppEvent, KeyInput},
        shell_state::ShellState,
        text_input::TextInput,
        view::View,
    },
    infra::contracts::CredentialStore,
};

use super::{
    auth::{LoginCommand, RegisterCommand},
    client::{ChatClient, SendOutcome},
    contracts::ShellOrchestrator,
    requests::RequestDispatcher,
};

pub struct DefaultShellOrchestrator<S, D>
where
    S: CredentialStore,
    D: RequestDispatcher,
{
    state: ShellState,
    client: ChatClient<S, D>,
}

impl<S, D> DefaultShellOrchestrator<S, D>
where
    S: CredentialStore,
    D: RequestDispatcher,
{
    pub fn new(client: ChatClient<S, D>) -> Self {
        Self {
            state: ShellState::default(),
            client,
        }
    }

    #[cfg(test)]
    pub fn client(&self) -> &ChatClient<S, D> {
        &self.client
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl && key.key == "c" {
            self.state.stop();
            return;
        }

        // An open notice swallows the next key.
        if self.state.dismiss_notice().is_some() {
            return;
        }

        match self.client.view() {
            View::Login => self.handle_login_key(&key),
            View::Register => self.handle_register_key(&key),
            View::Chat => self.handle_chat_key(&key),
            View::Profile => self.handle_profile_key(&key),
        }
    }

    fn handle_login_key(&mut self, key: &KeyInput) {
        if key.ctrl {
            // A restored session stays on Login until the user moves on.
            let authenticated = self.client.session().is_authenticated();
            match key.key.as_str() {
                "r" => self.client.show_register(&mut self.state),
                "t" if authenticated => self.client.show_chat(&mut self.state),
                "p" if authenticated => self.client.show_profile(&mut self.state),
                _ => {}
            }
            return;
        }

        match key.key.as_str() {
            "tab" => self.state.login_form_mut().focus_next(),
            "enter" => {
                let form = self.state.login_form();
                let command = LoginCommand {
                    username: form.username.text().to_owned(),
                    password: form.password.text().to_owned(),
                };
                self.client.login(command, &mut self.state);
            }
            _ => {
                edit_field(self.state.login_form_mut().focused_mut(), key);
            }
        }
    }

    fn handle_register_key(&mut self, key: &KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "tab" => self.state.register_form_mut().focus_next(),
            "esc" => self.client.show_login(&mut self.state),
            "enter" => {
                let form = self.state.register_form();
                let command = RegisterCommand {
                    username: form.username.text().to_owned(),
                    email: form.email.text().to_owned(),
                    password: form.password.text().to_owned(),
                };
                self.client.register(command, &mut self.state);
            }
            _ => {
                edit_field(self.state.register_form_mut().focused_mut(), key);
            }
        }
    }

    fn handle_chat_key(&mut self, key: &KeyInput) {
        if key.ctrl {
            match key.key.as_str() {
                "p" => self.client.show_profile(&mut self.state),
                "l" => self.client.clear_transcript(&mut self.state),
                "o" => self.client.logout(&mut self.state),
                _ => {}
            }
            return;
        }

        if key.key == "enter" {
            let text = self.state.chat_input().text().to_owned();
            if self.client.send_message(&text, &mut self.state) == SendOutcome::Busy {
                tracing::debug!("chat input kept while a reply is pending");
            }
            return;
        }

        edit_field(self.state.chat_input_mut(), key);
    }

    fn handle_profile_key(&mut self, key: &KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "c" => self.client.show_chat(&mut self.state),
            "r" => self.client.fetch_profile(&mut self.state),
            "o" => self.client.logout(&mut self.state),
            "q" => self.state.stop(),
            _ => {}
        }
    }
}

fn edit_field(input: &mut TextInput, key: &KeyInput) {
    match key.key.as_str() {
        "backspace" => input.backspace(),
        "delete" => input.delete(),
        "left" => input.move_left(),
        "right" => input.move_right(),
        "home" => input.move_home(),
        "end" => input.move_end(),
        _ => {
            if let Some(ch) = key.printable() {
                input.insert_char(ch);
            }
        }
    }
}

impl<S, D> ShellOrchestrator for DefaultShellOrchestrator<S, D>
where
    S: CredentialStore,
    D: RequestDispatcher,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn start(&mut self) {
        self.client.start(&mut self.state);
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::RequestCompleted(completion) => {
                self.client.handle_completion(completion, &mut self.state);
            }
        }

        Ok(())
    }
}
