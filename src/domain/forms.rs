//! Login and registration form state.

use super::text_input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: TextInput,
    pub password: TextInput,
    focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextInput::default(),
            password: TextInput::masked(),
            focus: LoginField::Username,
        }
    }
}

impl LoginForm {
    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Clears the password and returns focus to it; the username is kept
    /// for the next sign-in.
    pub fn reset_secret(&mut self) {
        self.password.clear();
        self.focus = if self.username.is_blank() {
            LoginField::Username
        } else {
            LoginField::Password
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Username,
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    focus: RegisterField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: TextInput::default(),
            email: TextInput::default(),
            password: TextInput::masked(),
            focus: RegisterField::Username,
        }
    }
}

impl RegisterForm {
    pub fn focus(&self) -> RegisterField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Username,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
