//! Login and registration exchanges.

use crate::domain::{profile::ProfileRecord, session::Credential};

use super::contracts::ApiError;

const LOGIN_REJECTED_FALLBACK: &str = "Login failed. Please check your username and password.";
const LOGIN_UNAVAILABLE: &str = "Login failed. Please try again.";
const REGISTER_REJECTED_FALLBACK: &str = "Registration failed";
const REGISTER_UNAVAILABLE: &str = "Registration failed. Please try again.";
const MISSING_FIELDS: &str = "Please fill in all fields.";

#[derive(Clone, PartialEq, Eq)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct RegisterCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginCommand {
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingFields);
        }
        Ok(())
    }
}

impl RegisterCommand {
    pub fn validate(&self) -> Result<(), RegisterError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(RegisterError::MissingFields);
        }
        Ok(())
    }
}

/// Successful login: the bearer credential plus the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginGrant {
    pub credential: Credential,
    pub identity: ProfileRecord,
}

pub trait AuthApi {
    fn login(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError>;
    fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError>;
}

impl<T> AuthApi for &T
where
    T: AuthApi + ?Sized,
{
    fn login(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError> {
        (*self).login(username, password)
    }

    fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        (*self).register(username, email, password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    MissingFields,
    Rejected { detail: Option<String> },
    Unavailable,
}

impl LoginError {
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingFields => MISSING_FIELDS.to_owned(),
            Self::Rejected { detail } => detail
                .clone()
                .unwrap_or_else(|| LOGIN_REJECTED_FALLBACK.to_owned()),
            Self::Unavailable => LOGIN_UNAVAILABLE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    MissingFields,
    Rejected { detail: Option<String> },
    Unavailable,
}

impl RegisterError {
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingFields => MISSING_FIELDS.to_owned(),
            Self::Rejected { detail } => detail
                .clone()
                .unwrap_or_else(|| REGISTER_REJECTED_FALLBACK.to_owned()),
            Self::Unavailable => REGISTER_UNAVAILABLE.to_owned(),
        }
    }
}

pub fn login(api: &dyn AuthApi, command: &LoginCommand) -> Result<LoginGrant, LoginError> {
    command.validate()?;

    // Fields go out exactly as typed.
    api.login(&command.username, &command.password)
        .map_err(|error| match error {
            ApiError::Rejected { detail, .. } => LoginError::Rejected { detail },
            // An unreadable reply is reported like a broken connection.
            ApiError::InvalidData | ApiError::Transport => LoginError::Unavailable,
        })
}

pub fn register(api: &dyn AuthApi, command: &RegisterCommand) -> Result<(), RegisterError> {
    command.validate()?;

    api.register(&command.username, &command.email, &command.password)
        .map_err(|error| match error {
            ApiError::Rejected { detail, .. } => RegisterError::Rejected { detail },
            ApiError::InvalidData | ApiError::Transport => RegisterError::Unavailable,
        })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct StubAuth {
        login_result: Result<LoginGrant, ApiError>,
        register_result: Result<(), ApiError>,
        captured: RefCell<Vec<String>>,
    }

    impl StubAuth {
        fn new() -> Self {
            Self {
                login_result: Ok(grant("tok-1")),
                register_result: Ok(()),
                captured: RefCell::new(Vec::new()),
            }
        }
    }

    impl AuthApi for StubAuth {
        fn login(&self, username: &str, password: &str) -> Result<LoginGrant, ApiError> {
            self.captured
                .borrow_mut()
                .push(format!("login:{username}:{password}"));
            self.login_result.clone()
        }

        fn register(&self, username: &str, email: &str, _password: &str) -> Result<(), ApiError> {
            self.captured
                .borrow_mut()
                .push(format!("register:{username}:{email}"));
            self.register_result.clone()
        }
    }

    fn grant(token: &str) -> LoginGrant {
        LoginGrant {
            credential: Credential::parse(token).expect("credential"),
            identity: ProfileRecord {
                username: "alice".to_owned(),
                ..ProfileRecord::default()
            },
        }
    }

    fn login_command(username: &str, password: &str) -> LoginCommand {
        LoginCommand {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    #[test]
    fn login_sends_fields_as_typed() {
        let api = StubAuth::new();

        let result = login(&api, &login_command("  alice ", " pw "));

        assert_eq!(result, Ok(grant("tok-1")));
        assert_eq!(*api.captured.borrow(), vec!["login:  alice : pw ".to_owned()]);
    }

    #[test]
    fn login_with_missing_fields_makes_no_call() {
        let api = StubAuth::new();

        assert_eq!(
            login(&api, &login_command("   ", "pw")),
            Err(LoginError::MissingFields)
        );
        assert_eq!(
            login(&api, &login_command("alice", "")),
            Err(LoginError::MissingFields)
        );
        assert!(api.captured.borrow().is_empty());
    }

    #[test]
    fn rejected_login_keeps_server_detail() {
        let mut api = StubAuth::new();
        api.login_result = Err(ApiError::Rejected {
            status: 401,
            detail: Some("Invalid credentials".to_owned()),
        });

        let error = login(&api, &login_command("alice", "bad")).expect_err("must fail");

        assert_eq!(error.user_message(), "Invalid credentials");
    }

    #[test]
    fn login_failures_fall_back_to_generic_messages() {
        assert_eq!(
            LoginError::Rejected { detail: None }.user_message(),
            LOGIN_REJECTED_FALLBACK
        );
        assert_eq!(LoginError::Unavailable.user_message(), LOGIN_UNAVAILABLE);
    }

    #[test]
    fn login_maps_transport_and_contract_errors() {
        let mut api = StubAuth::new();
        api.login_result = Err(ApiError::Transport);
        assert_eq!(
            login(&api, &login_command("a", "b")),
            Err(LoginError::Unavailable)
        );

        api.login_result = Err(ApiError::InvalidData);
        assert_eq!(
            login(&api, &login_command("a", "b")),
            Err(LoginError::Unavailable)
        );
        assert_eq!(
            login(&api, &login_command("a", "b"))
                .expect_err("must fail")
                .user_message(),
            "Login failed. Please try again."
        );
    }

    #[test]
    fn register_sends_fields_as_typed() {
        let api = StubAuth::new();

        let result = register(
            &api,
            &RegisterCommand {
                username: " bob ".to_owned(),
                email: " bob@example.com ".to_owned(),
                password: "pw".to_owned(),
            },
        );

        assert_eq!(result, Ok(()));
        assert_eq!(
            *api.captured.borrow(),
            vec!["register: bob : bob@example.com ".to_owned()]
        );
    }

    #[test]
    fn register_rejection_uses_detail_or_fallback() {
        let mut api = StubAuth::new();
        api.register_result = Err(ApiError::Rejected {
            status: 400,
            detail: Some("Username or email already exists".to_owned()),
        });
        let command = RegisterCommand {
            username: "bob".to_owned(),
            email: "bob@example.com".to_owned(),
            password: "pw".to_owned(),
        };

        let error = register(&api, &command).expect_err("must fail");
        assert_eq!(error.user_message(), "Username or email already exists");

        assert_eq!(
            RegisterError::Rejected { detail: None }.user_message(),
            REGISTER_REJECTED_FALLBACK
        );
        assert_eq!(RegisterError::Unavailable.user_message(), REGISTER_UNAVAILABLE);
    }

    #[test]
    fn command_debug_hides_password() {
        let rendered = format!("{:?}", login_command("alice", "hunter2"));

        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
