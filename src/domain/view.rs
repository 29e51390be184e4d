/// Top-level panel of the client. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Chat,
    Profile,
}

impl View {
    pub const ALL: [View; 4] = [View::Login, View::Register, View::Chat, View::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Chat => "Support Chat",
            Self::Profile => "Account Information",
        }
    }

    /// Views that are reachable without an authenticated session.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }
}
