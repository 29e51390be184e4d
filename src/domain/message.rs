/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    /// Maps a role name from the history payload. Anything that is not the
    /// user is the support bot (older servers send `assistant`).
    pub fn from_wire(role: &str) -> Self {
        if role.eq_ignore_ascii_case("user") {
            Self::User
        } else {
            Self::Bot
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Bot => "Bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_wire_recognizes_user_case_insensitively() {
        assert_eq!(ChatRole::from_wire("user"), ChatRole::User);
        assert_eq!(ChatRole::from_wire("User"), ChatRole::User);
    }

    #[test]
    fn from_wire_treats_other_roles_as_bot() {
        assert_eq!(ChatRole::from_wire("bot"), ChatRole::Bot);
        assert_eq!(ChatRole::from_wire("assistant"), ChatRole::Bot);
    }

    #[test]
    fn constructors_set_role() {
        assert_eq!(ChatMessage::user("hi").role, ChatRole::User);
        assert_eq!(ChatMessage::bot("hello").role, ChatRole::Bot);
    }
}
