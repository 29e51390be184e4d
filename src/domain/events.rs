use crate::usecases::requests::ApiCompletion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    RequestCompleted(ApiCompletion),
}

/// Key press in a terminal-independent form. Printable keys carry the
/// character itself; others use lowercase names such as `enter` or `tab`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }

    /// The typed character, when this is a plain printable key.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl {
            return None;
        }

        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_only_for_single_char_without_ctrl() {
        assert_eq!(KeyInput::new("a", false).printable(), Some('a'));
        assert_eq!(KeyInput::new("a", true).printable(), None);
        assert_eq!(KeyInput::new("enter", false).printable(), None);
        assert_eq!(KeyInput::new(" ", false).printable(), Some(' '));
    }
}
