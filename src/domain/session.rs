use std::fmt;

use super::profile::ProfileRecord;

/// Opaque bearer token. Never printed through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank input so an empty store entry never becomes a
    /// credential.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Client-held authentication state.
///
/// `identity` is only ever set while a credential is present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    credential: Option<Credential>,
    identity: Option<ProfileRecord>,
}

impl Session {
    /// A session restored from storage: credential known, not yet validated.
    pub fn restored(credential: Credential) -> Self {
        Self {
            credential: Some(credential),
            identity: None,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn identity(&self) -> Option<&ProfileRecord> {
        self.identity.as_ref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some() && self.identity.is_some()
    }

    pub fn authenticate(&mut self, credential: Credential, identity: ProfileRecord) {
        self.credential = Some(credential);
        self.identity = Some(identity);
    }

    /// Stores a validated identity. Ignored when no credential is held.
    pub fn set_identity(&mut self, identity: ProfileRecord) -> bool {
        if !self.has_credential() {
            return false;
        }

        self.identity = Some(identity);
        true
    }

    pub fn clear(&mut self) {
        self.credential = None;
        self.identity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str) -> ProfileRecord {
        ProfileRecord {
            username: username.to_owned(),
            ..ProfileRecord::default()
        }
    }

    #[test]
    fn credential_parse_rejects_blank_input() {
        assert_eq!(Credential::parse("   \n"), None);
        assert_eq!(
            Credential::parse(" tok-1 \n").map(|c| c.as_str().to_owned()),
            Some("tok-1".to_owned())
        );
    }

    #[test]
    fn credential_debug_does_not_leak_token() {
        let credential = Credential::parse("secret-token-42").expect("credential");

        assert!(!format!("{credential:?}").contains("secret-token-42"));
    }

    #[test]
    fn identity_requires_credential() {
        let mut session = Session::default();

        assert!(!session.set_identity(profile("alice")));
        assert!(session.identity().is_none());
    }

    #[test]
    fn restored_session_is_not_authenticated_until_identity_is_set() {
        let credential = Credential::parse("tok").expect("credential");
        let mut session = Session::restored(credential);

        assert!(session.has_credential());
        assert!(!session.is_authenticated());

        assert!(session.set_identity(profile("alice")));
        assert!(session.is_authenticated());
    }

    #[test]
    fn clear_drops_credential_and_identity() {
        let mut session = Session::default();
        session.authenticate(Credential::parse("tok").expect("credential"), profile("a"));

        session.clear();

        assert_eq!(session, Session::default());
    }
}
