use crate::{
    domain::{
        profile::ProfileRecord,
        session::{Credential, Session},
    },
    infra::contracts::CredentialStore,
};

const CREDENTIAL_PERSIST_FAILED: &str = "SESSION_CREDENTIAL_PERSIST_FAILED";
const CREDENTIAL_RESTORE_FAILED: &str = "SESSION_CREDENTIAL_RESTORE_FAILED";
const CREDENTIAL_CLEAR_FAILED: &str = "SESSION_CREDENTIAL_CLEAR_FAILED";

/// Owns the in-memory [`Session`] and keeps the persistent store in step.
///
/// Store failures never fail the session operation: memory state is
/// authoritative for the running client and the failure is logged.
#[derive(Debug)]
pub struct SessionManager<S: CredentialStore> {
    session: Session,
    store: S,
}

impl<S: CredentialStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            session: Session::default(),
            store,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.session.credential()
    }

    pub fn identity(&self) -> Option<&ProfileRecord> {
        self.session.identity()
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads a stored credential into an empty session. Returns whether one
    /// was found; it still has to be validated by a profile fetch.
    pub fn restore(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(credential)) => {
                self.session = Session::restored(credential);
                tracing::info!("restored stored credential");
                true
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(
                    code = CREDENTIAL_RESTORE_FAILED,
                    error = %error,
                    "stored credential could not be read"
                );
                false
            }
        }
    }

    pub fn sign_in(&mut self, credential: Credential, identity: ProfileRecord) {
        if let Err(error) = self.store.save(&credential) {
            tracing::warn!(
                code = CREDENTIAL_PERSIST_FAILED,
                error = %error,
                "credential kept in memory only"
            );
        }
        self.session.authenticate(credential, identity);
    }

    /// Accepts a validated identity. Returns false when the session holds no
    /// credential anymore (e.g. logged out while the fetch was in flight).
    pub fn accept_identity(&mut self, identity: ProfileRecord) -> bool {
        self.session.set_identity(identity)
    }

    /// Drops memory and persistent state. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.session.clear();
        match self.store.clear() {
            Ok(removed) => tracing::debug!(removed, "stored credential cleared"),
            Err(error) => tracing::warn!(
                code = CREDENTIAL_CLEAR_FAILED,
                error = %error,
                "stored credential could not be removed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::stubs::MemoryCredentialStore;

    fn identity() -> ProfileRecord {
        ProfileRecord {
            username: "alice".to_owned(),
            ..ProfileRecord::default()
        }
    }

    #[test]
    fn restore_loads_credential_without_identity() {
        let mut manager = SessionManager::new(MemoryCredentialStore::with_credential("tok"));

        assert!(manager.restore());
        assert_eq!(manager.credential().map(Credential::as_str), Some("tok"));
        assert!(manager.identity().is_none());
    }

    #[test]
    fn restore_without_stored_credential_keeps_session_empty() {
        let mut manager = SessionManager::new(MemoryCredentialStore::default());

        assert!(!manager.restore());
        assert_eq!(manager.session(), &Session::default());
    }

    #[test]
    fn sign_in_persists_credential() {
        let mut manager = SessionManager::new(MemoryCredentialStore::default());

        manager.sign_in(Credential::parse("tok-9").expect("credential"), identity());

        assert!(manager.session().is_authenticated());
        assert_eq!(
            manager.store().credential.as_ref().map(Credential::as_str),
            Some("tok-9")
        );
    }

    #[test]
    fn sign_in_survives_store_failure() {
        let store = MemoryCredentialStore {
            fail_writes: true,
            ..MemoryCredentialStore::default()
        };
        let mut manager = SessionManager::new(store);

        manager.sign_in(Credential::parse("tok").expect("credential"), identity());

        assert!(manager.session().is_authenticated());
        assert!(manager.store().credential.is_none());
    }

    #[test]
    fn accept_identity_requires_credential() {
        let mut manager = SessionManager::new(MemoryCredentialStore::default());

        assert!(!manager.accept_identity(identity()));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut manager = SessionManager::new(MemoryCredentialStore::with_credential("tok"));
        manager.restore();

        manager.clear();
        let once = (manager.session().clone(), manager.store().credential.clone());
        manager.clear();

        assert_eq!(
            (manager.session().clone(), manager.store().credential.clone()),
            once
        );
        assert_eq!(once, (Session::default(), None));
    }
}
