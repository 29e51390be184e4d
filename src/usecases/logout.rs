use crate::infra::{
    contracts::CredentialStore, credential_store::FileCredentialStore,
    storage_layout::StorageLayout,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub credential_removed: bool,
}

/// Removes the stored credential from the default storage location.
pub fn logout_stored_credential() -> anyhow::Result<LogoutOutcome> {
    let layout = StorageLayout::resolve()?;
    let mut store = FileCredentialStore::from_layout(&layout);
    clear_credential(&mut store)
}

/// Idempotent: a store without a credential is already logged out.
pub fn clear_credential<S: CredentialStore>(store: &mut S) -> anyhow::Result<LogoutOutcome> {
    let credential_removed = store.clear()?;
    Ok(LogoutOutcome { credential_removed })
}
