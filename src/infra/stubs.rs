use anyhow::{anyhow, Result};

use crate::{domain::session::Credential, infra::contracts::CredentialStore};

/// In-memory credential store with switchable write failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    pub credential: Option<Credential>,
    pub fail_writes: bool,
    pub saves: usize,
}

impl MemoryCredentialStore {
    pub fn with_credential(raw: &str) -> Self {
        Self {
            credential: Credential::parse(raw),
            ..Self::default()
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.credential.clone())
    }

    fn save(&mut self, credential: &Credential) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("credential store is read-only"));
        }
        self.saves += 1;
        self.credential = Some(credential.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<bool> {
        if self.fail_writes {
            return Err(anyhow!("credential store is read-only"));
        }
        Ok(self.credential.take().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_clears() {
        let mut store = MemoryCredentialStore::default();
        let credential = Credential::parse("tok").expect("credential");

        store.save(&credential).expect("save");
        assert_eq!(store.load().expect("load"), Some(credential));
        assert!(store.clear().expect("clear"));
        assert!(!store.clear().expect("clear again"));
    }
}
