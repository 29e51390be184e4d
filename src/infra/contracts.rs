use anyhow::Result;

use crate::{domain::session::Credential, infra::config::AppConfig};

pub trait ConfigAdapter {
    fn load(&self) -> Result<AppConfig>;
}

/// Persistent home of the bearer credential between runs.
pub trait CredentialStore {
    fn load(&self) -> Result<Option<Credential>>;
    fn save(&mut self, credential: &Credential) -> Result<()>;
    /// Returns whether a stored credential was actually removed.
    fn clear(&mut self) -> Result<bool>;
}
