use crate::domain::{profile::ProfileRecord, session::Credential};

use super::contracts::ApiError;

pub trait ProfileSource {
    fn profile(&self, credential: Option<&Credential>) -> Result<ProfileRecord, ApiError>;
}

impl<T> ProfileSource for &T
where
    T: ProfileSource + ?Sized,
{
    fn profile(&self, credential: Option<&Credential>) -> Result<ProfileRecord, ApiError> {
        (*self).profile(credential)
    }
}

/// Any of these means the credential can no longer be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    Rejected { status: u16 },
    Unavailable,
    DataContractViolation,
}

/// Fetches the account profile. Doubles as the validity check for a stored
/// credential: there is no separate verification endpoint.
pub fn fetch_profile(
    source: &dyn ProfileSource,
    credential: Option<&Credential>,
) -> Result<ProfileRecord, ProfileError> {
    source.profile(credential).map_err(|error| match error {
        ApiError::Rejected { status, .. } => ProfileError::Rejected { status },
        ApiError::Transport => ProfileError::Unavailable,
        ApiError::InvalidData => ProfileError::DataContractViolation,
    })
}
