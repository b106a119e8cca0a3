use crate::domain::traits::UserTraits;
use crate::repository::{StorageReader, StorageWriter, USER_TRAITS_KEY};

use super::{ServiceError, ServiceResult};

/// Read the stored style profile, falling back to an empty profile when the
/// record is missing or malformed.
pub fn load_user_traits<R>(repo: &R) -> UserTraits
where
    R: StorageReader,
{
    match repo.get_entry(USER_TRAITS_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::error!("Failed to parse user traits: {e}");
            UserTraits::default()
        }),
        Ok(None) => UserTraits::default(),
        Err(e) => {
            log::error!("Failed to read user traits: {e}");
            UserTraits::default()
        }
    }
}

/// Overwrite the stored style profile.
pub fn save_user_traits<R>(traits: &UserTraits, repo: &R) -> ServiceResult<()>
where
    R: StorageWriter,
{
    let raw = serde_json::to_string(traits).map_err(|e| {
        log::error!("Failed to serialize user traits: {e}");
        ServiceError::Internal
    })?;

    match repo.put_entry(USER_TRAITS_KEY, &raw) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to persist user traits: {e}");
            Err(ServiceError::Storage(e.to_string()))
        }
    }
}
