//! Settings Repository
//!
//! The settings record is a singleton under a fixed id. Loads fall back
//! to defaults so the app always has a usable snapshot.

use crate::models::{SETTINGS_ID, Settings};
use crate::storage::{Storage, Store};
use crate::utils::AppResult;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};

/// Load the settings snapshot, defaulting when none is stored yet
pub fn load(storage: &Storage) -> AppResult<Settings> {
    Ok(storage.get(Store::Settings, SETTINGS_ID)?.unwrap_or_default())
}

/// Persist settings. The id is forced to the singleton id, whatever
/// the caller put in the struct.
pub fn save(storage: &Storage, mut settings: Settings) -> AppResult<Settings> {
    validate_required_text(&settings.currency, "currency", MAX_SHORT_TEXT_LEN)?;
    settings.id = SETTINGS_ID.into();
    storage.put(Store::Settings, SETTINGS_ID, &settings)?;
    Ok(settings)
}
