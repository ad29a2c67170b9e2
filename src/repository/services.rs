//! Service Repository

use crate::models::{Service, ServiceDraft, new_id};
use crate::storage::{Storage, Store};
use crate::utils::validation::{
    MAX_DURATION_MIN, MAX_NAME_LEN, MIN_DURATION_MIN, validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// All services sorted by name
pub fn find_all(storage: &Storage) -> AppResult<Vec<Service>> {
    let mut services: Vec<Service> = storage.get_all(Store::Services)?;
    services.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(services)
}

pub fn find_by_id(storage: &Storage, id: &str) -> AppResult<Option<Service>> {
    Ok(storage.get(Store::Services, id)?)
}

pub fn get(storage: &Storage, id: &str) -> AppResult<Service> {
    find_by_id(storage, id)?.ok_or_else(|| AppError::not_found("Servicio"))
}

pub fn create(storage: &Storage, draft: ServiceDraft) -> AppResult<Service> {
    validate(&draft)?;
    let service = Service {
        id: new_id("srv"),
        name: draft.name.trim().to_string(),
        duration: draft.duration,
        price: draft.price,
    };
    storage.put(Store::Services, &service.id, &service)?;
    Ok(service)
}

pub fn update(storage: &Storage, id: &str, draft: ServiceDraft) -> AppResult<Service> {
    validate(&draft)?;
    let existing = get(storage, id)?;
    let service = Service {
        id: existing.id,
        name: draft.name.trim().to_string(),
        duration: draft.duration,
        price: draft.price,
    };
    storage.put(Store::Services, &service.id, &service)?;
    Ok(service)
}

/// Delete a service. Invoice line items keep their snapshotted
/// name/price, appointments keep the dangling id.
pub fn delete(storage: &Storage, id: &str) -> AppResult<bool> {
    Ok(storage.delete(Store::Services, id)?)
}

fn validate(draft: &ServiceDraft) -> AppResult<()> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    if draft.duration < MIN_DURATION_MIN || draft.duration > MAX_DURATION_MIN {
        return Err(AppError::validation(format!(
            "duration must be between {MIN_DURATION_MIN} and {MAX_DURATION_MIN} minutes, got {}",
            draft.duration
        )));
    }
    validate_price(draft.price, "price")?;
    Ok(())
}
