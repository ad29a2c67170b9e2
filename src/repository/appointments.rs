//! Appointment Repository

use chrono::{DateTime, Utc};

use crate::models::{Appointment, AppointmentDraft, AppointmentStatus, new_id};
use crate::storage::{Storage, Store};
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// All appointments sorted by start time
pub fn find_all(storage: &Storage) -> AppResult<Vec<Appointment>> {
    let mut appointments: Vec<Appointment> = storage.get_all(Store::Appointments)?;
    appointments.sort_by_key(|a| a.start);
    Ok(appointments)
}

pub fn find_by_id(storage: &Storage, id: &str) -> AppResult<Option<Appointment>> {
    Ok(storage.get(Store::Appointments, id)?)
}

pub fn get(storage: &Storage, id: &str) -> AppResult<Appointment> {
    find_by_id(storage, id)?.ok_or_else(|| AppError::not_found("Cita"))
}

/// Appointments whose start falls within `[from, to)`, sorted by start.
/// Selection is by start only: one that begins before `from` and runs
/// into the range is not included.
pub fn find_in_range(
    storage: &Storage,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<Vec<Appointment>> {
    let mut hits: Vec<Appointment> = storage
        .get_all::<Appointment>(Store::Appointments)?
        .into_iter()
        .filter(|a| a.start >= from && a.start < to)
        .collect();
    hits.sort_by_key(|a| a.start);
    Ok(hits)
}

pub fn create(storage: &Storage, draft: AppointmentDraft) -> AppResult<Appointment> {
    validate(&draft)?;
    let appointment = Appointment {
        id: new_id("apt"),
        client_id: draft.client_id,
        services: draft.services,
        start: draft.start,
        end: draft.end,
        note: draft.note,
        status: draft.status,
    };
    storage.put(Store::Appointments, &appointment.id, &appointment)?;
    Ok(appointment)
}

pub fn update(storage: &Storage, id: &str, draft: AppointmentDraft) -> AppResult<Appointment> {
    validate(&draft)?;
    let existing = get(storage, id)?;
    let appointment = Appointment {
        id: existing.id,
        client_id: draft.client_id,
        services: draft.services,
        start: draft.start,
        end: draft.end,
        note: draft.note,
        status: draft.status,
    };
    storage.put(Store::Appointments, &appointment.id, &appointment)?;
    Ok(appointment)
}

/// Mark an appointment as cancelled. The record is kept and keeps
/// showing up on the calendar; only the status changes.
pub fn cancel(storage: &Storage, id: &str) -> AppResult<Appointment> {
    let mut appointment = get(storage, id)?;
    appointment.status = AppointmentStatus::Cancelada;
    storage.put(Store::Appointments, &appointment.id, &appointment)?;
    Ok(appointment)
}

pub fn delete(storage: &Storage, id: &str) -> AppResult<bool> {
    Ok(storage.delete(Store::Appointments, id)?)
}

fn validate(draft: &AppointmentDraft) -> AppResult<()> {
    if draft.client_id.is_empty() || draft.services.is_empty() {
        return Err(AppError::validation("Cliente y servicios son requeridos"));
    }
    if draft.end <= draft.start {
        return Err(AppError::validation("end must be after start"));
    }
    validate_optional_text(&draft.note, "note", MAX_NOTE_LEN)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn draft(start: DateTime<Utc>) -> AppointmentDraft {
        AppointmentDraft {
            client_id: "cli_1".into(),
            services: vec!["srv_1".into()],
            start,
            end: start + Duration::minutes(30),
            note: String::new(),
            status: AppointmentStatus::Pendiente,
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn requires_client_and_services() {
        let storage = Storage::open_in_memory().unwrap();
        let mut d = draft(at(10));
        d.client_id = String::new();
        assert!(create(&storage, d).is_err());

        let mut d = draft(at(10));
        d.services.clear();
        assert!(create(&storage, d).is_err());
    }

    #[test]
    fn rejects_inverted_times() {
        let storage = Storage::open_in_memory().unwrap();
        let mut d = draft(at(10));
        d.end = d.start - Duration::minutes(5);
        assert!(create(&storage, d).is_err());
    }

    #[test]
    fn range_selects_by_start_half_open() {
        let storage = Storage::open_in_memory().unwrap();
        create(&storage, draft(at(9))).unwrap();
        let in_range = create(&storage, draft(at(12))).unwrap();
        create(&storage, draft(at(18))).unwrap();

        let hits = find_in_range(&storage, at(10), at(18)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, in_range.id);
    }

    #[test]
    fn cancel_keeps_record() {
        let storage = Storage::open_in_memory().unwrap();
        let a = create(&storage, draft(at(10))).unwrap();
        let cancelled = cancel(&storage, &a.id).unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelada);
        assert_eq!(find_all(&storage).unwrap().len(), 1);
    }
}
