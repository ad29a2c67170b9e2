//! Appointment reminders
//!
//! A background worker polls once a minute for appointments starting
//! within the next 15 minutes and emits one notification per
//! appointment. Emitted flags are persisted keyed by appointment id, so
//! a reminder fires once per id even across restarts — rescheduling an
//! appointment after its reminder fired does not re-arm it.
//!
//! Note: redb operations are synchronous for stability.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::models::AppointmentStatus;
use crate::repository::{appointments, clients};
use crate::storage::Storage;
use crate::utils::AppResult;
use crate::utils::time::fmt_time;

const POLL_INTERVAL_SECS: u64 = 60;
const REMINDER_WINDOW_MIN: i64 = 15;

/// A due-appointment notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub appointment_id: String,
    pub title: String,
    pub body: String,
}

/// Scan for appointments due within the reminder window, marking each
/// returned one as emitted.
///
/// Cancelled appointments never remind; appointments already underway
/// (start <= now) are skipped.
pub fn check_due(storage: &Storage, now: DateTime<Utc>) -> AppResult<Vec<Reminder>> {
    let horizon = now + Duration::minutes(REMINDER_WINDOW_MIN);
    let mut due = Vec::new();

    for appointment in appointments::find_all(storage)? {
        if appointment.status == AppointmentStatus::Cancelada {
            continue;
        }
        if appointment.start <= now || appointment.start > horizon {
            continue;
        }
        if storage.is_reminder_sent(&appointment.id)? {
            continue;
        }

        let client_name = clients::find_by_id(storage, &appointment.client_id)?
            .map(|c| c.name)
            .unwrap_or_else(|| "Cliente".into());

        storage.mark_reminder_sent(&appointment.id)?;
        due.push(Reminder {
            appointment_id: appointment.id,
            title: "Cita próxima".into(),
            body: format!("{client_name} — {}", fmt_time(appointment.start)),
        });
    }

    Ok(due)
}

/// Background reminder worker. Emits due reminders over a channel to
/// the UI every poll tick until cancelled.
pub struct ReminderWorker {
    storage: Storage,
    tx: mpsc::UnboundedSender<Reminder>,
}

impl ReminderWorker {
    pub fn new(storage: Storage, tx: mpsc::UnboundedSender<Reminder>) -> Self {
        Self { storage, tx }
    }

    pub async fn run(self, cancel: CancellationToken) {
        info!("ReminderWorker started (interval={POLL_INTERVAL_SECS}s)");
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(POLL_INTERVAL_SECS));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("ReminderWorker shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match check_due(&self.storage, Utc::now()) {
                        Ok(reminders) => {
                            for reminder in reminders {
                                info!(appointment_id = %reminder.appointment_id, "Reminder due: {}", reminder.body);
                                if self.tx.send(reminder).is_err() {
                                    // UI is gone, nothing left to notify
                                    return;
                                }
                            }
                        }
                        Err(e) => error!(error = %e, "Reminder scan failed"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentDraft, ClientDraft};

    fn appointment_at(storage: &Storage, client_id: &str, start: DateTime<Utc>) -> String {
        appointments::create(
            storage,
            AppointmentDraft {
                client_id: client_id.into(),
                services: vec!["srv_1".into()],
                start,
                end: start + Duration::minutes(30),
                note: String::new(),
                status: AppointmentStatus::Pendiente,
            },
        )
        .unwrap()
        .id
    }

    fn client(storage: &Storage, name: &str) -> String {
        clients::create(storage, ClientDraft { name: name.into(), ..Default::default() })
            .unwrap()
            .id
    }

    #[test]
    fn fires_once_within_window() {
        let storage = Storage::open_in_memory().unwrap();
        let cli = client(&storage, "Ana");
        let now = Utc::now();
        let apt = appointment_at(&storage, &cli, now + Duration::minutes(10));

        let due = check_due(&storage, now).unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].appointment_id, apt);
        assert!(due[0].body.starts_with("Ana — "));

        // second scan is silent
        assert!(check_due(&storage, now).unwrap().is_empty());
    }

    #[test]
    fn outside_window_is_quiet() {
        let storage = Storage::open_in_memory().unwrap();
        let cli = client(&storage, "Ana");
        let now = Utc::now();
        appointment_at(&storage, &cli, now + Duration::minutes(20));
        appointment_at(&storage, &cli, now - Duration::minutes(1));

        assert!(check_due(&storage, now).unwrap().is_empty());
    }

    #[test]
    fn cancelled_never_reminds() {
        let storage = Storage::open_in_memory().unwrap();
        let cli = client(&storage, "Ana");
        let now = Utc::now();
        let apt = appointment_at(&storage, &cli, now + Duration::minutes(5));
        appointments::cancel(&storage, &apt).unwrap();

        assert!(check_due(&storage, now).unwrap().is_empty());
    }

    #[test]
    fn deleted_client_falls_back_to_placeholder() {
        let storage = Storage::open_in_memory().unwrap();
        let now = Utc::now();
        appointment_at(&storage, "cli_gone", now + Duration::minutes(5));

        let due = check_due(&storage, now).unwrap();
        assert_eq!(due.len(), 1);
        assert!(due[0].body.starts_with("Cliente — "));
    }

    #[test]
    fn reschedule_after_fire_does_not_rearm() {
        let storage = Storage::open_in_memory().unwrap();
        let cli = client(&storage, "Zoe");
        let now = Utc::now();
        let apt = appointment_at(&storage, &cli, now + Duration::minutes(5));
        assert_eq!(check_due(&storage, now).unwrap().len(), 1);

        // move it a week out, then scan at that time: flag is keyed by id
        let later = now + Duration::days(7);
        let mut a = appointments::get(&storage, &apt).unwrap();
        a.start = later + Duration::minutes(5);
        a.end = a.start + Duration::minutes(30);
        storage.put(crate::storage::Store::Appointments, &a.id, &a).unwrap();

        assert!(check_due(&storage, later).unwrap().is_empty());
    }
}
