//! iCalendar export
//!
//! Minimal single-event VCALENDAR for handing an appointment to an
//! external calendar. Lines are CRLF-joined per RFC 5545; timestamps
//! are UTC in `YYYYMMDDTHHMMSSZ` form.

use chrono::{DateTime, Utc};

use crate::models::Appointment;

const PRODID: &str = "-//Salon SPA//ES";

/// Format a UTC instant as an ICS timestamp
pub fn ics_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Render a single-event calendar document for an appointment.
/// `stamp` becomes DTSTAMP (the caller passes the current time).
pub fn appointment_ics(appointment: &Appointment, stamp: DateTime<Utc>) -> String {
    [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", appointment.id),
        format!("DTSTAMP:{}", ics_timestamp(stamp)),
        format!("DTSTART:{}", ics_timestamp(appointment.start)),
        format!("DTEND:{}", ics_timestamp(appointment.end)),
        "SUMMARY:Cita de salón".to_string(),
        format!("DESCRIPTION:{}", appointment.note),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]
    .join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::TimeZone;

    fn appointment() -> Appointment {
        Appointment {
            id: "apt_test".into(),
            client_id: "cli_1".into(),
            services: vec!["srv_1".into()],
            start: Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 3, 10, 9, 30, 0).unwrap(),
            note: "Coloración".into(),
            status: AppointmentStatus::Confirmada,
        }
    }

    #[test]
    fn timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 10, 9, 5, 0).unwrap();
        assert_eq!(ics_timestamp(ts), "20260310T090500Z");
    }

    #[test]
    fn event_fields_and_crlf() {
        let stamp = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let ics = appointment_ics(&appointment(), stamp);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.contains("UID:apt_test\r\n"));
        assert!(ics.contains("DTSTAMP:20260301T120000Z\r\n"));
        assert!(ics.contains("DTSTART:20260310T090000Z\r\n"));
        assert!(ics.contains("DTEND:20260310T093000Z\r\n"));
        assert!(ics.contains("DESCRIPTION:Coloración\r\n"));
        assert!(ics.ends_with("END:VEVENT\r\nEND:VCALENDAR"));
        assert!(!ics.contains('\n') || ics.matches('\n').count() == ics.matches("\r\n").count());
    }
}
