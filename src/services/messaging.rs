//! WhatsApp confirmation links

use urlencoding::encode;

use crate::models::{Appointment, Client};
use crate::utils::time::{fmt_date, fmt_time};

/// Build a `wa.me` deep link with a pre-filled confirmation message,
/// or None when the client has no phone number.
pub fn whatsapp_link(client: &Client, appointment: &Appointment) -> Option<String> {
    if client.phone.trim().is_empty() {
        return None;
    }
    let message = format!(
        "Hola {}, confirmamos tu cita el {} a las {}.",
        client.name,
        fmt_date(appointment.start),
        fmt_time(appointment.start)
    );
    Some(format!("https://wa.me/{}?text={}", client.phone, encode(&message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use chrono::{TimeZone, Utc};

    fn fixtures() -> (Client, Appointment) {
        let client = Client {
            id: "cli_1".into(),
            name: "Ana Pérez".into(),
            phone: "34600111222".into(),
            email: String::new(),
            notes: String::new(),
            history: Vec::new(),
        };
        let start = Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap();
        let appointment = Appointment {
            id: "apt_1".into(),
            client_id: client.id.clone(),
            services: vec!["srv_1".into()],
            start,
            end: start + chrono::Duration::minutes(30),
            note: String::new(),
            status: AppointmentStatus::Confirmada,
        };
        (client, appointment)
    }

    #[test]
    fn link_targets_phone_with_encoded_message() {
        let (client, appointment) = fixtures();
        let link = whatsapp_link(&client, &appointment).unwrap();
        assert!(link.starts_with("https://wa.me/34600111222?text="));
        assert!(link.contains("Hola%20Ana%20P%C3%A9rez"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn no_phone_no_link() {
        let (mut client, appointment) = fixtures();
        client.phone = "  ".into();
        assert!(whatsapp_link(&client, &appointment).is_none());
    }
}
