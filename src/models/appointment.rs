//! Appointment Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Appointment status. Wire values keep the original Spanish strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pendiente,
    Confirmada,
    Cancelada,
}

impl AppointmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::Confirmada => "confirmada",
            Self::Cancelada => "cancelada",
        }
    }
}

/// Appointment entity
///
/// `client_id` and `services` are plain references, not foreign keys:
/// dangling ids are tolerated and rendered as "—".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub services: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Create/update appointment payload
#[derive(Debug, Clone)]
pub struct AppointmentDraft {
    pub client_id: String,
    pub services: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub note: String,
    pub status: AppointmentStatus,
}
