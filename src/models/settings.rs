//! Settings Model
//!
//! Singleton record with a fixed id. Loaded as an immutable snapshot that
//! is passed to render functions and reloaded after the settings form
//! saves — no ambient mutable globals.

use serde::{Deserialize, Serialize};

/// Fixed id of the settings singleton
pub const SETTINGS_ID: &str = "app_settings";

/// UI theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Configured daily work window and active weekdays (1=Mon .. 7=Sun).
/// Context for scheduling only — not enforced against appointment creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkHours {
    pub from: String,
    pub to: String,
    pub days: Vec<u8>,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            from: "09:00".into(),
            to: "18:00".into(),
            days: vec![1, 2, 3, 4, 5, 6],
        }
    }
}

/// Application settings singleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,
    pub currency: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(rename = "logoDataUrl", default)]
    pub logo_data_url: Option<String>,
    #[serde(rename = "workHours", default)]
    pub work_hours: WorkHours,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ID.into(),
            currency: "USD".into(),
            theme: Theme::Dark,
            logo_data_url: None,
            work_hours: WorkHours::default(),
        }
    }
}
