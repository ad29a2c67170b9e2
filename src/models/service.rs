//! Service Model

use serde::{Deserialize, Serialize};

/// Service entity (duration in minutes, price in the configured currency)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration: u32,
    pub price: f64,
}

/// Create/update service payload
#[derive(Debug, Clone)]
pub struct ServiceDraft {
    pub name: String,
    pub duration: u32,
    pub price: f64,
}
