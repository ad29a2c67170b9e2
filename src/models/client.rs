//! Client Model

use serde::{Deserialize, Serialize};

/// Client entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
    /// Unused visit history, kept for backup format compatibility
    #[serde(default)]
    pub history: Vec<serde_json::Value>,
}

/// Create/update client payload
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}
