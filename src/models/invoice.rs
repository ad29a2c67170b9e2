//! Invoice Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invoice line item — a snapshot of the service name/price at creation
/// time, so later service edits do not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    pub name: String,
    pub qty: u32,
    pub price: f64,
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// Sequential number, assigned once at creation and never reassigned
    pub number: u64,
    pub date: DateTime<Utc>,
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub items: Vec<InvoiceItem>,
    /// Tax rate as a fraction (0.21 = 21%)
    pub tax: f64,
    pub paid: bool,
}

/// Create/update invoice payload. The number is not part of the draft:
/// creation consumes the counter, edits keep the stored number.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub client_id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
    pub tax: f64,
    pub paid: bool,
}
