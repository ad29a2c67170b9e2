//! Entity models
//!
//! Flat records, one module per collection. Serde renames pin the on-disk
//! JSON to the original backup format (camelCase references), so exported
//! files remain interchangeable with earlier data.

pub mod appointment;
pub mod client;
pub mod counter;
pub mod inventory;
pub mod invoice;
pub mod service;
pub mod settings;

pub use appointment::{Appointment, AppointmentDraft, AppointmentStatus};
pub use client::{Client, ClientDraft};
pub use counter::Counter;
pub use inventory::{InventoryDraft, InventoryItem};
pub use invoice::{Invoice, InvoiceDraft, InvoiceItem};
pub use service::{Service, ServiceDraft};
pub use settings::{SETTINGS_ID, Settings, Theme, WorkHours};

use uuid::Uuid;

/// Generate a prefixed record id, e.g. `cli_6f9e...`
pub fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_are_unique() {
        let a = new_id("cli");
        let b = new_id("cli");
        assert!(a.starts_with("cli_"));
        assert_ne!(a, b);
    }
}
