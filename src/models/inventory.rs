//! Inventory Model

use serde::{Deserialize, Serialize};

/// Inventory item — `min` is the low-stock alert threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub stock: u32,
    pub min: u32,
}

impl InventoryItem {
    /// Low-stock flag used by the dashboard and the inventory view
    pub fn is_low(&self) -> bool {
        self.stock <= self.min
    }
}

/// Create/update inventory payload
#[derive(Debug, Clone)]
pub struct InventoryDraft {
    pub name: String,
    pub stock: u32,
    pub min: u32,
}
