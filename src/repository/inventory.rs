//! Inventory Repository

use crate::models::{InventoryDraft, InventoryItem, new_id};
use crate::storage::{Storage, Store};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// All inventory items sorted by name
pub fn find_all(storage: &Storage) -> AppResult<Vec<InventoryItem>> {
    let mut items: Vec<InventoryItem> = storage.get_all(Store::Inventory)?;
    items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(items)
}

pub fn find_by_id(storage: &Storage, id: &str) -> AppResult<Option<InventoryItem>> {
    Ok(storage.get(Store::Inventory, id)?)
}

pub fn get(storage: &Storage, id: &str) -> AppResult<InventoryItem> {
    find_by_id(storage, id)?.ok_or_else(|| AppError::not_found("Producto"))
}

pub fn create(storage: &Storage, draft: InventoryDraft) -> AppResult<InventoryItem> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    let item = InventoryItem {
        id: new_id("stk"),
        name: draft.name.trim().to_string(),
        stock: draft.stock,
        min: draft.min,
    };
    storage.put(Store::Inventory, &item.id, &item)?;
    Ok(item)
}

pub fn update(storage: &Storage, id: &str, draft: InventoryDraft) -> AppResult<InventoryItem> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    let existing = get(storage, id)?;
    let item = InventoryItem {
        id: existing.id,
        name: draft.name.trim().to_string(),
        stock: draft.stock,
        min: draft.min,
    };
    storage.put(Store::Inventory, &item.id, &item)?;
    Ok(item)
}

pub fn delete(storage: &Storage, id: &str) -> AppResult<bool> {
    Ok(storage.delete(Store::Inventory, id)?)
}

/// Adjust stock by a signed delta, clamped at zero
pub fn adjust_stock(storage: &Storage, id: &str, delta: i32) -> AppResult<InventoryItem> {
    let mut item = get(storage, id)?;
    item.stock = item.stock.saturating_add_signed(delta);
    storage.put(Store::Inventory, &item.id, &item)?;
    Ok(item)
}

/// Items at or below their alert threshold
pub fn find_low_stock(storage: &Storage) -> AppResult<Vec<InventoryItem>> {
    Ok(find_all(storage)?.into_iter().filter(|i| i.is_low()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, stock: u32, min: u32) -> InventoryDraft {
        InventoryDraft { name: name.into(), stock, min }
    }

    #[test]
    fn stock_clamps_at_zero() {
        let storage = Storage::open_in_memory().unwrap();
        let item = create(&storage, draft("Tinte rubio", 1, 3)).unwrap();

        let item = adjust_stock(&storage, &item.id, -1).unwrap();
        assert_eq!(item.stock, 0);
        let item = adjust_stock(&storage, &item.id, -1).unwrap();
        assert_eq!(item.stock, 0);
        let item = adjust_stock(&storage, &item.id, 1).unwrap();
        assert_eq!(item.stock, 1);
    }

    #[test]
    fn low_stock_is_at_or_below_min() {
        let storage = Storage::open_in_memory().unwrap();
        create(&storage, draft("Tinte rubio", 3, 3)).unwrap();
        create(&storage, draft("Champú profesional", 12, 5)).unwrap();

        let low = find_low_stock(&storage).unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Tinte rubio");
    }
}
