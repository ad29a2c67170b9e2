//! Invoice Repository
//!
//! Numbering: the `counters/invoice` record holds the next number to
//! hand out. Creation consumes it, edits keep the stored number, and a
//! deleted invoice leaves a permanent gap in the sequence.

use crate::models::{Counter, Invoice, InvoiceDraft, new_id};
use crate::storage::{Storage, Store};
use crate::utils::validation::{validate_price, validate_tax_rate};
use crate::utils::{AppError, AppResult};

const INVOICE_COUNTER_ID: &str = "invoice";

/// All invoices sorted by number, newest first
pub fn find_all(storage: &Storage) -> AppResult<Vec<Invoice>> {
    let mut invoices: Vec<Invoice> = storage.get_all(Store::Invoices)?;
    invoices.sort_by(|a, b| b.number.cmp(&a.number));
    Ok(invoices)
}

pub fn find_by_id(storage: &Storage, id: &str) -> AppResult<Option<Invoice>> {
    Ok(storage.get(Store::Invoices, id)?)
}

pub fn get(storage: &Storage, id: &str) -> AppResult<Invoice> {
    find_by_id(storage, id)?.ok_or_else(|| AppError::not_found("Factura"))
}

pub fn create(storage: &Storage, draft: InvoiceDraft) -> AppResult<Invoice> {
    validate(&draft)?;
    let number = next_number(storage)?;
    let invoice = Invoice {
        id: new_id("invx"),
        number,
        date: draft.date,
        client_id: draft.client_id,
        items: draft.items,
        tax: draft.tax,
        paid: draft.paid,
    };
    storage.put(Store::Invoices, &invoice.id, &invoice)?;
    Ok(invoice)
}

/// Update an invoice in place. The number is never reassigned.
pub fn update(storage: &Storage, id: &str, draft: InvoiceDraft) -> AppResult<Invoice> {
    validate(&draft)?;
    let existing = get(storage, id)?;
    let invoice = Invoice {
        id: existing.id,
        number: existing.number,
        date: draft.date,
        client_id: draft.client_id,
        items: draft.items,
        tax: draft.tax,
        paid: draft.paid,
    };
    storage.put(Store::Invoices, &invoice.id, &invoice)?;
    Ok(invoice)
}

/// Set the paid flag, leaving everything else untouched
pub fn set_paid(storage: &Storage, id: &str, paid: bool) -> AppResult<Invoice> {
    let mut invoice = get(storage, id)?;
    invoice.paid = paid;
    storage.put(Store::Invoices, &invoice.id, &invoice)?;
    Ok(invoice)
}

/// Delete an invoice. The counter is not decremented: its number is
/// gone for good.
pub fn delete(storage: &Storage, id: &str) -> AppResult<bool> {
    Ok(storage.delete(Store::Invoices, id)?)
}

/// Consume the next invoice number, initializing the counter at 1 if
/// it does not exist yet.
fn next_number(storage: &Storage) -> AppResult<u64> {
    let counter: Option<Counter> = storage.get(Store::Counters, INVOICE_COUNTER_ID)?;
    let mut counter = counter.unwrap_or(Counter { id: INVOICE_COUNTER_ID.into(), value: 1 });
    let number = counter.value;
    counter.value = number + 1;
    storage.put(Store::Counters, INVOICE_COUNTER_ID, &counter)?;
    Ok(number)
}

fn validate(draft: &InvoiceDraft) -> AppResult<()> {
    if draft.client_id.is_empty() {
        return Err(AppError::validation("Seleccione cliente"));
    }
    validate_tax_rate(draft.tax)?;
    for item in &draft.items {
        validate_price(item.price, "item price")?;
        if item.qty == 0 {
            return Err(AppError::validation("item quantity must be at least 1"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceItem;
    use chrono::Utc;

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            client_id: "cli_1".into(),
            date: Utc::now(),
            items: vec![InvoiceItem {
                service_id: "srv_1".into(),
                name: "Corte".into(),
                qty: 1,
                price: 18.0,
            }],
            tax: 0.21,
            paid: false,
        }
    }

    #[test]
    fn numbers_are_sequential_from_one() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(create(&storage, draft()).unwrap().number, 1);
        assert_eq!(create(&storage, draft()).unwrap().number, 2);
        assert_eq!(create(&storage, draft()).unwrap().number, 3);
    }

    #[test]
    fn update_keeps_number() {
        let storage = Storage::open_in_memory().unwrap();
        let first = create(&storage, draft()).unwrap();
        create(&storage, draft()).unwrap();

        let mut edited = draft();
        edited.paid = true;
        let updated = update(&storage, &first.id, edited).unwrap();
        assert_eq!(updated.number, 1);
        assert!(updated.paid);

        // counter untouched by the edit
        assert_eq!(create(&storage, draft()).unwrap().number, 3);
    }

    #[test]
    fn set_paid_flips_only_the_flag() {
        let storage = Storage::open_in_memory().unwrap();
        let invoice = create(&storage, draft()).unwrap();
        assert!(!invoice.paid);

        let toggled = set_paid(&storage, &invoice.id, true).unwrap();
        assert!(toggled.paid);
        assert_eq!(toggled.number, invoice.number);
        assert_eq!(toggled.items.len(), invoice.items.len());

        // counter untouched by the toggle
        assert_eq!(create(&storage, draft()).unwrap().number, 2);
    }

    #[test]
    fn delete_leaves_gap() {
        let storage = Storage::open_in_memory().unwrap();
        let first = create(&storage, draft()).unwrap();
        delete(&storage, &first.id).unwrap();
        assert_eq!(create(&storage, draft()).unwrap().number, 2);
    }

    #[test]
    fn rejects_missing_client_and_zero_qty() {
        let storage = Storage::open_in_memory().unwrap();
        let mut d = draft();
        d.client_id = String::new();
        assert!(create(&storage, d).is_err());

        let mut d = draft();
        d.items[0].qty = 0;
        assert!(create(&storage, d).is_err());
    }
}
