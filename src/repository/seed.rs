//! Demo data seeding
//!
//! First launch (and the "reset demo" action) populates the database
//! with a small but complete data set: two clients, three services, two
//! inventory items, one confirmed appointment today and one paid
//! invoice, with the counter already advanced past it.

use chrono::{Local, Utc};
use tracing::info;

use crate::models::{
    Appointment, AppointmentStatus, Client, Counter, InventoryItem, Invoice, InvoiceItem,
    SETTINGS_ID, Service, Settings, Theme, new_id,
};
use crate::storage::{Storage, Store};
use crate::utils::AppResult;
use crate::utils::time::parse_local_datetime;

/// Seed demo data unless clients already exist. Returns true if the
/// seed ran.
pub fn seed_if_empty(storage: &Storage) -> AppResult<bool> {
    if storage.count(Store::Clients)? > 0 {
        return Ok(false);
    }

    let clients = vec![
        Client {
            id: new_id("cli"),
            name: "Ana Pérez".into(),
            phone: "34600111222".into(),
            email: "ana@example.com".into(),
            notes: "Coloración habitual".into(),
            history: Vec::new(),
        },
        Client {
            id: new_id("cli"),
            name: "Bruno García".into(),
            phone: "34600999888".into(),
            email: "bruno@example.com".into(),
            notes: "Cabello rizado".into(),
            history: Vec::new(),
        },
    ];
    let services = vec![
        Service { id: new_id("srv"), name: "Corte".into(), duration: 30, price: 18.0 },
        Service { id: new_id("srv"), name: "Color".into(), duration: 60, price: 35.0 },
        Service { id: new_id("srv"), name: "Peinado".into(), duration: 30, price: 15.0 },
    ];
    let inventory = vec![
        InventoryItem { id: new_id("stk"), name: "Tinte rubio".into(), stock: 6, min: 3 },
        InventoryItem { id: new_id("stk"), name: "Champú profesional".into(), stock: 12, min: 5 },
    ];

    let today = Local::now().date_naive();
    let appointment = Appointment {
        id: new_id("apt"),
        client_id: clients[0].id.clone(),
        services: vec![services[0].id.clone(), services[2].id.clone()],
        start: parse_local_datetime(&format!("{today} 10:00"))?,
        end: parse_local_datetime(&format!("{today} 10:30"))?,
        note: "—".into(),
        status: AppointmentStatus::Confirmada,
    };

    let invoice = Invoice {
        id: new_id("invx"),
        number: 1,
        date: Utc::now(),
        client_id: clients[0].id.clone(),
        items: vec![
            InvoiceItem {
                service_id: services[0].id.clone(),
                name: "Corte".into(),
                qty: 1,
                price: 18.0,
            },
            InvoiceItem {
                service_id: services[2].id.clone(),
                name: "Peinado".into(),
                qty: 1,
                price: 15.0,
            },
        ],
        tax: 0.21,
        paid: true,
    };

    let settings = Settings {
        id: SETTINGS_ID.into(),
        currency: "EUR".into(),
        theme: Theme::Dark,
        logo_data_url: Some("assets/logo.svg".into()),
        work_hours: Default::default(),
    };

    for c in &clients {
        storage.put(Store::Clients, &c.id, c)?;
    }
    for s in &services {
        storage.put(Store::Services, &s.id, s)?;
    }
    for p in &inventory {
        storage.put(Store::Inventory, &p.id, p)?;
    }
    storage.put(Store::Appointments, &appointment.id, &appointment)?;
    storage.put(Store::Invoices, &invoice.id, &invoice)?;
    // the seeded invoice is #1, so the counter hands out 2 next
    storage.put(Store::Counters, "invoice", &Counter { id: "invoice".into(), value: 2 })?;
    storage.put(Store::Settings, SETTINGS_ID, &settings)?;

    info!("Seeded demo data");
    Ok(true)
}

/// Wipe every collection and re-seed the demo data set
pub fn reset_demo(storage: &Storage) -> AppResult<()> {
    for store in Store::ALL {
        storage.clear(store)?;
    }
    seed_if_empty(storage)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{invoices, settings as settings_repo};

    #[test]
    fn seed_runs_once() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(seed_if_empty(&storage).unwrap());
        assert!(!seed_if_empty(&storage).unwrap());
        assert_eq!(storage.count(Store::Clients).unwrap(), 2);
        assert_eq!(storage.count(Store::Services).unwrap(), 3);
    }

    #[test]
    fn seed_advances_counter_past_demo_invoice() {
        let storage = Storage::open_in_memory().unwrap();
        seed_if_empty(&storage).unwrap();

        let next = invoices::create(
            &storage,
            crate::models::InvoiceDraft {
                client_id: "cli_x".into(),
                date: Utc::now(),
                items: Vec::new(),
                tax: 0.0,
                paid: false,
            },
        )
        .unwrap();
        assert_eq!(next.number, 2);
    }

    #[test]
    fn reset_restores_demo_state() {
        let storage = Storage::open_in_memory().unwrap();
        seed_if_empty(&storage).unwrap();
        crate::repository::clients::create(
            &storage,
            crate::models::ClientDraft { name: "Extra".into(), ..Default::default() },
        )
        .unwrap();
        assert_eq!(storage.count(Store::Clients).unwrap(), 3);

        reset_demo(&storage).unwrap();
        assert_eq!(storage.count(Store::Clients).unwrap(), 2);
        assert_eq!(settings_repo::load(&storage).unwrap().currency, "EUR");
    }
}
