use chrono::{Duration, Local, Utc};
use salondesk::calendar::{Calendar, CalendarView};
use salondesk::models::{AppointmentDraft, AppointmentStatus, InvoiceDraft, InvoiceItem};
use salondesk::repository::{appointments, clients, invoices, search, services};
use salondesk::services::{backup, reminder};
use salondesk::{AppState, Config, Store};

fn demo_state(dir: &tempfile::TempDir) -> AppState {
    let config = Config::with_work_dir(dir.path().to_string_lossy());
    AppState::initialize(config).unwrap()
}

#[test]
fn first_launch_seeds_and_numbers_continue() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir);

    // 1. Seeded data set
    let all_clients = clients::find_all(&state.storage).unwrap();
    assert_eq!(all_clients.len(), 2);
    assert_eq!(all_clients[0].name, "Ana Pérez");
    assert_eq!(services::find_all(&state.storage).unwrap().len(), 3);

    // 2. The seed ships invoice #1; the next created invoice is #2
    let ana = &all_clients[0];
    let all_services = services::find_all(&state.storage).unwrap();
    let corte = all_services.iter().find(|s| s.name == "Corte").unwrap();
    let invoice = invoices::create(
        &state.storage,
        InvoiceDraft {
            client_id: ana.id.clone(),
            date: Utc::now(),
            items: vec![InvoiceItem {
                service_id: corte.id.clone(),
                name: corte.name.clone(),
                qty: 1,
                price: corte.price,
            }],
            tax: 0.21,
            paid: false,
        },
    )
    .unwrap();
    assert_eq!(invoice.number, 2);

    // 3. Deleting it leaves a gap
    invoices::delete(&state.storage, &invoice.id).unwrap();
    let next = invoices::create(
        &state.storage,
        InvoiceDraft {
            client_id: ana.id.clone(),
            date: Utc::now(),
            items: vec![InvoiceItem {
                service_id: corte.id.clone(),
                name: corte.name.clone(),
                qty: 2,
                price: corte.price,
            }],
            tax: 0.21,
            paid: true,
        },
    )
    .unwrap();
    assert_eq!(next.number, 3);
}

#[test]
fn backup_roundtrip_restores_deleted_records() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir);

    let path = state.config.exports_dir().join(backup::default_filename());
    backup::export_to_file(&state.storage, &path).unwrap();

    // delete a seeded client, then import the snapshot back
    let ana = clients::find_all(&state.storage).unwrap()[0].clone();
    clients::delete(&state.storage, &ana.id).unwrap();
    assert_eq!(state.storage.count(Store::Clients).unwrap(), 1);

    backup::import_from_file(&state.storage, &path).unwrap();
    assert_eq!(state.storage.count(Store::Clients).unwrap(), 2);
    assert_eq!(clients::get(&state.storage, &ana.id).unwrap().name, "Ana Pérez");
}

#[test]
fn reminder_fires_once_per_appointment() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::with_work_dir(dir.path().to_string_lossy());
    config.seed_demo = false;
    let state = AppState::initialize(config).unwrap();

    let client = clients::create(
        &state.storage,
        salondesk::models::ClientDraft {
            name: "Lucía".into(),
            phone: "34600111222".into(),
            email: String::new(),
            notes: String::new(),
        },
    )
    .unwrap();

    let now = Utc::now();
    let appointment = appointments::create(
        &state.storage,
        AppointmentDraft {
            client_id: client.id,
            services: vec!["srv_x".into()],
            start: now + Duration::minutes(10),
            end: now + Duration::minutes(40),
            note: String::new(),
            status: AppointmentStatus::Confirmada,
        },
    )
    .unwrap();

    let due = reminder::check_due(&state.storage, now).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].appointment_id, appointment.id);
    assert!(due[0].body.contains("Lucía"));

    // the persisted flag keeps it from firing again
    assert!(reminder::check_due(&state.storage, now).unwrap().is_empty());
}

#[test]
fn day_view_lists_only_that_days_appointments() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir);

    // the demo data set ships one appointment today at 10:00 local
    let today = Local::now().date_naive();
    let seeded = appointments::find_all(&state.storage).unwrap();
    assert_eq!(seeded.len(), 1);

    let client_id = seeded[0].client_id.clone();
    let tomorrow_start = seeded[0].start + Duration::days(1);
    let next_day = appointments::create(
        &state.storage,
        AppointmentDraft {
            client_id,
            services: seeded[0].services.clone(),
            start: tomorrow_start,
            end: tomorrow_start + Duration::minutes(30),
            note: String::new(),
            status: AppointmentStatus::Pendiente,
        },
    )
    .unwrap();

    let (from, to) = Calendar::new(CalendarView::Day, today).utc_range();
    let agenda = appointments::find_in_range(&state.storage, from, to).unwrap();
    assert_eq!(agenda.len(), 1);
    assert_eq!(agenda[0].id, seeded[0].id);

    let (from, to) = Calendar::new(CalendarView::Day, today + Duration::days(1)).utc_range();
    let agenda = appointments::find_in_range(&state.storage, from, to).unwrap();
    assert_eq!(agenda.len(), 1);
    assert_eq!(agenda[0].id, next_day.id);

    let (from, to) = Calendar::new(CalendarView::Day, today - Duration::days(1)).utc_range();
    assert!(appointments::find_in_range(&state.storage, from, to).unwrap().is_empty());
}

#[test]
fn global_search_spans_collections() {
    let dir = tempfile::tempdir().unwrap();
    let state = demo_state(&dir);

    let res = search::global(&state.storage, "ana").unwrap();
    assert_eq!(res.clients.len(), 1);
    assert_eq!(res.appointments.len(), 1);
    assert_eq!(res.invoices.len(), 1);

    assert!(search::global(&state.storage, "nadie").unwrap().is_empty());
}
