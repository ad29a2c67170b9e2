//! Global search
//!
//! Case-insensitive substring search across clients, appointments and
//! invoices. Appointments and invoices match through their client's
//! name; each section is capped at five hits.

use crate::models::{Appointment, Client, Invoice};
use crate::storage::{Storage, Store};
use crate::utils::AppResult;

const MAX_HITS_PER_SECTION: usize = 5;

/// One search result set, sectioned the way the results view renders it
#[derive(Debug, Default)]
pub struct SearchResults {
    pub clients: Vec<Client>,
    pub appointments: Vec<(Appointment, Option<Client>)>,
    pub invoices: Vec<(Invoice, Option<Client>)>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.appointments.is_empty() && self.invoices.is_empty()
    }
}

/// Run a global search. A blank query returns nothing.
pub fn global(storage: &Storage, query: &str) -> AppResult<SearchResults> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Ok(SearchResults::default());
    }

    let clients: Vec<Client> = storage.get_all(Store::Clients)?;
    let client_matches = |id: &str| -> Option<Client> {
        clients
            .iter()
            .find(|c| c.id == id)
            .filter(|c| c.name.to_lowercase().contains(&q))
            .cloned()
    };

    let client_hits: Vec<Client> = clients
        .iter()
        .filter(|c| {
            format!("{} {} {}", c.name, c.phone, c.email)
                .to_lowercase()
                .contains(&q)
        })
        .take(MAX_HITS_PER_SECTION)
        .cloned()
        .collect();

    let appointment_hits: Vec<(Appointment, Option<Client>)> = storage
        .get_all::<Appointment>(Store::Appointments)?
        .into_iter()
        .filter_map(|a| {
            let c = client_matches(&a.client_id)?;
            Some((a, Some(c)))
        })
        .take(MAX_HITS_PER_SECTION)
        .collect();

    let invoice_hits: Vec<(Invoice, Option<Client>)> = storage
        .get_all::<Invoice>(Store::Invoices)?
        .into_iter()
        .filter_map(|f| {
            let c = client_matches(&f.client_id)?;
            Some((f, Some(c)))
        })
        .take(MAX_HITS_PER_SECTION)
        .collect();

    Ok(SearchResults {
        clients: client_hits,
        appointments: appointment_hits,
        invoices: invoice_hits,
    })
}
