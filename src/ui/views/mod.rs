//! Section views
//!
//! One module per route. Every view owns the data it rendered, loaded
//! in full from storage when the route is entered or after a mutation —
//! there is no incremental cache to invalidate.

pub mod appointments;
pub mod backup;
pub mod clients;
pub mod dashboard;
pub mod inventory;
pub mod invoices;
pub mod not_found;
pub mod search;
pub mod services;
pub mod settings;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::calendar::Calendar;
use crate::core::AppState;
use crate::models::{AppointmentStatus, Service, Settings};
use crate::repository;
use crate::ui::form::Form;
use crate::ui::router::Route;
use crate::utils::{AppError, AppResult};

/// What a view asks the app shell to do after handling a key
pub enum Action {
    None,
    Navigate(Route),
    Reload,
    OpenForm(Form),
    Toast(String),
    Confirm { message: String, pending: PendingAction },
}

/// Deferred destructive action, executed once the user confirms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteClient(String),
    DeleteService(String),
    DeleteAppointment(String),
    CancelAppointment(String),
    DeleteInvoice(String),
    DeleteStock(String),
    ResetDemo,
}

/// Execute a confirmed action, returning the toast to show
pub fn execute_pending(state: &AppState, pending: PendingAction) -> AppResult<String> {
    let storage = &state.storage;
    let toast = match pending {
        PendingAction::DeleteClient(id) => {
            repository::clients::delete(storage, &id)?;
            "Cliente eliminado"
        }
        PendingAction::DeleteService(id) => {
            repository::services::delete(storage, &id)?;
            "Servicio eliminado"
        }
        PendingAction::DeleteAppointment(id) => {
            repository::appointments::delete(storage, &id)?;
            "Cita eliminada"
        }
        PendingAction::CancelAppointment(id) => {
            repository::appointments::cancel(storage, &id)?;
            "Cita cancelada"
        }
        PendingAction::DeleteInvoice(id) => {
            repository::invoices::delete(storage, &id)?;
            "Factura eliminada"
        }
        PendingAction::DeleteStock(id) => {
            repository::inventory::delete(storage, &id)?;
            "Producto eliminado"
        }
        PendingAction::ResetDemo => {
            repository::seed::reset_demo(storage)?;
            "Datos demo restaurados"
        }
    };
    Ok(toast.to_string())
}

/// Per-route view state
pub enum ViewData {
    Dashboard(dashboard::DashboardView),
    Citas(appointments::AppointmentsView),
    Clientes(clients::ClientsView),
    Servicios(services::ServicesView),
    Facturas(invoices::InvoicesView),
    Inventario(inventory::InventoryView),
    Config(settings::SettingsView),
    Respaldo(backup::BackupView),
    Busqueda(search::SearchView),
    NotFound,
}

impl ViewData {
    /// Load the view for a route from scratch
    pub fn load(route: Route, state: &AppState, calendar: &Calendar, query: &str) -> AppResult<Self> {
        Ok(match route {
            Route::Dashboard => Self::Dashboard(dashboard::DashboardView::load(state)?),
            Route::Citas => Self::Citas(appointments::AppointmentsView::load(state, calendar)?),
            Route::Clientes => Self::Clientes(clients::ClientsView::load(state)?),
            Route::Servicios => Self::Servicios(services::ServicesView::load(state)?),
            Route::Facturas => Self::Facturas(invoices::InvoicesView::load(state)?),
            Route::Inventario => Self::Inventario(inventory::InventoryView::load(state)?),
            Route::Config => Self::Config(settings::SettingsView::load(state)?),
            Route::Respaldo => Self::Respaldo(backup::BackupView::load(state)?),
            Route::Busqueda => Self::Busqueda(search::SearchView::load(state, query)?),
            Route::NotFound => Self::NotFound,
        })
    }

    pub fn render(&self, f: &mut Frame, area: Rect, settings: &Settings) {
        match self {
            Self::Dashboard(v) => v.render(f, area, settings),
            Self::Citas(v) => v.render(f, area),
            Self::Clientes(v) => v.render(f, area),
            Self::Servicios(v) => v.render(f, area, settings),
            Self::Facturas(v) => v.render(f, area, settings),
            Self::Inventario(v) => v.render(f, area),
            Self::Config(v) => v.render(f, area),
            Self::Respaldo(v) => v.render(f, area),
            Self::Busqueda(v) => v.render(f, area),
            Self::NotFound => not_found::render(f, area),
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        calendar: &mut Calendar,
    ) -> AppResult<Action> {
        match self {
            Self::Dashboard(v) => v.handle_key(key),
            Self::Citas(v) => v.handle_key(key, state, calendar),
            Self::Clientes(v) => v.handle_key(key),
            Self::Servicios(v) => v.handle_key(key),
            Self::Facturas(v) => v.handle_key(key, state),
            Self::Inventario(v) => v.handle_key(key, state),
            Self::Config(v) => v.handle_key(key),
            Self::Respaldo(v) => v.handle_key(key, state),
            Self::Busqueda(_) | Self::NotFound => Ok(Action::None),
        }
    }
}

// ========== Shared helpers ==========

/// Move a table selection by delta, clamped to the row count
pub(crate) fn move_selection(selected: &mut usize, delta: i32, len: usize) {
    if len == 0 {
        *selected = 0;
        return;
    }
    let max = len - 1;
    *selected = selected.saturating_add_signed(delta as isize).min(max);
}

/// Badge color per appointment status
pub(crate) fn status_color(status: AppointmentStatus) -> ratatui::style::Color {
    use ratatui::style::Color;
    match status {
        AppointmentStatus::Confirmada => Color::Green,
        AppointmentStatus::Pendiente => Color::Yellow,
        AppointmentStatus::Cancelada => Color::Red,
    }
}

/// Resolve a client by exact (case-insensitive) name, falling back to
/// the unique substring match.
pub(crate) fn resolve_client(state: &AppState, name: &str) -> AppResult<crate::models::Client> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(AppError::validation("Seleccione cliente"));
    }
    let all = repository::clients::find_all(&state.storage)?;
    if let Some(exact) = all.iter().find(|c| c.name.to_lowercase() == wanted) {
        return Ok(exact.clone());
    }
    let mut partial = all.iter().filter(|c| c.name.to_lowercase().contains(&wanted));
    match (partial.next(), partial.next()) {
        (Some(only), None) => Ok(only.clone()),
        (Some(_), Some(_)) => Err(AppError::validation(format!("Cliente ambiguo: {name}"))),
        (None, _) => Err(AppError::validation(format!("Cliente no encontrado: {name}"))),
    }
}

/// Resolve a comma-separated list of service names
pub(crate) fn resolve_services(state: &AppState, csv: &str) -> AppResult<Vec<Service>> {
    let all = repository::services::find_all(&state.storage)?;
    let mut resolved = Vec::new();
    for raw in csv.split(',') {
        let wanted = raw.trim().to_lowercase();
        if wanted.is_empty() {
            continue;
        }
        let service = all
            .iter()
            .find(|s| s.name.to_lowercase() == wanted)
            .or_else(|| all.iter().find(|s| s.name.to_lowercase().contains(&wanted)))
            .ok_or_else(|| AppError::validation(format!("Servicio no encontrado: {}", raw.trim())))?;
        resolved.push(service.clone());
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_clamps() {
        let mut sel = 0usize;
        move_selection(&mut sel, -1, 5);
        assert_eq!(sel, 0);
        move_selection(&mut sel, 10, 5);
        assert_eq!(sel, 4);
        move_selection(&mut sel, 1, 0);
        assert_eq!(sel, 0);
    }
}
