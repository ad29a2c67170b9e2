//! Appointments view
//!
//! Day and week render as a table of the appointments in range; month
//! renders the Monday-first grid with per-day entries. The calendar
//! cursor lives in the app shell so it survives reloads, exactly like
//! navigating away and back keeps the month you were looking at.

use chrono::{Datelike, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use tracing::info;

use crate::calendar::{Calendar, CalendarView, month_grid};
use crate::core::AppState;
use crate::models::{Appointment, AppointmentDraft, AppointmentStatus};
use crate::repository::{appointments, clients, services};
use crate::services::{ics, messaging};
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::{
    Action, PendingAction, move_selection, resolve_client, resolve_services, status_color,
};
use crate::utils::time::{fmt_date, fmt_form_datetime, fmt_time, local_date, parse_local_datetime};
use crate::utils::{AppError, AppResult};

struct ApptRow {
    appointment: Appointment,
    client_name: String,
    service_names: String,
}

pub struct AppointmentsView {
    rows: Vec<ApptRow>,
    selected: usize,
    view: CalendarView,
    anchor: chrono::NaiveDate,
    anchor_label: String,
}

impl AppointmentsView {
    pub fn load(state: &AppState, calendar: &Calendar) -> AppResult<Self> {
        let (from, to) = calendar.utc_range();
        let in_range = appointments::find_in_range(&state.storage, from, to)?;
        let all_clients = clients::find_all(&state.storage)?;
        let all_services = services::find_all(&state.storage)?;

        let rows = in_range
            .into_iter()
            .map(|a| {
                let client_name = all_clients
                    .iter()
                    .find(|c| c.id == a.client_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "—".into());
                let service_names = a
                    .services
                    .iter()
                    .map(|id| {
                        all_services
                            .iter()
                            .find(|s| s.id == *id)
                            .map(|s| s.name.as_str())
                            .unwrap_or("—")
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                ApptRow { appointment: a, client_name, service_names }
            })
            .collect();

        let anchor_label = match calendar.view {
            CalendarView::Month => calendar.anchor.format("%m/%Y").to_string(),
            _ => calendar.anchor.format("%d/%m/%Y").to_string(),
        };

        Ok(Self { rows, selected: 0, view: calendar.view, anchor: calendar.anchor, anchor_label })
    }

    fn selected_row(&self) -> Option<&ApptRow> {
        self.rows.get(self.selected)
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        calendar: &mut Calendar,
    ) -> AppResult<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.selected, -1, self.rows.len());
                Ok(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.selected, 1, self.rows.len());
                Ok(Action::None)
            }
            // calendar navigation reloads the range
            KeyCode::Char('v') => {
                calendar.view = match calendar.view {
                    CalendarView::Day => CalendarView::Week,
                    CalendarView::Week => CalendarView::Month,
                    CalendarView::Month => CalendarView::Day,
                };
                Ok(Action::Reload)
            }
            KeyCode::Left => {
                calendar.prev();
                Ok(Action::Reload)
            }
            KeyCode::Right => {
                calendar.next();
                Ok(Action::Reload)
            }
            KeyCode::Char('t') => {
                calendar.today();
                Ok(Action::Reload)
            }
            KeyCode::Char('n') => Ok(Action::OpenForm(form(None, "", ""))),
            KeyCode::Char('e') | KeyCode::Enter => Ok(match self.selected_row() {
                Some(row) => {
                    Action::OpenForm(form(Some(&row.appointment), &row.client_name, &row.service_names))
                }
                None => Action::None,
            }),
            KeyCode::Char('c') => Ok(match self.selected_row() {
                Some(row) => Action::Confirm {
                    message: format!("Cancelar cita de {}?", row.client_name),
                    pending: PendingAction::CancelAppointment(row.appointment.id.clone()),
                },
                None => Action::None,
            }),
            KeyCode::Char('x') => Ok(match self.selected_row() {
                Some(row) => Action::Confirm {
                    message: format!("Eliminar cita de {}?", row.client_name),
                    pending: PendingAction::DeleteAppointment(row.appointment.id.clone()),
                },
                None => Action::None,
            }),
            KeyCode::Char('w') => self.whatsapp_link(state),
            KeyCode::Char('i') => self.export_ics(state),
            _ => Ok(Action::None),
        }
    }

    fn whatsapp_link(&self, state: &AppState) -> AppResult<Action> {
        let Some(row) = self.selected_row() else { return Ok(Action::None) };
        let Some(client) = clients::find_by_id(&state.storage, &row.appointment.client_id)? else {
            return Ok(Action::Toast("Cliente eliminado".into()));
        };
        match messaging::whatsapp_link(&client, &row.appointment) {
            Some(link) => {
                info!(appointment_id = %row.appointment.id, "WhatsApp: {link}");
                Ok(Action::Toast("Enlace de WhatsApp en el log".into()))
            }
            None => Ok(Action::Toast("Cliente sin teléfono".into())),
        }
    }

    fn export_ics(&self, state: &AppState) -> AppResult<Action> {
        let Some(row) = self.selected_row() else { return Ok(Action::None) };
        let path = state
            .config
            .exports_dir()
            .join(format!("cita_{}.ics", row.appointment.id));
        std::fs::write(&path, ics::appointment_ics(&row.appointment, Utc::now()))?;
        info!(path = %path.display(), "ICS exported");
        Ok(Action::Toast(format!("Exportado {}", path.display())))
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let title = format!(" Citas — {} {} ", self.view.label(), self.anchor_label);
        let block = Block::default()
            .title(title)
            .title_bottom(" v: vista · ←/→ · t: hoy · n/e/x · c: cancelar · w: WhatsApp · i: .ics ")
            .borders(Borders::ALL);

        match self.view {
            CalendarView::Month => self.render_month(f, area, block),
            _ => self.render_list(f, area, block),
        }
    }

    fn render_list(&self, f: &mut Frame, area: Rect, block: Block) {
        if self.rows.is_empty() {
            f.render_widget(
                Paragraph::new("Sin citas en este rango. Pulse 'n' para crear.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }
        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                let a = &r.appointment;
                Row::new(vec![
                    Line::raw(format!("{} {}", fmt_date(a.start), fmt_time(a.start))),
                    Line::raw(r.client_name.clone()),
                    Line::raw(r.service_names.clone()),
                    Line::styled(a.status.label(), Style::default().fg(status_color(a.status))),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(17),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(["Fecha", "Cliente", "Servicios", "Estado"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(table, area, &mut table_state);
    }

    fn render_month(&self, f: &mut Frame, area: Rect, block: Block) {
        let anchor = self.anchor;
        let grid = month_grid(anchor);
        let today = Local::now().date_naive();

        let header = Row::new(["L", "M", "X", "J", "V", "S", "D"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let mut table_rows = Vec::new();
        for week in grid.chunks(7) {
            let cells: Vec<Line> = week
                .iter()
                .map(|date| {
                    let count = self
                        .rows
                        .iter()
                        .filter(|r| local_date(r.appointment.start) == *date)
                        .count();
                    let in_month = date.month() == anchor.month();
                    let mut style = if in_month {
                        Style::default()
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    if *date == today {
                        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                    }
                    let text = if count > 0 {
                        format!("{:>2} ({count})", date.day())
                    } else {
                        format!("{:>2}", date.day())
                    };
                    Line::styled(text, style)
                })
                .collect();
            table_rows.push(Row::new(cells));
        }

        let widths = [Constraint::Ratio(1, 7); 7];
        let table = Table::new(table_rows, widths).header(header).block(block);
        f.render_widget(table, area);
    }
}

pub fn form(appointment: Option<&Appointment>, client_name: &str, service_names: &str) -> Form {
    let title = if appointment.is_some() { "Editar cita" } else { "Nueva cita" };
    let start = appointment
        .map(|a| fmt_form_datetime(a.start))
        .unwrap_or_else(|| fmt_form_datetime(Utc::now()));
    Form::new(
        title,
        FormTarget::Appointment(appointment.map(|a| a.id.clone())),
        vec![
            Field::new("Cliente*", client_name),
            Field::new("Servicios* (coma)", service_names),
            Field::new("Inicio* (AAAA-MM-DD HH:MM)", start),
            Field::new("Nota", appointment.map(|a| a.note.clone()).unwrap_or_default()),
            Field::new(
                "Estado (pendiente/confirmada/cancelada)",
                appointment.map(|a| a.status.label().to_string()).unwrap_or_else(|| "pendiente".into()),
            ),
        ],
    )
}

/// Persist a submitted appointment form. The end time is the start plus
/// the combined duration of the selected services.
pub fn submit(state: &AppState, form: &Form, id: Option<String>) -> AppResult<String> {
    let client = resolve_client(state, &form.value(0))?;
    let selected = resolve_services(state, &form.value(1))?;
    if selected.is_empty() {
        return Err(AppError::validation("Cliente y servicios son requeridos"));
    }
    let start = parse_local_datetime(&form.value(2))?;
    let minutes: i64 = selected.iter().map(|s| s.duration as i64).sum();
    let status = parse_status(&form.value(4))?;

    let draft = AppointmentDraft {
        client_id: client.id,
        services: selected.into_iter().map(|s| s.id).collect(),
        start,
        end: start + chrono::Duration::minutes(minutes),
        note: form.value(3),
        status,
    };
    match id {
        Some(id) => appointments::update(&state.storage, &id, draft)?,
        None => appointments::create(&state.storage, draft)?,
    };
    Ok("Cita guardada".into())
}

fn parse_status(value: &str) -> AppResult<AppointmentStatus> {
    match value.trim().to_lowercase().as_str() {
        "" | "pendiente" => Ok(AppointmentStatus::Pendiente),
        "confirmada" => Ok(AppointmentStatus::Confirmada),
        "cancelada" => Ok(AppointmentStatus::Cancelada),
        other => Err(AppError::validation(format!("Estado inválido: {other}"))),
    }
}
