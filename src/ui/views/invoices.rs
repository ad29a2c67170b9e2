//! Invoices view
//!
//! Line items are entered as a comma-separated list of service names
//! with an optional quantity ("Corte x1, Peinado x2"). Each line
//! snapshots the service's current name and price; the stored invoice
//! is immune to later service edits.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use rust_decimal::Decimal;

use crate::core::AppState;
use crate::models::{Invoice, InvoiceDraft, InvoiceItem, Settings};
use crate::repository::{clients, invoices};
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::{Action, PendingAction, move_selection, resolve_client, resolve_services};
use crate::utils::money::{format_money, invoice_totals};
use crate::utils::time::{fmt_date, fmt_form_datetime, parse_local_datetime};
use crate::utils::{AppError, AppResult};

struct InvoiceRow {
    invoice: Invoice,
    client_name: String,
    total: Decimal,
}

pub struct InvoicesView {
    rows: Vec<InvoiceRow>,
    selected: usize,
}

impl InvoicesView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        let all_clients = clients::find_all(&state.storage)?;
        let rows = invoices::find_all(&state.storage)?
            .into_iter()
            .map(|invoice| {
                let client_name = all_clients
                    .iter()
                    .find(|c| c.id == invoice.client_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "—".into());
                let total = invoice_totals(&invoice.items, invoice.tax).total;
                InvoiceRow { invoice, client_name, total }
            })
            .collect();
        Ok(Self { rows, selected: 0 })
    }

    fn selected_row(&self) -> Option<&InvoiceRow> {
        self.rows.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> AppResult<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.selected, -1, self.rows.len());
                Ok(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.selected, 1, self.rows.len());
                Ok(Action::None)
            }
            KeyCode::Char('n') => Ok(Action::OpenForm(form(None, ""))),
            KeyCode::Char('e') | KeyCode::Enter => Ok(match self.selected_row() {
                Some(row) => Action::OpenForm(form(Some(&row.invoice), &row.client_name)),
                None => Action::None,
            }),
            KeyCode::Char('p') => match self.selected_row() {
                Some(row) => {
                    invoices::set_paid(&state.storage, &row.invoice.id, !row.invoice.paid)?;
                    Ok(Action::Reload)
                }
                None => Ok(Action::None),
            },
            KeyCode::Char('x') => Ok(match self.selected_row() {
                Some(row) => Action::Confirm {
                    message: format!("Eliminar factura #{}?", row.invoice.number),
                    pending: PendingAction::DeleteInvoice(row.invoice.id.clone()),
                },
                None => Action::None,
            }),
            _ => Ok(Action::None),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, settings: &Settings) {
        let block = Block::default()
            .title(" Facturación ")
            .title_bottom(" n: nueva · e: editar · p: pagada/pendiente · x: eliminar ")
            .borders(Borders::ALL);

        if self.rows.is_empty() {
            f.render_widget(
                Paragraph::new("Aún no hay facturas. Pulse 'n' para crear.")
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
                let (estado, color) = if r.invoice.paid {
                    ("Pagada", Color::Green)
                } else {
                    ("Pendiente", Color::Yellow)
                };
                Row::new(vec![
                    Line::raw(format!("#{}", r.invoice.number)),
                    Line::raw(fmt_date(r.invoice.date)),
                    Line::raw(r.client_name.clone()),
                    Line::raw(format!("{} items", r.invoice.items.len())),
                    Line::raw(format_money(r.total, &settings.currency)),
                    Line::styled(estado, Style::default().fg(color)),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(11),
                Constraint::Percentage(30),
                Constraint::Length(9),
                Constraint::Length(14),
                Constraint::Length(10),
            ],
        )
        .header(
            Row::new(["#", "Fecha", "Cliente", "Items", "Importe", "Estado"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(table, area, &mut table_state);
    }
}

pub fn form(invoice: Option<&Invoice>, client_name: &str) -> Form {
    let title = if invoice.is_some() { "Editar factura" } else { "Nueva factura" };
    let items = invoice
        .map(|i| {
            i.items
                .iter()
                .map(|it| format!("{} x{}", it.name, it.qty))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    let date = invoice
        .map(|i| fmt_form_datetime(i.date))
        .unwrap_or_else(|| fmt_form_datetime(Utc::now()));
    let tax_pct = invoice.map(|i| (i.tax * 100.0).to_string()).unwrap_or_else(|| "21".into());
    let paid = invoice.map(|i| if i.paid { "s" } else { "n" }).unwrap_or("n");

    Form::new(
        title,
        FormTarget::Invoice(invoice.map(|i| i.id.clone())),
        vec![
            Field::new("Cliente*", client_name),
            Field::new("Fecha (AAAA-MM-DD HH:MM)", date),
            Field::new("Items* (Servicio xCant, ...)", items),
            Field::new("IVA %", tax_pct),
            Field::new("Pagada (s/n)", paid),
        ],
    )
}

pub fn submit(state: &AppState, form: &Form, id: Option<String>) -> AppResult<String> {
    let client = resolve_client(state, &form.value(0))?;
    let date = parse_local_datetime(&form.value(1))?;
    let items = parse_items(state, &form.value(2))?;
    let tax_pct: f64 = form
        .value(3)
        .parse()
        .map_err(|_| AppError::validation("IVA inválido"))?;
    let paid = matches!(form.value(4).to_lowercase().as_str(), "s" | "si" | "sí" | "y");

    let draft = InvoiceDraft { client_id: client.id, date, items, tax: tax_pct / 100.0, paid };
    let invoice = match id {
        Some(id) => invoices::update(&state.storage, &id, draft)?,
        None => invoices::create(&state.storage, draft)?,
    };
    Ok(format!("Factura #{} guardada", invoice.number))
}

/// Parse "Corte x2, Peinado" into snapshotted line items
fn parse_items(state: &AppState, value: &str) -> AppResult<Vec<InvoiceItem>> {
    let mut items = Vec::new();
    for raw in value.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (name_part, qty) = match raw.rsplit_once(" x") {
            Some((name, qty_str)) => {
                let qty: u32 = qty_str
                    .trim()
                    .parse()
                    .map_err(|_| AppError::validation(format!("Cantidad inválida: {raw}")))?;
                (name.trim(), qty)
            }
            None => (raw, 1),
        };
        let service = resolve_services(state, name_part)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::validation(format!("Servicio no encontrado: {name_part}")))?;
        items.push(InvoiceItem {
            service_id: service.id,
            name: service.name,
            qty,
            price: service.price,
        });
    }
    if items.is_empty() {
        return Err(AppError::validation("Agregue al menos un ítem"));
    }
    Ok(items)
}
