//! Dashboard view
//!
//! KPIs (today's appointments, upcoming week, low stock), the next
//! appointments over seven days, recent invoices and stock alerts.

use chrono::{Duration, Local, Utc};
use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use rust_decimal::Decimal;

use crate::core::AppState;
use crate::models::{AppointmentStatus, InventoryItem, Settings};
use crate::repository::{appointments, clients, inventory, invoices, services};
use crate::ui::views::{Action, status_color};
use crate::utils::money::{format_money, invoice_totals};
use crate::utils::time::{fmt_date, fmt_time, local_date};
use crate::utils::AppResult;

const UPCOMING_LIMIT: usize = 8;
const RECENT_INVOICES: usize = 7;

struct UpcomingRow {
    when: String,
    client: String,
    services: String,
    status: AppointmentStatus,
}

struct InvoiceRow {
    number: u64,
    date: String,
    client: String,
    total: Decimal,
    paid: bool,
}

pub struct DashboardView {
    today_count: usize,
    upcoming: Vec<UpcomingRow>,
    recent: Vec<InvoiceRow>,
    low_stock: Vec<InventoryItem>,
}

impl DashboardView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        let storage = &state.storage;
        let all_appointments = appointments::find_all(storage)?;
        let all_clients = clients::find_all(storage)?;
        let all_services = services::find_all(storage)?;

        let client_name = |id: &str| -> String {
            all_clients
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "—".into())
        };
        let service_names = |ids: &[String]| -> String {
            ids.iter()
                .map(|id| {
                    all_services
                        .iter()
                        .find(|s| s.id == *id)
                        .map(|s| s.name.as_str())
                        .unwrap_or("—")
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        let now = Utc::now();
        let today = Local::now().date_naive();
        let week_end = now + Duration::days(7);

        let today_count = all_appointments
            .iter()
            .filter(|a| local_date(a.start) == today)
            .count();

        let upcoming: Vec<UpcomingRow> = all_appointments
            .iter()
            .filter(|a| a.start >= now && a.start <= week_end)
            .take(UPCOMING_LIMIT)
            .map(|a| UpcomingRow {
                when: format!("{} {}", fmt_date(a.start), fmt_time(a.start)),
                client: client_name(&a.client_id),
                services: service_names(&a.services),
                status: a.status,
            })
            .collect();

        let recent: Vec<InvoiceRow> = invoices::find_all(storage)?
            .into_iter()
            .take(RECENT_INVOICES)
            .map(|f| InvoiceRow {
                number: f.number,
                date: fmt_date(f.date),
                client: client_name(&f.client_id),
                total: invoice_totals(&f.items, f.tax).total,
                paid: f.paid,
            })
            .collect();

        let low_stock = inventory::find_low_stock(storage)?;

        Ok(Self { today_count, upcoming, recent, low_stock })
    }

    pub fn handle_key(&mut self, _key: KeyEvent) -> AppResult<Action> {
        Ok(Action::None)
    }

    pub fn render(&self, f: &mut Frame, area: Rect, settings: &Settings) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(self.low_stock.len().max(1) as u16 + 2),
            ])
            .split(area);

        self.render_kpis(f, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);
        self.render_upcoming(f, columns[0]);
        self.render_recent(f, columns[1], settings);
        self.render_stock_alerts(f, rows[2]);
    }

    fn render_kpis(&self, f: &mut Frame, area: Rect) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        let kpi = |label: &str, value: String, color: Color| {
            Paragraph::new(Line::from(vec![
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {label}")),
            ]))
            .block(Block::default().borders(Borders::ALL))
        };

        f.render_widget(kpi("Citas hoy", self.today_count.to_string(), Color::Cyan), cells[0]);
        f.render_widget(
            kpi("Citas próximas (7 días)", self.upcoming.len().to_string(), Color::Cyan),
            cells[1],
        );
        let stock_color = if self.low_stock.is_empty() { Color::Green } else { Color::Red };
        f.render_widget(
            kpi("Stock bajo", self.low_stock.len().to_string(), stock_color),
            cells[2],
        );
    }

    fn render_upcoming(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Próximas citas (7 días) ")
            .borders(Borders::ALL);
        if self.upcoming.is_empty() {
            f.render_widget(
                Paragraph::new("Sin citas próximas").style(Style::default().fg(Color::DarkGray)).block(block),
                area,
            );
            return;
        }
        let rows: Vec<Row> = self
            .upcoming
            .iter()
            .map(|r| {
                Row::new(vec![
                    Line::raw(r.when.clone()),
                    Line::raw(r.client.clone()),
                    Line::raw(r.services.clone()),
                    Line::styled(r.status.label(), Style::default().fg(status_color(r.status))),
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
        .header(Row::new(["Fecha", "Cliente", "Servicios", "Estado"]).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(block);
        f.render_widget(table, area);
    }

    fn render_recent(&self, f: &mut Frame, area: Rect, settings: &Settings) {
        let block = Block::default().title(" Facturas recientes ").borders(Borders::ALL);
        if self.recent.is_empty() {
            f.render_widget(
                Paragraph::new("Aún no hay facturas").style(Style::default().fg(Color::DarkGray)).block(block),
                area,
            );
            return;
        }
        let rows: Vec<Row> = self
            .recent
            .iter()
            .map(|r| {
                let (estado, color) = if r.paid { ("Pagada", Color::Green) } else { ("Pendiente", Color::Yellow) };
                Row::new(vec![
                    Line::raw(format!("#{}", r.number)),
                    Line::raw(r.date.clone()),
                    Line::raw(r.client.clone()),
                    Line::raw(format_money(r.total, &settings.currency)),
                    Line::styled(estado, Style::default().fg(color)),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(11),
                Constraint::Percentage(35),
                Constraint::Length(14),
                Constraint::Length(10),
            ],
        )
        .header(Row::new(["#", "Fecha", "Cliente", "Importe", "Estado"]).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(block);
        f.render_widget(table, area);
    }

    fn render_stock_alerts(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().title(" Alertas de stock ").borders(Borders::ALL);
        if self.low_stock.is_empty() {
            f.render_widget(
                Paragraph::new("Todo OK").style(Style::default().fg(Color::Green)).block(block),
                area,
            );
            return;
        }
        let lines: Vec<Line> = self
            .low_stock
            .iter()
            .map(|p| {
                Line::from(vec![
                    Span::styled(p.name.clone(), Style::default().fg(Color::Red)),
                    Span::raw(format!("  stock {} / mínimo {}", p.stock, p.min)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::models::AppointmentDraft;
    use chrono::Duration;

    #[test]
    fn load_counts_todays_appointments() {
        let dir = tempfile::tempdir().unwrap();
        let state =
            AppState::initialize(Config::with_work_dir(dir.path().to_string_lossy())).unwrap();

        // the demo seed ships one appointment today and invoice #1
        let view = DashboardView::load(&state).unwrap();
        assert_eq!(view.today_count, 1);
        assert_eq!(view.recent.len(), 1);
        assert_eq!(view.recent[0].number, 1);
        assert!(view.low_stock.is_empty());

        // an appointment tomorrow does not count towards today
        let seeded = appointments::find_all(&state.storage).unwrap();
        appointments::create(
            &state.storage,
            AppointmentDraft {
                client_id: seeded[0].client_id.clone(),
                services: seeded[0].services.clone(),
                start: seeded[0].start + Duration::days(1),
                end: seeded[0].end + Duration::days(1),
                note: String::new(),
                status: AppointmentStatus::Pendiente,
            },
        )
        .unwrap();
        assert_eq!(DashboardView::load(&state).unwrap().today_count, 1);
    }
}
