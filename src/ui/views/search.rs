//! Global search results view

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::AppState;
use crate::repository::search::{self, SearchResults};
use crate::utils::AppResult;
use crate::utils::time::{fmt_date, fmt_time};

pub struct SearchView {
    query: String,
    results: SearchResults,
}

impl SearchView {
    pub fn load(state: &AppState, query: &str) -> AppResult<Self> {
        Ok(Self {
            query: query.trim().to_string(),
            results: search::global(&state.storage, query)?,
        })
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Resultados para \"{}\" ", self.query))
            .borders(Borders::ALL);

        if self.query.is_empty() {
            f.render_widget(
                Paragraph::new("Pulse '/' y escriba para buscar.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let mut lines = Vec::new();
        let section =
            |t: &str| Line::styled(t.to_string(), Style::default().add_modifier(Modifier::BOLD));
        let empty = || Line::styled("  —", Style::default().fg(Color::DarkGray));

        lines.push(section("Clientes"));
        if self.results.clients.is_empty() {
            lines.push(empty());
        }
        for c in &self.results.clients {
            lines.push(Line::raw(format!("  {} · {}", c.name, c.phone)));
        }

        lines.push(Line::from(""));
        lines.push(section("Citas"));
        if self.results.appointments.is_empty() {
            lines.push(empty());
        }
        for (a, client) in &self.results.appointments {
            let name = client.as_ref().map(|c| c.name.as_str()).unwrap_or("—");
            lines.push(Line::raw(format!(
                "  {} — {} {}",
                name,
                fmt_date(a.start),
                fmt_time(a.start)
            )));
        }

        lines.push(Line::from(""));
        lines.push(section("Facturas"));
        if self.results.invoices.is_empty() {
            lines.push(empty());
        }
        for (inv, client) in &self.results.invoices {
            let name = client.as_ref().map(|c| c.name.as_str()).unwrap_or("—");
            lines.push(Line::raw(format!("  #{} — {}", inv.number, name)));
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
