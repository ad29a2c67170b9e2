//! Fallback for unknown routes

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(f: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::styled("404 — Página no encontrada", Style::default().fg(Color::Red)),
        Line::from(""),
        Line::raw("Pulse 1-8 para volver a una sección."),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}
