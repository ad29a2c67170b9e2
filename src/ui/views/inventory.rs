//! Inventory view

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::core::AppState;
use crate::models::{InventoryDraft, InventoryItem};
use crate::repository::inventory;
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::{Action, PendingAction, move_selection};
use crate::utils::{AppError, AppResult};

pub struct InventoryView {
    items: Vec<InventoryItem>,
    selected: usize,
}

impl InventoryView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        Ok(Self { items: inventory::find_all(&state.storage)?, selected: 0 })
    }

    fn selected_item(&self) -> Option<&InventoryItem> {
        self.items.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> AppResult<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.selected, -1, self.items.len());
                Ok(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.selected, 1, self.items.len());
                Ok(Action::None)
            }
            KeyCode::Char('+') => self.adjust(state, 1),
            KeyCode::Char('-') => self.adjust(state, -1),
            KeyCode::Char('n') => Ok(Action::OpenForm(form(None))),
            KeyCode::Char('e') | KeyCode::Enter => Ok(match self.selected_item() {
                Some(item) => Action::OpenForm(form(Some(item))),
                None => Action::None,
            }),
            KeyCode::Char('x') => Ok(match self.selected_item() {
                Some(item) => Action::Confirm {
                    message: format!("Eliminar producto {}?", item.name),
                    pending: PendingAction::DeleteStock(item.id.clone()),
                },
                None => Action::None,
            }),
            _ => Ok(Action::None),
        }
    }

    fn adjust(&self, state: &AppState, delta: i32) -> AppResult<Action> {
        match self.selected_item() {
            Some(item) => {
                inventory::adjust_stock(&state.storage, &item.id, delta)?;
                Ok(Action::Reload)
            }
            None => Ok(Action::None),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Inventario ")
            .title_bottom(" n: nuevo · e: editar · x: eliminar · +/-: stock ")
            .borders(Borders::ALL);

        if self.items.is_empty() {
            f.render_widget(
                Paragraph::new("Sin productos. Pulse 'n' para agregar.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let rows: Vec<Row> = self
            .items
            .iter()
            .map(|p| {
                let stock_style = if p.is_low() {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Line::raw(p.name.clone()),
                    Line::styled(p.stock.to_string(), stock_style),
                    Line::raw(p.min.to_string()),
                    if p.is_low() {
                        Line::styled("Stock bajo", Style::default().fg(Color::Red))
                    } else {
                        Line::styled("OK", Style::default().fg(Color::Green))
                    },
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(50),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(["Producto", "Stock", "Mínimo", "Alerta"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(table, area, &mut table_state);
    }
}

pub fn form(item: Option<&InventoryItem>) -> Form {
    let title = if item.is_some() { "Editar producto" } else { "Nuevo producto" };
    Form::new(
        title,
        FormTarget::Stock(item.map(|i| i.id.clone())),
        vec![
            Field::new("Nombre*", item.map(|i| i.name.clone()).unwrap_or_default()),
            Field::new("Stock", item.map(|i| i.stock.to_string()).unwrap_or_else(|| "0".into())),
            Field::new("Mínimo", item.map(|i| i.min.to_string()).unwrap_or_else(|| "0".into())),
        ],
    )
}

pub fn submit(state: &AppState, form: &Form, id: Option<String>) -> AppResult<String> {
    let stock: u32 = form
        .value(1)
        .parse()
        .map_err(|_| AppError::validation("Datos inválidos"))?;
    let min: u32 = form
        .value(2)
        .parse()
        .map_err(|_| AppError::validation("Datos inválidos"))?;
    let draft = InventoryDraft { name: form.value(0), stock, min };
    match id {
        Some(id) => inventory::update(&state.storage, &id, draft)?,
        None => inventory::create(&state.storage, draft)?,
    };
    Ok("Producto guardado".into())
}
