//! Clients view

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::core::AppState;
use crate::models::{Client, ClientDraft};
use crate::repository::clients;
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::{Action, PendingAction, move_selection};
use crate::utils::AppResult;

pub struct ClientsView {
    clients: Vec<Client>,
    selected: usize,
}

impl ClientsView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        Ok(Self { clients: clients::find_all(&state.storage)?, selected: 0 })
    }

    fn selected_client(&self) -> Option<&Client> {
        self.clients.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.selected, -1, self.clients.len());
                Ok(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.selected, 1, self.clients.len());
                Ok(Action::None)
            }
            KeyCode::Char('n') => Ok(Action::OpenForm(form(None))),
            KeyCode::Char('e') | KeyCode::Enter => Ok(match self.selected_client() {
                Some(client) => Action::OpenForm(form(Some(client))),
                None => Action::None,
            }),
            KeyCode::Char('x') => Ok(match self.selected_client() {
                Some(client) => Action::Confirm {
                    message: format!("Eliminar cliente {}?", client.name),
                    pending: PendingAction::DeleteClient(client.id.clone()),
                },
                None => Action::None,
            }),
            _ => Ok(Action::None),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Clientes ")
            .title_bottom(" n: nuevo · e: editar · x: eliminar ")
            .borders(Borders::ALL);

        if self.clients.is_empty() {
            f.render_widget(
                Paragraph::new("Sin clientes. Pulse 'n' para agregar.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let rows: Vec<Row> = self
            .clients
            .iter()
            .map(|c| Row::new(vec![c.name.clone(), c.phone.clone(), c.email.clone(), c.notes.clone()]))
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(30),
                Constraint::Length(15),
                Constraint::Percentage(25),
                Constraint::Percentage(30),
            ],
        )
        .header(
            Row::new(["Nombre", "Teléfono", "Email", "Notas"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(table, area, &mut table_state);
    }
}

pub fn form(client: Option<&Client>) -> Form {
    let title = if client.is_some() { "Editar cliente" } else { "Nuevo cliente" };
    Form::new(
        title,
        FormTarget::Client(client.map(|c| c.id.clone())),
        vec![
            Field::new("Nombre*", client.map(|c| c.name.clone()).unwrap_or_default()),
            Field::new("Teléfono", client.map(|c| c.phone.clone()).unwrap_or_default()),
            Field::new("Email", client.map(|c| c.email.clone()).unwrap_or_default()),
            Field::new("Notas", client.map(|c| c.notes.clone()).unwrap_or_default()),
        ],
    )
}

/// Persist a submitted client form
pub fn submit(state: &AppState, form: &Form, id: Option<String>) -> AppResult<String> {
    let draft = ClientDraft {
        name: form.value(0),
        phone: form.value(1),
        email: form.value(2),
        notes: form.value(3),
    };
    match id {
        Some(id) => clients::update(&state.storage, &id, draft)?,
        None => clients::create(&state.storage, draft)?,
    };
    Ok("Cliente guardado".into())
}
