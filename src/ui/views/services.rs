//! Services view

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};

use crate::core::AppState;
use crate::models::{Service, ServiceDraft, Settings};
use crate::repository::services;
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::{Action, PendingAction, move_selection};
use crate::utils::money::format_price;
use crate::utils::{AppError, AppResult};

pub struct ServicesView {
    services: Vec<Service>,
    selected: usize,
}

impl ServicesView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        Ok(Self { services: services::find_all(&state.storage)?, selected: 0 })
    }

    fn selected_service(&self) -> Option<&Service> {
        self.services.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.selected, -1, self.services.len());
                Ok(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.selected, 1, self.services.len());
                Ok(Action::None)
            }
            KeyCode::Char('n') => Ok(Action::OpenForm(form(None))),
            KeyCode::Char('e') | KeyCode::Enter => Ok(match self.selected_service() {
                Some(service) => Action::OpenForm(form(Some(service))),
                None => Action::None,
            }),
            KeyCode::Char('x') => Ok(match self.selected_service() {
                Some(service) => Action::Confirm {
                    message: format!("Eliminar servicio {}?", service.name),
                    pending: PendingAction::DeleteService(service.id.clone()),
                },
                None => Action::None,
            }),
            _ => Ok(Action::None),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, settings: &Settings) {
        let block = Block::default()
            .title(" Servicios ")
            .title_bottom(" n: nuevo · e: editar · x: eliminar ")
            .borders(Borders::ALL);

        if self.services.is_empty() {
            f.render_widget(
                Paragraph::new("Sin servicios. Pulse 'n' para agregar.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let rows: Vec<Row> = self
            .services
            .iter()
            .map(|s| {
                Row::new(vec![
                    s.name.clone(),
                    format!("{} min", s.duration),
                    format_price(s.price, &settings.currency),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [Constraint::Percentage(50), Constraint::Length(10), Constraint::Length(14)],
        )
        .header(
            Row::new(["Nombre", "Duración", "Precio"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(table, area, &mut table_state);
    }
}

pub fn form(service: Option<&Service>) -> Form {
    let title = if service.is_some() { "Editar servicio" } else { "Nuevo servicio" };
    Form::new(
        title,
        FormTarget::Service(service.map(|s| s.id.clone())),
        vec![
            Field::new("Nombre*", service.map(|s| s.name.clone()).unwrap_or_default()),
            Field::new(
                "Duración (min)*",
                service.map(|s| s.duration.to_string()).unwrap_or_else(|| "30".into()),
            ),
            Field::new(
                "Precio*",
                service.map(|s| s.price.to_string()).unwrap_or_else(|| "0".into()),
            ),
        ],
    )
}

pub fn submit(state: &AppState, form: &Form, id: Option<String>) -> AppResult<String> {
    let duration: u32 = form
        .value(1)
        .parse()
        .map_err(|_| AppError::validation("Complete los campos correctamente"))?;
    let price: f64 = form
        .value(2)
        .parse()
        .map_err(|_| AppError::validation("Complete los campos correctamente"))?;
    let draft = ServiceDraft { name: form.value(0), duration, price };
    match id {
        Some(id) => services::update(&state.storage, &id, draft)?,
        None => services::create(&state.storage, draft)?,
    };
    Ok("Servicio guardado".into())
}
