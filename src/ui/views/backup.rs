//! Backup view
//!
//! Lists the JSON files in the exports directory. Export writes a new
//! dated file there; import takes a path (prefilled with the selected
//! file) and upserts its records.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::core::AppState;
use crate::services::backup;
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::{Action, PendingAction, move_selection};
use crate::utils::AppResult;

pub struct BackupView {
    exports_dir: PathBuf,
    files: Vec<PathBuf>,
    selected: usize,
}

impl BackupView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        let exports_dir = state.config.exports_dir();
        let mut files: Vec<PathBuf> = std::fs::read_dir(&exports_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files.reverse();
        Ok(Self { exports_dir, files, selected: 0 })
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> AppResult<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.selected, -1, self.files.len());
                Ok(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.selected, 1, self.files.len());
                Ok(Action::None)
            }
            KeyCode::Char('e') => {
                let path = self.exports_dir.join(backup::default_filename());
                backup::export_to_file(&state.storage, &path)?;
                Ok(Action::Toast(format!("Exportado {}", path.display())))
            }
            KeyCode::Char('i') | KeyCode::Enter => {
                let prefill = self
                    .files
                    .get(self.selected)
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                Ok(Action::OpenForm(Form::new(
                    "Importar respaldo",
                    FormTarget::ImportBackup,
                    vec![Field::new("Ruta del archivo*", prefill)],
                )))
            }
            KeyCode::Char('r') => Ok(Action::Confirm {
                message: "Restaurar datos de demostración? Se borra todo.".into(),
                pending: PendingAction::ResetDemo,
            }),
            _ => Ok(Action::None),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Respaldo ")
            .title_bottom(" e: exportar · i: importar · r: restaurar demo ")
            .borders(Borders::ALL);

        if self.files.is_empty() {
            f.render_widget(
                Paragraph::new(format!(
                    "Sin respaldos en {}. Pulse 'e' para exportar.",
                    self.exports_dir.display()
                ))
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = self
            .files
            .iter()
            .map(|p| {
                ListItem::new(
                    p.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| p.display().to_string()),
                )
            })
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .block(block);
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(list, area, &mut list_state);
    }
}

pub fn submit(state: &AppState, form: &Form) -> AppResult<String> {
    let path = PathBuf::from(form.value(0));
    backup::import_from_file(&state.storage, &path)?;
    Ok("Respaldo importado".into())
}
