//! Modal forms
//!
//! One generic form widget drives every create/edit dialog: a titled
//! stack of labelled text fields backed by `tui-input`. Tab/Shift-Tab
//! (or Up/Down) move focus, Enter submits, Esc cancels. Parsing and
//! persistence live with each view's submit handler.

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// What the form writes to when submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Client(Option<String>),
    Service(Option<String>),
    Appointment(Option<String>),
    Invoice(Option<String>),
    Stock(Option<String>),
    Settings,
    ImportBackup,
}

/// A single labelled text field
pub struct Field {
    pub label: &'static str,
    pub input: Input,
}

impl Field {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, input: Input::new(value.into()) }
    }
}

/// What the form wants the app to do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Submit,
    Cancel,
}

/// A modal form
pub struct Form {
    pub title: String,
    pub target: FormTarget,
    pub fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(title: impl Into<String>, target: FormTarget, fields: Vec<Field>) -> Self {
        Self { title: title.into(), target, fields, focus: 0 }
    }

    /// Trimmed value of the field at `index`
    pub fn value(&self, index: usize) -> String {
        self.fields
            .get(index)
            .map(|f| f.input.value().trim().to_string())
            .unwrap_or_default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => FormOutcome::Cancel,
            KeyCode::Enter => FormOutcome::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len().max(1);
                FormOutcome::Pending
            }
            KeyCode::BackTab | KeyCode::Up => {
                let len = self.fields.len().max(1);
                self.focus = (self.focus + len - 1) % len;
                FormOutcome::Pending
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.input.handle_event(&Event::Key(key));
                }
                FormOutcome::Pending
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let height = (self.fields.len() as u16) * 3 + 2;
        let modal = centered_rect(area, 60, height.min(area.height));
        f.render_widget(Clear, modal);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_bottom(" Enter: guardar · Esc: cancelar · Tab: campo ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(modal);
        f.render_widget(block, modal);

        let constraints: Vec<Constraint> =
            self.fields.iter().map(|_| Constraint::Length(3)).collect();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let Some(row) = rows.get(i) else { break };
            let focused = i == self.focus;
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            let width = row.width.max(3) - 3;
            let scroll = field.input.visual_scroll(width as usize);
            let widget = Paragraph::new(field.input.value())
                .style(style)
                .scroll((0, scroll as u16))
                .block(Block::default().borders(Borders::ALL).title(field.label));
            f.render_widget(widget, *row);

            if focused {
                f.set_cursor_position((
                    row.x + ((field.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
                    row.y + 1,
                ));
            }
        }
    }
}

/// A centered rect of the given percentage width and fixed height
pub fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut form = Form::new(
            "Cliente",
            FormTarget::Client(None),
            vec![Field::new("Nombre*", ""), Field::new("Teléfono", "")],
        );
        form.handle_key(key(KeyCode::Char('A')));
        form.handle_key(key(KeyCode::Char('n')));
        form.handle_key(key(KeyCode::Char('a')));
        assert_eq!(form.value(0), "Ana");
        assert_eq!(form.value(1), "");

        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Char('6')));
        assert_eq!(form.value(1), "6");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut form = Form::new(
            "Servicio",
            FormTarget::Service(None),
            vec![Field::new("a", ""), Field::new("b", ""), Field::new("c", "")],
        );
        form.handle_key(key(KeyCode::BackTab));
        form.handle_key(key(KeyCode::Char('x')));
        assert_eq!(form.value(2), "x");
    }

    #[test]
    fn enter_and_esc_outcomes() {
        let mut form =
            Form::new("Cliente", FormTarget::Client(None), vec![Field::new("Nombre*", "")]);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
        assert_eq!(form.handle_key(key(KeyCode::Char('z'))), FormOutcome::Pending);
    }
}
