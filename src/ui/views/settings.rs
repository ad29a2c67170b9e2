//! Settings view
//!
//! Shows the current snapshot; editing goes through the modal form and
//! the app shell reloads its snapshot after a successful save.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::AppState;
use crate::models::{Settings, Theme, WorkHours};
use crate::repository::settings as settings_repo;
use crate::ui::form::{Field, Form, FormTarget};
use crate::ui::views::Action;
use crate::utils::time::parse_hm;
use crate::utils::{AppError, AppResult};

pub struct SettingsView {
    settings: Settings,
}

impl SettingsView {
    pub fn load(state: &AppState) -> AppResult<Self> {
        Ok(Self { settings: settings_repo::load(&state.storage)? })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppResult<Action> {
        match key.code {
            KeyCode::Char('e') | KeyCode::Enter => Ok(Action::OpenForm(form(&self.settings))),
            _ => Ok(Action::None),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let s = &self.settings;
        let theme = match s.theme {
            Theme::Dark => "dark",
            Theme::Light => "light",
        };
        let days = s
            .work_hours
            .days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let logo = s.logo_data_url.as_deref().unwrap_or("—");

        let lines = vec![
            Line::from(vec![Span::raw("Moneda:   "), Span::styled(&s.currency, Style::default().fg(Color::Yellow))]),
            Line::from(vec![Span::raw("Tema:     "), Span::styled(theme, Style::default().fg(Color::Yellow))]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Horario:  "),
                Span::styled(
                    format!("{} — {}", s.work_hours.from, s.work_hours.to),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(vec![Span::raw("Días:     "), Span::styled(days, Style::default().fg(Color::Cyan))]),
            Line::from(""),
            Line::from(vec![Span::raw("Logo:     "), Span::raw(logo)]),
        ];

        let widget = Paragraph::new(lines).block(
            Block::default()
                .title(" Configuración ")
                .title_bottom(" e: editar ")
                .borders(Borders::ALL),
        );
        f.render_widget(widget, area);
    }
}

pub fn form(settings: &Settings) -> Form {
    let days = settings
        .work_hours
        .days
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let theme = match settings.theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    };
    Form::new(
        "Configuración",
        FormTarget::Settings,
        vec![
            Field::new("Moneda*", settings.currency.clone()),
            Field::new("Tema (dark/light)", theme),
            Field::new("Horario desde (HH:MM)", settings.work_hours.from.clone()),
            Field::new("Horario hasta (HH:MM)", settings.work_hours.to.clone()),
            Field::new("Días (1=Lun .. 7=Dom)", days),
        ],
    )
}

pub fn submit(state: &AppState, form: &Form) -> AppResult<String> {
    let theme = match form.value(1).to_lowercase().as_str() {
        "" | "dark" => Theme::Dark,
        "light" => Theme::Light,
        other => return Err(AppError::validation(format!("Tema inválido: {other}"))),
    };
    let from = form.value(2);
    let to = form.value(3);
    parse_hm(&from)?;
    parse_hm(&to)?;
    let days: Vec<u8> = form
        .value(4)
        .split(',')
        .filter_map(|d| d.trim().parse().ok())
        .filter(|d| (1..=7).contains(d))
        .collect();

    let current = settings_repo::load(&state.storage)?;
    let settings = Settings {
        id: current.id,
        currency: form.value(0),
        theme,
        logo_data_url: current.logo_data_url,
        work_hours: WorkHours { from, to, days },
    };
    settings_repo::save(&state.storage, settings)?;
    Ok("Configuración guardada".into())
}
