//! Application shell
//!
//! The event loop owns the route, the current view's data and the modal
//! stack (alert, confirm, form). Number keys jump between sections,
//! `/` opens the global search prompt, `l` toggles the log pane.
//! Reminders from the background worker surface as toasts.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use tokio::sync::mpsc;
use tracing::{error, info};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetState};

use crate::calendar::Calendar;
use crate::core::AppState;
use crate::models::Settings;
use crate::services::reminder::Reminder;
use crate::ui::form::{Form, FormOutcome, FormTarget, centered_rect};
use crate::ui::router::Route;
use crate::ui::views::{
    self, Action, PendingAction, ViewData, appointments, backup, clients, inventory, invoices,
    services, settings,
};
use crate::utils::{AppError, AppResult};

const TOAST_SECS: u64 = 3;
const HELP_ASSET: &str = "ayuda.txt";

struct App {
    state: AppState,
    settings: Settings,
    route: Route,
    view: ViewData,
    calendar: Calendar,
    form: Option<Form>,
    confirm: Option<(String, PendingAction)>,
    alert: Option<String>,
    toast: Option<(String, Instant)>,
    search: Input,
    search_active: bool,
    query: String,
    show_logs: bool,
    show_help: bool,
    logger_state: TuiWidgetState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> AppResult<Self> {
        let settings = state.settings()?;
        let calendar = Calendar::default();
        let route = Route::default();
        let view = ViewData::load(route, &state, &calendar, "")?;
        Ok(Self {
            state,
            settings,
            route,
            view,
            calendar,
            form: None,
            confirm: None,
            alert: None,
            toast: None,
            search: Input::default(),
            search_active: false,
            query: String::new(),
            show_logs: false,
            show_help: false,
            logger_state: TuiWidgetState::new(),
            should_quit: false,
        })
    }

    /// Switch route and reload its data. The settings snapshot refreshes
    /// here, so edits take effect on the next navigation.
    fn navigate(&mut self, route: Route) -> AppResult<()> {
        self.settings = self.state.settings()?;
        self.view = ViewData::load(route, &self.state, &self.calendar, &self.query)?;
        self.route = route;
        Ok(())
    }

    fn reload(&mut self) -> AppResult<()> {
        self.navigate(self.route)
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    /// Show user-facing errors verbatim; log the rest behind a generic
    /// alert.
    fn report(&mut self, err: AppError) {
        if err.is_user_facing() {
            self.alert = Some(err.to_string());
        } else {
            error!("{err}");
            self.alert = Some("Ocurrió un error. Revise el log (tecla 'l').".into());
        }
    }

    fn apply(&mut self, action: Action) -> AppResult<()> {
        match action {
            Action::None => {}
            Action::Navigate(route) => self.navigate(route)?,
            Action::Reload => self.reload()?,
            Action::OpenForm(form) => self.form = Some(form),
            Action::Toast(message) => self.toast(message),
            Action::Confirm { message, pending } => self.confirm = Some((message, pending)),
        }
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // modal stack, innermost first
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.alert.is_some() {
            self.alert = None;
            return;
        }
        if self.confirm.is_some() {
            self.on_confirm_key(key);
            return;
        }
        if self.form.is_some() {
            self.on_form_key(key);
            return;
        }
        if self.search_active {
            self.on_search_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => {
                self.search = Input::default();
                self.search_active = true;
            }
            KeyCode::Char('l') => self.show_logs = !self.show_logs,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(d @ '1'..='8') => {
                if let Some(route) = Route::from_digit(d) {
                    if let Err(err) = self.navigate(route) {
                        self.report(err);
                    }
                }
            }
            KeyCode::Esc if matches!(self.route, Route::Busqueda | Route::NotFound) => {
                if let Err(err) = self.navigate(Route::Dashboard) {
                    self.report(err);
                }
            }
            _ => {
                let result = self
                    .view
                    .handle_key(key, &self.state, &mut self.calendar)
                    .and_then(|action| self.apply(action));
                if let Err(err) = result {
                    self.report(err);
                }
            }
        }
    }

    fn on_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('s') | KeyCode::Enter => {
                if let Some((_, pending)) = self.confirm.take() {
                    match views::execute_pending(&self.state, pending) {
                        Ok(message) => {
                            self.toast(message);
                            if let Err(err) = self.reload() {
                                self.report(err);
                            }
                        }
                        Err(err) => self.report(err),
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.confirm = None,
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else { return };
        match form.handle_key(key) {
            FormOutcome::Pending => {}
            FormOutcome::Cancel => self.form = None,
            FormOutcome::Submit => {
                let Some(form) = self.form.take() else { return };
                match submit_form(&self.state, &form) {
                    Ok(message) => {
                        self.toast(message);
                        if let Err(err) = self.reload() {
                            self.report(err);
                        }
                    }
                    Err(err) => {
                        // keep the form open so the user can fix it
                        self.form = Some(form);
                        self.report(err);
                    }
                }
            }
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.search_active = false,
            KeyCode::Enter => {
                self.search_active = false;
                self.query = self.search.value().to_string();
                if let Err(err) = self.navigate(Route::Busqueda) {
                    self.report(err);
                }
            }
            _ => {
                self.search.handle_event(&Event::Key(key));
            }
        }
    }

    fn on_reminder(&mut self, reminder: Reminder) {
        info!(appointment_id = %reminder.appointment_id, "{}: {}", reminder.title, reminder.body);
        self.toast(format!("{}: {}", reminder.title, reminder.body));
    }

    // ========== Rendering ==========

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)])
            .split(f.area());

        self.draw_header(f, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(20)])
            .split(chunks[1]);
        self.draw_sidebar(f, body[0]);

        if self.show_logs {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(10)])
                .split(body[1]);
            self.view.render(f, content[0], &self.settings);
            self.draw_logs(f, content[1]);
        } else {
            self.view.render(f, body[1], &self.settings);
        }

        self.draw_footer(f, chunks[2]);

        // overlays
        if let Some(form) = &self.form {
            form.render(f, f.area());
        }
        if let Some((message, _)) = &self.confirm {
            draw_modal(f, " Confirmar ", message, " s/Enter: sí · n/Esc: no ", Color::Yellow);
        }
        if let Some(message) = &self.alert {
            draw_modal(f, " Aviso ", message, " cualquier tecla: cerrar ", Color::Red);
        }
        if self.show_help {
            self.draw_help(f);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let title = if self.search_active {
            format!(" Buscar: {}▏", self.search.value())
        } else {
            format!(" Gestión de Salón — {} ", self.route.title())
        };
        let style = if self.search_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        f.render_widget(
            Paragraph::new(title).style(style).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn draw_sidebar(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Route::NAV
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let line = format!("{} {}", i + 1, route.title());
                let style = if *route == self.route {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::styled(line, style))
            })
            .collect();
        let list =
            List::new(items).block(Block::default().title(" Secciones ").borders(Borders::ALL));
        f.render_widget(list, area);
    }

    fn draw_logs(&mut self, f: &mut Frame, area: Rect) {
        let widget = TuiLoggerWidget::default()
            .block(Block::default().title(" Log ").borders(Borders::ALL))
            .output_separator('|')
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Green))
            .state(&self.logger_state);
        f.render_widget(widget, area);
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let text = match &self.toast {
            Some((message, _)) => Line::styled(
                format!(" {message} "),
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            None => Line::styled(
                " 1-8: secciones · /: buscar · l: log · ?: ayuda · q: salir ",
                Style::default().fg(Color::DarkGray),
            ),
        };
        f.render_widget(Paragraph::new(text), area);
    }

    fn draw_help(&self, f: &mut Frame) {
        let text = self
            .state
            .assets
            .get(HELP_ASSET)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|| "Ayuda no disponible".into());
        let area = centered_rect(f.area(), 70, f.area().height.saturating_sub(4));
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: false }).block(
                Block::default()
                    .title(" Ayuda ")
                    .title_bottom(" cualquier tecla: cerrar ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
            area,
        );
    }
}

/// Dispatch a submitted form to its view's persistence handler
fn submit_form(state: &AppState, form: &Form) -> AppResult<String> {
    match form.target.clone() {
        FormTarget::Client(id) => clients::submit(state, form, id),
        FormTarget::Service(id) => services::submit(state, form, id),
        FormTarget::Appointment(id) => appointments::submit(state, form, id),
        FormTarget::Invoice(id) => invoices::submit(state, form, id),
        FormTarget::Stock(id) => inventory::submit(state, form, id),
        FormTarget::Settings => settings::submit(state, form),
        FormTarget::ImportBackup => backup::submit(state, form),
    }
}

fn draw_modal(f: &mut Frame, title: &str, message: &str, hint: &str, color: Color) {
    let area = centered_rect(f.area(), 50, 5);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(title)
                    .title_bottom(hint)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// Run the terminal UI until the user quits
pub async fn run(
    state: AppState,
    mut reminder_rx: mpsc::UnboundedReceiver<Reminder>,
) -> AppResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, state, &mut reminder_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    reminder_rx: &mut mpsc::UnboundedReceiver<Reminder>,
) -> AppResult<()> {
    let tick_rate = Duration::from_millis(state.config.tick_rate_ms);
    let mut app = App::new(state)?;
    info!("UI started");

    while !app.should_quit {
        while let Ok(reminder) = reminder_rx.try_recv() {
            app.on_reminder(reminder);
        }
        if let Some((_, shown_at)) = &app.toast {
            if shown_at.elapsed() > Duration::from_secs(TOAST_SECS) {
                app.toast = None;
            }
        }

        terminal.draw(|f| app.draw(f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.on_key(key);
            }
        }
    }

    info!("UI stopped");
    Ok(())
}
