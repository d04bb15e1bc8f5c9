use std::{io, sync::Arc, thread, time::Duration};

use anyhow::{Context, Result};
use courtside_core::{
    form::{ErrorSlot, SubmissionOutcome},
    gateway::Reply,
    models::{OptionLists, PlayerRegistration, Reservation, ReservationRequest},
    options::OptionKind,
    spawn_option_fetches,
    workflow::{self, Begin, Notification, NotificationKind, Submission},
    AppConfig, BookingWindow, CourtApi, GatewayError, SharedOptions, ValidationError,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use tokio::{spawn, sync::mpsc};
use tracing::{debug, error, info};

use crate::form_view::{FormAction, FormScreen, FormLayout, InputKind};

const TICK_RATE: Duration = Duration::from_millis(250);
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const MENU_ITEMS: [&str; 4] = ["Reserve Form", "Player Form", "Reservations", "Quit"];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    on_accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Green,
            on_accent: Color::Black,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            danger: Color::Red,
        }
    }
}

enum Screen {
    Menu,
    Register(FormScreen<PlayerRegistration>),
    Reserve(FormScreen<ReservationRequest>),
    Reservations(ListingState),
}

struct ListingState {
    session: u64,
    records: Vec<Reservation>,
    loading: bool,
    offset: usize,
}

enum AppEvent {
    Input(Event),
    Tick,
    Registered {
        session: u64,
        result: Result<Reply, GatewayError>,
    },
    Reserved {
        session: u64,
        result: Result<Reply, GatewayError>,
    },
    ReservationsLoaded {
        session: u64,
        result: Result<Vec<Reservation>, GatewayError>,
    },
}

/// Terminal front end for the reservation service.
pub struct CourtsideApp {
    api: Arc<dyn CourtApi>,
    config: AppConfig,
    screen: Screen,
    state: UiState,
    notification: Option<Notification>,
    next_session: u64,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    theme: Theme,
}

impl CourtsideApp {
    pub fn new(api: Arc<dyn CourtApi>, config: AppConfig) -> Self {
        Self {
            api,
            config,
            screen: Screen::Menu,
            state: UiState::default(),
            notification: None,
            next_session: 0,
            event_tx: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state
            .set_status(format!("Connected to {}", self.config.api_base_url));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                true
            }
            Some(AppEvent::Registered { session, result }) => {
                match &mut self.screen {
                    Screen::Register(screen) if screen.session == session => {
                        let notification = workflow::settle(&mut screen.form, result);
                        if notification.is_success() {
                            screen.cursor = 0;
                        }
                        self.show_notification(notification);
                    }
                    _ => debug!(session, "Dropping registration result for a closed form"),
                }
                true
            }
            Some(AppEvent::Reserved { session, result }) => {
                match &mut self.screen {
                    Screen::Reserve(screen) if screen.session == session => {
                        let notification = workflow::settle(&mut screen.form, result);
                        if notification.is_success() {
                            screen.cursor = 0;
                        }
                        self.show_notification(notification);
                    }
                    _ => debug!(session, "Dropping reservation result for a closed form"),
                }
                true
            }
            Some(AppEvent::ReservationsLoaded { session, result }) => {
                if let Screen::Reservations(listing) = &mut self.screen {
                    if listing.session == session {
                        listing.loading = false;
                        match result {
                            Ok(records) => {
                                info!(total = records.len(), "Reservations loaded");
                                listing.records = records;
                                listing.offset = 0;
                                self.state.set_status(format!(
                                    "Loaded {} reservations",
                                    listing.records.len()
                                ));
                            }
                            Err(err) => {
                                error!(%err, "Failed to load reservations");
                                listing.records.clear();
                                self.state
                                    .set_status(format!("Failed to load reservations: {err}"));
                            }
                        }
                    }
                }
                true
            }
            None => false,
        }
    }

    fn show_notification(&mut self, notification: Notification) {
        let summary = match &notification.text {
            Some(text) => format!("{} {}", notification.title, text),
            None => notification.title.clone(),
        };
        self.state.set_status(summary);
        self.notification = Some(notification);
    }

    fn next_session(&mut self) -> u64 {
        self.next_session += 1;
        self.next_session
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return Ok(());
        }
        if self.notification.is_some() {
            self.notification = None;
            return Ok(());
        }

        match &mut self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Register(screen) => {
                let action = screen.handle_key(key)?;
                match action {
                    FormAction::Submit => self.submit_registration(),
                    FormAction::Cancel => self.open_menu(),
                    FormAction::None => {}
                }
                Ok(())
            }
            Screen::Reserve(screen) => {
                let action = screen.handle_key(key)?;
                match action {
                    FormAction::Submit => self.submit_reservation(),
                    FormAction::Cancel => self.open_menu(),
                    FormAction::None => {}
                }
                Ok(())
            }
            Screen::Reservations(listing) => {
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => self.open_menu(),
                    KeyCode::Char('r') if !listing.loading => self.open_reservations(),
                    KeyCode::Down | KeyCode::Char('j') => {
                        if listing.offset + 1 < listing.records.len() {
                            listing.offset += 1;
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        listing.offset = listing.offset.saturating_sub(1);
                    }
                    _ => {}
                }
                Ok(())
            }
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.state.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.move_menu_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_menu_cursor(-1),
            KeyCode::Enter => match self.state.menu_cursor {
                0 => self.open_reserve_form(),
                1 => self.open_player_form(),
                2 => self.open_reservations(),
                _ => self.state.should_quit = true,
            },
            _ => {}
        }
        Ok(())
    }

    fn open_menu(&mut self) {
        self.screen = Screen::Menu;
        self.state.set_status("Select a form".to_string());
    }

    fn open_player_form(&mut self) {
        let session = self.next_session();
        self.screen = Screen::Register(FormScreen::new(session, PlayerRegistration::default()));
        self.state.set_status("Register a new player".to_string());
    }

    fn open_reserve_form(&mut self) {
        let session = self.next_session();
        let window = BookingWindow::from_today(self.config.booking_window_days);
        let options = SharedOptions::new();
        // Handles are dropped: the lookups run to completion on their own.
        spawn_option_fetches(Arc::clone(&self.api), &options);
        let screen = FormScreen::new(session, ReservationRequest::new(window.first()))
            .with_options(options)
            .with_window(window);
        self.screen = Screen::Reserve(screen);
        self.state.set_status("Loading courts, turns and players".to_string());
    }

    fn open_reservations(&mut self) {
        let session = self.next_session();
        self.screen = Screen::Reservations(ListingState {
            session,
            records: Vec::new(),
            loading: true,
            offset: 0,
        });
        self.state.set_status("Loading reservations".to_string());

        let Some(sender) = self.event_tx.clone() else {
            return;
        };
        let api = Arc::clone(&self.api);
        spawn(async move {
            let result = api.list_reservations().await;
            let _ = sender
                .send(AppEvent::ReservationsLoaded { session, result })
                .await;
        });
    }

    fn submit_registration(&mut self) {
        let Screen::Register(screen) = &mut self.screen else {
            return;
        };
        let session = screen.session;
        if let Some(payload) = begin_submission(screen, &mut self.state) {
            info!(session, "Submitting player registration");
            self.spawn_send::<PlayerRegistration>(session, payload, |session, result| {
                AppEvent::Registered { session, result }
            });
        }
    }

    fn submit_reservation(&mut self) {
        let Screen::Reserve(screen) = &mut self.screen else {
            return;
        };
        let session = screen.session;
        if let Some(payload) = begin_submission(screen, &mut self.state) {
            info!(session, "Submitting court reservation");
            self.spawn_send::<ReservationRequest>(session, payload, |session, result| {
                AppEvent::Reserved { session, result }
            });
        }
    }

    fn spawn_send<V: Submission>(
        &self,
        session: u64,
        payload: V::Payload,
        wrap: fn(u64, Result<Reply, GatewayError>) -> AppEvent,
    ) {
        let Some(sender) = self.event_tx.clone() else {
            return;
        };
        let api = Arc::clone(&self.api);
        spawn(async move {
            let result = V::send(api.as_ref(), payload).await;
            let _ = sender.send(wrap(session, result)).await;
        });
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_title(frame, layout[0]);
        match &self.screen {
            Screen::Menu => self.render_menu(frame, layout[1]),
            Screen::Register(screen) => {
                self.render_form(frame, layout[1], screen, "Player Form")
            }
            Screen::Reserve(screen) => self.render_form(frame, layout[1], screen, "Reserve Form"),
            Screen::Reservations(listing) => self.render_listing(frame, layout[1], listing),
        }
        self.render_status(frame, layout[2]);

        if let Some(notification) = &self.notification {
            self.render_notification(frame, notification);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(Span::styled(
            "Tennis Reserve",
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let menu_height = (MENU_ITEMS.len() as u16)
            .saturating_mul(2)
            .saturating_add(2)
            .min(area.height);
        let menu_width = 28.min(area.width.max(1));
        let menu_area = centered_rect(menu_width, menu_height, area);

        let menu_lines: Vec<Line> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                if idx == self.state.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {item}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {item}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();

        let menu = Paragraph::new(menu_lines)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .alignment(Alignment::Center);
        frame.render_widget(menu, menu_area);
    }

    fn render_form<V: FormLayout>(
        &self,
        frame: &mut Frame,
        area: Rect,
        screen: &FormScreen<V>,
        title: &str,
    ) {
        let lists = screen.option_lists();
        let mut lines: Vec<Line> = Vec::new();

        for (idx, field) in V::FIELDS.iter().copied().enumerate() {
            let focused = idx == screen.cursor;
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            lines.push(Line::from(Span::styled(format!("{field}:"), label_style)));

            let value = screen.display_value(field, &lists);
            let empty = screen.form.value().field_value(field).is_empty();
            let value_style = if focused {
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg)
            } else if empty {
                Style::default().fg(self.theme.muted)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            let shown = match V::input_kind(field) {
                InputKind::Select | InputKind::Date => format!("◀ {value} ▶"),
                InputKind::Text | InputKind::Secret if focused => format!("{value}_"),
                InputKind::Text | InputKind::Secret => value,
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(shown, value_style),
            ]));

            let mut messages: Vec<&str> = V::errors_for(field)
                .iter()
                .filter_map(|slot| screen.form.error(*slot))
                .collect();
            if screen.missing == Some(field) {
                if let Some(message) = screen.form.error(ErrorSlot::Required) {
                    messages.push(message);
                }
            }
            for message in messages {
                lines.push(Line::from(Span::styled(
                    format!("  {message}"),
                    Style::default().fg(self.theme.danger),
                )));
            }
        }

        lines.push(Line::from(""));
        let busy = screen.form.outcome() == SubmissionOutcome::InFlight;
        let button = if busy {
            let glyph = SPINNER[self.state.spinner_frame % SPINNER.len()];
            format!("[ {glyph} {} ]", V::SUBMIT_LABEL)
        } else {
            format!("[ {} ]", V::SUBMIT_LABEL)
        };
        let button_style = if busy {
            Style::default().fg(self.theme.muted)
        } else if screen.on_submit_button() {
            Style::default()
                .fg(self.theme.on_accent)
                .bg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.accent)
        };
        lines.push(Line::from(vec![
            Span::styled(button, button_style),
            Span::raw("   "),
            Span::styled("[ CANCEL: Esc ]", Style::default().fg(self.theme.muted)),
        ]));
        lines.push(Line::from(Span::styled(
            "Tab/↑↓ move  ←→ choose  Enter submit",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_listing(&self, frame: &mut Frame, area: Rect, listing: &ListingState) {
        let header = Row::new(vec!["Date to Play", "Turn", "Court", "Player 1", "Player 2"])
            .style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        let rows: Vec<Row> = listing
            .records
            .iter()
            .skip(listing.offset)
            .map(|record| {
                Row::new(vec![
                    record.display_date(),
                    record.turn.clone(),
                    record.court.clone(),
                    record.player1.clone(),
                    record.player2.clone(),
                ])
            })
            .collect();
        let title = if listing.loading {
            "Reservations (loading…)".to_string()
        } else {
            format!("Reservations ({})", listing.records.len())
        };
        let widths = [
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(table, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let secondary = match &self.screen {
            Screen::Reserve(screen) => option_summary(&screen.option_lists()),
            Screen::Reservations(_) => "r refresh  ↑↓ scroll  Esc back".to_string(),
            _ => format!("Service: {}", self.config.api_base_url),
        };
        let paragraph = Paragraph::new(vec![
            Line::from(self.state.status.clone()),
            Line::from(Span::styled(
                secondary,
                Style::default().fg(self.theme.muted),
            )),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_notification(&self, frame: &mut Frame, notification: &Notification) {
        let frame_area = frame.size();
        let width = 50_u16.min(frame_area.width.saturating_sub(4)).max(24);
        let height = 7_u16.min(frame_area.height.saturating_sub(2)).max(5);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let color = match notification.kind {
            NotificationKind::Success => self.theme.success,
            NotificationKind::Failure => self.theme.danger,
        };
        let mut lines = vec![Line::from(Span::styled(
            notification.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(text) = &notification.text {
            lines.push(Line::from(text.clone()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Run validation for a mounted form; `Some` means send the payload now.
fn begin_submission<V: FormLayout>(
    screen: &mut FormScreen<V>,
    state: &mut UiState,
) -> Option<V::Payload> {
    match workflow::begin(&mut screen.form) {
        Begin::Ready(payload) => {
            screen.missing = None;
            state.set_status("Submitting…".to_string());
            Some(payload)
        }
        Begin::Busy => {
            state.set_status("A submission is already in progress".to_string());
            None
        }
        Begin::Rejected(error) => {
            let focused = screen.apply_focus_request();
            if matches!(error, ValidationError::MissingField(_)) {
                screen.missing = focused;
            }
            let status = match &error {
                ValidationError::MissingField(label) => format!("{label}: {error}"),
                _ => error.to_string(),
            };
            state.set_status(status);
            None
        }
    }
}

fn option_summary(lists: &OptionLists) -> String {
    let describe = |kind: OptionKind, name: &str, list: &Option<Vec<String>>| match list {
        Some(values) => format!("{name}: {}", values.len()),
        None if lists.failed.contains(&kind) => format!("{name}: unavailable"),
        None => format!("{name}: …"),
    };
    [
        describe(OptionKind::Courts, "courts", &lists.courts),
        describe(OptionKind::Turns, "turns", &lists.turns),
        describe(OptionKind::Players, "players", &lists.players),
    ]
    .join("  ")
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

struct UiState {
    status: String,
    should_quit: bool,
    menu_cursor: usize,
    spinner_frame: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            should_quit: false,
            menu_cursor: 0,
            spinner_frame: 0,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn move_menu_cursor(&mut self, delta: isize) {
        let len = MENU_ITEMS.len() as isize;
        self.menu_cursor = (self.menu_cursor as isize + delta).rem_euclid(len) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use courtside_core::{
        models::{NewPlayer, RegistrationField},
        ReservationPayload,
    };

    struct OfflineApi;

    #[async_trait]
    impl CourtApi for OfflineApi {
        async fn register_player(&self, _player: &NewPlayer) -> Result<Reply, GatewayError> {
            Ok(Reply::Accepted)
        }
        async fn list_courts(&self) -> Result<Vec<String>, GatewayError> {
            Ok(Vec::new())
        }
        async fn list_turn_slots(&self) -> Result<Vec<String>, GatewayError> {
            Ok(Vec::new())
        }
        async fn list_player_names(&self) -> Result<Vec<String>, GatewayError> {
            Ok(Vec::new())
        }
        async fn create_reservation(
            &self,
            _reservation: &ReservationPayload,
        ) -> Result<Reply, GatewayError> {
            Ok(Reply::Accepted)
        }
        async fn list_reservations(&self) -> Result<Vec<Reservation>, GatewayError> {
            Ok(Vec::new())
        }
    }

    fn app() -> CourtsideApp {
        let config = AppConfig {
            api_base_url: "http://localhost:9".to_string(),
            request_timeout_secs: 30,
            booking_window_days: 2,
        };
        CourtsideApp::new(Arc::new(OfflineApi), config)
    }

    fn filled_registration(app: &mut CourtsideApp) -> u64 {
        app.open_player_form();
        let Screen::Register(screen) = &mut app.screen else {
            panic!("expected the player form");
        };
        for (field, raw) in [
            (RegistrationField::NamePlayer, "Ann"),
            (RegistrationField::Celular, "+56911112222"),
            (RegistrationField::Email, "ann@club.cl"),
            (RegistrationField::Pwd, "secret"),
            (RegistrationField::RetypePwd, "secret"),
        ] {
            screen
                .form
                .set_field(field, raw, field.is_secret())
                .expect("text fields accept any input");
        }
        assert!(matches!(workflow::begin(&mut screen.form), Begin::Ready(_)));
        screen.session
    }

    #[test]
    fn result_for_the_mounted_form_settles_it() {
        let mut app = app();
        let session = filled_registration(&mut app);

        app.process_app_event(Some(AppEvent::Registered {
            session,
            result: Ok(Reply::Accepted),
        }));

        let Screen::Register(screen) = &app.screen else {
            panic!("expected the player form");
        };
        assert!(!screen.form.is_busy());
        assert_eq!(screen.form.value(), &PlayerRegistration::default());
        let notification = app.notification.as_ref().expect("notification shown");
        assert!(notification.is_success());
    }

    #[test]
    fn result_for_a_closed_form_is_ignored() {
        let mut app = app();
        let stale = filled_registration(&mut app);
        app.open_player_form();

        app.process_app_event(Some(AppEvent::Registered {
            session: stale,
            result: Ok(Reply::Accepted),
        }));

        assert!(app.notification.is_none());
    }

    #[test]
    fn any_key_dismisses_the_notification() -> Result<()> {
        let mut app = app();
        app.show_notification(Notification::failure(None));

        app.handle_input(Event::Key(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )))?;

        assert!(app.notification.is_none());
        assert!(matches!(app.screen, Screen::Menu));
        Ok(())
    }

    #[test]
    fn status_line_reports_failed_lists() {
        let options = SharedOptions::new();
        options.store(OptionKind::Courts, vec!["1".to_string(), "2".to_string()]);
        options.mark_failed(OptionKind::Turns);

        assert_eq!(
            option_summary(&options.snapshot()),
            "courts: 2  turns: unavailable  players: …"
        );
    }

    #[test]
    fn menu_cursor_wraps() {
        let mut state = UiState::default();
        state.move_menu_cursor(-1);
        assert_eq!(state.menu_cursor, MENU_ITEMS.len() - 1);
        state.move_menu_cursor(1);
        assert_eq!(state.menu_cursor, 0);
    }
}
