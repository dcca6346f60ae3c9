use std::mem;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;
use open::that as open_path;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;
use tracing::error;

use crate::config::Config;
use crate::db::{
    daily_purchases, daily_sales_summary, fetch_places, fetch_products, purchases_total,
    record_purchase, record_sale, sales_total,
};
use crate::error::Error as LedgerError;
use crate::export::{document_lines, export_pdf, export_spreadsheet, format_amount};
use crate::session::{login, register, Session};

use super::forms::LoginForm;
use super::helpers::{centered_rect, sales_lines, surface_error, total_line};
use super::screens::{BalanceScreen, MenuItem, MenuScreen, PurchasesScreen, SalesScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const HEADER_HEIGHT: u16 = 3;
const NOT_LOGGED_IN: &str = "Not logged in.";

/// Navigation states. Each variant owns the state of the screen it shows, so
/// leaving a screen discards its half-typed input.
enum Screen {
    Login(LoginForm),
    Menu(MenuScreen),
    Sales(SalesScreen),
    Purchases(PurchasesScreen),
    Balance(BalanceScreen),
}

#[derive(Copy, Clone)]
enum ExportFormat {
    Pdf,
    Spreadsheet,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    config: Config,
    session: Option<Session>,
    places: Vec<String>,
    products: Vec<String>,
    screen: Screen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, config: Config) -> Self {
        Self {
            conn,
            config,
            session: None,
            places: Vec::new(),
            products: Vec::new(),
            screen: Screen::Login(LoginForm::default()),
            status: None,
        }
    }

    /// Dispatch a key press to the current screen. Returns `true` when the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let screen = mem::replace(&mut self.screen, Screen::Login(LoginForm::default()));

        self.screen = match screen {
            Screen::Login(form) => self.handle_login_key(code, form, &mut exit),
            Screen::Menu(menu) => self.handle_menu_key(code, menu, &mut exit),
            Screen::Sales(sales) => self.handle_sales_key(code, sales),
            Screen::Purchases(purchases) => self.handle_purchases_key(code, purchases),
            Screen::Balance(balance) => self.handle_balance_key(code, balance),
        };

        exit
    }

    /// Ctrl shortcuts: register on the login screen; export and open on the
    /// balance screen.
    pub(crate) fn handle_ctrl(&mut self, ch: char) {
        let screen = mem::replace(&mut self.screen, Screen::Login(LoginForm::default()));

        self.screen = match (screen, ch) {
            (Screen::Login(mut form), 'r') => {
                self.register_account(&mut form);
                Screen::Login(form)
            }
            (Screen::Balance(mut balance), 'p') => {
                if let Err(err) = self.export(&mut balance, ExportFormat::Pdf) {
                    self.report_failure(err);
                }
                Screen::Balance(balance)
            }
            (Screen::Balance(mut balance), 'x') => {
                if let Err(err) = self.export(&mut balance, ExportFormat::Spreadsheet) {
                    self.report_failure(err);
                }
                Screen::Balance(balance)
            }
            (Screen::Balance(balance), 'o') => {
                if let Err(err) = self.open_last_export(&balance) {
                    self.report_failure(err);
                }
                Screen::Balance(balance)
            }
            (screen, _) => screen,
        };
    }

    fn handle_login_key(&mut self, code: KeyCode, mut form: LoginForm, exit: &mut bool) -> Screen {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match login(&self.conn, &form.username, &form.password) {
                Ok(session) => {
                    self.set_status(
                        format!("Welcome, {}.", session.username()),
                        StatusKind::Info,
                    );
                    self.session = Some(session);
                    return Screen::Menu(MenuScreen::default());
                }
                Err(err) => {
                    form.password.clear();
                    form.error = Some(self.report_failure(err.into()));
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Screen::Login(form)
    }

    fn handle_menu_key(&mut self, code: KeyCode, mut menu: MenuScreen, exit: &mut bool) -> Screen {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Up => menu.move_selection(-1),
            KeyCode::Down => menu.move_selection(1),
            KeyCode::Esc => return self.logout(),
            KeyCode::Enter => {
                let opened = match menu.current() {
                    MenuItem::Sales => self.open_sales().map(Screen::Sales),
                    MenuItem::Purchases => self.open_purchases().map(Screen::Purchases),
                    MenuItem::Balance => Ok(Screen::Balance(BalanceScreen::default())),
                    MenuItem::Logout => return self.logout(),
                };
                match opened {
                    Ok(screen) => {
                        self.clear_status();
                        return screen;
                    }
                    Err(err) => {
                        self.report_failure(err);
                    }
                }
            }
            _ => {}
        }
        Screen::Menu(menu)
    }

    fn handle_sales_key(&mut self, code: KeyCode, mut sales: SalesScreen) -> Screen {
        match code {
            KeyCode::Esc => return Screen::Menu(MenuScreen { selected: 0 }),
            KeyCode::Tab | KeyCode::BackTab => sales.form.toggle_field(),
            KeyCode::Left => sales.form.cycle_method(-1),
            KeyCode::Right => sales.form.cycle_method(1),
            KeyCode::Backspace => sales.form.backspace(),
            KeyCode::Enter => {
                if let Err(err) = self.save_sale(&mut sales) {
                    sales.form.error = Some(self.report_failure(err));
                }
            }
            KeyCode::Char(ch) => {
                if sales.form.push_char(ch) {
                    sales.form.error = None;
                }
            }
            _ => {}
        }
        Screen::Sales(sales)
    }

    fn handle_purchases_key(&mut self, code: KeyCode, mut purchases: PurchasesScreen) -> Screen {
        let form = &mut purchases.form;
        match code {
            KeyCode::Esc => {
                if !form.cancel_autocomplete() {
                    return Screen::Menu(MenuScreen { selected: 1 });
                }
            }
            KeyCode::Tab => {
                if !form.accept_suggestion() {
                    form.toggle_field();
                }
                form.update_suggestion(&self.places, &self.products);
            }
            KeyCode::BackTab => {
                form.toggle_field_back();
                form.update_suggestion(&self.places, &self.products);
            }
            KeyCode::Backspace => {
                form.backspace();
                form.update_suggestion(&self.places, &self.products);
            }
            KeyCode::Enter => {
                if let Err(err) = self.save_purchase(&mut purchases) {
                    purchases.form.error = Some(self.report_failure(err));
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                    form.update_suggestion(&self.places, &self.products);
                }
            }
            _ => {}
        }
        Screen::Purchases(purchases)
    }

    fn handle_balance_key(&mut self, code: KeyCode, mut balance: BalanceScreen) -> Screen {
        match code {
            KeyCode::Esc => return Screen::Menu(MenuScreen { selected: 2 }),
            KeyCode::Tab | KeyCode::BackTab => balance.form.toggle_field(),
            KeyCode::Left => balance.form.cycle_kind(-1),
            KeyCode::Right => balance.form.cycle_kind(1),
            KeyCode::Backspace => balance.form.backspace(),
            KeyCode::Enter => {
                if let Err(err) = self.generate_report(&mut balance) {
                    balance.form.error = Some(self.report_failure(err));
                }
            }
            KeyCode::Char(ch) => {
                if balance.form.push_char(ch) {
                    balance.form.error = None;
                }
            }
            _ => {}
        }
        Screen::Balance(balance)
    }

    fn register_account(&mut self, form: &mut LoginForm) {
        match register(&self.conn, &form.username, &form.password) {
            Ok(user) => {
                form.error = None;
                self.set_status(
                    format!("User '{}' registered. Press Enter to log in.", user.username),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                form.error = Some(self.report_failure(err.into()));
            }
        }
    }

    fn logout(&mut self) -> Screen {
        if let Some(session) = self.session.take() {
            self.set_status(
                format!("Goodbye, {}.", session.username()),
                StatusKind::Info,
            );
        }
        Screen::Login(LoginForm::default())
    }

    fn open_sales(&mut self) -> Result<SalesScreen> {
        let summary =
            daily_sales_summary(&self.conn, today()).context("failed to load today's sales")?;
        Ok(SalesScreen::new(summary))
    }

    fn open_purchases(&mut self) -> Result<PurchasesScreen> {
        let purchases =
            daily_purchases(&self.conn, today()).context("failed to load today's purchases")?;
        self.reload_reference_names()?;
        Ok(PurchasesScreen::new(purchases))
    }

    fn reload_reference_names(&mut self) -> Result<()> {
        self.places = fetch_places(&self.conn).context("failed to load places")?;
        self.products = fetch_products(&self.conn).context("failed to load products")?;
        Ok(())
    }

    fn save_sale(&mut self, sales: &mut SalesScreen) -> Result<()> {
        let (value, method) = sales.form.parse_inputs()?;
        let date = today();
        record_sale(&self.conn, date, value, method).context("failed to record sale")?;
        sales.summary =
            daily_sales_summary(&self.conn, date).context("failed to reload today's sales")?;
        sales.form.reset();
        self.set_status(
            format!("Sale of {} ({method}) added.", format_amount(value)),
            StatusKind::Info,
        );
        Ok(())
    }

    fn save_purchase(&mut self, purchases: &mut PurchasesScreen) -> Result<()> {
        let date = today();
        let purchase = purchases.form.parse_inputs(date)?;
        let record = record_purchase(&self.conn, &purchase).context("failed to record purchase")?;
        purchases.purchases =
            daily_purchases(&self.conn, date).context("failed to reload today's purchases")?;
        purchases.form.reset();
        self.reload_reference_names()?;
        self.set_status(
            format!("Purchase added: {}", record.display_line()),
            StatusKind::Info,
        );
        Ok(())
    }

    fn generate_report(&mut self, balance: &mut BalanceScreen) -> Result<()> {
        let request = balance.form.to_request();
        let session = self.session.as_mut().context(NOT_LOGGED_IN)?;
        let report = session
            .generate_report(&self.conn, &request, today())
            .context("failed to generate report")?;
        let message = format!("{} generated.", report.title());
        balance.form.error = None;
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    fn export(&mut self, balance: &mut BalanceScreen, format: ExportFormat) -> Result<()> {
        let session = self.session.as_ref().context(NOT_LOGGED_IN)?;
        let report = session.require_report()?;
        let dir = &self.config.export_dir;
        let path = match format {
            ExportFormat::Pdf => export_pdf(report, dir),
            ExportFormat::Spreadsheet => export_spreadsheet(report, dir),
        }
        .context("failed to export report")?;

        self.set_status(
            format!("Exported to {}", path.display()),
            StatusKind::Info,
        );
        balance.last_export = Some(path);
        Ok(())
    }

    fn open_last_export(&mut self, balance: &BalanceScreen) -> Result<()> {
        match &balance.last_export {
            Some(path) => {
                open_path(path).context("failed to open exported file")?;
                self.set_status(format!("Opened {}", path.display()), StatusKind::Info);
            }
            None => self.set_status("Nothing exported yet.", StatusKind::Error),
        }
        Ok(())
    }

    /// Show the innermost cause in the footer and return it for inline form
    /// errors. Failures the user cannot fix by editing input are also logged.
    fn report_failure(&mut self, err: anyhow::Error) -> String {
        let user_facing = err
            .downcast_ref::<LedgerError>()
            .is_some_and(LedgerError::is_user_facing);
        if !user_facing {
            error!(error = %format!("{err:#}"), "Action failed");
        }

        let message = surface_error(&err);
        self.set_status(message.clone(), StatusKind::Error);
        message
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        match &self.screen {
            Screen::Login(form) => self.draw_login(frame, chunks[1], form),
            Screen::Menu(menu) => self.draw_menu(frame, chunks[1], menu),
            Screen::Sales(sales) => self.draw_sales(frame, chunks[1], sales),
            Screen::Purchases(purchases) => self.draw_purchases(frame, chunks[1], purchases),
            Screen::Balance(balance) => self.draw_balance(frame, chunks[1], balance),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.screen {
            Screen::Login(_) => "Log in",
            Screen::Menu(_) => "Main menu",
            Screen::Sales(_) => "Sales",
            Screen::Purchases(_) => "Purchases",
            Screen::Balance(_) => "Balance & Reports",
        };
        let user = match &self.session {
            Some(session) => format!("{}  |  {}", session.username(), today()),
            None => today().to_string(),
        };
        let line = Line::from(vec![
            Span::styled(
                "Shop Ledger  ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{title}  |  {user}")),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(paragraph, area);
    }

    fn draw_login(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);
        let block = Block::default().title("Log in").borders(Borders::ALL);
        let inner = block.inner(popup_area);

        let mut lines = form.lines();
        lines.push(Line::from(""));
        lines.push(form_hint(
            &form.error,
            "Enter to log in • Ctrl+R to register • Tab to switch",
        ));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            popup_area,
        );

        let (row, col) = form.cursor();
        frame.set_cursor_position((inner.x + col as u16, inner.y + row));
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect, menu: &MenuScreen) {
        let popup_area = centered_rect(40, 50, area);
        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| ListItem::new(item.label()))
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Menu").borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(menu.selected));
        frame.render_stateful_widget(list, popup_area, &mut state);
    }

    fn draw_sales(&self, frame: &mut Frame, area: Rect, sales: &SalesScreen) {
        let (form_area, list_area) = split_form_and_list(area, 6);

        let block = Block::default().title("New sale").borders(Borders::ALL);
        let inner = block.inner(form_area);
        let mut lines = sales.form.lines();
        lines.push(Line::from(""));
        lines.push(form_hint(
            &sales.form.error,
            "Enter to add • Tab to switch • ←→ payment method • Esc back",
        ));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            form_area,
        );
        if let Some((row, col)) = sales.form.cursor() {
            frame.set_cursor_position((inner.x + col as u16, inner.y + row));
        }

        let summary = sales_lines(&sales.summary, sales_total(&sales.summary));
        frame.render_widget(
            Paragraph::new(summary)
                .block(Block::default().title("Today's sales").borders(Borders::ALL)),
            list_area,
        );
    }

    fn draw_purchases(&self, frame: &mut Frame, area: Rect, purchases: &PurchasesScreen) {
        let (form_area, list_area) = split_form_and_list(area, 8);

        let block = Block::default().title("New purchase").borders(Borders::ALL);
        let inner = block.inner(form_area);
        let mut lines = purchases.form.lines();
        lines.push(Line::from(""));
        lines.push(form_hint(
            &purchases.form.error,
            "Enter to add • Tab to accept/switch • Esc back",
        ));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            form_area,
        );
        let (row, col) = purchases.form.cursor();
        frame.set_cursor_position((inner.x + col as u16, inner.y + row));

        let mut listing: Vec<Line<'static>> = purchases
            .purchases
            .iter()
            .map(|p| Line::from(p.display_line()))
            .collect();
        listing.push(total_line("Total", purchases_total(&purchases.purchases)));
        frame.render_widget(
            Paragraph::new(listing)
                .block(Block::default().title("Today's purchases").borders(Borders::ALL)),
            list_area,
        );
    }

    fn draw_balance(&self, frame: &mut Frame, area: Rect, balance: &BalanceScreen) {
        let (form_area, report_area) = split_form_and_list(area, 7);

        let block = Block::default().title("Report").borders(Borders::ALL);
        let inner = block.inner(form_area);
        let mut lines = balance.form.lines();
        lines.push(Line::from(""));
        lines.push(form_hint(
            &balance.form.error,
            "Enter to generate • ←→ period • Tab to switch • Esc back",
        ));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            form_area,
        );
        if let Some((row, col)) = balance.form.cursor() {
            frame.set_cursor_position((inner.x + col as u16, inner.y + row));
        }

        let report = self.session.as_ref().and_then(Session::current_report);
        let mut body: Vec<Line<'static>> = match report {
            Some(report) => document_lines(report).into_iter().map(Line::from).collect(),
            None => vec![Line::from(Span::styled(
                "No report generated yet.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        if let Some(path) = &balance.last_export {
            body.push(Line::from(""));
            body.push(Line::from(Span::styled(
                format!("Last export: {}", path.display()),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(
            Paragraph::new(body)
                .block(Block::default().title("Result").borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            report_area,
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match &self.screen {
            Screen::Login(_) => &[
                ("[Enter]", " Log in   "),
                ("[Ctrl+R]", " Register   "),
                ("[Esc]", " Quit"),
            ],
            Screen::Menu(_) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[Esc]", " Log out   "),
                ("[q]", " Quit"),
            ],
            Screen::Sales(_) | Screen::Purchases(_) => &[
                ("[Enter]", " Add   "),
                ("[Tab]", " Next field   "),
                ("[Esc]", " Back"),
            ],
            Screen::Balance(_) => &[
                ("[Enter]", " Generate   "),
                ("[Ctrl+P]", " PDF   "),
                ("[Ctrl+X]", " Spreadsheet   "),
                ("[Ctrl+O]", " Open export   "),
                ("[Esc]", " Back"),
            ],
        };
        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(action.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Inline form error in red, or the usage hint when there is none.
fn form_hint(error: &Option<String>, hint: &str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    }
}

/// Stack a fixed-height form above a flexible listing.
fn split_form_and_list(area: Rect, form_height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn app() -> App {
        let dir = std::env::temp_dir().join("shop-ledger-ui-tests");
        App::new(open_in_memory().unwrap(), Config::new(&dir, dir.join("exports")))
    }

    fn type_keys(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    #[test]
    fn register_login_and_record_a_sale() {
        let mut app = app();
        type_keys(&mut app, "ana");
        app.handle_key(KeyCode::Tab);
        type_keys(&mut app, "pw");
        app.handle_ctrl('r');
        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Menu(_)));
        assert_eq!(app.session.as_ref().map(Session::username), Some("ana"));

        app.handle_key(KeyCode::Enter);
        assert!(matches!(app.screen, Screen::Sales(_)));
        type_keys(&mut app, "42");
        app.handle_key(KeyCode::Enter);

        match &app.screen {
            Screen::Sales(sales) => {
                assert_eq!(sales_total(&sales.summary), 42.0);
                assert!(sales.form.value.is_empty());
            }
            _ => panic!("expected the sales screen"),
        }
    }

    #[test]
    fn bad_credentials_stay_on_login() {
        let mut app = app();
        type_keys(&mut app, "ghost");
        app.handle_key(KeyCode::Tab);
        type_keys(&mut app, "nope");
        app.handle_key(KeyCode::Enter);

        match &app.screen {
            Screen::Login(form) => {
                assert_eq!(form.error.as_deref(), Some("Invalid credentials."));
                assert!(form.password.is_empty());
            }
            _ => panic!("expected the login screen"),
        }
        assert!(app.session.is_none());
    }

    #[test]
    fn balance_actions_without_a_session_say_so() {
        let mut app = app();
        app.screen = Screen::Balance(BalanceScreen::default());

        app.handle_key(KeyCode::Enter);
        match &app.screen {
            Screen::Balance(balance) => {
                assert_eq!(balance.form.error.as_deref(), Some(NOT_LOGGED_IN));
            }
            _ => panic!("expected the balance screen"),
        }

        app.handle_ctrl('p');
        assert_eq!(app.status.as_ref().map(|s| s.text.as_str()), Some(NOT_LOGGED_IN));
    }

    #[test]
    fn escape_from_menu_logs_out() {
        let mut app = app();
        type_keys(&mut app, "ana");
        app.handle_key(KeyCode::Tab);
        type_keys(&mut app, "pw");
        app.handle_ctrl('r');
        app.handle_key(KeyCode::Enter);

        app.handle_key(KeyCode::Esc);
        assert!(matches!(app.screen, Screen::Login(_)));
        assert!(app.session.is_none());
    }
}
