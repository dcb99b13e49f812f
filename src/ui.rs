use bankist::{AccountOverview, SessionController};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

/// Which input box keystrokes go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LoginUsername,
    LoginPin,
    TransferTo,
    TransferAmount,
    LoanAmount,
    CloseUsername,
    ClosePin,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::LoginUsername => Field::LoginPin,
            Field::LoginPin => Field::LoginUsername,
            Field::TransferTo => Field::TransferAmount,
            Field::TransferAmount => Field::LoanAmount,
            Field::LoanAmount => Field::CloseUsername,
            Field::CloseUsername => Field::ClosePin,
            Field::ClosePin => Field::TransferTo,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::LoginUsername => Field::LoginPin,
            Field::LoginPin => Field::LoginUsername,
            Field::TransferTo => Field::ClosePin,
            Field::TransferAmount => Field::TransferTo,
            Field::LoanAmount => Field::TransferAmount,
            Field::CloseUsername => Field::LoanAmount,
            Field::ClosePin => Field::CloseUsername,
        }
    }
}

pub struct App {
    pub session: SessionController,
    pub screen: Screen,
    pub focus: Field,
    pub login_username: String,
    pub login_pin: String,
    pub transfer_to: String,
    pub transfer_amount: String,
    pub loan_amount: String,
    pub close_username: String,
    pub close_pin: String,
}

impl App {
    pub fn new(session: SessionController) -> Self {
        Self {
            session,
            screen: Screen::Login,
            focus: Field::LoginUsername,
            login_username: String::new(),
            login_pin: String::new(),
            transfer_to: String::new(),
            transfer_amount: String::new(),
            loan_amount: String::new(),
            close_username: String::new(),
            close_pin: String::new(),
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        match self.focus {
            Field::LoginUsername => &mut self.login_username,
            Field::LoginPin => &mut self.login_pin,
            Field::TransferTo => &mut self.transfer_to,
            Field::TransferAmount => &mut self.transfer_amount,
            Field::LoanAmount => &mut self.loan_amount,
            Field::CloseUsername => &mut self.close_username,
            Field::ClosePin => &mut self.close_pin,
        }
    }

    pub fn type_char(&mut self, c: char) {
        self.buffer_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Submit the form the focused field belongs to. Rejected operations
    /// change nothing on screen: no error surface, just a re-render.
    pub fn submit(&mut self) {
        match self.focus {
            Field::LoginUsername | Field::LoginPin => self.submit_login(),
            Field::TransferTo | Field::TransferAmount => self.submit_transfer(),
            Field::LoanAmount => self.submit_loan(),
            Field::CloseUsername | Field::ClosePin => self.submit_close(),
        }
    }

    fn submit_login(&mut self) {
        // A non-numeric pin simply fails the login guard
        if let Ok(pin) = self.login_pin.trim().parse::<u32>() {
            let username = self.login_username.trim().to_string();
            if self.session.login(&username, pin).is_ok() {
                // Credential fields clear only on success
                self.login_username.clear();
                self.login_pin.clear();
                self.screen = Screen::Dashboard;
                self.focus = Field::TransferTo;
            }
        }
    }

    fn submit_transfer(&mut self) {
        if let Ok(amount) = self.transfer_amount.trim().parse::<f64>() {
            let recipient = self.transfer_to.trim().to_string();
            if self.session.transfer(&recipient, amount).is_ok() {
                self.transfer_to.clear();
                self.transfer_amount.clear();
            }
        }
    }

    fn submit_loan(&mut self) {
        if let Ok(amount) = self.loan_amount.trim().parse::<f64>() {
            if self.session.request_loan(amount).is_ok() {
                self.loan_amount.clear();
            }
        }
    }

    fn submit_close(&mut self) {
        let username = self.close_username.trim().to_string();
        let pin = self.close_pin.trim().parse::<u32>();

        // Confirmation fields clear whether or not the close goes through
        self.close_username.clear();
        self.close_pin.clear();

        if let Ok(pin) = pin {
            if self.session.close_account(&username, pin).is_ok() {
                self.back_to_login();
            }
        }
    }

    pub fn toggle_sort(&mut self) {
        let _ = self.session.toggle_sort();
    }

    pub fn log_out(&mut self) {
        self.session.logout();
        self.back_to_login();
    }

    fn back_to_login(&mut self) {
        self.screen = Screen::Login;
        self.focus = Field::LoginUsername;
        self.login_username.clear();
        self.login_pin.clear();
        self.transfer_to.clear();
        self.transfer_amount.clear();
        self.loan_amount.clear();
        self.close_username.clear();
        self.close_pin.clear();
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('s') => app.toggle_sort(),
                    KeyCode::Char('l') => app.log_out(),
                    KeyCode::Char('q') => return Ok(()),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.submit(),
                KeyCode::Tab => app.focus_next(),
                KeyCode::BackTab => app.focus_previous(),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.type_char(c),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    match (app.screen, app.session.overview()) {
        (Screen::Dashboard, Some(overview)) => render_dashboard(f, app, &overview),
        _ => render_login(f, app),
    }
}

// ============================================================================
// LOGIN SCREEN
// ============================================================================

fn render_login(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let columns = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(area)[1]
    };

    let title = Paragraph::new(vec![Line::from(vec![Span::styled(
        "Bankist - Log in to get started",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])]);
    f.render_widget(title, columns(chunks[1]));

    render_input(
        f,
        columns(chunks[2]),
        " user ",
        &app.login_username,
        app.focus == Field::LoginUsername,
    );
    render_input(
        f,
        columns(chunks[3]),
        " pin ",
        &masked(&app.login_pin),
        app.focus == Field::LoginPin,
    );

    render_hints(
        f,
        chunks[5],
        &[("Tab", "Field"), ("Enter", "Log in"), ("Esc", "Quit")],
    );
}

// ============================================================================
// DASHBOARD
// ============================================================================

fn render_dashboard(f: &mut Frame, app: &App, overview: &AccountOverview) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Welcome + date
            Constraint::Length(3), // Current balance
            Constraint::Min(5),    // Movements
            Constraint::Length(3), // Summary row
            Constraint::Length(8), // Operation forms
            Constraint::Length(3), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], overview);
    render_balance(f, chunks[1], overview);
    render_movements(f, chunks[2], overview);
    render_summary(f, chunks[3], overview);
    render_forms(f, chunks[4], app);
    render_hints(
        f,
        chunks[5],
        &[
            ("Tab", "Field"),
            ("Enter", "Submit"),
            ("Ctrl+S", "Sort"),
            ("Ctrl+L", "Log out"),
            ("Esc", "Quit"),
        ],
    );
}

fn render_header(f: &mut Frame, area: Rect, overview: &AccountOverview) {
    let first_name = overview
        .owner
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_string();

    let line = Line::from(vec![
        Span::styled(
            format!("Welcome back, {}", first_name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            Utc::now().format("%d/%m/%Y").to_string(),
            Style::default().fg(Color::White),
        ),
    ]);

    let header = Paragraph::new(vec![line]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_balance(f: &mut Frame, area: Rect, overview: &AccountOverview) {
    let line = Line::from(vec![
        Span::styled("Current balance: ", Style::default().fg(Color::White)),
        Span::styled(
            format_amount(overview.balance, &overview.currency),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let balance = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).title(" Balance "));
    f.render_widget(balance, area);
}

fn render_movements(f: &mut Frame, area: Rect, overview: &AccountOverview) {
    let header_cells = ["#", "Type", "Date", "Amount"].iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    // Newest rows on top
    let rows = overview
        .movements
        .iter()
        .enumerate()
        .rev()
        .map(|(i, movement)| {
            let color = if movement.is_deposit() {
                Color::Green
            } else {
                Color::Red
            };

            let cells = vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(movement.kind().as_str()).style(Style::default().fg(color)),
                Cell::from(movement.timestamp.format("%d/%m/%Y").to_string()),
                Cell::from(format_amount(movement.amount, &overview.currency))
                    .style(Style::default().fg(color)),
            ];
            Row::new(cells).height(1)
        });

    let title = if overview.sorted {
        " Movements (sorted) "
    } else {
        " Movements "
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    );

    f.render_widget(table, area);
}

fn render_summary(f: &mut Frame, area: Rect, overview: &AccountOverview) {
    let summary = &overview.summary;
    let line = Line::from(vec![
        Span::styled("In: ", Style::default().fg(Color::White)),
        Span::styled(
            format_amount(summary.deposits_in, &overview.currency),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled("Out: ", Style::default().fg(Color::White)),
        Span::styled(
            format_amount(summary.withdrawals_out, &overview.currency),
            Style::default().fg(Color::Red),
        ),
        Span::raw("   "),
        Span::styled("Interest: ", Style::default().fg(Color::White)),
        Span::styled(
            format_amount(summary.interest, &overview.currency),
            Style::default().fg(Color::Green),
        ),
    ]);

    let summary_bar =
        Paragraph::new(vec![line]).block(Block::default().borders(Borders::ALL).title(" Summary "));
    f.render_widget(summary_bar, area);
}

fn render_forms(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    // Transfer money
    let transfer_block = Block::default()
        .borders(Borders::ALL)
        .title(" Transfer money ");
    let transfer_inner = transfer_block.inner(columns[0]);
    f.render_widget(transfer_block, columns[0]);
    let transfer_fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(transfer_inner);
    render_input(
        f,
        transfer_fields[0],
        " to ",
        &app.transfer_to,
        app.focus == Field::TransferTo,
    );
    render_input(
        f,
        transfer_fields[1],
        " amount ",
        &app.transfer_amount,
        app.focus == Field::TransferAmount,
    );

    // Request loan
    let loan_block = Block::default()
        .borders(Borders::ALL)
        .title(" Request loan ");
    let loan_inner = loan_block.inner(columns[1]);
    f.render_widget(loan_block, columns[1]);
    let loan_fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3)])
        .split(loan_inner);
    render_input(
        f,
        loan_fields[0],
        " amount ",
        &app.loan_amount,
        app.focus == Field::LoanAmount,
    );

    // Close account
    let close_block = Block::default()
        .borders(Borders::ALL)
        .title(" Close account ");
    let close_inner = close_block.inner(columns[2]);
    f.render_widget(close_block, columns[2]);
    let close_fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(close_inner);
    render_input(
        f,
        close_fields[0],
        " confirm user ",
        &app.close_username,
        app.focus == Field::CloseUsername,
    );
    render_input(
        f,
        close_fields[1],
        " confirm pin ",
        &masked(&app.close_pin),
        app.focus == Field::ClosePin,
    );
}

// ============================================================================
// WIDGET HELPERS
// ============================================================================

fn render_input(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text = if focused {
        format!("{}_", value)
    } else {
        value.to_string()
    };

    let input = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(label.to_string()),
    );
    f.render_widget(input, area);
}

fn render_hints(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = vec![];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(bar, area);
}

fn masked(value: &str) -> String {
    "•".repeat(value.chars().count())
}

/// Currency formatting is a display concern; the core hands over raw
/// numbers and the ISO code.
fn format_amount(value: f64, currency: &str) -> String {
    let symbol = match currency {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        other => return format!("{:.2} {}", value, other),
    };
    format!("{}{:.2}", symbol, value)
}
