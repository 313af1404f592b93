use anyhow::Result;
use bmi_calculator::{Category, Session};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use tracing::{debug, info, warn};

/// Rows moved by PageUp/PageDown in the history list
const HISTORY_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    HeightFeet,
    HeightInches,
    Weight,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Age, Field::HeightFeet, Field::HeightInches, Field::Weight];

    pub fn next(&self) -> Self {
        match self {
            Field::Age => Field::HeightFeet,
            Field::HeightFeet => Field::HeightInches,
            Field::HeightInches => Field::Weight,
            Field::Weight => Field::Age,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::Age => Field::Weight,
            Field::HeightFeet => Field::Age,
            Field::HeightInches => Field::HeightFeet,
            Field::Weight => Field::HeightInches,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::HeightFeet => "Height (feet)",
            Field::HeightInches => "Height (inches)",
            Field::Weight => "Weight (kg)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Age => "Enter your Age",
            Field::HeightFeet => "Feet",
            Field::HeightInches => "Inches",
            Field::Weight => "Enter your Weight",
        }
    }
}

pub struct App {
    pub session: Session,
    pub focus: Field,
    pub link_url: String,
    /// Transient message for the status bar
    pub notice: Option<String>,
    /// Selection follows the newest entry so the list scrolls with it
    pub history_state: ListState,
    pub should_quit: bool,
}

impl App {
    pub fn new(link_url: String) -> Self {
        Self {
            session: Session::new(),
            focus: Field::Age,
            link_url,
            notice: None,
            history_state: ListState::default(),
            should_quit: false,
        }
    }

    pub fn field_value(&self, field: Field) -> &str {
        let form = &self.session.form;
        match field {
            Field::Age => &form.age,
            Field::HeightFeet => &form.height_feet,
            Field::HeightInches => &form.height_inches,
            Field::Weight => &form.weight_kg,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        let form = &mut self.session.form;
        match field {
            Field::Age => &mut form.age,
            Field::HeightFeet => &mut form.height_feet,
            Field::HeightInches => &mut form.height_inches,
            Field::Weight => &mut form.weight_kg,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn input_char(&mut self, c: char) {
        let focus = self.focus;
        self.field_mut(focus).push(c);
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.field_mut(focus).pop();
    }

    pub fn calculate(&mut self) {
        self.notice = None;
        match self.session.calculate() {
            Ok(entry) => {
                debug!(entry = %entry.id, "result shown");
                self.follow_latest();
            }
            Err(err) => {
                debug!(error = %err, "showing validation error");
            }
        }
    }

    fn follow_latest(&mut self) {
        let len = self.session.history().len();
        self.history_state.select(len.checked_sub(1));
    }

    pub fn history_page_up(&mut self) {
        if self.session.history().is_empty() {
            return;
        }
        let i = match self.history_state.selected() {
            Some(i) => i.saturating_sub(HISTORY_PAGE),
            None => 0,
        };
        self.history_state.select(Some(i));
    }

    pub fn history_page_down(&mut self) {
        let len = self.session.history().len();
        if len == 0 {
            return;
        }
        let i = match self.history_state.selected() {
            Some(i) => (i + HISTORY_PAGE).min(len - 1),
            None => 0,
        };
        self.history_state.select(Some(i));
    }

    pub fn clear_inputs(&mut self) {
        self.session.clear_inputs();
        self.focus = Field::Age;
        self.notice = None;
    }

    pub fn clear_history(&mut self) {
        self.session.clear_history();
        self.history_state = ListState::default();
    }

    pub fn open_link(&mut self) {
        match open::that(&self.link_url) {
            Ok(()) => {
                info!(url = %self.link_url, "opened link");
                self.notice = Some(format!("Opened {}", self.link_url));
            }
            Err(err) => {
                warn!(url = %self.link_url, error = %err, "failed to open link");
                self.notice = Some(format!("Could not open {}: {}", self.link_url, err));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('l') if ctrl => self.clear_inputs(),
            KeyCode::Char('d') if ctrl => self.clear_history(),
            KeyCode::Char('o') if ctrl => self.open_link(),
            KeyCode::Enter => self.calculate(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::PageUp => self.history_page_up(),
            KeyCode::PageDown => self.history_page_down(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if !ctrl => self.input_char(c),
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

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
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(6),  // Inputs, two per row
            Constraint::Length(4),  // Result card
            Constraint::Length(1),  // Validation error
            Constraint::Min(3),     // History
            Constraint::Length(3),  // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0]);
    render_form(f, chunks[1], app);
    render_result(f, chunks[2], app);
    render_error(f, chunks[3], app);
    render_history(f, chunks[4], app);
    render_status_bar(f, chunks[5], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "BMI Calculator",
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(title, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    let cells: Vec<Rect> = rows
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .to_vec()
        })
        .collect();

    // Age | Feet, Inches | Weight reads left to right in tab order
    for (field, cell) in Field::ALL.iter().zip(cells.iter()) {
        render_field(f, *cell, app, *field);
    }
}

fn render_field(f: &mut Frame, area: Rect, app: &App, field: Field) {
    let focused = app.focus == field;
    let value = app.field_value(field);

    let text = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", field.label())),
    );
    f.render_widget(input, area);

    if focused {
        let x = area.x + 1 + value.chars().count() as u16;
        f.set_cursor(x.min(area.right().saturating_sub(2)), area.y + 1);
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Underweight => Color::Cyan,
        Category::NormalWeight => Color::Green,
        Category::Overweight => Color::Yellow,
        Category::Obesity => Color::Red,
    }
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let lines = match app.session.result() {
        Some(result) => vec![
            Line::from(Span::styled(
                format!("Your BMI: {}", result.bmi_display()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                result.category.name(),
                Style::default().fg(category_color(result.category)),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "Fill in the form and press Enter",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Result "),
    );
    f.render_widget(card, area);
}

fn render_error(f: &mut Frame, area: Rect, app: &App) {
    if let Some(message) = app.session.error_message() {
        let line = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)));
        f.render_widget(line, area);
    }
}

fn render_history(f: &mut Frame, area: Rect, app: &mut App) {
    let history = app.session.history();
    if history.is_empty() {
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .map(|entry| {
            ListItem::new(entry.summary())
                .style(Style::default().fg(category_color(entry.category)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" History ({}) ", history.len())),
    )
    .highlight_style(Style::default().add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.history_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![
        Span::styled(
            format!(" {} ", app.session.state().name()),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if let Some(notice) = &app.notice {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Green)));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Calculate | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Field | "));
    status_spans.push(Span::styled("^L", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Clear | "));
    if !app.session.history().is_empty() {
        status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Scroll | "));
        status_spans.push(Span::styled("^D", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Clear History | "));
    }
    status_spans.push(Span::styled("^O", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" © 2024 App | "));
    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
