// 🖥️ Zoo Browser - read-only TUI over a snapshot of the registry

use crate::console::animal_details;
use crate::entities::animal::HealthStatus;
use crate::zoo::{EnclosureSummary, Zoo, ZooStatistics};
use anyhow::Result;
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
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Animals,
    Enclosures,
    Statistics,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Animals => Page::Enclosures,
            Page::Enclosures => Page::Statistics,
            Page::Statistics => Page::Animals,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Animals => Page::Statistics,
            Page::Enclosures => Page::Animals,
            Page::Statistics => Page::Enclosures,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Animals => "Animals",
            Page::Enclosures => "Enclosures",
            Page::Statistics => "Statistics",
        }
    }
}

/// One row of the animal table, captured when the browser opens
#[derive(Debug, Clone)]
pub struct AnimalRow {
    pub type_tag: String,
    pub id: String,
    pub name: String,
    pub age: u32,
    pub habitat: String,
    pub health: HealthStatus,
    pub enclosure: String,
    pub details: Vec<String>,
}

pub struct App {
    pub animals: Vec<AnimalRow>,
    pub enclosures: Vec<EnclosureSummary>,
    pub stats: ZooStatistics,
    pub state: TableState,
    pub enclosure_state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
}

impl App {
    pub fn new(zoo: &Zoo) -> Self {
        let animals: Vec<AnimalRow> = zoo
            .list_sorted_by_type()
            .into_iter()
            .map(|a| AnimalRow {
                type_tag: a.type_tag().to_string(),
                id: a.id().to_string(),
                name: a.name().to_string(),
                age: a.age(),
                habitat: a.habitat_type().to_string(),
                health: a.health_status(),
                enclosure: zoo
                    .enclosure_of(a.id())
                    .map(|e| e.id().to_string())
                    .unwrap_or_else(|| "-".to_string()),
                details: animal_details(zoo, a),
            })
            .collect();

        let stats = zoo.statistics();

        let mut state = TableState::default();
        if !animals.is_empty() {
            state.select(Some(0));
        }

        let mut enclosure_state = TableState::default();
        if !stats.enclosures.is_empty() {
            enclosure_state.select(Some(0));
        }

        Self {
            animals,
            enclosures: stats.enclosures.clone(),
            stats,
            state,
            enclosure_state,
            current_page: Page::Animals,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_animal(&self) -> Option<&AnimalRow> {
        self.state.selected().and_then(|i| self.animals.get(i))
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn active_table(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::Enclosures => (&mut self.enclosure_state, self.enclosures.len()),
            _ => (&mut self.state, self.animals.len()),
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.active_table();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active_table();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
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

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail && app.current_page == Page::Animals {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        render_animals(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        match app.current_page {
            Page::Animals => render_animals(f, chunks[1], app),
            Page::Enclosures => render_enclosures(f, chunks[1], app),
            Page::Statistics => render_statistics(f, chunks[1], app),
        }
    }

    render_status_bar(f, chunks[2], app);
}

fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn health_color(health: HealthStatus) -> Color {
    match health {
        HealthStatus::Healthy => Color::Green,
        HealthStatus::Recovering => Color::Yellow,
        HealthStatus::Sick => Color::Magenta,
        HealthStatus::Critical => Color::Red,
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Animals, Page::Enclosures, Page::Statistics].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Animals: {}", app.stats.total_animals),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Need attention: {}", app.stats.needing_attention),
        Style::default().fg(if app.stats.needing_attention > 0 { Color::Red } else { Color::Green }),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_animals(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Type", "ID", "Name", "Age", "Habitat", "Health", "Enclosure"]
        .iter()
        .map(|h| Cell::from(*h).style(header_style()));

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.animals.iter().map(|a| {
        Row::new(vec![
            Cell::from(a.type_tag.clone()),
            Cell::from(a.id.clone()),
            Cell::from(truncate(&a.name, 24)),
            Cell::from(a.age.to_string()),
            Cell::from(a.habitat.clone()),
            Cell::from(a.health.as_str()).style(Style::default().fg(health_color(a.health))),
            Cell::from(a.enclosure.clone()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(26),
            Constraint::Length(5),
            Constraint::Length(17),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Animals "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_enclosures(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["Enclosure", "Habitat", "Occupancy", "Capacity"]
        .iter()
        .map(|h| Cell::from(*h).style(header_style()));

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.enclosures.iter().map(|e| {
        let color = if e.occupancy >= e.capacity { Color::Red } else { Color::Green };
        Row::new(vec![
            Cell::from(e.id.clone()),
            Cell::from(e.habitat_type.clone()),
            Cell::from(e.occupancy.to_string()).style(Style::default().fg(color)),
            Cell::from(e.capacity.to_string()),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Enclosures "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.enclosure_state);
}

fn render_statistics(f: &mut Frame, area: Rect, app: &App) {
    let title = |text: &str| {
        Line::from(Span::styled(
            format!("  {}", text),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    };

    let mut content = vec![Line::from(""), title("By Type"), Line::from("")];
    for (animal_type, count) in &app.stats.by_type {
        content.push(Line::from(format!("    {:<18}{:>5}", animal_type, count)));
    }

    content.push(Line::from(""));
    content.push(title("By Habitat"));
    content.push(Line::from(""));
    for (habitat, count) in &app.stats.by_habitat {
        content.push(Line::from(format!("    {:<18}{:>5}", habitat, count)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("    Needing medical attention: "),
        Span::styled(
            app.stats.needing_attention.to_string(),
            Style::default().fg(if app.stats.needing_attention > 0 { Color::Red } else { Color::Green }),
        ),
    ]));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Statistics "),
    );

    f.render_widget(paragraph, area);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Animal Details ");

    let Some(animal) = app.selected_animal() else {
        f.render_widget(Paragraph::new("No animal selected").block(block), area);
        return;
    };

    let mut content = vec![Line::from("")];
    for line in &animal.details {
        let (label, value) = line.split_once(": ").unwrap_or((line.as_str(), ""));
        content.push(Line::from(vec![
            Span::styled(format!("  {}: ", label), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(value.to_string()),
        ]));
    }
    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (selected, total) = match app.current_page {
        Page::Animals => (app.state.selected(), app.animals.len()),
        Page::Enclosures => (app.enclosure_state.selected(), app.enclosures.len()),
        Page::Statistics => (None, 0),
    };

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected.map(|i| i + 1).unwrap_or(0), total),
        Style::default().fg(Color::Cyan),
    )];

    for (key, label, color) in [
        ("Enter", " Details | ", Color::Yellow),
        ("Tab", " Page | ", Color::Yellow),
        ("↑/↓", " Nav | ", Color::Yellow),
        ("q", " Quit", Color::Red),
    ] {
        status_spans.push(Span::styled(key, Style::default().fg(color)));
        status_spans.push(Span::raw(label));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)));

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
