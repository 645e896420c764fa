//! Lint dashboard TUI demo
//!
//! A terminal host for `lint-dashboard`: opens the files of a scenario, runs a fake linter that
//! reports the scenario's diagnostics, and shows the dashboard panel under the editor.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p lint-dashboard-tui -- scenario.json --log-file dashboard.log
//! ```
//!
//! Scenario format:
//!
//! ```json
//! { "files": [ { "path": "src/main.rs", "text": "fn main() {}\n",
//!   "diagnostics": [ { "line": 0, "column": 3, "message": "bad", "severity": "error" } ] } ] }
//! ```
//!
//! # Key bindings
//!
//! Editor:
//! - Arrows: move the caret
//! - Tab: next file
//! - Ctrl+D: open the dashboard
//! - Ctrl+L: lint all files
//! - Ctrl+S: save (refreshes the dashboard)
//! - Ctrl+Q: quit
//!
//! Dashboard:
//! - Up/Down: move
//! - Enter: jump, Space: peek
//! - w: toggle warnings, ?: toggle help
//! - Tab: back to the editor, Esc: close

mod scenario;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lint_dashboard::{
    CommandResult, DashboardCommand, DashboardConfig, DashboardPlugin, DashboardScope,
    DashboardSyntax, EditorHost, HostError, LineIndex, LineKind, LintEngine, MemoryHost, Region,
    Severity, ShowMode, StyledSpan, ViewId, WindowId,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use scenario::Scenario;
use std::{
    cell::RefCell,
    fs::File,
    io::{self, stdout},
    path::PathBuf,
    rc::Rc,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

#[derive(Parser, Debug)]
#[command(name = "lint-dashboard-tui")]
#[command(about = "Terminal demo of the lint dashboard panel")]
#[command(version)]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Start with warning lines hidden
    #[arg(long)]
    hide_warnings: bool,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

struct Document {
    view: ViewId,
    file: scenario::ScenarioFile,
}

struct App {
    host: Rc<RefCell<MemoryHost>>,
    engine: LintEngine,
    plugin: DashboardPlugin<MemoryHost>,
    syntax: DashboardSyntax,
    window: WindowId,
    documents: Vec<Document>,
    /// Editor view shown in the top pane, also while the dashboard has focus.
    current: Option<ViewId>,
    status_message: String,
    should_quit: bool,
}

impl App {
    fn new(scenario: Scenario, config: DashboardConfig) -> Result<Self, AppError> {
        let host = Rc::new(RefCell::new(MemoryHost::new()));
        let (window, documents) = {
            let mut host = host.borrow_mut();
            let window = host.open_window();
            let mut documents = Vec::with_capacity(scenario.files.len());
            for file in scenario.files {
                let view = host.open_file(window, file.path.clone(), &file.text)?;
                documents.push(Document { view, file });
            }
            (window, documents)
        };

        let mut engine = LintEngine::new();
        let mut plugin = DashboardPlugin::new(Rc::clone(&host), config);
        plugin.start(&mut engine);

        let current = documents.first().map(|doc| doc.view);
        if let Some(view) = current {
            host.borrow_mut().focus_view(view)?;
        }

        Ok(Self {
            host,
            engine,
            plugin,
            syntax: DashboardSyntax::new()?,
            window,
            documents,
            current,
            status_message: "Ctrl+L to lint, Ctrl+D to open the dashboard".to_string(),
            should_quit: false,
        })
    }

    fn focused(&self) -> Option<ViewId> {
        self.host.borrow().focused_view(self.window)
    }

    fn panel(&self) -> Option<ViewId> {
        let host = self.host.borrow();
        self.plugin.dashboard().find_panel(&*host, self.window)
    }

    fn dashboard_focused(&self) -> bool {
        self.focused().is_some() && self.focused() == self.panel()
    }

    fn sync_current(&mut self) {
        if let Some(view) = self.focused() {
            if self.documents.iter().any(|doc| doc.view == view) {
                self.current = Some(view);
            }
        }
    }

    fn run(&mut self, command: DashboardCommand) {
        let result = self.plugin.run(self.engine.state(), command.clone());
        tracing::trace!(?command, ?result, "command finished");
        if let CommandResult::Navigated(target) = result {
            let line = target.line.map_or(0, |line| line + 1);
            self.status_message = format!("{} line {line}", self.path_of(target.view));
        }
        self.sync_current();
    }

    fn path_of(&self, view: ViewId) -> &str {
        self.documents
            .iter()
            .find(|doc| doc.view == view)
            .map_or("untitled", |doc| doc.file.path.as_str())
    }

    fn lint_all(&mut self) {
        for doc in &self.documents {
            self.engine.highlight(doc.file.report(doc.view));
        }
        let (errors, warnings) = self.counts();
        self.status_message = format!("Linted: {errors} errors, {warnings} warnings");
    }

    fn save(&mut self) {
        let Some(view) = self.current else {
            return;
        };
        self.plugin.on_post_save(self.engine.state());
        self.status_message = format!("Saved {}", self.path_of(view));
    }

    fn next_file(&mut self) {
        if self.documents.is_empty() {
            return;
        }
        let next = match self
            .current
            .and_then(|view| self.documents.iter().position(|doc| doc.view == view))
        {
            Some(i) => (i + 1) % self.documents.len(),
            None => 0,
        };
        let view = self.documents[next].view;
        if let Err(err) = self.host.borrow_mut().focus_view(view) {
            tracing::warn!(%err, "failed to focus file");
        }
        self.current = Some(view);
    }

    fn counts(&self) -> (usize, usize) {
        let lint = self.engine.state();
        let mut errors = 0;
        let mut warnings = 0;
        for (view, diagnostics) in lint.errors.iter() {
            for (line, entries) in diagnostics {
                match lint.highlights.classify(view, *line) {
                    Severity::Error => errors += entries.len(),
                    Severity::Warning => warnings += entries.len(),
                }
            }
        }
        (errors, warnings)
    }

    /// Move the caret of `view` by whole lines or characters, then keep it on screen.
    fn move_caret(&mut self, view: ViewId, key: KeyCode) -> Result<(), HostError> {
        let mut host = self.host.borrow_mut();
        let caret = host
            .selections(view)?
            .first()
            .map_or(0, |region| region.b);
        let (line, column) = host.row_col(view, caret)?;
        let line_count = host.line_count(view)?;
        let line_len = |host: &MemoryHost, line: usize| {
            host.line_text(view, line)
                .ok()
                .flatten()
                .map_or(0, |text| text.chars().count())
        };

        let (line, column) = match key {
            KeyCode::Up => (line.saturating_sub(1), column),
            KeyCode::Down => ((line + 1).min(line_count.saturating_sub(1)), column),
            KeyCode::Left if column > 0 => (line, column - 1),
            KeyCode::Left if line > 0 => (line - 1, line_len(&*host, line - 1)),
            KeyCode::Right if column < line_len(&*host, line) => (line, column + 1),
            KeyCode::Right if line + 1 < line_count => (line + 1, 0),
            _ => (line, column),
        };

        let point = host.text_point(view, line, column)?;
        host.set_selection(view, Region::caret(point))?;
        host.show(view, point, ShowMode::Visible)
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status_message.clear();

        if key.modifiers == KeyModifiers::CONTROL {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('d') => return self.run(DashboardCommand::Open),
                KeyCode::Char('l') => return self.lint_all(),
                KeyCode::Char('s') => return self.save(),
                _ => {}
            }
        }

        if self.dashboard_focused() {
            self.handle_dashboard_key(key);
        } else {
            self.handle_editor_key(key);
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.next_file(),
            code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                if let Some(view) = self.current {
                    if let Err(err) = self.move_caret(view, code) {
                        tracing::warn!(%err, "caret move failed");
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                if let Some(panel) = self.panel() {
                    if let Err(err) = self.move_caret(panel, key.code) {
                        tracing::warn!(%err, "caret move failed");
                    }
                }
            }
            KeyCode::Enter => self.run(DashboardCommand::Jump),
            KeyCode::Char(' ') => self.run(DashboardCommand::Peek),
            KeyCode::Esc => self.run(DashboardCommand::Close),
            KeyCode::Char('w') => self.run(DashboardCommand::ToggleWarnings),
            KeyCode::Char('?') => self.run(DashboardCommand::ToggleHelp),
            KeyCode::Tab => self.run(DashboardCommand::Unfocus),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let panel = self.panel();

        let mut constraints = vec![Constraint::Min(3)];
        if panel.is_some() {
            constraints.push(Constraint::Percentage(45));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        self.render_editor(frame, chunks[0]);
        let mut next = 1;
        if let Some(panel) = panel {
            self.render_dashboard(frame, chunks[next], panel);
            next += 1;
        }
        self.render_status_line(frame, chunks[next]);
        self.render_shortcuts(frame, chunks[next + 1]);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let focused = !self.dashboard_focused();
        let Some(view) = self.current else {
            let block = Block::default().borders(Borders::ALL).title(" no files ");
            frame.render_widget(block, area);
            return;
        };

        let height = area.height.saturating_sub(2) as usize;
        let mut host = self.host.borrow_mut();
        let _ = host.set_viewport_height(view, height);
        let top = host.scroll_top(view).unwrap_or(0);
        let line_count = host.line_count(view).unwrap_or(0);
        let lint = self.engine.state();
        let diagnostics = lint.errors.get(view);

        let mut lines = Vec::with_capacity(height);
        for line in top..(top + height).min(line_count) {
            let text = host.line_text(view, line).ok().flatten().unwrap_or_default();
            let has_diagnostic = diagnostics.is_some_and(|d| d.contains_key(&line));
            let severity = lint.highlights.classify(view, line);
            let (mark, mark_style) = match (has_diagnostic, severity) {
                (false, _) => (' ', Style::default()),
                (true, Severity::Error) => ('E', Style::default().fg(Color::LightRed)),
                (true, Severity::Warning) => ('W', Style::default().fg(Color::Yellow)),
            };
            lines.push(Line::from(vec![
                Span::styled(mark.to_string(), mark_style),
                Span::styled(
                    format!("{:>4} ", line + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(text),
            ]));
        }

        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", self.path_of(view)));
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if focused {
            if let Some((x, y)) = caret_screen_position(&host, view, top, area, 6) {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, panel: ViewId) {
        let focused = self.dashboard_focused();
        let height = area.height.saturating_sub(2) as usize;
        let mut host = self.host.borrow_mut();
        let _ = host.set_viewport_height(panel, height);
        let top = host.scroll_top(panel).unwrap_or(0);
        let caret_line = host
            .selections(panel)
            .ok()
            .and_then(|selections| selections.first().copied())
            .and_then(|region| host.row_col(panel, region.b).ok())
            .map(|(line, _)| line);

        let index = LineIndex::from_text(&host.text(panel).unwrap_or_default());
        let spans = self.syntax.highlight(&index);

        let mut lines = Vec::with_capacity(height);
        for line in top..(top + height).min(index.line_count()) {
            let text = index.get_line_text(line).unwrap_or_default();
            let base = match self.syntax.classify_line(&text) {
                LineKind::Hint => Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                LineKind::Info => Style::default().fg(Color::Gray),
                _ => Style::default(),
            };
            let base = if focused && caret_line == Some(line) {
                base.add_modifier(Modifier::REVERSED)
            } else {
                base
            };
            let line_start = index.position_to_char_offset(line, 0);
            lines.push(styled_line(&text, line_start, &spans, base));
        }

        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let title = format!(" {} ", self.plugin.dashboard().config().panel_name);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let (errors, warnings) = self.counts();
            let host = self.host.borrow();
            let caret = self.current.and_then(|view| {
                let point = host.selections(view).ok()?.first()?.b;
                host.row_col(view, point).ok()
            });
            let state = self.plugin.dashboard().state().clone();
            match caret {
                Some((line, column)) => format!(
                    "Ln {} Col {} | errors: {errors} warnings: {warnings} | warnings {} | help {}",
                    line + 1,
                    column + 1,
                    on_off(state.show_warnings),
                    on_off(state.show_help),
                ),
                None => format!("errors: {errors} warnings: {warnings}"),
            }
        };

        let status_line = Paragraph::new(status_text).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }

    fn render_shortcuts(&self, frame: &mut Frame, area: Rect) {
        let shortcuts = if self.dashboard_focused() {
            "Up/Down:move  Enter:jump  Space:peek  w:warnings  ?:help  Tab:editor  Esc:close  Ctrl-Q:quit"
        } else {
            "Arrows:move  Tab:next file  Ctrl-D:dashboard  Ctrl-L:lint  Ctrl-S:save  Ctrl-Q:quit"
        };
        let shortcuts_line =
            Paragraph::new(shortcuts).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(shortcuts_line, area);
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Terminal cell of `view`'s caret inside a bordered `area` with a `gutter`-wide prefix.
fn caret_screen_position(
    host: &MemoryHost,
    view: ViewId,
    top: usize,
    area: Rect,
    gutter: u16,
) -> Option<(u16, u16)> {
    let point = host.selections(view).ok()?.first()?.b;
    let (line, column) = host.row_col(view, point).ok()?;
    if line < top {
        return None;
    }
    let row = u16::try_from(line - top).ok()?;
    if row + 2 > area.height {
        return None;
    }

    let text = host.line_text(view, line).ok()??;
    let prefix: String = text.chars().take(column).collect();
    let x = u16::try_from(prefix.width()).ok()?;
    Some((area.x + 1 + gutter + x, area.y + 1 + row))
}

fn style_for_scope(scope: DashboardScope) -> Style {
    match scope {
        DashboardScope::Path => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        DashboardScope::ErrorMarker => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        DashboardScope::LineNumber => Style::default().fg(Color::DarkGray),
        DashboardScope::ErrorMessage => Style::default().fg(Color::LightRed),
        DashboardScope::WarningMessage => Style::default().fg(Color::Yellow),
    }
}

/// Split one dashboard line into ratatui spans. `spans` use char offsets into the whole text.
fn styled_line(text: &str, line_start: usize, spans: &[StyledSpan], base: Style) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    let line_end = line_start + chars.len();
    let mut out = Vec::new();
    let mut column = 0;

    for span in spans
        .iter()
        .filter(|span| span.start >= line_start && span.end <= line_end)
    {
        let (start, end) = (span.start - line_start, span.end - line_start);
        if start < column {
            continue;
        }
        if start > column {
            out.push(Span::styled(chars[column..start].iter().collect::<String>(), base));
        }
        out.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            base.patch(style_for_scope(span.scope)),
        ));
        column = end;
    }
    if column < chars.len() {
        out.push(Span::styled(chars[column..].iter().collect::<String>(), base));
    }

    Line::from(out)
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("invalid dashboard syntax: {0}")]
    Syntax(#[from] regex::Error),
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let scenario = Scenario::load(&args.scenario)?;
    let config = DashboardConfig {
        show_warnings: !args.hide_warnings,
        ..DashboardConfig::default()
    };
    let mut app = App::new(scenario, config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("error: {err}");
    }
    app.plugin.stop(&mut app.engine);

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }
    }

    Ok(())
}
