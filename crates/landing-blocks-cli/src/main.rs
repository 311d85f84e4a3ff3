use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use landing_blocks_config::Config;
use landing_blocks_engine::editing::{Direction, Document};
use landing_blocks_engine::form::{self, Widget};
use landing_blocks_engine::io::{self, FileStore, PageStore};
use landing_blocks_engine::models::{BlockContent, BlockKind, PageId};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use serde_json::Value;
use std::{env, fs, io::stdout, path::PathBuf, process};

const NEW_PAGE_TITLE: &str = "Untitled page";

enum Mode {
    Browse,
    AddBlock { cursor: usize },
    EditField { key: &'static str, buffer: String },
    Rename { buffer: String },
}

struct App {
    store: FileStore,
    runtime: tokio::runtime::Runtime,
    document: Document,
    block_list_state: ListState,
    field_cursor: usize,
    mode: Mode,
    status: String,
    quit_armed: bool,
}

impl App {
    fn new(store: FileStore, runtime: tokio::runtime::Runtime, page: Option<PageId>) -> Result<Self> {
        let document = match page {
            Some(id) => runtime.block_on(Document::load(&store, &id))?,
            None => Document::new(NEW_PAGE_TITLE),
        };

        let mut app = Self {
            store,
            runtime,
            document,
            block_list_state: ListState::default(),
            field_cursor: 0,
            mode: Mode::Browse,
            status: String::new(),
            quit_armed: false,
        };

        // Select first block if available
        if let Some(first) = app.document.blocks().first().map(|b| b.id.to_string()) {
            app.select(&first);
        }

        Ok(app)
    }

    fn selected_index(&self) -> Option<usize> {
        let selected = self.document.selected()?;
        self.document
            .blocks()
            .iter()
            .position(|block| &block.id == selected)
    }

    fn select(&mut self, id: &str) {
        if let Err(e) = self.document.select_block(Some(id)) {
            self.status = e.to_string();
        }
        self.field_cursor = 0;
    }

    fn next_block(&mut self) {
        if self.document.is_empty() {
            return;
        }
        let i = match self.selected_index() {
            Some(i) => (i + 1) % self.document.len(),
            None => 0,
        };
        let id = self.document.blocks()[i].id.to_string();
        self.select(&id);
    }

    fn previous_block(&mut self) {
        if self.document.is_empty() {
            return;
        }
        let i = match self.selected_index() {
            Some(0) | None => self.document.len() - 1,
            Some(i) => i - 1,
        };
        let id = self.document.blocks()[i].id.to_string();
        self.select(&id);
    }

    fn move_selected(&mut self, direction: Direction) {
        if let Some(id) = self.document.selected().map(|id| id.to_string()) {
            match self.document.move_block(&id, direction) {
                Ok(true) => self.status = format!("Moved {id}"),
                Ok(false) => {}
                Err(e) => self.status = e.to_string(),
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let id = self.document.blocks()[index].id.to_string();
        match self.document.delete_block(&id) {
            Ok(_) => {
                self.status = format!("Deleted {id}");
                // Keep the cursor near where the deleted block was
                let next = index.min(self.document.len().saturating_sub(1));
                if let Some(next_id) = self.document.blocks().get(next).map(|b| b.id.to_string()) {
                    self.select(&next_id);
                }
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn add_block(&mut self, kind: BlockKind) {
        let id = self.document.add_block(kind).id.to_string();
        self.field_cursor = 0;
        self.status = format!("Added {id}");
    }

    fn save(&mut self) {
        let result = self.runtime.block_on(self.document.save(&self.store));
        self.status = match result {
            Ok(()) => format!("Saved page {}", self.document.id()),
            Err(e) => format!("Save failed, please retry: {e}"),
        };
    }

    fn current_field(&self) -> Option<&'static form::FieldSpec> {
        let block = self.document.selected_block()?;
        form::fields(block.kind()).get(self.field_cursor)
    }

    fn cycle_field(&mut self, forward: bool) {
        let Some(block) = self.document.selected_block() else {
            return;
        };
        let count = form::fields(block.kind()).len();
        self.field_cursor = if forward {
            (self.field_cursor + 1) % count
        } else {
            (self.field_cursor + count - 1) % count
        };
    }

    fn apply_field(&mut self, key: &str, value: Value) {
        let Some(block) = self.document.selected_block() else {
            return;
        };
        let (id, kind) = (block.id.to_string(), block.kind());
        let result = form::set_field(kind, key, value)
            .and_then(|patch| self.document.update_block_content(&id, patch));
        if let Err(e) = result {
            self.status = e.to_string();
        }
    }

    fn activate_field(&mut self) {
        let Some(spec) = self.current_field() else {
            return;
        };
        let Some(block) = self.document.selected_block() else {
            return;
        };
        let current = form::field_value(&block.content, spec.key);

        match spec.widget {
            Widget::SingleLine | Widget::MultiLine => {
                let buffer = current
                    .as_ref()
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                self.mode = Mode::EditField {
                    key: spec.key,
                    buffer,
                };
            }
            Widget::Toggle => {
                let on = current.as_ref().and_then(Value::as_bool).unwrap_or(false);
                self.apply_field(spec.key, Value::Bool(!on));
            }
            Widget::Choice(options) => {
                let position = current
                    .as_ref()
                    .and_then(Value::as_str)
                    .and_then(|value| options.iter().position(|o| *o == value));
                let next = position.map_or(0, |p| (p + 1) % options.len());
                self.apply_field(spec.key, Value::String(options[next].to_string()));
            }
            Widget::ItemList => self.add_feature_item(),
        }
    }

    fn add_feature_item(&mut self) {
        if let Some(block) = self.document.selected_block()
            && let BlockContent::Features(features) = &block.content
        {
            let id = block.id.to_string();
            let patch = form::add_feature_item(features);
            if let Err(e) = self.document.update_block_content(&id, patch) {
                self.status = e.to_string();
            }
        }
    }

    fn remove_last_feature_item(&mut self) {
        if let Some(block) = self.document.selected_block()
            && let BlockContent::Features(features) = &block.content
        {
            let Some(last) = features.items.len().checked_sub(1) else {
                self.status = "No feature items to remove".to_string();
                return;
            };
            let id = block.id.to_string();
            let result = form::remove_feature_item(features, last)
                .and_then(|patch| self.document.update_block_content(&id, patch));
            if let Err(e) = result {
                self.status = e.to_string();
            }
        }
    }

    /// Returns true when the app should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        match mode {
            Mode::Browse => return self.handle_browse_key(key.code),
            Mode::AddBlock { cursor } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Down | KeyCode::Char('j') => {
                    self.mode = Mode::AddBlock {
                        cursor: (cursor + 1) % BlockKind::ALL.len(),
                    };
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.mode = Mode::AddBlock {
                        cursor: (cursor + BlockKind::ALL.len() - 1) % BlockKind::ALL.len(),
                    };
                }
                KeyCode::Enter => self.add_block(BlockKind::ALL[cursor]),
                KeyCode::Char(c) => match c.to_digit(10).map(|d| d as usize) {
                    Some(n) if (1..=BlockKind::ALL.len()).contains(&n) => {
                        self.add_block(BlockKind::ALL[n - 1]);
                    }
                    _ => self.mode = Mode::AddBlock { cursor },
                },
                _ => self.mode = Mode::AddBlock { cursor },
            },
            Mode::EditField { key: field, mut buffer } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => self.apply_field(field, Value::String(buffer)),
                KeyCode::Backspace => {
                    buffer.pop();
                    self.mode = Mode::EditField { key: field, buffer };
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    self.mode = Mode::EditField { key: field, buffer };
                }
                _ => self.mode = Mode::EditField { key: field, buffer },
            },
            Mode::Rename { mut buffer } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    self.document.set_title(buffer);
                }
                KeyCode::Backspace => {
                    buffer.pop();
                    self.mode = Mode::Rename { buffer };
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                    self.mode = Mode::Rename { buffer };
                }
                _ => self.mode = Mode::Rename { buffer },
            },
        }
        false
    }

    fn handle_browse_key(&mut self, code: KeyCode) -> bool {
        if code != KeyCode::Char('q') {
            self.quit_armed = false;
        }
        match code {
            KeyCode::Char('q') => {
                if !self.document.is_dirty() || self.quit_armed {
                    return true;
                }
                self.quit_armed = true;
                self.status = "Unsaved changes - press q again to quit, s to save".to_string();
            }
            KeyCode::Down | KeyCode::Char('j') => self.next_block(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_block(),
            KeyCode::Char('J') => self.move_selected(Direction::Down),
            KeyCode::Char('K') => self.move_selected(Direction::Up),
            KeyCode::Char('a') => self.mode = Mode::AddBlock { cursor: 0 },
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('t') => {
                self.mode = Mode::Rename {
                    buffer: self.document.title().to_string(),
                };
            }
            KeyCode::Tab => self.cycle_field(true),
            KeyCode::BackTab => self.cycle_field(false),
            KeyCode::Enter | KeyCode::Char('e') => self.activate_field(),
            KeyCode::Char('+') => self.add_feature_item(),
            KeyCode::Char('-') => self.remove_last_feature_item(),
            _ => {}
        }
        false
    }
}

fn init_logging(level: log::LevelFilter) {
    let log_path = Config::log_path();
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);

    // The terminal belongs to the editor, so logs go to a file
    let file = log_path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
        });
    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> Result<()> {
    // Determine pages path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} [pages-folder-path] [page-id]", args[0]);
            process::exit(1);
        }
    };

    let (pages_path, from_config) = match (args.len(), &config) {
        (1, Some(config)) => (config.pages_path.clone(), true),
        (1, None) => {
            eprintln!("Error: No pages path provided and no config file found");
            eprintln!("Usage: {} <pages-folder-path> [page-id]", args[0]);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        (2 | 3, _) => (PathBuf::from(&args[1]), false),
        _ => {
            eprintln!("Usage: {} [pages-folder-path] [page-id]", args[0]);
            process::exit(1);
        }
    };

    let page = match args.get(2).map(|id| id.parse::<PageId>()) {
        None => None,
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            eprintln!("Error: '{}' is not a page id: {e}", args[2]);
            process::exit(1);
        }
    };

    let log_level = match config.as_ref().map(Config::log_filter).transpose() {
        Ok(level) => level.unwrap_or(log::LevelFilter::Info),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    init_logging(log_level);
    log::info!("landing-blocks starting up, pages in {}", pages_path.display());

    // Validate pages directory using engine
    if let Err(e) = io::validate_pages_dir(&pages_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Pages path '{}'{} is invalid: {e}",
            pages_path.display(),
            source
        );
        process::exit(1);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let store = FileStore::new(&pages_path);
    match runtime.block_on(store.list_pages()) {
        Ok(pages) => log::info!("{} pages in store", pages.len()),
        Err(e) => log::warn!("could not list pages: {e}"),
    }

    // Create app before touching the terminal so load errors print normally
    let mut app = App::new(store, runtime, page)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if app.document.is_dirty() {
        println!("Quit with unsaved changes to page {}", app.document.id());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn describe_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "(not set)".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(other) => other.to_string(),
    }
}

fn field_lines(app: &App) -> Vec<Line<'static>> {
    let Some(block) = app.document.selected_block() else {
        return vec![Line::from("No block selected. Press a to add one.")];
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", block.kind().label(), block.id),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, spec) in form::fields(block.kind()).iter().enumerate() {
        let focused = i == app.field_cursor;
        let marker = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        if let Widget::ItemList = spec.widget {
            lines.push(Line::from(Span::styled(
                format!("{marker}{}: (+ add, - remove last)", spec.label),
                style,
            )));
            if let BlockContent::Features(features) = &block.content {
                for item in &features.items {
                    lines.push(Line::from(format!(
                        "    • {}: {}",
                        item.title, item.description
                    )));
                }
            }
            continue;
        }

        let value = match &app.mode {
            Mode::EditField { key, buffer } if focused && *key == spec.key => format!("{buffer}_"),
            _ => describe_value(form::field_value(&block.content, spec.key).as_ref()),
        };
        lines.push(Line::from(Span::styled(
            format!("{marker}{}: {value}", spec.label),
            style,
        )));
    }

    lines
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(LayoutDirection::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(rows[0]);

    // Block list panel
    let block_items: Vec<ListItem> = app
        .document
        .blocks()
        .iter()
        .map(|block| ListItem::new(format!("{:<16} {}", block.id.as_str(), block.kind().label())))
        .collect();

    let title = match &app.mode {
        Mode::Rename { buffer } => format!("Title: {buffer}_"),
        _ if app.document.is_dirty() => format!("{} *", app.document.title()),
        _ => app.document.title().to_string(),
    };
    let blocks_list = List::new(block_items)
        .block(Panel::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    app.block_list_state.select(app.selected_index());
    f.render_stateful_widget(blocks_list, chunks[0], &mut app.block_list_state);

    // Editor panel
    let (editor_title, editor_lines) = match &app.mode {
        Mode::AddBlock { cursor } => {
            let lines = BlockKind::ALL
                .iter()
                .enumerate()
                .map(|(i, kind)| {
                    let marker = if i == *cursor { "> " } else { "  " };
                    Line::from(format!("{marker}{}. {}", i + 1, kind.label()))
                })
                .collect();
            ("Add block", lines)
        }
        _ => ("Block", field_lines(app)),
    };

    let editor = Paragraph::new(editor_lines)
        .block(Panel::default().borders(Borders::ALL).title(editor_title))
        .wrap(Wrap { trim: true });
    f.render_widget(editor, chunks[1]);

    // Status and instructions
    let help_text = match app.mode {
        Mode::Browse => {
            "q: Quit | j/k: Select | J/K: Move | a: Add | d: Delete | Tab: Field | Enter: Edit | t: Title | s: Save"
        }
        Mode::AddBlock { .. } => "j/k: Choose | Enter or 1-6: Add | Esc: Cancel",
        Mode::EditField { .. } | Mode::Rename { .. } => "Type to edit | Enter: Apply | Esc: Cancel",
    };
    let help = Paragraph::new(vec![
        Line::from(app.status.clone()),
        Line::from(help_text),
    ])
    .block(Panel::default());
    f.render_widget(help, rows[1]);
}
