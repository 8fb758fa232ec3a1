//! Main application logic for the terminal user interface.
//!
//! `App` owns the task store and the router, renders whichever view the
//! current location resolves to, and turns key presses into store mutations
//! and navigation. Quote and date values arrive from the content providers
//! over a channel and are drained before every frame.

use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::error;

use crate::content::{ContentUpdate, DateInfo, Quote};
use crate::router::{Location, Router, View};
use crate::storage::KeyValueStore;
use crate::store::{Navigation, StoreError, TaskStore};
use crate::task::Task;
use crate::tui::{
    colors::{ACCENT, DANGER, DONE, QUOTE},
    enums::{DetailFocus, ListFocus},
    input::{InputField, TextArea},
};

const NAME_DAY_LABEL: &str = "Imieniny";
const INPUT_PLACEHOLDER: &str = "What needs to be done?";
const NOTES_PLACEHOLDER: &str = "Add notes here...";

/// Application state for the terminal user interface.
pub struct App<S: KeyValueStore> {
    store: TaskStore<S>,
    router: Router,
    quote: Quote,
    date_info: DateInfo,
    updates: UnboundedReceiver<ContentUpdate>,
    input: InputField,
    notes: TextArea,
    /// Task whose description `notes` is editing.
    notes_task: Option<u64>,
    list_focus: ListFocus,
    detail_focus: DetailFocus,
    task_list_state: ListState,
    /// Task rows as last drawn, and the index of the first one.
    list_rows: Rect,
    list_offset: usize,
    status_message: String,
}

impl<S: KeyValueStore> App<S> {
    /// Create the app at `start`, receiving content values from `updates`.
    pub fn new(store: TaskStore<S>, start: Location, updates: UnboundedReceiver<ContentUpdate>) -> Self {
        let mut app = App {
            store,
            router: Router::new(start),
            quote: Quote::placeholder(),
            date_info: DateInfo::default(),
            updates,
            input: InputField::new(),
            notes: TextArea::default(),
            notes_task: None,
            list_focus: ListFocus::Input,
            detail_focus: DetailFocus::Notes,
            task_list_state: ListState::default(),
            list_rows: Rect::default(),
            list_offset: 0,
            status_message: String::new(),
        };
        app.sync_notes();
        app
    }

    #[cfg(test)]
    fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    #[cfg(test)]
    fn location(&self) -> Location {
        self.router.current()
    }

    #[cfg(test)]
    fn quote(&self) -> &Quote {
        &self.quote
    }

    #[cfg(test)]
    fn date_info(&self) -> &DateInfo {
        &self.date_info
    }

    /// Apply every content value that has arrived since the last frame.
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            match update {
                ContentUpdate::Quote(quote) => self.quote = quote,
                ContentUpdate::Date(info) => self.date_info = info,
            }
        }
    }

    fn navigate(&mut self, location: Location) {
        self.router.navigate(location);
        self.sync_notes();
    }

    fn go_back(&mut self) {
        self.router.back();
        self.sync_notes();
    }

    /// Bind the notes editor to the task at the current location.
    fn sync_notes(&mut self) {
        match self.router.current() {
            Location::Detail(id) => {
                if self.notes_task != Some(id) {
                    let description = self.store.get(id).map(|t| t.description.as_str()).unwrap_or("");
                    self.notes = TextArea::with_value(description);
                    self.notes_task = Some(id);
                    self.detail_focus = DetailFocus::Notes;
                }
            }
            Location::List => {
                self.notes_task = None;
                self.clamp_selection();
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.tasks().len();
        match self.task_list_state.selected() {
            _ if len == 0 => self.task_list_state.select(None),
            Some(i) if i >= len => self.task_list_state.select(Some(len - 1)),
            None if self.list_focus == ListFocus::Tasks => self.task_list_state.select(Some(0)),
            _ => {}
        }
    }

    fn report_error(&mut self, e: StoreError) {
        error!(error = %e, "failed to save tasks");
        self.status_message = format!("Error saving: {e}");
    }

    /// Handle one key event. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.status_message.clear();

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if key.modifiers.contains(KeyModifiers::ALT) && key.code == KeyCode::Left {
            self.go_back();
            return false;
        }

        match self.router.resolve(&self.store) {
            View::List => self.handle_list_input(key),
            View::Detail(task) => {
                let id = task.id;
                self.handle_detail_input(id, key);
                false
            }
            View::NotFound(_) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.navigate(Location::List);
                }
                false
            }
        }
    }

    /// A left click on a task row opens that task.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.router.current() != Location::List {
            return;
        }
        let rows = self.list_rows;
        let inside = mouse.column >= rows.x
            && mouse.column < rows.right()
            && mouse.row >= rows.y
            && mouse.row < rows.bottom();
        if !inside {
            return;
        }
        let index = self.list_offset + usize::from(mouse.row - rows.y);
        if let Some(id) = self.store.tasks().get(index).map(|t| t.id) {
            self.status_message.clear();
            self.list_focus = ListFocus::Tasks;
            self.task_list_state.select(Some(index));
            self.navigate(Location::Detail(id));
        }
    }

    /// Returns true if the application should quit.
    fn handle_list_input(&mut self, key: KeyEvent) -> bool {
        match self.list_focus {
            ListFocus::Input => {
                match key.code {
                    KeyCode::Enter => self.submit_new_task(),
                    KeyCode::Tab | KeyCode::Down => self.focus_tasks(),
                    KeyCode::Esc => {
                        self.input.take();
                    }
                    KeyCode::Backspace => self.input.handle_backspace(),
                    KeyCode::Delete => self.input.handle_delete(),
                    KeyCode::Left => self.input.move_cursor_left(),
                    KeyCode::Right => self.input.move_cursor_right(),
                    KeyCode::Home => self.input.move_home(),
                    KeyCode::End => self.input.move_end(),
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.input.handle_char(c)
                    }
                    _ => {}
                }
                false
            }
            ListFocus::Tasks => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => true,
                KeyCode::Tab | KeyCode::Char('a') => {
                    self.list_focus = ListFocus::Input;
                    false
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.select_next();
                    false
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.select_previous();
                    false
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open_selected();
                    false
                }
                _ => false,
            },
        }
    }

    fn focus_tasks(&mut self) {
        self.list_focus = ListFocus::Tasks;
        self.clamp_selection();
    }

    fn select_next(&mut self) {
        let len = self.store.tasks().len();
        if len == 0 {
            return;
        }
        let next = match self.task_list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.task_list_state.select(Some(next));
    }

    /// Moving up from the first task returns focus to the input.
    fn select_previous(&mut self) {
        match self.task_list_state.selected() {
            Some(i) if i > 0 => self.task_list_state.select(Some(i - 1)),
            _ => self.list_focus = ListFocus::Input,
        }
    }

    fn open_selected(&mut self) {
        let selected = self
            .task_list_state
            .selected()
            .and_then(|i| self.store.tasks().get(i))
            .map(|t| t.id);
        if let Some(id) = selected {
            self.navigate(Location::Detail(id));
        }
    }

    fn submit_new_task(&mut self) {
        if self.input.value.trim().is_empty() {
            return;
        }
        let text = self.input.take();
        match self.store.add(&text).map(|_| ()) {
            Ok(()) => self.status_message = "Task added".to_string(),
            Err(e) => self.report_error(e),
        }
    }

    fn handle_detail_input(&mut self, id: u64, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.navigate(Location::List),
            KeyCode::Char('t') if ctrl => self.toggle_task(id),
            KeyCode::Char('d') if ctrl => self.delete_task(id),
            KeyCode::Tab => self.detail_focus = self.detail_focus.next(),
            KeyCode::BackTab => self.detail_focus = self.detail_focus.prev(),
            _ => match self.detail_focus {
                DetailFocus::Notes => self.handle_notes_input(id, key),
                DetailFocus::Toggle if key.code == KeyCode::Enter => self.toggle_task(id),
                DetailFocus::Delete if key.code == KeyCode::Enter => self.delete_task(id),
                DetailFocus::Back if key.code == KeyCode::Enter => self.navigate(Location::List),
                _ => {}
            },
        }
    }

    /// Edit the notes; every change is saved immediately.
    fn handle_notes_input(&mut self, id: u64, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.notes.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.notes.insert_newline();
                true
            }
            KeyCode::Backspace => self.notes.backspace(),
            KeyCode::Delete => self.notes.delete(),
            KeyCode::Left => {
                self.notes.move_left();
                false
            }
            KeyCode::Right => {
                self.notes.move_right();
                false
            }
            KeyCode::Up => {
                self.notes.move_up();
                false
            }
            KeyCode::Down => {
                self.notes.move_down();
                false
            }
            KeyCode::Home => {
                self.notes.move_home();
                false
            }
            KeyCode::End => {
                self.notes.move_end();
                false
            }
            _ => false,
        };
        if changed {
            if let Err(e) = self.store.set_description(id, &self.notes.value).map(|_| ()) {
                self.report_error(e);
            }
        }
    }

    fn toggle_task(&mut self, id: u64) {
        match self.store.toggle_complete(id).map(|_| ()) {
            Ok(()) => {
                let done = self.store.get(id).is_some_and(|t| t.completed);
                let label = if done { "Marked as done" } else { "Marked as not done" };
                self.status_message = label.to_string();
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Delete and return to the list, whichever task was on screen.
    fn delete_task(&mut self, id: u64) {
        let navigation = match self.store.delete(id).map(|(_, nav)| nav) {
            Ok(nav) => {
                self.status_message = "Task deleted".to_string();
                nav
            }
            Err(e) => {
                self.report_error(e);
                Navigation::ToList
            }
        };
        if navigation == Navigation::ToList {
            self.navigate(Location::List);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(Span::styled(
            "To do list",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Quote, add-task input and the task list.
    fn render_list_view(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Quote
                Constraint::Length(3), // Input
                Constraint::Min(0),    // Tasks
            ])
            .split(area);

        let quote = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("\"{}\"", self.quote.text),
                Style::default().fg(QUOTE).add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                format!("- {}", self.quote.author),
                Style::default().fg(Color::Gray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(quote, chunks[0]);

        let input_focused = self.list_focus == ListFocus::Input;
        let input_text = if self.input.value.is_empty() {
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.input.value.as_str())
        };
        let col = self.input.cursor_column();
        let scroll_x = scroll_to_show(col, chunks[1].width.saturating_sub(2));
        let input = Paragraph::new(Line::from(input_text)).scroll((0, scroll_x)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("New task")
                .border_style(focus_style(input_focused)),
        );
        f.render_widget(input, chunks[1]);
        if input_focused {
            let x = chunks[1].x.saturating_add(1).saturating_add(to_cells(col).saturating_sub(scroll_x));
            f.set_cursor_position((x.min(chunks[1].right().saturating_sub(2)), chunks[1].y.saturating_add(1)));
        }

        let items: Vec<ListItem> = self
            .store
            .tasks()
            .iter()
            .map(|task| ListItem::new(Line::from(Span::styled(task.text.as_str(), title_style(task)))))
            .collect();
        let tasks_focused = self.list_focus == ListFocus::Tasks;
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Tasks ({})", self.store.tasks().len()))
                    .border_style(focus_style(tasks_focused)),
            )
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        if tasks_focused {
            f.render_stateful_widget(list, chunks[2], &mut self.task_list_state);
            self.list_offset = self.task_list_state.offset();
        } else {
            f.render_widget(list, chunks[2]);
            self.list_offset = 0;
        }
        self.list_rows = chunks[2].inner(Margin::new(1, 1));
    }

    /// Title, live notes editor and the task actions.
    fn render_detail_view(&self, f: &mut Frame, area: Rect, task: &Task) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Back
                Constraint::Length(3), // Title
                Constraint::Min(3),    // Notes
                Constraint::Length(1), // Actions
            ])
            .split(area);

        let back = Paragraph::new(Line::from(Span::styled(
            "← Back to list",
            button_style(self.detail_focus == DetailFocus::Back, Color::Gray),
        )));
        f.render_widget(back, chunks[0]);

        let title = Paragraph::new(Line::from(Span::styled(
            task.text.as_str(),
            title_style(task).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(format!("Task {}", task.id)));
        f.render_widget(title, chunks[1]);

        let notes_focused = self.detail_focus == DetailFocus::Notes;
        let notes_area = chunks[2];
        let (line, col) = self.notes.cursor_line_col();
        let visible = usize::from(notes_area.height.saturating_sub(2));
        let scroll_y = if visible == 0 { 0 } else { line.saturating_sub(visible - 1) };
        let scroll_x = scroll_to_show(col, notes_area.width.saturating_sub(2));
        let notes_text: Vec<Line> = if self.notes.value.is_empty() {
            vec![Line::from(Span::styled(NOTES_PLACEHOLDER, Style::default().fg(Color::DarkGray)))]
        } else {
            self.notes.value.split('\n').map(Line::from).collect()
        };
        let notes = Paragraph::new(notes_text).scroll((to_cells(scroll_y), scroll_x)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notes")
                .border_style(focus_style(notes_focused)),
        );
        f.render_widget(notes, notes_area);
        if notes_focused && visible > 0 {
            let x = notes_area.x.saturating_add(1).saturating_add(to_cells(col).saturating_sub(scroll_x));
            let y = notes_area.y.saturating_add(1).saturating_add(to_cells(line - scroll_y));
            f.set_cursor_position((x.min(notes_area.right().saturating_sub(2)), y));
        }

        let actions = Line::from(vec![
            Span::styled(
                format!("[ {} ]", task.toggle_label()),
                button_style(self.detail_focus == DetailFocus::Toggle, ACCENT),
            ),
            Span::raw("  "),
            Span::styled("[ Delete ]", button_style(self.detail_focus == DetailFocus::Delete, DANGER)),
        ]);
        f.render_widget(Paragraph::new(actions), chunks[3]);
    }

    fn render_not_found(&self, f: &mut Frame, area: Rect) {
        let back = Paragraph::new(Line::from(Span::styled(
            "← Task not found. Back to list",
            button_style(true, Color::Gray),
        )))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(back, area);
    }

    /// Today's date and, when known, the names celebrating today.
    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(self.date_info.date.as_str())];
        if !self.date_info.names.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("{NAME_DAY_LABEL}: {}", self.date_info.names),
                Style::default().fg(Color::Gray),
            )));
        }
        let footer = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(footer, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.router.resolve(&self.store) {
                View::List if self.list_focus == ListFocus::Input => {
                    "Enter add | Tab/Down tasks | Esc clear | Ctrl+C quit".to_string()
                }
                View::List => "Enter open | Up/Down select | Tab new task | q quit".to_string(),
                View::Detail(_) => {
                    "Tab focus | Ctrl+T done/undo | Ctrl+D delete | Esc back | Alt+Left history".to_string()
                }
                View::NotFound(_) => "Enter back to list".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(ACCENT).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches on the resolved location.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        match self.router.resolve(&self.store) {
            View::List => self.render_list_view(f, chunks[1]),
            View::Detail(task) => self.render_detail_view(f, chunks[1], task),
            View::NotFound(_) => self.render_not_found(f, chunks[1]),
        }
        self.render_footer(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);
    }

    /// Main event loop. Every frame reflects the store as it is now.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.drain_updates();
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

fn to_cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Columns to scroll so that char column `col` fits in a field `width` cells wide.
fn scroll_to_show(col: usize, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    to_cells(col.saturating_sub(width - 1))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    }
}

fn button_style(focused: bool, color: Color) -> Style {
    if focused {
        Style::default().bg(color).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    }
}

fn title_style(task: &Task) -> Style {
    if task.completed {
        Style::default().fg(DONE).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc::{self, UnboundedSender};

    use super::*;
    use crate::storage::MemoryStorage;

    fn app_at(start: Location) -> (App<MemoryStorage>, UnboundedSender<ContentUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(TaskStore::load(MemoryStorage::new()), start, rx), tx)
    }

    fn screen(app: &mut App<MemoryStorage>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    fn press(app: &mut App<MemoryStorage>, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App<MemoryStorage>, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App<MemoryStorage>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(app: &mut App<MemoryStorage>, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_click_on_row_opens_task() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        let middle = store.tasks()[1].id;
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::List, rx);
        screen(&mut app);

        let rows = app.list_rows;
        click(&mut app, rows.x + 2, rows.bottom() + 1);
        assert_eq!(app.location(), Location::List);

        click(&mut app, rows.x + 2, rows.y + 1);
        assert_eq!(app.location(), Location::Detail(middle));

        click(&mut app, rows.x + 2, rows.y);
        assert_eq!(app.location(), Location::Detail(middle));
    }

    #[test]
    fn test_long_input_scrolls_to_cursor() {
        let (mut app, _tx) = app_at(Location::List);
        type_text(&mut app, &"a".repeat(90));
        type_text(&mut app, "XYZ");
        assert!(screen(&mut app).contains("aaaXYZ"));
    }

    #[test]
    fn test_long_notes_line_scrolls_to_cursor() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("Pack").unwrap();
        let id = store.tasks()[0].id;
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::Detail(id), rx);

        type_text(&mut app, &"b".repeat(100));
        type_text(&mut app, "END");
        assert!(screen(&mut app).contains("bbbEND"));
    }

    #[test]
    fn test_scroll_to_show() {
        assert_eq!(scroll_to_show(10, 78), 0);
        assert_eq!(scroll_to_show(77, 78), 0);
        assert_eq!(scroll_to_show(93, 78), 16);
        assert_eq!(scroll_to_show(5, 0), 5);
        assert_eq!(scroll_to_show(usize::MAX, 10), u16::MAX);
    }

    #[test]
    fn test_missing_task_renders_not_found() {
        let (mut app, _tx) = app_at(Location::Detail(9999));
        let text = screen(&mut app);
        assert!(text.contains("Task not found. Back to list"));
        assert!(!text.contains("Mark as Done"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location(), Location::List);
    }

    #[test]
    fn test_add_from_input() {
        let (mut app, _tx) = app_at(Location::List);
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store().tasks().len(), 1);
        assert_eq!(app.store().tasks()[0].text, "Buy milk");
        assert!(app.input.value.is_empty());
        assert!(screen(&mut app).contains("Buy milk"));
    }

    #[test]
    fn test_blank_submission_ignored() {
        let (mut app, _tx) = app_at(Location::List);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.store().tasks().is_empty());
        assert_eq!(app.input.value, "   ");
    }

    #[test]
    fn test_detail_scenario() {
        let (mut app, _tx) = app_at(Location::List);
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        let id = app.store().tasks()[0].id;

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location(), Location::Detail(id));
        assert!(screen(&mut app).contains("Mark as Done"));

        type_text(&mut app, "2%");
        assert_eq!(app.store().get(id).unwrap().description, "2%");

        ctrl(&mut app, 't');
        let task = app.store().get(id).unwrap();
        assert!(task.completed);
        assert_eq!(task.description, "2%");
        assert!(screen(&mut app).contains("[ Undo ]"));

        ctrl(&mut app, 'd');
        assert!(app.store().tasks().is_empty());
        assert_eq!(app.location(), Location::List);
    }

    #[test]
    fn test_notes_edits_save_each_change() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("Pack").unwrap();
        let id = store.tasks()[0].id;
        store.set_description(id, "tent").unwrap();
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::Detail(id), rx);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.store().get(id).unwrap().description, "ten");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "stove");
        assert_eq!(app.store().get(id).unwrap().description, "ten\nstove");

        for _ in 0.."ten\nstove".len() {
            press(&mut app, KeyCode::Backspace);
        }
        assert_eq!(app.store().get(id).unwrap().description, "");
    }

    #[test]
    fn test_buttons_via_focus() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("First").unwrap();
        store.add("Second").unwrap();
        let first = store.tasks()[0].id;
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::Detail(first), rx);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.store().get(first).unwrap().completed);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.store().get(first).is_none());
        assert_eq!(app.store().tasks().len(), 1);
        assert_eq!(app.location(), Location::List);
    }

    #[test]
    fn test_escape_returns_to_list_and_quits_from_tasks() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("Only").unwrap();
        let id = store.tasks()[0].id;
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::Detail(id), rx);

        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.location(), Location::List);
        press(&mut app, KeyCode::Tab);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_history_back() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("Only").unwrap();
        let id = store.tasks()[0].id;
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::List, rx);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.location(), Location::Detail(id));
        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT));
        assert_eq!(app.location(), Location::List);
    }

    #[test]
    fn test_completed_task_stays_in_place() {
        let mut store = TaskStore::load(MemoryStorage::new());
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        let middle = store.tasks()[1].id;
        store.toggle_complete(middle).unwrap();
        let (_tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(store, Location::List, rx);

        let titles: Vec<&str> = app.store().tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert!(screen(&mut app).contains("Tasks (3)"));
    }

    #[test]
    fn test_content_updates_replace_placeholders() {
        let (mut app, tx) = app_at(Location::List);
        assert_eq!(app.quote(), &Quote::placeholder());
        assert!(screen(&mut app).contains("Loading quote..."));

        tx.send(ContentUpdate::Quote(Quote::fallback())).unwrap();
        tx.send(ContentUpdate::Date(DateInfo {
            date: "07.03.2026".to_string(),
            names: "Tomasz, Felicyta".to_string(),
        }))
        .unwrap();
        app.drain_updates();

        assert_eq!(app.quote(), &Quote::fallback());
        assert_eq!(app.date_info().date, "07.03.2026");
        let text = screen(&mut app);
        assert!(text.contains("Quality is not an act, it is a habit."));
        assert!(text.contains("- Aristotle"));
        assert!(text.contains("07.03.2026"));
        assert!(text.contains("Imieniny: Tomasz, Felicyta"));
    }

    #[test]
    fn test_date_without_names_hides_label() {
        let (mut app, tx) = app_at(Location::List);
        tx.send(ContentUpdate::Date(DateInfo {
            date: "07.03.2026".to_string(),
            names: String::new(),
        }))
        .unwrap();
        app.drain_updates();
        let text = screen(&mut app);
        assert!(text.contains("07.03.2026"));
        assert!(!text.contains("Imieniny"));
    }
}
