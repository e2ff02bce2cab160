//! Terminal file browser using ratatui
//!
//! Two modes: picking a vendor calibration file to read, and picking the
//! directory a converted file is saved into.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// Result of the file selector interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelectResult {
    /// User selected a file or directory
    Selected(PathBuf),
    /// User cancelled
    Cancelled,
}

/// What the browser is selecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// A vendor calibration file (`.csv`)
    Source,
    /// A directory to save into
    Directory,
}

impl SelectMode {
    fn title(self) -> &'static str {
        match self {
            SelectMode::Source => " Select the instrument calibration file ",
            SelectMode::Directory => " Select a folder for the new cal file ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    /// "Save here" pseudo entry in directory mode
    Here,
    Parent,
    Dir,
    File,
}

/// A file or directory entry in the file browser
#[derive(Debug, Clone)]
pub(crate) struct FileEntry {
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) kind: EntryKind,
}

/// State for the file selector
struct FileSelectorState {
    mode: SelectMode,
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    selected: usize,
    search: String,
    filtered: Vec<usize>,
}

impl FileSelectorState {
    fn new(mode: SelectMode, start_dir: PathBuf) -> Self {
        let entries = list_directory(&start_dir, mode);
        let filtered: Vec<usize> = (0..entries.len()).collect();
        Self {
            mode,
            current_dir: start_dir,
            entries,
            selected: 0,
            search: String::new(),
            filtered,
        }
    }

    fn refresh(&mut self) {
        self.entries = list_directory(&self.current_dir, self.mode);
        self.search.clear();
        self.filtered = (0..self.entries.len()).collect();
        self.selected = 0;
    }

    fn navigate_to(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.refresh();
    }

    fn update_filter(&mut self) {
        let search_lower = self.search.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name.to_lowercase().contains(&search_lower))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }
}

/// Starting directory when none is configured: home, or the working directory
pub fn default_start_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Run the interactive file selector
pub fn run_file_selector(mode: SelectMode, start_dir: &Path) -> Result<FileSelectResult> {
    let start_dir = if start_dir.is_dir() {
        start_dir.to_path_buf()
    } else {
        default_start_dir()
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_file_selector_loop(&mut terminal, mode, start_dir);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_file_selector_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mode: SelectMode,
    start_dir: PathBuf,
) -> Result<FileSelectResult> {
    let mut state = FileSelectorState::new(mode, start_dir);

    loop {
        terminal.draw(|frame| {
            draw_file_selector(frame, &state);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Enter => {
                    if let Some(&idx) = state.filtered.get(state.selected) {
                        let entry = state.entries[idx].clone();
                        match entry.kind {
                            EntryKind::Here => {
                                return Ok(FileSelectResult::Selected(state.current_dir.clone()))
                            }
                            EntryKind::File => return Ok(FileSelectResult::Selected(entry.path)),
                            EntryKind::Parent | EntryKind::Dir => state.navigate_to(entry.path),
                        }
                    }
                }
                KeyCode::Backspace => {
                    if state.search.is_empty() {
                        if let Some(parent) = state.current_dir.parent() {
                            state.navigate_to(parent.to_path_buf());
                        }
                    } else {
                        state.search.pop();
                        state.update_filter();
                    }
                }
                KeyCode::Esc => {
                    // Esc clears an active filter before it cancels
                    if state.search.is_empty() {
                        return Ok(FileSelectResult::Cancelled);
                    }
                    state.search.clear();
                    state.update_filter();
                }
                KeyCode::Up => {
                    state.selected = state.selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if state.selected + 1 < state.filtered.len() {
                        state.selected += 1;
                    }
                }
                KeyCode::PageUp => {
                    state.selected = state.selected.saturating_sub(10);
                }
                KeyCode::PageDown => {
                    state.selected =
                        (state.selected + 10).min(state.filtered.len().saturating_sub(1));
                }
                KeyCode::Home => {
                    state.selected = 0;
                }
                KeyCode::End => {
                    state.selected = state.filtered.len().saturating_sub(1);
                }
                KeyCode::Char(c) if !c.is_control() => {
                    state.search.push(c);
                    state.update_filter();
                }
                _ => {}
            }
        }
    }
}

/// List directory contents for the given mode
///
/// Hidden entries are skipped. `..` (and the "save here" entry in directory
/// mode) stay on top, then directories, then files, each sorted by name.
pub(crate) fn list_directory(path: &Path, mode: SelectMode) -> Vec<FileEntry> {
    let mut entries = Vec::new();

    if mode == SelectMode::Directory {
        entries.push(FileEntry {
            name: "[ save here ]".to_string(),
            path: path.to_path_buf(),
            kind: EntryKind::Here,
        });
    }

    if let Some(parent) = path.parent() {
        if parent != path {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                kind: EntryKind::Parent,
            });
        }
    }

    let mut listed = Vec::new();
    if let Ok(read_dir) = std::fs::read_dir(path) {
        for entry in read_dir.flatten() {
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') {
                continue;
            }

            let kind = if entry_path.is_dir() {
                EntryKind::Dir
            } else if mode == SelectMode::Source && is_calibration_file(&entry_path) {
                EntryKind::File
            } else {
                continue;
            };
            listed.push(FileEntry {
                name,
                path: entry_path,
                kind,
            });
        }
    }

    listed.sort_by(|a, b| match (a.kind, b.kind) {
        (EntryKind::Dir, EntryKind::File) => std::cmp::Ordering::Less,
        (EntryKind::File, EntryKind::Dir) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
    entries.extend(listed);
    entries
}

/// Vendor calibration files are comma-separated text
pub(crate) fn is_calibration_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv") || e.eq_ignore_ascii_case("cal"))
        .unwrap_or(false)
}

fn truncate_path_start(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len || max_len < 4 {
        path.to_string()
    } else {
        let tail: String = path.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }
}

/// Draw the file selector UI
fn draw_file_selector(frame: &mut Frame, state: &FileSelectorState) {
    let area = frame.area();

    let popup_width = 66u16.min(area.width);
    let popup_height = 22u16.min(area.height);
    let x = area.width.saturating_sub(popup_width) / 2;
    let y = area.height.saturating_sub(popup_height) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(state.mode.title())
        .title_style(Style::default().fg(Color::Cyan).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Current path
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // File list
            Constraint::Length(2), // Help text
        ])
        .split(inner);

    let path_str = state.current_dir.display().to_string();
    let max_path_len = (chunks[0].width as usize).saturating_sub(12);
    let path_line = Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled("Current: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_path_start(&path_str, max_path_len),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(path_line), chunks[0]);

    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Filter ")
        .title_style(Style::default().fg(Color::DarkGray));

    let search_content = if state.search.is_empty() {
        Line::from(vec![
            Span::styled("Type to filter...", Style::default().fg(Color::DarkGray)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![
            Span::styled(state.search.as_str(), Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ])
    };
    frame.render_widget(Paragraph::new(search_content).block(search_block), chunks[1]);

    let list_height = chunks[2].height as usize;
    let start_idx = if state.selected >= list_height {
        state.selected - list_height + 1
    } else {
        0
    };

    let items: Vec<ListItem> = state
        .filtered
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(list_height)
        .map(|(display_idx, &entry_idx)| {
            let entry = &state.entries[entry_idx];
            let is_dir = matches!(entry.kind, EntryKind::Dir | EntryKind::Parent);
            let icon = if is_dir { "▸ " } else { "  " };
            let suffix = if entry.kind == EntryKind::Dir { "/" } else { "" };

            let style = if display_idx == state.selected {
                if is_dir {
                    Style::default().fg(Color::Black).bg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Black).bg(Color::Green).bold()
                }
            } else if is_dir {
                Style::default().fg(Color::Cyan)
            } else if entry.kind == EntryKind::Here {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(format!("  {}{}{}", icon, entry.name, suffix)).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected.saturating_sub(start_idx)));
    frame.render_stateful_widget(List::new(items), chunks[2], &mut list_state);

    let help_text = Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Backspace", Style::default().fg(Color::Cyan)),
        Span::styled(" back  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), chunks[3]);

    if state.filtered.is_empty() {
        let msg = if state.search.is_empty() {
            "No calibration files in this directory"
        } else {
            "No matching files"
        };
        let msg_line = Line::from(Span::styled(
            msg,
            Style::default().fg(Color::DarkGray).italic(),
        ));
        let msg_area = Rect::new(
            chunks[2].x + 2,
            chunks[2].y + chunks[2].height / 2,
            chunks[2].width.saturating_sub(4),
            1,
        );
        frame.render_widget(
            Paragraph::new(msg_line).alignment(Alignment::Center),
            msg_area,
        );
    }
}
