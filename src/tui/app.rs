use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::{AttributeStats, Session, StatDelta, Task, TaskKind, UiConfig};
use crate::ops::{self, SyncFailure};
use crate::remote::{HabiticaClient, RemoteClient};

use super::input::{self, Request};
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a replacement title for the task under the cursor
    EditTitle,
    /// Reading a text overlay (drops after a sync, party chat)
    Overlay,
}

/// Message shown in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// One paragraph of a text overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    /// Dim line above the text, such as a chat author
    pub header: Option<String>,
    pub text: String,
}

/// Scrollable text shown on top of the menus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub entries: Vec<OverlayEntry>,
    /// Index of the first visible entry
    pub scroll: usize,
}

/// Messages fetched for the party overlay
const CHAT_LIMIT: usize = 50;

/// Main application state
pub struct App {
    pub session: Session,
    /// Which menu has focus
    pub menu: TaskKind,
    /// Cursor per menu, indexed like [`TaskKind::ALL`]
    pub cursors: [usize; 3],
    /// First visible row per menu
    pub scrolls: [usize; 3],
    pub mode: Mode,
    pub should_quit: bool,
    /// Set after a first `q` with unsynced changes
    pub quit_armed: bool,
    pub theme: Theme,
    /// Title being typed in EditTitle mode
    pub edit_buffer: String,
    /// Task the edit buffer belongs to
    pub edit_target: Option<String>,
    pub status: Option<Status>,
    /// Delta of the last sync, shown under the stats bar
    pub last_delta: Option<StatDelta>,
    pub overlay: Option<Overlay>,
    /// Width cap for overlays, 0 = fit the screen
    pub overlay_width: u16,
}

fn menu_index(kind: TaskKind) -> usize {
    match kind {
        TaskKind::Habit => 0,
        TaskKind::Daily => 1,
        TaskKind::Todo => 2,
    }
}

impl App {
    pub fn new(session: Session, ui: &UiConfig) -> Self {
        App {
            session,
            menu: TaskKind::Habit,
            cursors: [0; 3],
            scrolls: [0; 3],
            mode: Mode::Navigate,
            should_quit: false,
            quit_armed: false,
            theme: Theme::from_config(ui),
            edit_buffer: String::new(),
            edit_target: None,
            status: None,
            last_delta: None,
            overlay: None,
            overlay_width: ui.max_drop_width,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursors[menu_index(self.menu)]
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursors[menu_index(self.menu)] = cursor;
    }

    pub fn scroll(&self, kind: TaskKind) -> usize {
        self.scrolls[menu_index(kind)]
    }

    pub fn set_scroll(&mut self, kind: TaskKind, scroll: usize) {
        self.scrolls[menu_index(kind)] = scroll;
    }

    /// Task under the cursor in the focused menu
    pub fn current_task(&self) -> Option<&Task> {
        self.session.collection(self.menu).get_index(self.cursor())
    }

    pub fn current_task_mut(&mut self) -> Option<&mut Task> {
        let cursor = self.cursor();
        self.session.collection_mut(self.menu).get_index_mut(cursor)
    }

    /// Keep every cursor inside its menu after tasks were removed
    pub fn clamp_cursors(&mut self) {
        for kind in TaskKind::ALL {
            let len = self.session.collection(kind).len();
            let i = menu_index(kind);
            self.cursors[i] = self.cursors[i].min(len.saturating_sub(1));
            self.scrolls[i] = self.scrolls[i].min(self.cursors[i]);
        }
    }

    /// Run a sync cycle and record its outcome for display
    pub fn flush(&mut self, remote: &dyn RemoteClient) {
        if self.session.staged_count() == 0 {
            self.status = Some(Status::Info("nothing to sync".into()));
            return;
        }
        let (report, error) = match ops::flush(&mut self.session, remote) {
            Ok(report) => (report, None),
            Err(SyncFailure { report, error }) => (report, Some(error)),
        };
        self.clamp_cursors();
        self.last_delta = Some(report.delta);
        self.status = Some(match error {
            None => Status::Info(format!("synced: {}", report.delta)),
            Some(e) => Status::Error(format!("sync stopped: {}", e)),
        });
        if !report.drops.is_empty() {
            let entries = report
                .drops
                .into_iter()
                .map(|event| OverlayEntry {
                    header: None,
                    text: event.0,
                })
                .collect();
            self.open_overlay("Drops", entries);
        }
    }

    /// Fetch recent party chat and show it, newest first
    pub fn show_party(&mut self, remote: &dyn RemoteClient) {
        match ops::party_chat(remote, CHAT_LIMIT) {
            Ok(messages) if messages.is_empty() => {
                self.status = Some(Status::Info("party chat is empty".into()));
            }
            Ok(messages) => {
                let entries = messages
                    .into_iter()
                    .map(|message| OverlayEntry {
                        header: Some(message.header()),
                        text: message.text,
                    })
                    .collect();
                self.status = None;
                self.open_overlay("Party", entries);
            }
            Err(e) => self.status = Some(Status::Error(format!("party chat failed: {}", e))),
        }
    }

    pub fn open_overlay(&mut self, title: &str, entries: Vec<OverlayEntry>) {
        self.overlay = Some(Overlay {
            title: title.to_string(),
            entries,
            scroll: 0,
        });
        self.mode = Mode::Overlay;
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
        self.mode = Mode::Navigate;
    }

    /// Refetch everything from the server
    pub fn reload(&mut self, remote: &dyn RemoteClient) {
        let attributes = self.session.attributes;
        match ops::reload(&mut self.session, remote) {
            Ok(discarded) => {
                self.session.attributes = attributes;
                self.clamp_cursors();
                self.last_delta = None;
                self.status = Some(Status::Info(match discarded {
                    0 => "reloaded".to_string(),
                    n => format!("reloaded, {} staged change(s) discarded", n),
                }));
            }
            Err(e) => self.status = Some(Status::Error(format!("reload failed: {}", e))),
        }
    }
}

/// Fetch character attributes off the UI thread. The result only feeds
/// the stats bar; tasks are never touched from here.
fn spawn_attribute_refresh(client: HabiticaClient) -> mpsc::Receiver<AttributeStats> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || match client.fetch_attributes() {
        Ok(attributes) => {
            let _ = tx.send(attributes);
        }
        Err(e) => tracing::warn!(error = %e, "attribute refresh failed"),
    });
    rx
}

/// Run the TUI application
pub fn run(client: HabiticaClient, ui: &UiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = ops::load_session(&client)?;
    let mut app = App::new(session, ui);
    let attributes = spawn_attribute_refresh(client.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &client, &attributes);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    remote: &dyn RemoteClient,
    attributes: &mpsc::Receiver<AttributeStats>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Ok(attrs) = attributes.try_recv() {
            app.session.attributes = Some(attrs);
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match input::handle_key(app, key) {
                Some(Request::Flush) => {
                    app.status = Some(Status::Info("syncing...".into()));
                    terminal.draw(|frame| render::render(frame, app))?;
                    app.flush(remote);
                }
                Some(Request::Reload) => app.reload(remote),
                Some(Request::Party) => {
                    app.status = Some(Status::Info("loading party chat...".into()));
                    terminal.draw(|frame| render::render(frame, app))?;
                    app.show_party(remote);
                }
                None => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
