//! TUI rendering and terminal management (impure shell)
//!
//! The state machines in [`crate::state`] never block. This module owns the
//! terminal, turns key presses into state transitions, runs namespace
//! lookups and resolutions on worker threads, and feeds their replies back
//! over a channel on the next loop iteration.

pub mod constants;
pub mod helper;
pub mod layout;
pub mod search_bar;
pub mod styles;
pub mod suggestion_list;

pub use helper::{helper_message, resolvable_uri, HelperPanel};
pub use layout::{render_layout, Screen};
pub use search_bar::SearchBar;
pub use suggestion_list::{registry_link, SuggestionList};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, KeyAction, NamespaceEntry};
use crate::resolver::{CurieResolver, ResolutionEvent, ResolverClient};
use crate::search::{EbiSearchClient, NamespaceSearch};
use crate::state::{FetchRequest, InputOutcome, SearchInputController};
use constants::{PAGE_STEP, TICK_INTERVAL};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Result of a background job.
#[derive(Debug)]
pub enum WorkerReply {
    /// Candidates for a namespace lookup.
    Namespaces {
        /// Generation the lookup was issued for.
        generation: u64,
        /// Candidates (empty on failure).
        entries: Vec<NamespaceEntry>,
    },
    /// Outcome of resolving a submitted CURIE.
    Resolution(ResolutionEvent),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    input: SearchInputController,
    key_bindings: KeyBindings,
    search: Arc<dyn NamespaceSearch>,
    resolver: Arc<dyn CurieResolver>,
    identifiers_url: url::Url,
    registry_url: String,
    replies_tx: Sender<WorkerReply>,
    replies_rx: Receiver<WorkerReply>,
    status: Option<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(config: &ResolvedConfig, initial_query: String) -> Result<Self, TuiError> {
        let search_settings = config.search_settings().map_err(AppError::from)?;
        let resolver_settings = config.resolver_settings().map_err(AppError::from)?;
        let search = EbiSearchClient::new(search_settings).map_err(AppError::from)?;
        let identifiers_url = resolver_settings.identifiers_url.clone();
        let resolver = ResolverClient::new(resolver_settings).map_err(AppError::from)?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_parts(
            terminal,
            config,
            initial_query,
            Arc::new(search),
            Arc::new(resolver),
            identifiers_url,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (Ctrl+C). Sleeps until the next key press,
    /// the debounce deadline, or the tick interval, whichever comes first.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let now = Instant::now();
            let mut dirty = self.dispatch_due_fetch(now);
            dirty |= self.drain_replies();
            if dirty {
                self.draw()?;
            }

            if event::poll(self.poll_timeout(Instant::now()))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key, Instant::now()) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_parts(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        initial_query: String,
        search: Arc<dyn NamespaceSearch>,
        resolver: Arc<dyn CurieResolver>,
        identifiers_url: url::Url,
    ) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        Self {
            terminal,
            input: SearchInputController::new(
                config.suggestion_settings(),
                initial_query,
                Instant::now(),
            ),
            key_bindings: KeyBindings::default(),
            search,
            resolver,
            identifiers_url,
            registry_url: config.registry_url.clone(),
            replies_tx,
            replies_rx,
            status: None,
        }
    }

    /// How long the loop may block waiting for terminal events.
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.input
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .map_or(TICK_INTERVAL, |until| until.min(TICK_INTERVAL))
    }

    /// Fire the debounce timer if due and start the lookup.
    ///
    /// Returns true when the screen changed.
    fn dispatch_due_fetch(&mut self, now: Instant) -> bool {
        let was_open = self.input.suggestions().map(|s| s.phase());
        match self.input.tick(now) {
            Some(request) => {
                self.spawn_fetch(request);
                true
            }
            None => was_open != self.input.suggestions().map(|s| s.phase()),
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        debug!(generation = request.generation, query = %request.query, "Dispatching namespace lookup");
        let search = Arc::clone(&self.search);
        let tx = self.replies_tx.clone();
        thread::spawn(move || {
            let entries = search.fetch(&request.query, request.page_size);
            // The receiver is gone only when the app has exited.
            let _ = tx.send(WorkerReply::Namespaces {
                generation: request.generation,
                entries,
            });
        });
    }

    fn spawn_resolution(&self, curie: String) {
        info!(%curie, "Resolving submitted compact identifier");
        let resolver = Arc::clone(&self.resolver);
        let identifiers_url = self.identifiers_url.clone();
        let tx = self.replies_tx.clone();
        thread::spawn(move || {
            let event = resolver.resolve(&curie).into_event(&identifiers_url);
            let _ = tx.send(WorkerReply::Resolution(event));
        });
    }

    /// Apply every reply that has arrived. Returns true if any did.
    fn drain_replies(&mut self) -> bool {
        let mut changed = false;
        while let Ok(reply) = self.replies_rx.try_recv() {
            changed |= self.apply_reply(reply);
        }
        changed
    }

    fn apply_reply(&mut self, reply: WorkerReply) -> bool {
        match reply {
            WorkerReply::Namespaces {
                generation,
                entries,
            } => {
                debug!(generation, count = entries.len(), "Namespace lookup finished");
                self.input.complete_fetch(generation, entries)
            }
            WorkerReply::Resolution(event) => {
                match &event {
                    ResolutionEvent::Succeeded { .. } => {
                        info!(event = event.name(), detail = %event.detail(), "Host event")
                    }
                    ResolutionEvent::Failed { .. } => {
                        warn!(event = event.name(), detail = %event.detail(), "Host event")
                    }
                }
                self.status = Some(event.summary());
                true
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Ctrl+C always quits, even if rebound
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Printable characters edit the query before bindings are consulted
        if let KeyCode::Char(ch) = key.code {
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                self.input.insert_char(ch, now);
                return false;
            }
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::SelectPrevious => {
                self.input.select_previous(1);
            }
            KeyAction::SelectNext => {
                self.input.select_next(1);
            }
            KeyAction::PagePrevious => {
                self.input.select_previous(PAGE_STEP);
            }
            KeyAction::PageNext => {
                self.input.select_next(PAGE_STEP);
            }
            KeyAction::Submit => {
                if let InputOutcome::Submitted(curie) = self.input.handle_enter(now) {
                    self.status = Some(format!("Resolving {curie}..."));
                    self.spawn_resolution(curie);
                }
            }
            KeyAction::CloseSuggestions => {
                self.input.close_suggestions();
            }
            KeyAction::CursorLeft => {
                self.input.move_left();
            }
            KeyAction::CursorRight => {
                self.input.move_right();
            }
            KeyAction::CursorHome => {
                self.input.move_home();
            }
            KeyAction::CursorEnd => {
                self.input.move_end();
            }
            KeyAction::DeleteBackward => {
                self.input.delete_backward(now);
            }
            KeyAction::DeleteForward => {
                self.input.delete_forward(now);
            }
            KeyAction::ClearQuery => {
                self.input.clear(now);
            }
            KeyAction::NextExample => {
                self.input.fill_next_example(now);
            }
        }

        false
    }

    /// Render the current state
    fn draw(&mut self) -> Result<(), TuiError> {
        let identifiers_url = self.identifiers_url.as_str().trim_end_matches('/');
        let screen = Screen {
            identifiers_url,
            registry_url: &self.registry_url,
            status: self.status.as_deref(),
        };
        let input = &self.input;
        self.terminal.draw(|frame| {
            render_layout(frame, input, screen);
        })?;
        Ok(())
    }
}

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create a TuiApp for testing with a custom backend and services
    pub(crate) fn new_for_test(
        backend: B,
        config: &ResolvedConfig,
        initial_query: &str,
        search: Arc<dyn NamespaceSearch>,
        resolver: Arc<dyn CurieResolver>,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(backend)?;
        let identifiers_url = config
            .resolver_settings()
            .map_err(AppError::from)?
            .identifiers_url;
        Ok(Self::with_parts(
            terminal,
            config,
            initial_query.to_string(),
            search,
            resolver,
            identifiers_url,
        ))
    }

    /// Wait for the next worker reply and apply it.
    pub(crate) fn wait_for_reply(&mut self, timeout: Duration) -> bool {
        match self.replies_rx.recv_timeout(timeout) {
            Ok(reply) => self.apply_reply(reply),
            Err(_) => false,
        }
    }

    pub(crate) fn input(&self) -> &SearchInputController {
        &self.input
    }

    pub(crate) fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Run the interactive search bar.
///
/// Always restores the terminal, even when the loop fails.
pub fn run(config: &ResolvedConfig, initial_query: String) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, initial_query)?;
    let result = app.run();

    restore_terminal()?;

    result
}

fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "event_loop_tests.rs"]
mod tests;
