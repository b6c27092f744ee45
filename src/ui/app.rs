//! Event loop for the terminal client.
//!
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks: terminal input (pumped from a blocking reader thread), the two
//!   startup fetches, and recommend-call resolutions.
//! - The loop draws a frame, then awaits the next message; all state
//!   mutation happens here, never inside a spawned task.

use std::io;
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::error::AppResult;
use crate::models::{Movie, RecommendResponse};
use crate::services::history::HistoryFile;
use crate::services::providers::RecommendProvider;
use crate::services::session::SearchSession;
use crate::ui::render;

const MESSAGE_BUFFER: usize = 64;

/// Events flowing into the UI loop
pub enum AppMessage {
    Input(Event),
    GalleryLoaded(AppResult<Vec<Movie>>),
    CatalogLoaded(AppResult<Vec<String>>),
    RecommendFinished {
        query: String,
        result: AppResult<RecommendResponse>,
    },
}

/// Pane that keyboard input is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Recents,
    Gallery,
}

pub struct App {
    pub session: SearchSession,
    pub focus: Focus,
    pub recent_selected: usize,
    pub gallery_selected: usize,
    provider: Arc<dyn RecommendProvider>,
    history: HistoryFile,
    tx: mpsc::Sender<AppMessage>,
    rx: mpsc::Receiver<AppMessage>,
    should_quit: bool,
}

impl App {
    pub fn new(provider: Arc<dyn RecommendProvider>, history: HistoryFile) -> Self {
        let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
        let session = SearchSession::new(history.load());

        Self {
            session,
            focus: Focus::Search,
            recent_selected: 0,
            gallery_selected: 0,
            provider,
            history,
            tx,
            rx,
            should_quit: false,
        }
    }

    pub async fn run(
        mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> AppResult<()> {
        self.spawn_startup_fetches();
        self.spawn_input_pump();

        while !self.should_quit {
            terminal.draw(|frame| render::draw(frame, &self))?;

            let Some(message) = self.rx.recv().await else {
                break;
            };
            self.handle_message(message);

            // Drain whatever else is already queued before redrawing.
            while let Ok(message) = self.rx.try_recv() {
                self.handle_message(message);
            }
        }

        Ok(())
    }

    /// Gallery and catalog load concurrently and independently; neither
    /// blocks interaction, and a failure only gets logged.
    fn spawn_startup_fetches(&self) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.popular_movies().await;
            let _ = tx.send(AppMessage::GalleryLoaded(result)).await;
        });

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.all_titles().await;
            let _ = tx.send(AppMessage::CatalogLoaded(result)).await;
        });
    }

    fn spawn_input_pump(&self) {
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(AppMessage::Input(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Terminal input read failed");
                    break;
                }
            }
        });
    }

    /// Runs the submit transition and, when it passes, dispatches the
    /// recommend call. The session guard keeps this to one in-flight call.
    fn dispatch_submit(&mut self) {
        let Some(query) = self.session.begin_submit() else {
            return;
        };

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.recommend(&query).await;
            let _ = tx.send(AppMessage::RecommendFinished { query, result }).await;
        });
    }

    fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Input(Event::Key(key)) => self.handle_key(key),
            AppMessage::Input(_) => {}
            AppMessage::GalleryLoaded(Ok(gallery)) => {
                self.session.set_gallery(gallery);
                self.gallery_selected = 0;
            }
            AppMessage::GalleryLoaded(Err(e)) => {
                tracing::warn!(error = %e, "Popular movies fetch failed");
            }
            AppMessage::CatalogLoaded(Ok(catalog)) => self.session.set_catalog(catalog),
            AppMessage::CatalogLoaded(Err(e)) => {
                tracing::warn!(error = %e, "Title catalog fetch failed");
            }
            AppMessage::RecommendFinished { query, result } => match result {
                Ok(response) => {
                    self.session.finish_success(response, &query, &self.history);
                    self.recent_selected = 0;
                    // The gallery disappears once a movie is selected.
                    if self.focus == Focus::Gallery {
                        self.focus = Focus::Search;
                    }
                }
                Err(e) => self.session.finish_failure(&e),
            },
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            self.cycle_focus();
            return;
        }

        match self.focus {
            Focus::Search => match key.code {
                KeyCode::Enter => self.dispatch_submit(),
                KeyCode::Backspace => self.session.input_backspace(),
                KeyCode::Right => {
                    let completion = self.session.suggestions(1).first().map(|s| s.to_string());
                    if let Some(title) = completion {
                        self.session.set_input(&title);
                    }
                }
                KeyCode::Char(c) => self.session.input_char(c),
                _ => {}
            },
            Focus::Recents => match key.code {
                KeyCode::Left => {
                    self.recent_selected = self.recent_selected.saturating_sub(1);
                }
                KeyCode::Right => {
                    if self.recent_selected + 1 < self.session.recent.len() {
                        self.recent_selected += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(query) = self.session.recent.get(self.recent_selected).cloned() {
                        self.session.set_input(&query);
                        self.dispatch_submit();
                    }
                }
                _ => {}
            },
            Focus::Gallery => match key.code {
                KeyCode::Up => {
                    self.gallery_selected = self.gallery_selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.gallery_selected + 1 < self.session.gallery.len() {
                        self.gallery_selected += 1;
                    }
                }
                KeyCode::Enter => {
                    let title = self
                        .session
                        .gallery
                        .get(self.gallery_selected)
                        .map(|movie| movie.title.clone());
                    if let Some(title) = title {
                        self.session.set_input(&title);
                        self.dispatch_submit();
                    }
                }
                _ => {}
            },
        }
    }

    /// Tab order: search bar, recent chips, gallery. Panes with nothing to
    /// focus are skipped, and the gallery drops out once a movie is selected.
    fn cycle_focus(&mut self) {
        let gallery_focusable = self.session.show_gallery() && !self.session.gallery.is_empty();

        self.focus = match self.focus {
            Focus::Search => {
                if !self.session.recent.is_empty() {
                    Focus::Recents
                } else if gallery_focusable {
                    Focus::Gallery
                } else {
                    Focus::Search
                }
            }
            Focus::Recents => {
                if gallery_focusable {
                    Focus::Gallery
                } else {
                    Focus::Search
                }
            }
            Focus::Gallery => Focus::Search,
        };

        self.recent_selected = self.recent_selected.min(self.session.recent.len().saturating_sub(1));
        self.gallery_selected = self
            .gallery_selected
            .min(self.session.gallery.len().saturating_sub(1));
    }
}
