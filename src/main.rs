pub mod catalog;
pub mod config;
pub mod hints;
pub mod results;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod ui;

use crate::{
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    results::ResultLog,
    runtime::{DrillEvent, DrillEventSource, TerminalEvents},
    session::TypingSession,
    time_series::WpmSeries,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use rand::Rng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use webbrowser::Browser;

// The session clock is second-granular, so one tick per second.
const TICK_RATE_MS: u64 = 1000;

/// terminal typing trainer with a fixed passage catalog and finger hints
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing trainer: type a fixed practice passage character by character, watch live speed and accuracy, and review completed sessions in an in-memory history."
)]
pub struct Cli {
    /// catalog index of the passage to practice first
    #[clap(short = 'p', long)]
    passage: Option<usize>,

    /// pick the first passage at random
    #[clap(short = 'r', long)]
    random: bool,

    /// print the passage catalog and exit
    #[clap(long)]
    list: bool,

    /// hide the finger-hint line beneath the passage
    #[clap(long)]
    no_hints: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
    History,
}

#[derive(Debug, Default)]
pub struct HistoryState {
    pub scroll_offset: usize,
}

#[derive(Debug)]
pub struct App {
    pub catalog: Catalog,
    pub passage_index: usize,
    pub session: TypingSession,
    pub log: ResultLog,
    pub wpm_series: WpmSeries,
    pub state: AppState,
    pub history_state: HistoryState,
    pub show_hints: bool,
    next_session_id: u64,
}

impl App {
    pub fn new(catalog: Catalog, passage_index: usize, show_hints: bool) -> Self {
        let passage = catalog
            .get(passage_index)
            .expect("passage index out of range")
            .clone();

        Self {
            catalog,
            passage_index,
            session: TypingSession::new(1, passage),
            log: ResultLog::new(),
            wpm_series: WpmSeries::new(),
            state: AppState::Typing,
            history_state: HistoryState::default(),
            show_hints,
            next_session_id: 2,
        }
    }

    fn fresh_session(&mut self) {
        let passage = self
            .catalog
            .get(self.passage_index)
            .expect("passage index out of range")
            .clone();
        self.session = TypingSession::new(self.next_session_id, passage);
        self.next_session_id += 1;
        self.wpm_series.clear();
        self.state = AppState::Typing;
        self.history_state = HistoryState::default();
    }

    /// Discards the in-flight session and starts the same passage over.
    /// Nothing is logged for the discarded attempt.
    pub fn restart(&mut self) {
        self.fresh_session();
    }

    /// Switches to the passage at `index`. Out-of-range indices are
    /// rejected and the current session stays untouched.
    pub fn select(&mut self, index: usize) -> bool {
        if self.catalog.get(index).is_none() {
            return false;
        }
        self.passage_index = index;
        self.fresh_session();
        true
    }

    /// Switches to the next catalog passage, wrapping at the end.
    pub fn select_next(&mut self) {
        let next = self.catalog.next_index(self.passage_index);
        self.select(next);
    }

    /// One-second cadence: advances the session clock and samples the
    /// running wpm for the results chart.
    pub fn on_tick(&mut self) {
        if self.session.is_finished() {
            return;
        }
        self.session.tick();
        if self.session.is_active() && self.session.elapsed_secs() > 0 {
            self.wpm_series.record(
                self.session.elapsed_secs() as f64,
                self.session.wpm() as f64,
            );
        }
    }

    /// Routes a typing-screen key into the session; on completion the
    /// summary lands in the log and the app moves to the results screen.
    pub fn on_typing_key(&mut self, key: &KeyEvent) {
        if let Some(summary) = self.session.handle_key(key) {
            self.log.append(summary);
            self.state = AppState::Results;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let catalog = Catalog::load();

    if cli.list {
        let listing = catalog
            .passages()
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{i}: {} ({} chars)", p.title, p.text.chars().count()))
            .join("\n");
        println!("{listing}");
        return Ok(());
    }

    if let Some(idx) = cli.passage {
        if catalog.get(idx).is_none() {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::ValueValidation,
                format!("passage index {idx} out of range (0..{})", catalog.len()),
            )
            .exit();
        }
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let stored = store.load();

    let passage_index = if cli.random {
        rand::thread_rng().gen_range(0..catalog.len())
    } else {
        cli.passage.unwrap_or_else(|| {
            if stored.passage_index < catalog.len() {
                stored.passage_index
            } else {
                0
            }
        })
    };
    let show_hints = if cli.no_hints { false } else { stored.show_hints };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, passage_index, show_hints);
    let events = TerminalEvents::spawn(Duration::from_millis(TICK_RATE_MS));
    start_tui(&mut terminal, &mut app, &store, &events)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug)]
enum ExitType {
    Restart,
    NextPassage,
    Quit,
}

fn start_tui<B: Backend, S: ConfigStore, E: DrillEventSource>(
    terminal: &mut Terminal<B>,
    mut app: &mut App,
    store: &S,
    events: &E,
) -> Result<(), Box<dyn Error>> {
    loop {
        let mut exit_type: ExitType = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            let app = &mut app;

            match events.recv()? {
                DrillEvent::Tick => {
                    app.on_tick();

                    if app.state == AppState::Typing && app.session.is_active() {
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                DrillEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                DrillEvent::Key(key) => {
                    match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Left => {
                            exit_type = ExitType::Restart;
                            break;
                        }
                        KeyCode::Right => {
                            exit_type = ExitType::NextPassage;
                            break;
                        }
                        KeyCode::Backspace => match app.state {
                            AppState::Typing => app.on_typing_key(&key),
                            AppState::History => {
                                app.state = AppState::Results;
                            }
                            AppState::Results => {}
                        },
                        KeyCode::Char(c) => {
                            if key.modifiers.contains(KeyModifiers::CONTROL)
                                && key.code == KeyCode::Char('c')
                            // ctrl+c to quit
                            {
                                break;
                            }

                            match app.state {
                                AppState::Typing => {
                                    app.on_typing_key(&key);
                                }
                                AppState::Results => match c {
                                    'r' => {
                                        exit_type = ExitType::Restart;
                                        break;
                                    }
                                    'n' => {
                                        exit_type = ExitType::NextPassage;
                                        break;
                                    }
                                    'h' => {
                                        app.state = AppState::History;
                                    }
                                    't' => {
                                        if Browser::is_available() {
                                            if let Some(latest) = app.log.latest() {
                                                webbrowser::open(&format!(
                                                    "https://twitter.com/intent/tweet?text={}%20wpm%20%2F%20{}%25%20acc%20on%20%22{}%22",
                                                    latest.wpm, latest.accuracy, latest.passage_title,
                                                ))
                                                .unwrap_or_default();
                                            }
                                        }
                                    }
                                    _ => {}
                                },
                                AppState::History => match c {
                                    'r' => {
                                        exit_type = ExitType::Restart;
                                        break;
                                    }
                                    'n' => {
                                        exit_type = ExitType::NextPassage;
                                        break;
                                    }
                                    'b' => {
                                        app.state = AppState::Results;
                                    }
                                    _ => {}
                                },
                            }
                        }
                        KeyCode::Up => {
                            if app.state == AppState::History {
                                app.history_state.scroll_offset =
                                    app.history_state.scroll_offset.saturating_sub(1);
                            }
                        }
                        KeyCode::Down => {
                            if app.state == AppState::History {
                                // Max scroll is clamped in the render function
                                app.history_state.scroll_offset += 1;
                            }
                        }
                        KeyCode::PageUp => {
                            if app.state == AppState::History {
                                app.history_state.scroll_offset =
                                    app.history_state.scroll_offset.saturating_sub(10);
                            }
                        }
                        KeyCode::PageDown => {
                            if app.state == AppState::History {
                                app.history_state.scroll_offset += 10;
                            }
                        }
                        KeyCode::Home => {
                            if app.state == AppState::History {
                                app.history_state.scroll_offset = 0;
                            }
                        }
                        _ => {}
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                app.restart();
            }
            ExitType::NextPassage => {
                app.select_next();
                let _ = store.save(&Config {
                    passage_index: app.passage_index,
                    show_hints: app.show_hints,
                });
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    let screen = ui::screen::current_screen(&app.state);
    screen.render(app, f);
}
