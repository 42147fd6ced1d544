//! # wizi-quiz
//!
//! Quiz session engine for the Wizi Learn platform, with a terminal client.
//!
//! The engine selects a randomized subset of a quiz's questions, tracks
//! navigation, timers and answers, persists every change so an interrupted
//! attempt resumes where it stopped, evaluates answers per question type and
//! submits the attempt to the backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wizi_quiz::api::{HttpQuizApi, QuizApi};
//! use wizi_quiz::notify::Notifier;
//! use wizi_quiz::session::{FileStore, QuizSession, SessionOptions, SessionStore};
//! use wizi_quiz::models::AnswerValue;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpQuizApi::new("https://api.example.test", Some("token".into()));
//! let quiz = api.fetch_quiz("12").await?;
//! let store = SessionStore::new(FileStore::open(".wizi-sessions")?);
//!
//! let mut session = QuizSession::open(quiz, &api, store, SessionOptions::default()).await;
//! session.answer(AnswerValue::many(["3"]));
//! session.next();
//!
//! let notifier = Arc::new(Notifier::new());
//! notifier.start();
//! let outcome = session.finish(&api, &notifier).await?;
//! println!("{} / {}", outcome.result.score, outcome.total_points());
//! # Ok(())
//! # }
//! ```

pub mod api;
mod app;
pub mod config;
mod data;
mod draft;
pub mod evaluator;
pub mod models;
pub mod notify;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use thiserror::Error;

pub use app::{App, ReviewEntry};
pub use data::{load_quiz_from_json, LoadError};
pub use draft::Draft;

use api::{ApiError, Backend, HttpQuizApi, OfflineQuizApi, QuizApi};
use config::{Config, ConfigError, Source};
use models::AppState;
use notify::Notifier;
use session::{FileStore, KeyValueStore, QuizSession, SessionStore, StoreError};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Error type for running a quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load quiz: {0}")]
    Load(#[from] LoadError),
    #[error("failed to reach the quiz API: {0}")]
    Api(#[from] ApiError),
    #[error("session storage unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What the event loop should do after a key press.
enum Action {
    Continue,
    Submit,
    Quit,
}

/// Loads the quiz, opens (or resumes) its session and runs the terminal UI
/// until the user quits.
pub async fn run(config: Config) -> Result<(), QuizError> {
    let (backend, quiz_id) = match &config.source {
        Source::Remote {
            api_url,
            token,
            quiz_id,
        } => (
            Backend::Http(HttpQuizApi::new(api_url.clone(), token.clone())),
            quiz_id.clone(),
        ),
        Source::File(path) => {
            let quiz = load_quiz_from_json(path)?;
            let id = quiz.id.clone();
            (Backend::Offline(OfflineQuizApi::new(quiz)), id)
        }
    };

    // A quiz that cannot be loaded ends the run.
    let quiz = backend.fetch_quiz(&quiz_id).await?;
    let store = SessionStore::new(FileStore::open(&config.storage_dir)?);

    let notifier = Arc::new(Notifier::new());
    notifier.start();

    let session = QuizSession::open(quiz, &backend, store, config.session).await;
    let mut app = App::new(session, Arc::clone(&notifier));

    let mut term = terminal::init()?;
    let result = run_event_loop(&mut term, &mut app, &backend).await;
    terminal::restore()?;

    notifier.shutdown();
    info!("Quiz {} closed", quiz_id);
    result
}

async fn run_event_loop<S, A>(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App<S>,
    api: &A,
) -> Result<(), QuizError>
where
    S: KeyValueStore,
    A: QuizApi,
{
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_input(app, key) {
                        Action::Continue => {}
                        Action::Quit => break,
                        Action::Submit => {
                            // The notifier already told the user; the quiz
                            // screen stays up for another try.
                            if let Err(e) = app.finish(api).await {
                                debug!("Submission failed: {}", e);
                            }
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick = Instant::now();
            app.tick();
        }
    }

    Ok(())
}

fn handle_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match app.state {
        AppState::Welcome => handle_welcome_input(app, key.code),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key.code),
    }
}

fn handle_welcome_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) -> Action {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            Action::Continue
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            Action::Continue
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::Continue,
    }
}

fn handle_quiz_input<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('p') => app.toggle_pause(),
            KeyCode::Char('r') => app.restart(),
            _ => {}
        }
        return Action::Continue;
    }

    match key.code {
        KeyCode::Up => app.select_previous_option(),
        KeyCode::Down => app.select_next_option(),
        KeyCode::Left => app.cycle_match(false),
        KeyCode::Right => app.cycle_match(true),
        KeyCode::Tab => app.next_question(),
        KeyCode::BackTab => app.previous_question(),
        KeyCode::Esc => return Action::Quit,
        KeyCode::Enter => {
            if app.confirm_answer() {
                return Action::Submit;
            }
        }
        KeyCode::Backspace if app.accepts_text() => app.backspace(),
        KeyCode::Char(c) if app.accepts_text() => app.type_char(c),
        KeyCode::Char(' ') => app.activate_option(),
        KeyCode::Char('n') => app.next_question(),
        KeyCode::Char('p') => app.previous_question(),
        KeyCode::Char('P') => app.toggle_pause(),
        KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

fn handle_result_input<S: KeyValueStore>(app: &mut App<S>, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        _ => {}
    }
    Action::Continue
}
