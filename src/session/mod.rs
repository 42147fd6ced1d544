//! Quiz session engine.
//!
//! A [`QuizSession`] owns one attempt at a quiz: the selected questions, the
//! current position, both timers and the answer ledger. Every mutating
//! command persists the full session record before returning, so the stored
//! state is never more than one command behind memory.

mod ledger;
mod navigation;
mod selector;
mod store;
mod submit;
mod timer;

use log::{debug, info, warn};

use crate::api::{ApiError, QuizApi, POINTS_PER_QUESTION};
use crate::evaluator;
use crate::models::{AnswerValue, Question, Quiz, SessionRecord};
use crate::notify::Notifier;

pub use ledger::Ledger;
pub use navigation::Navigation;
pub use selector::{select_questions, select_questions_with, QuestionPolicy};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionStore, StoreError};
pub use submit::{submit_answers, Outcome};
pub use timer::{Tick, Timer, DEFAULT_QUESTION_SECONDS};

/// Tunables for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub policy: QuestionPolicy,
    pub question_seconds: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            policy: QuestionPolicy::default(),
            question_seconds: DEFAULT_QUESTION_SECONDS,
        }
    }
}

/// Where the session state came from when it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Restored from the local store.
    Local,
    /// Restored from the backend's resume record.
    Remote,
    /// Newly selected questions.
    Fresh,
}

pub struct QuizSession<S> {
    quiz: Quiz,
    store: SessionStore<S>,
    options: SessionOptions,
    question_ids: Vec<String>,
    navigation: Navigation,
    timer: Timer,
    ledger: Ledger,
    origin: SessionOrigin,
    submitted: bool,
}

impl<S: KeyValueStore> QuizSession<S> {
    /// Opens a session for `quiz`.
    ///
    /// Tries the local store first, then the backend's resume record when the
    /// user is authenticated, and otherwise selects fresh questions. Records
    /// referencing questions the quiz no longer has are discarded. Failures on
    /// the resume paths are logged and fall through; opening never fails.
    pub async fn open<A: QuizApi>(
        quiz: Quiz,
        api: &A,
        store: SessionStore<S>,
        options: SessionOptions,
    ) -> Self {
        let (record, origin) = if let Some(record) = restore_local(&quiz, &store) {
            (record, SessionOrigin::Local)
        } else if let Some(record) = restore_remote(&quiz, api).await {
            (record, SessionOrigin::Remote)
        } else {
            let ids = select_questions(&quiz, quiz.difficulty, &options.policy);
            (SessionRecord::new(ids), SessionOrigin::Fresh)
        };

        info!(
            "Opened quiz {} ({:?}, {} questions)",
            quiz.id,
            origin,
            record.question_ids.len()
        );

        let session = Self::from_record(quiz, store, options, record, origin);
        session.persist();
        session
    }

    fn from_record(
        quiz: Quiz,
        store: SessionStore<S>,
        options: SessionOptions,
        mut record: SessionRecord,
        origin: SessionOrigin,
    ) -> Self {
        record.retain_selected_answers();
        let mut timer = Timer::new(options.question_seconds);
        timer.restore_time_spent(record.time_spent);

        Self {
            navigation: Navigation::at(record.question_ids.len(), record.current_index),
            ledger: Ledger::from_answers(record.answers),
            question_ids: record.question_ids,
            quiz,
            store,
            options,
            timer,
            origin,
            submitted: false,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    pub fn question_ids(&self) -> &[String] {
        &self.question_ids
    }

    /// Selected questions, in session order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.question_ids
            .iter()
            .filter_map(|id| self.quiz.question(id))
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.question_ids
            .get(self.navigation.index())
            .and_then(|id| self.quiz.question(id))
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Display total for the whole session.
    pub fn total_points(&self) -> u32 {
        self.question_ids.len() as u32 * POINTS_PER_QUESTION
    }

    /// Snapshot of the state as it is persisted.
    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            question_ids: self.question_ids.clone(),
            answers: self.ledger.answers().clone(),
            current_index: self.navigation.index(),
            time_spent: self.timer.time_spent(),
            last_updated: chrono::Utc::now(),
        }
    }

    /// Live feedback for an answered question.
    pub fn feedback(&self, question_id: &str) -> Option<bool> {
        let question = self.quiz.question(question_id)?;
        let answer = self.ledger.get(question_id).filter(|a| !a.is_empty())?;
        Some(evaluator::is_correct(question, answer))
    }

    /// Records an answer for the current question.
    pub fn answer(&mut self, answer: AnswerValue) {
        if let Some(id) = self.question_ids.get(self.navigation.index()).cloned() {
            self.answer_question(&id, answer);
        }
    }

    /// Records an answer for any selected question. Unknown ids are ignored.
    pub fn answer_question(&mut self, question_id: &str, answer: AnswerValue) {
        if !self.question_ids.iter().any(|id| id == question_id) {
            debug!("Ignoring answer for unselected question {}", question_id);
            return;
        }
        self.ledger.submit(question_id, answer);
        self.persist();
    }

    pub fn next(&mut self) -> bool {
        let moved = self.navigation.next();
        self.after_move(moved)
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.navigation.previous();
        self.after_move(moved)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        let moved = self.navigation.jump_to(index);
        self.after_move(moved)
    }

    fn after_move(&mut self, moved: bool) -> bool {
        if moved {
            self.timer.reset_time_left();
            self.persist();
        }
        moved
    }

    /// One second of play. An expired countdown moves on to the next
    /// question, except on the last one, where the caller decides.
    pub fn tick(&mut self) -> Tick {
        let tick = self.timer.tick();
        match tick {
            Tick::Paused => {}
            Tick::Expired if !self.navigation.is_last() => {
                debug!("Time is up on question {}", self.navigation.index() + 1);
                self.next();
                // `next` already persisted
            }
            _ => self.persist(),
        }
        tick
    }

    pub fn toggle_pause(&mut self) {
        self.timer.toggle_pause();
    }

    /// Throws the attempt away and starts over with newly selected questions.
    pub fn restart(&mut self) {
        if let Err(e) = self.store.clear(&self.quiz.id) {
            warn!("Failed to clear stored session for quiz {}: {}", self.quiz.id, e);
        }
        self.question_ids = select_questions(&self.quiz, self.quiz.difficulty, &self.options.policy);
        self.navigation = Navigation::new(self.question_ids.len());
        self.ledger.clear();
        self.timer.reset();
        self.origin = SessionOrigin::Fresh;
        self.submitted = false;
        info!("Restarted quiz {}", self.quiz.id);
        self.persist();
    }

    /// Submits the attempt. See [`submit_answers`] for the failure contract.
    pub async fn finish<A: QuizApi>(
        &mut self,
        api: &A,
        notifier: &Notifier,
    ) -> Result<Outcome, ApiError> {
        let outcome = submit_answers(
            api,
            &self.store,
            notifier,
            &self.quiz.id,
            &self.ledger,
            self.timer.time_spent(),
            &self.question_ids,
        )
        .await?;
        self.submitted = true;
        Ok(outcome)
    }

    /// Best effort: a failed write is logged and play continues.
    fn persist(&self) {
        if self.submitted {
            return;
        }
        if let Err(e) = self.store.save(&self.quiz.id, &self.record()) {
            warn!("Failed to save session for quiz {}: {}", self.quiz.id, e);
        }
    }
}

fn restore_local<S: KeyValueStore>(quiz: &Quiz, store: &SessionStore<S>) -> Option<SessionRecord> {
    let record = match store.load(&quiz.id) {
        Ok(record) => record?,
        Err(e) => {
            warn!("Could not read stored session for quiz {}: {}", quiz.id, e);
            return None;
        }
    };

    if record.resolves_against(quiz) {
        return Some(record);
    }
    info!("Stored session for quiz {} references missing questions, discarding", quiz.id);
    if let Err(e) = store.clear(&quiz.id) {
        warn!("Failed to clear stale session for quiz {}: {}", quiz.id, e);
    }
    None
}

async fn restore_remote<A: QuizApi>(quiz: &Quiz, api: &A) -> Option<SessionRecord> {
    if !api.is_authenticated() {
        return None;
    }

    match api.fetch_resume(&quiz.id).await {
        Ok(Some(payload)) => {
            let record = payload.into_record();
            if record.resolves_against(quiz) {
                Some(record)
            } else {
                info!("Remote session for quiz {} is stale, ignoring", quiz.id);
                None
            }
        }
        Ok(None) => None,
        Err(e) => {
            debug!("No remote session for quiz {}: {}", quiz.id, e);
            None
        }
    }
}
