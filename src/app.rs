use std::sync::Arc;

use crate::api::{ApiError, QuizApi};
use crate::draft::Draft;
use crate::evaluator::{format_correct_answer, format_user_answer, is_correct};
use crate::models::{AppState, Question};
use crate::notify::{Notice, Notifier};
use crate::session::{KeyValueStore, Outcome, QuizSession, SessionOrigin};

/// One line of the post-submission review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    pub prompt: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

pub struct App<S> {
    pub state: AppState,
    session: QuizSession<S>,
    notifier: Arc<Notifier>,
    draft: Draft,
    outcome: Option<Outcome>,
    result_scroll: usize,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(session: QuizSession<S>, notifier: Arc<Notifier>) -> Self {
        let mut app = Self {
            state: AppState::Welcome,
            session,
            notifier,
            draft: Draft::Empty,
            outcome: None,
            result_scroll: 0,
        };
        app.reload_draft();
        app
    }

    pub fn session(&self) -> &QuizSession<S> {
        &self.session
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn is_resumed(&self) -> bool {
        self.session.origin() != SessionOrigin::Fresh
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn current_question_number(&self) -> usize {
        self.session.navigation().index() + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.navigation().len()
    }

    pub fn latest_notice(&self) -> Option<Notice> {
        self.notifier.latest()
    }

    /// Live feedback for the question on screen, once it has been answered.
    pub fn current_feedback(&self) -> Option<bool> {
        let question = self.current_question()?;
        self.session.feedback(&question.id)
    }

    fn reload_draft(&mut self) {
        let question = self.session.current_question();
        let existing = question.and_then(|q| self.session.ledger().get(&q.id));
        self.draft = Draft::for_question(question, existing);
    }

    pub fn start_quiz(&mut self) {
        self.state = AppState::Quiz;
    }

    /// Advances the clock by one second while a question is on screen.
    pub fn tick(&mut self) {
        if self.state != AppState::Quiz {
            return;
        }
        // An expiring countdown moves on; keep what was picked so far.
        let timer = self.session.timer();
        if !timer.is_paused() && timer.time_left() == 1 {
            self.save_draft();
        }
        let before = self.session.navigation().index();
        self.session.tick();
        if self.session.navigation().index() != before {
            self.reload_draft();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn select_next_option(&mut self) {
        if let Some(question) = self.session.current_question() {
            self.draft.move_down(question);
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(question) = self.session.current_question() {
            self.draft.move_up(question);
        }
    }

    pub fn activate_option(&mut self) {
        self.draft.activate();
    }

    pub fn cycle_match(&mut self, forward: bool) {
        self.draft.cycle(forward);
    }

    pub fn accepts_text(&self) -> bool {
        self.draft.accepts_text()
    }

    pub fn type_char(&mut self, c: char) {
        self.draft.type_char(c);
    }

    pub fn backspace(&mut self) {
        self.draft.backspace();
    }

    /// Moves the draft into the ledger, if anything was entered.
    fn save_draft(&mut self) {
        let answer = self
            .session
            .current_question()
            .and_then(|q| self.draft.to_answer(q));
        if let Some(answer) = answer {
            self.session.answer(answer);
        }
    }

    /// Saves the answer and moves on. Returns true when the last question was
    /// confirmed and the attempt should be submitted.
    pub fn confirm_answer(&mut self) -> bool {
        self.save_draft();
        if self.session.navigation().is_last() {
            return true;
        }
        self.session.next();
        self.reload_draft();
        false
    }

    pub fn next_question(&mut self) {
        self.save_draft();
        if self.session.next() {
            self.reload_draft();
        }
    }

    pub fn previous_question(&mut self) {
        self.save_draft();
        if self.session.previous() {
            self.reload_draft();
        }
    }

    /// Submits the attempt. On failure the notice is already queued and the
    /// quiz screen stays up so the user can retry.
    pub async fn finish<A: QuizApi>(&mut self, api: &A) -> Result<(), ApiError> {
        let outcome = self.session.finish(api, &self.notifier).await?;
        self.outcome = Some(outcome);
        self.result_scroll = 0;
        self.state = AppState::Result;
        Ok(())
    }

    pub fn review(&self) -> Vec<ReviewEntry> {
        self.session
            .questions()
            .map(|question| {
                let answer = self.session.ledger().get(&question.id);
                ReviewEntry {
                    prompt: question.text.clone(),
                    user_answer: format_user_answer(question, answer),
                    correct_answer: format_correct_answer(question),
                    is_correct: answer.is_some_and(|a| is_correct(question, a)),
                }
            })
            .collect()
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.state = AppState::Welcome;
        self.outcome = None;
        self.result_scroll = 0;
        self.reload_draft();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::OfflineQuizApi;
    use crate::models::{AnswerOption, AnswerValue, QuestionType, Quiz};
    use crate::session::{MemoryStore, SessionOptions, SessionStore};

    fn quiz() -> Quiz {
        Quiz {
            id: "3".to_string(),
            title: "Outlook".to_string(),
            questions: (0..2)
                .map(|i| {
                    Question::new(i.to_string(), QuestionType::TrueFalse, "?").with_options(vec![
                        AnswerOption::new("v", "Vrai", true),
                        AnswerOption::new("f", "Faux", false),
                    ])
                })
                .collect(),
            ..Quiz::default()
        }
    }

    async fn app(api: &OfflineQuizApi) -> App<MemoryStore> {
        app_with(api, SessionOptions::default()).await
    }

    async fn app_with(api: &OfflineQuizApi, options: SessionOptions) -> App<MemoryStore> {
        let notifier = Arc::new(Notifier::new());
        notifier.start();
        let session = QuizSession::open(
            api.quiz().clone(),
            api,
            SessionStore::new(MemoryStore::new()),
            options,
        )
        .await;
        App::new(session, notifier)
    }

    #[tokio::test]
    async fn test_full_attempt() {
        let api = OfflineQuizApi::new(quiz());
        let mut app = app(&api).await;
        app.start_quiz();

        app.activate_option();
        assert!(!app.confirm_answer());
        assert_eq!(app.current_feedback(), None);

        app.select_next_option();
        app.activate_option();
        assert!(app.confirm_answer());
        assert_eq!(app.current_feedback(), Some(false));

        app.finish(&api).await.unwrap();
        assert_eq!(app.state, AppState::Result);

        let outcome = app.outcome().unwrap();
        assert_eq!(outcome.total_points(), 4);
        assert_eq!(outcome.result.score, 2.0);

        let review = app.review();
        assert_eq!(review.len(), 2);
        assert!(review[0].is_correct);
        assert_eq!(review[1].user_answer, "Faux");
        assert_eq!(review[1].correct_answer, "Vrai");
    }

    #[tokio::test]
    async fn test_restart_returns_to_welcome() {
        let api = OfflineQuizApi::new(quiz());
        let mut app = app(&api).await;
        app.start_quiz();
        app.activate_option();
        app.next_question();
        assert_eq!(app.session().ledger().answered_count(), 1);

        app.restart();
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.session().ledger().answered_count(), 0);
        assert_eq!(app.current_question_number(), 1);
    }

    #[tokio::test]
    async fn test_expiry_keeps_the_unconfirmed_pick() {
        let api = OfflineQuizApi::new(quiz());
        let options = SessionOptions {
            question_seconds: 3,
            ..SessionOptions::default()
        };
        let mut app = app_with(&api, options).await;
        app.start_quiz();
        let first = app.current_question().unwrap().id.clone();

        app.activate_option();
        app.tick();
        app.tick();
        assert_eq!(app.session().ledger().answered_count(), 0);
        app.tick();

        assert_eq!(app.current_question_number(), 2);
        assert_eq!(app.session().ledger().get(&first), Some(&AnswerValue::single("v")));
        assert_eq!(app.session().record().answers.len(), 1);
    }
}
