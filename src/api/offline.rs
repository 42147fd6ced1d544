use log::info;

use crate::evaluator;
use crate::models::Quiz;

use super::messages::{ResumePayload, SubmitRequest, SubmitResult, POINTS_PER_QUESTION};
use super::{ApiError, QuizApi};

/// Serves one quiz loaded from disk and scores submissions with the local
/// evaluator. Never authenticated, so there is no remote resume record.
#[derive(Debug, Clone)]
pub struct OfflineQuizApi {
    quiz: Quiz,
}

impl OfflineQuizApi {
    pub fn new(quiz: Quiz) -> Self {
        Self { quiz }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Scores a submission the way the backend reports it.
    pub fn score(&self, request: &SubmitRequest) -> SubmitResult {
        let correct = request
            .answers
            .iter()
            .filter(|(id, answer)| {
                self.quiz
                    .question(id)
                    .is_some_and(|question| evaluator::is_correct(question, answer))
            })
            .count() as u32;

        SubmitResult {
            score: f64::from(correct * POINTS_PER_QUESTION),
            correct_answers: Some(correct),
            total_questions: Some(request.answers.len() as u32),
            time_spent: Some(request.time_spent),
            ..SubmitResult::default()
        }
    }
}

impl QuizApi for OfflineQuizApi {
    fn is_authenticated(&self) -> bool {
        false
    }

    async fn fetch_quiz(&self, quiz_id: &str) -> Result<Quiz, ApiError> {
        if quiz_id != self.quiz.id {
            return Err(ApiError::NotFound(quiz_id.to_string()));
        }
        Ok(self.quiz.clone())
    }

    async fn fetch_resume(&self, _quiz_id: &str) -> Result<Option<ResumePayload>, ApiError> {
        Ok(None)
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResult, ApiError> {
        if request.quiz_id != self.quiz.id {
            return Err(ApiError::NotFound(request.quiz_id.clone()));
        }
        let result = self.score(request);
        info!(
            "Scored quiz {} offline: {} points",
            request.quiz_id, result.score
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{AnswerOption, AnswerValue, Question, QuestionType};

    fn quiz() -> Quiz {
        Quiz {
            id: "9".to_string(),
            questions: vec![
                Question::new("1", QuestionType::TrueFalse, "?").with_options(vec![
                    AnswerOption::new("t", "Vrai", true),
                    AnswerOption::new("f", "Faux", false),
                ]),
                Question::new("2", QuestionType::FillInBlank, "?")
                    .with_options(vec![AnswerOption::new("a", "clavier", true)]),
            ],
            ..Quiz::default()
        }
    }

    #[tokio::test]
    async fn test_offline_scoring() {
        let api = OfflineQuizApi::new(quiz());
        let request = SubmitRequest {
            quiz_id: "9".to_string(),
            answers: BTreeMap::from([
                ("1".to_string(), AnswerValue::single("t")),
                ("2".to_string(), AnswerValue::single("souris")),
            ]),
            time_spent: 20,
        };

        let result = api.submit(&request).await.unwrap();
        assert_eq!(result.correct_answers, Some(1));
        assert_eq!(result.score, 2.0);
        assert_eq!(result.total_questions, Some(2));
    }

    #[tokio::test]
    async fn test_unknown_quiz() {
        let api = OfflineQuizApi::new(quiz());
        assert!(matches!(api.fetch_quiz("10").await, Err(ApiError::NotFound(_))));
        assert!(api.fetch_resume("9").await.unwrap().is_none());
    }
}
