use log::{info, warn};

use crate::api::{ApiError, QuizApi, SubmitRequest, SubmitResult, POINTS_PER_QUESTION};
use crate::notify::Notifier;

use super::ledger::Ledger;
use super::store::{KeyValueStore, SessionStore};

/// What a successful submission hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: SubmitResult,
    pub question_count: usize,
    pub points_per_question: u32,
}

impl Outcome {
    /// Display total: a fixed number of points per selected question.
    pub fn total_points(&self) -> u32 {
        self.question_count as u32 * self.points_per_question
    }
}

/// Submits the ledger for a quiz.
///
/// On success the stored session is cleared. On failure a notice is raised,
/// the stored session is left untouched so the attempt stays resumable, and
/// the error is returned without retrying.
pub async fn submit_answers<A, S>(
    api: &A,
    store: &SessionStore<S>,
    notifier: &Notifier,
    quiz_id: &str,
    ledger: &Ledger,
    time_spent: u64,
    selected: &[String],
) -> Result<Outcome, ApiError>
where
    A: QuizApi,
    S: KeyValueStore,
{
    let request = SubmitRequest {
        quiz_id: quiz_id.to_string(),
        answers: ledger
            .answers()
            .iter()
            .filter(|(_, answer)| !answer.is_empty())
            .map(|(id, answer)| (id.clone(), answer.clone()))
            .collect(),
        time_spent,
    };

    match api.submit(&request).await {
        Ok(result) => {
            info!(
                "Submitted quiz {} ({} answers, {}s): score {}",
                quiz_id,
                request.answers.len(),
                time_spent,
                result.score
            );
            if let Err(e) = store.clear(quiz_id) {
                warn!("Failed to clear stored session for quiz {}: {}", quiz_id, e);
            }
            Ok(Outcome {
                result,
                question_count: selected.len(),
                points_per_question: POINTS_PER_QUESTION,
            })
        }
        Err(e) => {
            warn!("Submission of quiz {} failed: {}", quiz_id, e);
            notifier.error(format!("Could not submit your answers: {}", e));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_points() {
        let outcome = Outcome {
            result: SubmitResult::default(),
            question_count: 5,
            points_per_question: POINTS_PER_QUESTION,
        };
        assert_eq!(outcome.total_points(), 10);
    }
}
