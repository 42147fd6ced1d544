//! Answer evaluation.
//!
//! Decides whether a candidate answer is correct for a question, using one
//! rule per question type, and renders answers for the review screen. The
//! server does the authoritative scoring; this module drives live feedback
//! and the offline backend.

mod format;
mod rules;
mod text;

pub use format::{format_correct_answer, format_user_answer, NO_ANSWER, NO_CORRECT_ANSWER};
pub use rules::{blank_groups, match_targets, matching_lefts, reorder_canonical};
pub use text::normalize_text;

use crate::models::{AnswerValue, Question, QuestionType};

/// Returns true if `candidate` is a correct answer to `question`.
///
/// A question that already carries a server verdict of `true` is accepted
/// without re-evaluating it locally. A question with no way to determine
/// correctness evaluates to `false`.
pub fn is_correct(question: &Question, candidate: &AnswerValue) -> bool {
    if question.server_verdict == Some(true) {
        return true;
    }

    match question.kind {
        QuestionType::FillInBlank => rules::fill_in_blank(question, candidate),
        QuestionType::Matching => rules::matching(question, candidate),
        QuestionType::Reorder => rules::reorder(question, candidate),
        QuestionType::Flashcard => rules::flashcard(question, candidate),
        QuestionType::WordBank => rules::word_bank(question, candidate),
        QuestionType::MultipleChoice
        | QuestionType::TrueFalse
        | QuestionType::Audio
        | QuestionType::Other => rules::choice(question, candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;

    #[test]
    fn test_server_verdict_short_circuits() {
        let mut question = Question::new("1", QuestionType::MultipleChoice, "?")
            .with_options(vec![AnswerOption::new("1", "A", true)]);
        assert!(!is_correct(&question, &AnswerValue::single("2")));

        question.server_verdict = Some(true);
        assert!(is_correct(&question, &AnswerValue::single("2")));

        question.server_verdict = Some(false);
        assert!(!is_correct(&question, &AnswerValue::single("2")));
        assert!(is_correct(&question, &AnswerValue::single("1")));
    }
}
