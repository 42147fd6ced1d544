use crate::models::{AnswerValue, Question, QuestionType};

use super::rules;

pub const NO_ANSWER: &str = "No answer";
pub const NO_CORRECT_ANSWER: &str = "No correct answer defined";

/// Human-readable canonical answer, for the review screen.
pub fn format_correct_answer(question: &Question) -> String {
    let rendered = match question.kind {
        QuestionType::FillInBlank => {
            if rules::blank_groups(question).is_empty() {
                join(question.correct_options().map(|o| o.text.clone()), ", ")
            } else {
                join(
                    question.correct_options().map(|o| match &o.bank_group {
                        Some(group) => format!("{}: {}", group, o.text),
                        None => o.text.clone(),
                    }),
                    ", ",
                )
            }
        }
        QuestionType::Matching => join(
            rules::expected_pairs(question)
                .into_iter()
                .map(|(left, right)| format!("{} → {}", question.option_text(&left), right)),
            "; ",
        ),
        QuestionType::Reorder => numbered(
            rules::reorder_canonical(question)
                .into_iter()
                .map(|o| o.text.clone()),
        ),
        QuestionType::Flashcard => question
            .correct_options()
            .next()
            .map(|o| o.text.clone())
            .unwrap_or_default(),
        QuestionType::WordBank => join(question.correct_options().map(|o| o.text.clone()), ", "),
        QuestionType::MultipleChoice
        | QuestionType::TrueFalse
        | QuestionType::Audio
        | QuestionType::Other => {
            let correct = rules::correct_ids(question);
            let mut texts: Vec<String> = question
                .options
                .iter()
                .filter(|o| correct.contains(o.id.as_str()))
                .map(|o| o.text.clone())
                .collect();
            if texts.is_empty() {
                texts = question
                    .correct_answers
                    .iter()
                    .map(|id| question.option_text(id).to_string())
                    .collect();
            }
            texts.join(", ")
        }
    };

    if rendered.is_empty() {
        NO_CORRECT_ANSWER.to_string()
    } else {
        rendered
    }
}

/// Human-readable rendering of what the user answered.
pub fn format_user_answer(question: &Question, candidate: Option<&AnswerValue>) -> String {
    let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
        return NO_ANSWER.to_string();
    };

    match (question.kind, candidate) {
        (QuestionType::FillInBlank, AnswerValue::Pairs(pairs)) => join(
            pairs.iter().map(|(group, value)| format!("{}: {}", group, value.trim())),
            ", ",
        ),
        (QuestionType::FillInBlank, _) => join(
            candidate.values().into_iter().map(|v| v.trim().to_string()),
            ", ",
        ),
        (QuestionType::Matching, _) => match rules::given_pairs(question, candidate) {
            Some(pairs) => join(
                pairs
                    .into_iter()
                    .map(|(left, right)| format!("{} → {}", question.option_text(&left), right)),
                "; ",
            ),
            None => candidate.values().join(", "),
        },
        (QuestionType::Reorder, _) => numbered(
            candidate
                .values()
                .into_iter()
                .map(|id| question.option_text(id).to_string()),
        ),
        _ => join(
            candidate
                .values()
                .into_iter()
                .map(|id| question.option_text(id).to_string()),
            ", ",
        ),
    }
}

fn join<I: Iterator<Item = String>>(items: I, separator: &str) -> String {
    items.collect::<Vec<_>>().join(separator)
}

fn numbered<I: Iterator<Item = String>>(items: I) -> String {
    join(
        items
            .enumerate()
            .map(|(i, text)| format!("{}. {}", i + 1, text)),
        ", ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;

    #[test]
    fn test_matching_rendering() {
        let q = Question::new("q", QuestionType::Matching, "?").with_options(vec![
            AnswerOption::new("1", "Word", false).with_match_pair("3"),
            AnswerOption::new("2", "Excel", false).with_match_pair("4"),
            AnswerOption::new("3", "Texte", false),
            AnswerOption::new("4", "Tableur", false),
        ]);

        assert_eq!(format_correct_answer(&q), "Word → Texte; Excel → Tableur");
        assert_eq!(
            format_user_answer(&q, Some(&AnswerValue::many(["1-4", "2-3"]))),
            "Word → Tableur; Excel → Texte"
        );
    }

    #[test]
    fn test_reorder_rendering() {
        let q = Question::new("q", QuestionType::Reorder, "?").with_options(vec![
            AnswerOption::new("b", "Enregistrer", false).with_position(2),
            AnswerOption::new("a", "Ouvrir", false).with_position(1),
        ]);

        assert_eq!(format_correct_answer(&q), "1. Ouvrir, 2. Enregistrer");
        assert_eq!(
            format_user_answer(&q, Some(&AnswerValue::many(["b", "a"]))),
            "1. Enregistrer, 2. Ouvrir"
        );
    }

    #[test]
    fn test_missing_data_renders_softly() {
        let q = Question::new("q", QuestionType::MultipleChoice, "?")
            .with_options(vec![AnswerOption::new("1", "A", false)]);

        assert_eq!(format_correct_answer(&q), NO_CORRECT_ANSWER);
        assert_eq!(format_user_answer(&q, None), NO_ANSWER);
        assert_eq!(format_user_answer(&q, Some(&AnswerValue::many(Vec::<String>::new()))), NO_ANSWER);
        assert_eq!(format_user_answer(&q, Some(&AnswerValue::single("1"))), "A");
    }
}
