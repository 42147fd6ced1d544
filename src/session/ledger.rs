use std::collections::BTreeMap;

use crate::models::AnswerValue;

/// Answers given so far, keyed by question id. Re-answering replaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    answers: BTreeMap<String, AnswerValue>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_answers(answers: BTreeMap<String, AnswerValue>) -> Self {
        Self { answers }
    }

    pub fn submit(&mut self, question_id: impl Into<String>, answer: AnswerValue) {
        self.answers.insert(question_id.into(), answer);
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn answers(&self) -> &BTreeMap<String, AnswerValue> {
        &self.answers
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.get(question_id).is_some_and(|answer| !answer.is_empty())
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|answer| !answer.is_empty()).count()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }
}
