use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerValue, Quiz};

/// Persisted form of an in-progress session, one per quiz id.
///
/// Stored as `{questionIds, answers, currentIndex, timeSpent, lastUpdated}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub question_ids: Vec<String>,
    #[serde(default)]
    pub answers: BTreeMap<String, AnswerValue>,
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(question_ids: Vec<String>) -> Self {
        Self {
            question_ids,
            answers: BTreeMap::new(),
            current_index: 0,
            time_spent: 0,
            last_updated: Utc::now(),
        }
    }

    /// A record is resumable only if every question id it references still
    /// exists in the quiz, without duplicates.
    pub fn resolves_against(&self, quiz: &Quiz) -> bool {
        if self.question_ids.is_empty() {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.question_ids.len());
        self.question_ids
            .iter()
            .all(|id| seen.insert(id.as_str()) && quiz.contains(id))
    }

    /// Drops answers for questions outside the selection.
    pub fn retain_selected_answers(&mut self) {
        let selected: HashSet<&String> = self.question_ids.iter().collect();
        self.answers.retain(|id, _| selected.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionType};

    fn quiz_with(ids: &[&str]) -> Quiz {
        Quiz {
            id: "1".to_string(),
            questions: ids
                .iter()
                .map(|id| Question::new(*id, QuestionType::MultipleChoice, "?"))
                .collect(),
            ..Quiz::default()
        }
    }

    #[test]
    fn test_stale_question_ids_do_not_resolve() {
        let quiz = quiz_with(&["a", "b", "c"]);
        assert!(SessionRecord::new(vec!["a".into(), "c".into()]).resolves_against(&quiz));
        assert!(!SessionRecord::new(vec!["a".into(), "z".into()]).resolves_against(&quiz));
        assert!(!SessionRecord::new(vec!["a".into(), "a".into()]).resolves_against(&quiz));
        assert!(!SessionRecord::new(Vec::new()).resolves_against(&quiz));
    }

    #[test]
    fn test_storage_shape() {
        let mut record = SessionRecord::new(vec!["q1".into()]);
        record.answers.insert("q1".into(), AnswerValue::many(["3"]));
        record.time_spent = 12;

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["questionIds"][0], "q1");
        assert_eq!(json["answers"]["q1"][0], "3");
        assert_eq!(json["currentIndex"], 0);
        assert_eq!(json["timeSpent"], 12);
        assert!(json["lastUpdated"].is_string());
    }
}
