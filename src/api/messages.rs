//! Wire payloads exchanged with the quiz backend.
//!
//! All bodies are JSON. Request bodies use camelCase keys; responses are
//! accepted under the field-name variants the backend has used over time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{AnswerValue, Quiz, SessionRecord, deserialize_id_list};

/// Fixed display points per question.
pub const POINTS_PER_QUESTION: u32 = 2;

/// Body of the result submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub quiz_id: String,
    pub answers: BTreeMap<String, AnswerValue>,
    pub time_spent: u64,
}

/// Result payload returned by the backend after a submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    #[serde(default)]
    pub score: f64,
    #[serde(default, alias = "correct_answers", alias = "correctAnswersCount")]
    pub correct_answers: Option<u32>,
    #[serde(default, alias = "total_questions")]
    pub total_questions: Option<u32>,
    #[serde(default, alias = "time_spent")]
    pub time_spent: Option<u64>,
    /// Anything else the backend sent, kept for the caller.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// In-progress participation stored server-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResumePayload {
    #[serde(
        default,
        alias = "questionIds",
        alias = "question_ids",
        deserialize_with = "deserialize_id_list"
    )]
    pub question_ids: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_answer_map")]
    pub answers: BTreeMap<String, AnswerValue>,
    #[serde(default, alias = "currentIndex", alias = "current_index", alias = "currentQuestionIndex")]
    pub current_index: Option<usize>,
    #[serde(default, alias = "timeSpent", alias = "time_spent")]
    pub time_spent: Option<u64>,
}

impl ResumePayload {
    /// Parses a resume response body. `null`, empty objects, `{"data": null}`
    /// and payloads without question ids all mean "nothing to resume".
    pub fn from_body(body: &str) -> Result<Option<Self>, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        let mut value: Value = serde_json::from_str(body)?;
        if let Some(inner) = value.get_mut("data") {
            value = inner.take();
        }
        if value.is_null() || value.as_object().is_some_and(Map::is_empty) {
            return Ok(None);
        }

        let payload: ResumePayload = serde_json::from_value(value)?;
        if payload.question_ids.is_empty() {
            return Ok(None);
        }
        Ok(Some(payload))
    }

    pub fn into_record(self) -> SessionRecord {
        let mut record = SessionRecord::new(self.question_ids);
        record.answers = self.answers;
        record.current_index = self.current_index.unwrap_or(0);
        record.time_spent = self.time_spent.unwrap_or(0);
        record
    }
}

/// Unwraps `{ "data": quiz }` / `{ "quiz": quiz }` envelopes.
pub fn quiz_from_body(body: &str) -> Result<Quiz, serde_json::Error> {
    let mut value: Value = serde_json::from_str(body)?;
    for envelope in ["data", "quiz"] {
        if value.get(envelope).is_some_and(Value::is_object) {
            if let Some(inner) = value.get_mut(envelope) {
                value = inner.take();
            }
            break;
        }
    }
    serde_json::from_value(value)
}

/// Answer maps may carry `null` entries for unanswered questions; those are dropped.
fn deserialize_answer_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, AnswerValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .iter()
        .filter_map(|(id, value)| Some((id.clone(), AnswerValue::from_json(value)?)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_resume_bodies() {
        for body in ["", "null", "{}", r#"{"data": null}"#, r#"{"questionIds": []}"#] {
            assert_eq!(ResumePayload::from_body(body).unwrap(), None, "body: {}", body);
        }
        assert!(ResumePayload::from_body("<html>").is_err());
    }

    #[test]
    fn test_resume_field_variants() {
        let body = r#"{"data": {"question_ids": [4, 9], "answers": {"4": [1], "9": null}, "current_index": 1, "timeSpent": 33}}"#;
        let payload = ResumePayload::from_body(body).unwrap().unwrap();

        assert_eq!(payload.question_ids, vec!["4", "9"]);
        assert_eq!(payload.answers.len(), 1);
        assert_eq!(payload.answers["4"], AnswerValue::many(["1"]));

        let record = payload.into_record();
        assert_eq!(record.current_index, 1);
        assert_eq!(record.time_spent, 33);
    }

    #[test]
    fn test_submit_request_serialization() {
        let request = SubmitRequest {
            quiz_id: "5".to_string(),
            answers: BTreeMap::from([("1".to_string(), AnswerValue::single("2"))]),
            time_spent: 61,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"quizId":"5","answers":{"1":"2"},"timeSpent":61}"#);
    }

    #[test]
    fn test_quiz_envelope() {
        let quiz = quiz_from_body(r#"{"data": {"id": 1, "questions": []}}"#).unwrap();
        assert_eq!(quiz.id, "1");
        let quiz = quiz_from_body(r#"{"quiz": {"id": "2"}}"#).unwrap();
        assert_eq!(quiz.id, "2");
        let quiz = quiz_from_body(r#"{"id": 3}"#).unwrap();
        assert_eq!(quiz.id, "3");
    }

    #[test]
    fn test_submit_result_keeps_extra_fields() {
        let result: SubmitResult =
            serde_json::from_str(r#"{"score": 8, "correctAnswers": 4, "rank": 2}"#).unwrap();
        assert_eq!(result.score, 8.0);
        assert_eq!(result.correct_answers, Some(4));
        assert_eq!(result.extra["rank"], 2);
    }
}
