use serde::{Deserialize, Serialize};

use super::ids::{
    deserialize_count, deserialize_flag, deserialize_id, deserialize_id_list,
    deserialize_optional_flag, deserialize_optional_id, deserialize_optional_int,
    deserialize_or_default, deserialize_text,
};

/// Difficulty level of a quiz (`niveau` on the backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "intermediate" | "intermédiaire" | "intermediaire" => Difficulty::Intermediate,
            "advanced" | "avancé" | "avance" | "expert" => Difficulty::Advanced,
            _ => Difficulty::Beginner,
        }
    }
}

impl From<Difficulty> for String {
    fn from(level: Difficulty) -> Self {
        level.label().to_string()
    }
}

/// Kind of question, which selects the correctness rule.
///
/// The backend labels are French (`"choix multiples"`, `"correspondance"`...);
/// English snake_case aliases are accepted as well. Unknown labels fall back
/// to [`QuestionType::Other`], which is scored like a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    TrueFalse,
    FillInBlank,
    Matching,
    Flashcard,
    Reorder,
    WordBank,
    Audio,
    Other,
}

impl QuestionType {
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "choix multiples",
            QuestionType::TrueFalse => "vrai/faux",
            QuestionType::FillInBlank => "remplir le champ vide",
            QuestionType::Matching => "correspondance",
            QuestionType::Flashcard => "carte flash",
            QuestionType::Reorder => "rearrangement",
            QuestionType::WordBank => "banque de mots",
            QuestionType::Audio => "question audio",
            QuestionType::Other => "autre",
        }
    }
}

impl From<String> for QuestionType {
    fn from(raw: String) -> Self {
        let label = raw.trim().to_lowercase().replace(['_', '-'], " ");
        match label.as_str() {
            "choix multiples" | "multiple choice" | "qcm" => QuestionType::MultipleChoice,
            "vrai/faux" | "vrai faux" | "true/false" | "true false" => QuestionType::TrueFalse,
            "remplir le champ vide" | "fill in blank" | "fill blank" => QuestionType::FillInBlank,
            "correspondance" | "matching" => QuestionType::Matching,
            "carte flash" | "flashcard" => QuestionType::Flashcard,
            "rearrangement" | "réarrangement" | "reorder" | "rearrange" => QuestionType::Reorder,
            "banque de mots" | "word bank" => QuestionType::WordBank,
            "question audio" | "audio" | "audio question" => QuestionType::Audio,
            _ => QuestionType::Other,
        }
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> Self {
        kind.label().to_string()
    }
}

/// One selectable answer of a question.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerOption {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: String,
    #[serde(default, alias = "isCorrect", deserialize_with = "deserialize_flag")]
    pub is_correct: bool,
    /// Id or literal text of the right-hand item this (left) item pairs with.
    #[serde(default, alias = "matchPair", deserialize_with = "deserialize_optional_id")]
    pub match_pair: Option<String>,
    /// Canonical position for reorder questions.
    #[serde(default, deserialize_with = "deserialize_optional_int")]
    pub position: Option<i64>,
    /// Blank this option belongs to, for multi-blank fill-in questions.
    #[serde(default, alias = "bankGroup", deserialize_with = "deserialize_optional_id")]
    pub bank_group: Option<String>,
    #[serde(default, alias = "flashcardBack", alias = "flashcard_back")]
    pub back: Option<String>,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct,
            ..Self::default()
        }
    }

    pub fn with_match_pair(mut self, pair: impl Into<String>) -> Self {
        self.match_pair = Some(pair.into());
        self
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_bank_group(mut self, group: impl Into<String>) -> Self {
        self.bank_group = Some(group.into());
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_or_default")]
    pub kind: QuestionType,
    #[serde(default, alias = "question", alias = "prompt", deserialize_with = "deserialize_text")]
    pub text: String,
    #[serde(
        default,
        alias = "answers",
        alias = "reponses",
        deserialize_with = "deserialize_or_default"
    )]
    pub options: Vec<AnswerOption>,
    #[serde(default, alias = "correctAnswers", deserialize_with = "deserialize_id_list")]
    pub correct_answers: Vec<String>,
    #[serde(default, alias = "mediaUrl", alias = "audio_url", alias = "video_url")]
    pub media_url: Option<String>,
    /// Verdict already confirmed by the server (`isCorrect` on the payload).
    #[serde(
        default,
        rename = "isCorrect",
        alias = "is_correct",
        deserialize_with = "deserialize_optional_flag"
    )]
    pub server_verdict: Option<bool>,
}

impl Question {
    pub fn new(id: impl Into<String>, kind: QuestionType, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: Vec<AnswerOption>) -> Self {
        self.options = options;
        self
    }

    pub fn option(&self, id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.options.iter().filter(|option| option.is_correct)
    }

    /// Resolves an option id to its display text, falling back to the id itself.
    pub fn option_text<'a>(&'a self, id: &'a str) -> &'a str {
        self.option(id).map(|option| option.text.as_str()).unwrap_or(id)
    }
}

/// A quiz as served by `GET /quiz/{id}`. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Quiz {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "titre", deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(
        default,
        alias = "niveau",
        alias = "level",
        deserialize_with = "deserialize_or_default"
    )]
    pub difficulty: Difficulty,
    /// Nominal duration in seconds.
    #[serde(default, alias = "duree", deserialize_with = "deserialize_count")]
    pub duration: u32,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.question(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_payload_normalization() {
        let json = r#"{
            "id": 12,
            "titre": "Bureautique",
            "niveau": "intermédiaire",
            "questions": [{
                "id": 7,
                "type": "correspondance",
                "text": "Associez",
                "answers": [
                    {"id": 1, "text": "Word", "is_correct": 1, "match_pair": 2},
                    {"id": 2, "text": "Traitement de texte", "is_correct": 0}
                ],
                "correctAnswers": [1]
            }]
        }"#;

        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.id, "12");
        assert_eq!(quiz.difficulty, Difficulty::Intermediate);

        let question = &quiz.questions[0];
        assert_eq!(question.kind, QuestionType::Matching);
        assert_eq!(question.options[0].match_pair.as_deref(), Some("2"));
        assert!(question.options[0].is_correct);
        assert!(!question.options[1].is_correct);
        assert_eq!(question.correct_answers, vec!["1".to_string()]);
        assert_eq!(question.server_verdict, None);
    }

    #[test]
    fn test_nulls_and_numeric_strings_are_tolerated() {
        let quiz = crate::api::quiz_from_body(
            r#"{"data": {"id": 4, "titre": null, "niveau": null, "duree": "600", "questions": [
                {"id": 1, "type": null, "text": null, "answers": [
                    {"id": 10, "text": null, "position": "2"},
                    {"id": 11, "text": "Ouvrir", "position": "1"}
                ]}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(quiz.title, "");
        assert_eq!(quiz.difficulty, Difficulty::Beginner);
        assert_eq!(quiz.duration, 600);

        let question = &quiz.questions[0];
        assert_eq!(question.kind, QuestionType::MultipleChoice);
        assert_eq!(question.text, "");
        assert_eq!(question.options[0].text, "");
        assert_eq!(question.options[0].position, Some(2));
        assert_eq!(question.options[1].position, Some(1));
    }

    #[test]
    fn test_unknown_question_type() {
        assert_eq!(QuestionType::from("sondage".to_string()), QuestionType::Other);
        assert_eq!(QuestionType::from("word_bank".to_string()), QuestionType::WordBank);
        assert_eq!(QuestionType::from("Vrai/Faux".to_string()), QuestionType::TrueFalse);
    }
}
