mod answer;
mod ids;
mod quiz;
mod record;

pub use answer::AnswerValue;
pub use quiz::{AnswerOption, Difficulty, Question, QuestionType, Quiz};
pub use record::SessionRecord;

pub(crate) use ids::deserialize_id_list;

/// Screen the terminal front-end is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
