use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Difficulty, Quiz};

/// How many questions a session draws, per difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionPolicy {
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl QuestionPolicy {
    pub const DEFAULT_COUNT: usize = 5;

    pub fn flat(count: usize) -> Self {
        Self {
            beginner: count,
            intermediate: count,
            advanced: count,
        }
    }

    pub fn count_for(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Beginner => self.beginner,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

impl Default for QuestionPolicy {
    fn default() -> Self {
        Self::flat(Self::DEFAULT_COUNT)
    }
}

/// Draws a random subset of the quiz's question ids for a fresh session.
///
/// A quiz with fewer questions than the policy count yields all of them.
pub fn select_questions(quiz: &Quiz, difficulty: Difficulty, policy: &QuestionPolicy) -> Vec<String> {
    select_questions_with(quiz, difficulty, policy, &mut rand::thread_rng())
}

pub fn select_questions_with<R: Rng + ?Sized>(
    quiz: &Quiz,
    difficulty: Difficulty,
    policy: &QuestionPolicy,
    rng: &mut R,
) -> Vec<String> {
    let mut ids: Vec<String> = quiz.questions.iter().map(|q| q.id.clone()).collect();
    ids.shuffle(rng);
    ids.truncate(policy.count_for(difficulty));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::models::{Question, QuestionType};

    fn quiz(n: usize) -> Quiz {
        Quiz {
            id: "quiz".to_string(),
            questions: (0..n)
                .map(|i| Question::new(i.to_string(), QuestionType::MultipleChoice, "?"))
                .collect(),
            ..Quiz::default()
        }
    }

    #[test]
    fn test_selects_policy_count_of_distinct_ids() {
        let quiz = quiz(12);
        for _ in 0..20 {
            let ids = select_questions(&quiz, Difficulty::Beginner, &QuestionPolicy::default());
            let unique: HashSet<&String> = ids.iter().collect();
            assert_eq!(ids.len(), 5);
            assert_eq!(unique.len(), 5);
            assert!(ids.iter().all(|id| quiz.contains(id)));
        }
    }

    #[test]
    fn test_shortfall_selects_everything() {
        let quiz = quiz(3);
        let mut ids = select_questions(&quiz, Difficulty::Advanced, &QuestionPolicy::default());
        ids.sort();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_policy_per_level() {
        let policy = QuestionPolicy {
            beginner: 2,
            intermediate: 4,
            advanced: 6,
        };
        let quiz = quiz(10);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_questions_with(&quiz, Difficulty::Beginner, &policy, &mut rng).len(), 2);
        assert_eq!(select_questions_with(&quiz, Difficulty::Intermediate, &policy, &mut rng).len(), 4);
        assert_eq!(select_questions_with(&quiz, Difficulty::Advanced, &policy, &mut rng).len(), 6);
    }
}
