//! The answer being composed on the quiz screen, before it goes to the ledger.

use crate::evaluator::{blank_groups, match_targets, matching_lefts};
use crate::models::{AnswerValue, Question, QuestionType};

#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    /// No question to answer.
    Empty,
    /// Pick one (`multiple == false`) or several options.
    Choice {
        cursor: usize,
        selected: Vec<bool>,
        multiple: bool,
    },
    /// Options picked in order; `order` holds option indices.
    Order { cursor: usize, order: Vec<usize> },
    /// One right-hand target per left item.
    Matching {
        cursor: usize,
        lefts: Vec<String>,
        targets: Vec<String>,
        picks: Vec<Option<usize>>,
    },
    /// Typed text per blank. `groups` is empty for positional blanks.
    Blanks {
        cursor: usize,
        groups: Vec<String>,
        values: Vec<String>,
    },
}

impl Draft {
    /// Starts a draft for `question`, pre-filled from a previous answer.
    pub fn for_question(question: Option<&Question>, existing: Option<&AnswerValue>) -> Self {
        let Some(question) = question else {
            return Draft::Empty;
        };

        match question.kind {
            QuestionType::Reorder => {
                let order = existing
                    .map(|answer| {
                        answer
                            .values()
                            .into_iter()
                            .filter_map(|id| question.options.iter().position(|o| o.id == id))
                            .collect()
                    })
                    .unwrap_or_default();
                Draft::Order { cursor: 0, order }
            }
            QuestionType::Matching => {
                let lefts: Vec<String> = matching_lefts(question)
                    .into_iter()
                    .map(|o| o.id.clone())
                    .collect();
                let targets = match_targets(question);
                let picks = lefts
                    .iter()
                    .map(|left| match existing {
                        Some(AnswerValue::Pairs(pairs)) => pairs
                            .get(left)
                            .and_then(|right| targets.iter().position(|t| t == right)),
                        _ => None,
                    })
                    .collect();
                Draft::Matching {
                    cursor: 0,
                    lefts,
                    targets,
                    picks,
                }
            }
            QuestionType::FillInBlank => {
                let groups = blank_groups(question);
                let count = if groups.is_empty() {
                    question.correct_options().count().max(1)
                } else {
                    groups.len()
                };
                let values = match existing {
                    Some(AnswerValue::Pairs(pairs)) => groups
                        .iter()
                        .map(|g| pairs.get(g).cloned().unwrap_or_default())
                        .collect(),
                    Some(answer) => {
                        let given = answer.values();
                        (0..count)
                            .map(|i| given.get(i).map(|v| v.to_string()).unwrap_or_default())
                            .collect()
                    }
                    None => vec![String::new(); count],
                };
                Draft::Blanks {
                    cursor: 0,
                    groups,
                    values,
                }
            }
            QuestionType::TrueFalse | QuestionType::Flashcard => {
                Self::choice(question, existing, false)
            }
            QuestionType::MultipleChoice
            | QuestionType::WordBank
            | QuestionType::Audio
            | QuestionType::Other => Self::choice(question, existing, true),
        }
    }

    fn choice(question: &Question, existing: Option<&AnswerValue>, multiple: bool) -> Self {
        let chosen = existing.map(|a| a.values()).unwrap_or_default();
        Draft::Choice {
            cursor: 0,
            selected: question
                .options
                .iter()
                .map(|o| chosen.contains(&o.id.as_str()))
                .collect(),
            multiple,
        }
    }

    /// Whether typed characters belong to the draft rather than to shortcuts.
    pub fn accepts_text(&self) -> bool {
        matches!(self, Draft::Blanks { .. })
    }

    pub fn cursor(&self) -> usize {
        match self {
            Draft::Empty => 0,
            Draft::Choice { cursor, .. }
            | Draft::Order { cursor, .. }
            | Draft::Matching { cursor, .. }
            | Draft::Blanks { cursor, .. } => *cursor,
        }
    }

    fn rows(&self, question: &Question) -> usize {
        match self {
            Draft::Empty => 0,
            Draft::Choice { .. } | Draft::Order { .. } => question.options.len(),
            Draft::Matching { lefts, .. } => lefts.len(),
            Draft::Blanks { values, .. } => values.len(),
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        match self {
            Draft::Empty => None,
            Draft::Choice { cursor, .. }
            | Draft::Order { cursor, .. }
            | Draft::Matching { cursor, .. }
            | Draft::Blanks { cursor, .. } => Some(cursor),
        }
    }

    pub fn move_down(&mut self, question: &Question) {
        let rows = self.rows(question);
        if let Some(cursor) = self.cursor_mut() {
            if rows > 0 {
                *cursor = (*cursor + 1) % rows;
            }
        }
    }

    pub fn move_up(&mut self, question: &Question) {
        let rows = self.rows(question);
        if let Some(cursor) = self.cursor_mut() {
            if rows > 0 {
                *cursor = (*cursor + rows - 1) % rows;
            }
        }
    }

    /// Toggles the option under the cursor, or appends/removes it from the order.
    pub fn activate(&mut self) {
        if matches!(self, Draft::Matching { .. }) {
            self.cycle(true);
            return;
        }
        match self {
            Draft::Choice {
                cursor,
                selected,
                multiple,
            } => {
                if *cursor >= selected.len() {
                    return;
                }
                if *multiple {
                    selected[*cursor] = !selected[*cursor];
                } else {
                    let was = selected[*cursor];
                    selected.iter_mut().for_each(|s| *s = false);
                    selected[*cursor] = !was;
                }
            }
            Draft::Order { cursor, order } => {
                if let Some(pos) = order.iter().position(|i| *i == *cursor) {
                    order.remove(pos);
                } else {
                    order.push(*cursor);
                }
            }
            Draft::Empty | Draft::Matching { .. } | Draft::Blanks { .. } => {}
        }
    }

    /// Steps the matching target of the current left item.
    pub fn cycle(&mut self, forward: bool) {
        if let Draft::Matching {
            cursor,
            targets,
            picks,
            ..
        } = self
        {
            let Some(pick) = picks.get_mut(*cursor) else {
                return;
            };
            let n = targets.len();
            if n == 0 {
                return;
            }
            *pick = match (*pick, forward) {
                (None, true) => Some(0),
                (None, false) => Some(n - 1),
                (Some(i), true) if i + 1 < n => Some(i + 1),
                (Some(i), false) if i > 0 => Some(i - 1),
                _ => None,
            };
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Draft::Blanks { cursor, values, .. } = self {
            if let Some(value) = values.get_mut(*cursor) {
                value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Draft::Blanks { cursor, values, .. } = self {
            if let Some(value) = values.get_mut(*cursor) {
                value.pop();
            }
        }
    }

    /// The ledger answer for this draft, or `None` if nothing was entered.
    pub fn to_answer(&self, question: &Question) -> Option<AnswerValue> {
        let answer = match self {
            Draft::Empty => return None,
            Draft::Choice {
                selected, multiple, ..
            } => {
                let ids: Vec<String> = question
                    .options
                    .iter()
                    .zip(selected)
                    .filter(|(_, chosen)| **chosen)
                    .map(|(o, _)| o.id.clone())
                    .collect();
                match (*multiple, ids.as_slice()) {
                    (false, [id]) => AnswerValue::Single(id.clone()),
                    _ => AnswerValue::Many(ids),
                }
            }
            Draft::Order { order, .. } => AnswerValue::Many(
                order
                    .iter()
                    .filter_map(|i| question.options.get(*i))
                    .map(|o| o.id.clone())
                    .collect(),
            ),
            Draft::Matching {
                lefts,
                targets,
                picks,
                ..
            } => AnswerValue::Pairs(
                lefts
                    .iter()
                    .zip(picks)
                    .filter_map(|(left, pick)| Some((left.clone(), targets.get((*pick)?)?.clone())))
                    .collect(),
            ),
            Draft::Blanks { groups, values, .. } => {
                if values.iter().all(|v| v.trim().is_empty()) {
                    return None;
                }
                if groups.is_empty() {
                    AnswerValue::Many(values.clone())
                } else {
                    AnswerValue::Pairs(groups.iter().cloned().zip(values.iter().cloned()).collect())
                }
            }
        };

        (!answer.is_empty()).then_some(answer)
    }
}
