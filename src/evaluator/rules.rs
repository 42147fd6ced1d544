use std::collections::{BTreeMap, HashSet};

use crate::models::{AnswerOption, AnswerValue, Question};

use super::text::normalize_text;

/// Distinct blank groups in option order.
pub fn blank_groups(question: &Question) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for group in question.options.iter().filter_map(|o| o.bank_group.as_ref()) {
        if !groups.contains(group) {
            groups.push(group.clone());
        }
    }
    groups
}

pub(super) fn fill_in_blank(question: &Question, candidate: &AnswerValue) -> bool {
    let groups = blank_groups(question);
    if groups.is_empty() {
        return fill_in_blank_ordered(question, candidate);
    }

    let expected: BTreeMap<&str, &str> = question
        .correct_options()
        .filter_map(|o| Some((o.bank_group.as_deref()?, o.text.as_str())))
        .collect();
    if expected.is_empty() {
        return false;
    }

    let given: Vec<(String, &str)> = match candidate {
        AnswerValue::Pairs(pairs) => pairs.iter().map(|(g, v)| (g.clone(), v.as_str())).collect(),
        AnswerValue::Many(values) if values.len() == groups.len() => groups
            .iter()
            .cloned()
            .zip(values.iter().map(String::as_str))
            .collect(),
        AnswerValue::Many(_) => return false,
        AnswerValue::Single(value) => vec![(groups[0].clone(), value.as_str())],
    };

    given.len() == expected.len()
        && given.iter().all(|(group, value)| {
            expected
                .get(group.as_str())
                .is_some_and(|text| normalize_text(value) == normalize_text(text))
        })
}

fn fill_in_blank_ordered(question: &Question, candidate: &AnswerValue) -> bool {
    let expected: Vec<String> = question
        .correct_options()
        .map(|o| normalize_text(&o.text))
        .collect();
    if expected.is_empty() {
        return false;
    }

    let given: Vec<String> = candidate.values().into_iter().map(normalize_text).collect();
    given == expected
}

/// Left-hand items of a matching question: the options carrying a `match_pair`.
pub fn matching_lefts(question: &Question) -> Vec<&AnswerOption> {
    question
        .options
        .iter()
        .filter(|o| o.match_pair.is_some())
        .collect()
}

/// Right-hand texts a left item can be matched with.
pub fn match_targets(question: &Question) -> Vec<String> {
    let mut targets: Vec<String> = question
        .options
        .iter()
        .filter(|o| o.match_pair.is_none())
        .map(|o| o.text.clone())
        .collect();
    for reference in question.options.iter().filter_map(|o| o.match_pair.as_deref()) {
        let text = resolve_right(question, reference);
        if !targets.contains(&text) {
            targets.push(text);
        }
    }
    targets
}

/// A right-hand reference is an option id or an option's literal text.
fn resolve_right(question: &Question, reference: &str) -> String {
    question
        .options
        .iter()
        .find(|o| o.id == reference)
        .or_else(|| question.options.iter().find(|o| o.text == reference))
        .map(|o| o.text.clone())
        .unwrap_or_else(|| reference.to_string())
}

pub(super) fn expected_pairs(question: &Question) -> BTreeMap<String, String> {
    matching_lefts(question)
        .into_iter()
        .filter_map(|left| {
            let reference = left.match_pair.as_deref()?;
            Some((left.id.clone(), resolve_right(question, reference)))
        })
        .collect()
}

/// Splits a `"leftId-rightId"` string. Ids may themselves contain dashes, so
/// the split point is the first one whose prefix names a left item.
pub(super) fn split_pair<'a>(question: &Question, item: &'a str) -> Option<(&'a str, &'a str)> {
    let lefts = matching_lefts(question);
    item.match_indices('-')
        .map(|(i, _)| (&item[..i], &item[i + 1..]))
        .find(|(left, _)| lefts.iter().any(|o| o.id == *left))
        .or_else(|| item.split_once('-'))
}

/// Candidate pairs keyed by left id, with the right side resolved to text.
pub(super) fn given_pairs(
    question: &Question,
    candidate: &AnswerValue,
) -> Option<BTreeMap<String, String>> {
    match candidate {
        AnswerValue::Pairs(pairs) => Some(
            pairs
                .iter()
                .map(|(left, right)| (left.clone(), resolve_right(question, right)))
                .collect(),
        ),
        AnswerValue::Many(items) => items
            .iter()
            .map(|item| {
                let (left, right) = split_pair(question, item)?;
                Some((left.to_string(), resolve_right(question, right)))
            })
            .collect(),
        AnswerValue::Single(item) => {
            let (left, right) = split_pair(question, item)?;
            Some(BTreeMap::from([(left.to_string(), resolve_right(question, right))]))
        }
    }
}

pub(super) fn matching(question: &Question, candidate: &AnswerValue) -> bool {
    let expected = expected_pairs(question);
    if expected.is_empty() {
        return false;
    }
    let Some(given) = given_pairs(question, candidate) else {
        return false;
    };

    given.len() == expected.len()
        && expected
            .iter()
            .all(|(left, right)| given.get(left).is_some_and(|g| g.trim() == right.trim()))
}

/// Options sorted by `position`; options without one keep their order at the end.
pub fn reorder_canonical(question: &Question) -> Vec<&AnswerOption> {
    let mut options: Vec<&AnswerOption> = question.options.iter().collect();
    options.sort_by_key(|o| (o.position.is_none(), o.position.unwrap_or_default()));
    options
}

pub(super) fn reorder(question: &Question, candidate: &AnswerValue) -> bool {
    let canonical: Vec<&str> = reorder_canonical(question)
        .into_iter()
        .map(|o| o.id.as_str())
        .collect();
    if canonical.is_empty() {
        return false;
    }

    match candidate {
        AnswerValue::Many(ids) => ids.iter().map(String::as_str).eq(canonical.into_iter()),
        _ => false,
    }
}

pub(super) fn flashcard(question: &Question, candidate: &AnswerValue) -> bool {
    let Some(correct) = question.correct_options().next() else {
        return false;
    };
    candidate
        .first()
        .is_some_and(|value| value == correct.id || value == correct.text)
}

pub(super) fn word_bank(question: &Question, candidate: &AnswerValue) -> bool {
    let correct: HashSet<&str> = question.correct_options().map(|o| o.id.as_str()).collect();
    if correct.is_empty() {
        return false;
    }

    match candidate {
        AnswerValue::Many(ids) => ids.iter().map(String::as_str).collect::<HashSet<_>>() == correct,
        AnswerValue::Single(id) => correct.len() == 1 && correct.contains(id.as_str()),
        AnswerValue::Pairs(_) => false,
    }
}

/// Correct ids from the option flags, or the question's `correctAnswers` list
/// when no option is flagged.
pub(super) fn correct_ids(question: &Question) -> HashSet<&str> {
    let flagged: HashSet<&str> = question.correct_options().map(|o| o.id.as_str()).collect();
    if !flagged.is_empty() {
        return flagged;
    }
    question.correct_answers.iter().map(String::as_str).collect()
}

pub(super) fn choice(question: &Question, candidate: &AnswerValue) -> bool {
    let correct = correct_ids(question);
    if correct.is_empty() {
        return false;
    }

    match candidate {
        AnswerValue::Many(ids) => ids.iter().map(String::as_str).collect::<HashSet<_>>() == correct,
        AnswerValue::Single(id) => correct.contains(id.as_str()),
        AnswerValue::Pairs(_) => false,
    }
}
