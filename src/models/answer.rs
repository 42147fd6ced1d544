use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Key the matching widget uses for its drop zone; never a real pair.
const DESTINATION_KEY: &str = "destination";

/// A candidate answer for one question, in canonical shape.
///
/// Every payload shape seen at the boundary (bare ids, numbers, id arrays,
/// `{ "selectedAnswers": [...] }` wrappers, `"left-right"` pair strings,
/// `{ left: right }` objects) is folded into one of these variants by
/// [`AnswerValue::from_json`], so evaluation logic only deals with three cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Many(Vec<String>),
    Pairs(BTreeMap<String, String>),
}

impl AnswerValue {
    pub fn single(value: impl Into<String>) -> Self {
        AnswerValue::Single(value.into())
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::Many(values.into_iter().map(Into::into).collect())
    }

    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        AnswerValue::Pairs(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Normalizes a raw JSON answer. Returns `None` for `null` and for shapes
    /// that carry no answer at all.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(map) => {
                if let Some(inner) = map
                    .get("selectedAnswers")
                    .or_else(|| map.get("selected_answers"))
                {
                    return Self::from_json(inner);
                }
                let pairs: BTreeMap<String, String> = map
                    .iter()
                    .filter(|(key, _)| key.as_str() != DESTINATION_KEY)
                    .filter_map(|(key, value)| Some((key.clone(), scalar_to_string(value)?)))
                    .collect();
                Some(AnswerValue::Pairs(pairs))
            }
            Value::Array(items) => Some(AnswerValue::Many(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            scalar => scalar_to_string(scalar).map(AnswerValue::Single),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Single(value) => value.trim().is_empty(),
            AnswerValue::Many(values) => values.is_empty(),
            AnswerValue::Pairs(pairs) => pairs.is_empty(),
        }
    }

    /// Flattens to a list of values: the scalar, the array, or the pair values
    /// in key order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            AnswerValue::Single(value) => vec![value.as_str()],
            AnswerValue::Many(values) => values.iter().map(String::as_str).collect(),
            AnswerValue::Pairs(pairs) => pairs.values().map(String::as_str).collect(),
        }
    }

    /// First value, as a flashcard answer is read.
    pub fn first(&self) -> Option<&str> {
        match self {
            AnswerValue::Single(value) => Some(value.as_str()),
            AnswerValue::Many(values) => values.first().map(String::as_str),
            AnswerValue::Pairs(pairs) => pairs.values().next().map(String::as_str),
        }
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        AnswerValue::from_json(&raw)
            .ok_or_else(|| serde::de::Error::custom("answer must not be null"))
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selected_answers_wrapper_is_unwrapped() {
        let value = json!({ "selectedAnswers": [3, "4"] });
        assert_eq!(
            AnswerValue::from_json(&value),
            Some(AnswerValue::many(["3", "4"]))
        );
    }

    #[test]
    fn test_destination_key_is_dropped() {
        let value = json!({ "1": "Paris", "destination": "zone" });
        assert_eq!(
            AnswerValue::from_json(&value),
            Some(AnswerValue::pairs([("1", "Paris")]))
        );
    }

    #[test]
    fn test_null_and_scalars() {
        assert_eq!(AnswerValue::from_json(&Value::Null), None);
        assert_eq!(
            AnswerValue::from_json(&json!(42)),
            Some(AnswerValue::single("42"))
        );
        assert!(AnswerValue::single("   ").is_empty());
    }

    #[test]
    fn test_stored_shape_reads_back() {
        let stored = serde_json::to_string(&AnswerValue::pairs([("a", "B")])).unwrap();
        assert_eq!(stored, r#"{"a":"B"}"#);
        let back: AnswerValue = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, AnswerValue::pairs([("a", "B")]));
    }
}
