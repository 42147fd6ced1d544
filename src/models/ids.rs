//! Boundary helpers for identifiers, flags, numbers and nullable fields.
//!
//! The backend serializes ids as numbers or strings, booleans as `0`/`1`,
//! counts as quoted strings and sends `null` for missing values, depending on
//! the endpoint. Everything is normalized here so the rest of the crate only
//! sees one shape.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<RawFlag> for bool {
    fn from(raw: RawFlag) -> Self {
        match raw {
            RawFlag::Bool(b) => b,
            RawFlag::Int(n) => n != 0,
            RawFlag::Text(text) => matches!(text.trim(), "1" | "true" | "TRUE" | "True"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    fn as_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Int(n) => Some(*n),
            RawNumber::Float(f) => f.is_finite().then_some(*f as i64),
            RawNumber::Text(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
            }
        }
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

pub(crate) fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<RawId>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawFlag>::deserialize(deserializer)?
        .map(bool::from)
        .unwrap_or(false))
}

pub(crate) fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawFlag>::deserialize(deserializer)?.map(bool::from))
}

/// `null` becomes `T::default()`.
pub(crate) fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free text; `null` becomes empty and bare numbers are kept as their digits.
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

/// Integer sent as a number or a numeric string. Unparsable text reads as `None`.
pub(crate) fn deserialize_optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.and_then(|raw| raw.as_i64()))
}

/// Non-negative count; `null`, negatives and unparsable text read as `0`.
pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_int(deserializer)?
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "deserialize_text")]
        text: String,
        #[serde(default, deserialize_with = "deserialize_optional_int")]
        position: Option<i64>,
        #[serde(default, deserialize_with = "deserialize_count")]
        count: u32,
        #[serde(default, deserialize_with = "deserialize_flag")]
        flag: bool,
    }

    fn parse(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nulls_read_as_defaults() {
        let value = parse(r#"{"text": null, "position": null, "count": null, "flag": null}"#);
        assert_eq!(value.text, "");
        assert_eq!(value.position, None);
        assert_eq!(value.count, 0);
        assert!(!value.flag);
    }

    #[test]
    fn test_numbers_as_strings() {
        let value = parse(r#"{"text": 42, "position": " 3 ", "count": "90", "flag": "1"}"#);
        assert_eq!(value.text, "42");
        assert_eq!(value.position, Some(3));
        assert_eq!(value.count, 90);
        assert!(value.flag);

        let value = parse(r#"{"position": "first", "count": -5}"#);
        assert_eq!(value.position, None);
        assert_eq!(value.count, 0);
    }
}
