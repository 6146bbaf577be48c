//! Tolerant decoders for values that admin forms send as text.

use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Decode an optional integer given either as a JSON number or as numeric text.
///
/// `null` and blank strings count as absent. Use with `#[serde(default)]` so a
/// missing key is absent too.
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<IntOrText>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match raw {
        IntOrText::Int(value) => Ok(Some(value)),
        IntOrText::Float(value)
            if value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            Ok(Some(value as i64))
        }
        IntOrText::Float(value) => Err(D::Error::custom(format!(
            "expected an integer, got {value}"
        ))),
        IntOrText::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, got `{text}`")))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "super::optional_int")]
        value: Option<i64>,
    }

    fn decode(json: &str) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_str::<Form>(json).map(|form| form.value)
    }

    #[test]
    fn accepts_numbers_and_numeric_text() {
        assert_eq!(decode(r#"{"value": 3}"#).unwrap(), Some(3));
        assert_eq!(decode(r#"{"value": "12"}"#).unwrap(), Some(12));
        assert_eq!(decode(r#"{"value": " -2 "}"#).unwrap(), Some(-2));
        assert_eq!(decode(r#"{"value": 4.0}"#).unwrap(), Some(4));
    }

    #[test]
    fn blank_null_and_missing_are_absent() {
        assert_eq!(decode(r#"{"value": ""}"#).unwrap(), None);
        assert_eq!(decode(r#"{"value": null}"#).unwrap(), None);
        assert_eq!(decode("{}").unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(decode(r#"{"value": "dois"}"#).is_err());
        assert!(decode(r#"{"value": 1.5}"#).is_err());
        assert!(decode(r#"{"value": true}"#).is_err());
    }

    #[test]
    fn rejects_numbers_outside_the_integer_range() {
        assert!(decode(r#"{"value": 1e20}"#).is_err());
        assert!(decode(r#"{"value": -1e20}"#).is_err());
        assert!(decode(r#"{"value": 9223372036854775808.0}"#).is_err());
    }
}
