//! Forgiving field decoders for the itinerary service payload
//!
//! The service fills missing place details with sentinels like `"N/A"` or empty
//! strings and mixes numbers with numeric strings. These decoders turn all of
//! that into `None` or an empty list instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings the service uses in place of a missing value
const SENTINELS: [&str; 4] = ["n/a", "na", "none", "null"];

fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || SENTINELS.contains(&trimmed.to_ascii_lowercase().as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Optional free text; numbers are kept as their decimal form
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => clean(&s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Optional floating point number, accepting numeric strings
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_f64))
}

/// Optional non-negative whole number
pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(as_f64)
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

/// Price level in `1..=4`; anything else is treated as unknown
pub(crate) fn price_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(count(deserializer)?
        .filter(|level| (1..=4).contains(level))
        .map(|level| level as u8))
}

/// A list whose malformed entries are dropped; a non-list decodes as empty
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// A list of non-blank strings
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .iter()
        .filter_map(|item| item.as_str().and_then(clean))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "text")]
        text: Option<String>,
        #[serde(default, deserialize_with = "number")]
        number: Option<f64>,
        #[serde(default, deserialize_with = "count")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "price_level")]
        price: Option<u8>,
        #[serde(default, deserialize_with = "string_list")]
        strings: Vec<String>,
    }

    fn sample(value: serde_json::Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_trims_and_drops_sentinels() {
        assert_eq!(sample(json!({"text": "  Via Roma 1 "})).text.as_deref(), Some("Via Roma 1"));
        assert!(sample(json!({"text": "N/A"})).text.is_none());
        assert!(sample(json!({"text": "   "})).text.is_none());
        assert!(sample(json!({"text": true})).text.is_none());
        assert_eq!(sample(json!({"text": 12})).text.as_deref(), Some("12"));
    }

    #[test]
    fn test_number_accepts_strings() {
        assert_eq!(sample(json!({"number": 4.2})).number, Some(4.2));
        assert_eq!(sample(json!({"number": "3.9"})).number, Some(3.9));
        assert!(sample(json!({"number": "great"})).number.is_none());
        assert!(sample(json!({"number": null})).number.is_none());
    }

    #[test]
    fn test_count_rejects_fractions_and_negatives() {
        assert_eq!(sample(json!({"count": 3})).count, Some(3));
        assert!(sample(json!({"count": 2.5})).count.is_none());
        assert!(sample(json!({"count": -1})).count.is_none());
    }

    #[test]
    fn test_price_level_range() {
        assert_eq!(sample(json!({"price": 4})).price, Some(4));
        assert!(sample(json!({"price": 0})).price.is_none());
        assert!(sample(json!({"price": 7})).price.is_none());
    }

    #[test]
    fn test_string_list_skips_blank_and_non_strings() {
        let strings = sample(json!({"strings": ["Mon: 9-5", "", 3, "N/A", "Tue: 9-5"]})).strings;
        assert_eq!(strings, vec!["Mon: 9-5".to_string(), "Tue: 9-5".to_string()]);
    }
}
