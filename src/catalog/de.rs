//! Lenient field deserializers for catalog records.
//!
//! Catalog data is hand-maintained JSON: numbers show up where strings are
//! expected, flags are sometimes text, prices are sometimes quoted. A field
//! with an unexpected shape degrades to "missing" so one odd value never
//! rejects the whole record.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Connectivity, Flag};

/// Product identifier: a string, or a number kept as its decimal text.
pub fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "product id must be a string or a number, got {}",
            other
        ))),
    }
}

pub fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Price as a number. Quoted numbers are accepted; anything else is unknown.
pub fn loose_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| p.is_finite()))
}

pub fn loose_flag<'de, D>(deserializer: D) -> Result<Option<Flag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(Flag::Bool(b)),
        Value::Number(n) => n.as_f64().map(Flag::Number),
        Value::String(s) => Some(Flag::Text(s)),
        _ => None,
    })
}

pub fn loose_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

pub fn loose_connectivity<'de, D>(deserializer: D) -> Result<Option<Connectivity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Connectivity::deserialize(value).ok(),
        _ => None,
    })
}
