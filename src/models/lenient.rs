//! Deserializers for request bodies that may carry numbers as strings (form
//! posts) or strings as numbers (hand-written JSON).
use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

// Any scalar as text; null becomes empty
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => String::new(),
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Number(n)) => n.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
    })
}

// A number or a numeric string; null and blank become 0
pub fn rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Scalar::Number(n)) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("rating is out of range")),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(Scalar::Text(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid rating {:?}", s))),
        Some(Scalar::Bool(_)) => Err(de::Error::custom("rating must be a number")),
    }
}
