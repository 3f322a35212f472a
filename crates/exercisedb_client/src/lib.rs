//! Client for the ExerciseDB RapidAPI service with a local file cache,
//! attribute filtering and semicolon-delimited CSV export.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod export;
pub mod http_client;
pub mod search;
pub mod store;

#[derive(Debug, Error)]
pub enum ExerciseDbError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decoding exercises: {0}")]
    Decode(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("record has no `{0}` field")]
    MissingField(String),
    #[error("nothing to export")]
    EmptyExport,
}

/// Wire-field names the client knows about, in export header order.
pub const KNOWN_FIELDS: &[&str] = &["id", "name", "bodyPart", "target", "equipment", "gifUrl"];

/// One exercise record as returned by the API. The schema is not validated
/// upstream, so every known field is optional and anything unrecognized
/// lands in `extra`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    #[serde(default, deserialize_with = "deserialize_opt_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "bodyPart")]
    pub body_part: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default, rename = "gifUrl")]
    pub gif_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Exercise {
    /// Look up a field by its wire name, known fields first, then the
    /// overflow map. Non-string overflow values render as their JSON text.
    pub fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        let known = match name {
            "id" => self.id.as_deref(),
            "name" => self.name.as_deref(),
            "bodyPart" => self.body_part.as_deref(),
            "target" => self.target.as_deref(),
            "equipment" => self.equipment.as_deref(),
            "gifUrl" => self.gif_url.as_deref(),
            _ => None,
        };
        if let Some(value) = known {
            return Some(Cow::Borrowed(value));
        }
        match self.extra.get(name) {
            Some(serde_json::Value::String(s)) => Some(Cow::Borrowed(s)),
            Some(other) => Some(Cow::Owned(other.to_string())),
            None => None,
        }
    }

    /// Wire names of every populated field: known fields in declaration
    /// order, then overflow keys.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = KNOWN_FIELDS
            .iter()
            .filter(|name| self.field(name).is_some())
            .map(|name| (*name).to_string())
            .collect();
        names.extend(self.extra.keys().cloned());
        names
    }
}

fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_keeps_unrecognized_fields() {
        let payload = json!({
            "id": "0001",
            "name": "barbell bench press",
            "bodyPart": "chest",
            "target": "pectorals",
            "gifUrl": "https://example.test/0001.gif",
            "secondaryMuscles": ["triceps"]
        });
        let e: Exercise = serde_json::from_value(payload).expect("deserialize exercise");
        assert_eq!(e.id.as_deref(), Some("0001"));
        assert_eq!(e.body_part.as_deref(), Some("chest"));
        assert!(e.extra.contains_key("secondaryMuscles"));
    }

    #[test]
    fn deserialize_id_from_number() {
        let payload = json!({"id": 42, "name": "x"});
        let e: Exercise = serde_json::from_value(payload).expect("deserialize number id");
        assert_eq!(e.id.unwrap(), "42");
    }

    #[test]
    fn deserialize_id_invalid_type_errors() {
        let payload = json!({"id": {"nested": true}, "name": "x"});
        let res: Result<Exercise, _> = serde_json::from_value(payload);
        assert!(res.is_err());
    }

    #[test]
    fn field_resolves_known_and_overflow_names() {
        let e: Exercise = serde_json::from_value(json!({
            "name": "squat",
            "bodyPart": "upper legs",
            "difficulty": "beginner"
        }))
        .unwrap();
        assert_eq!(e.field("bodyPart").unwrap(), "upper legs");
        assert_eq!(e.field("difficulty").unwrap(), "beginner");
        assert!(e.field("equipment").is_none());
    }

    #[test]
    fn field_names_lists_populated_fields_in_order() {
        let e: Exercise = serde_json::from_value(json!({
            "id": "1",
            "name": "squat",
            "bodyPart": "upper legs",
            "category": "strength"
        }))
        .unwrap();
        assert_eq!(e.field_names(), vec!["id", "name", "bodyPart", "category"]);
    }
}
