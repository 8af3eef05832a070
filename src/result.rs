//! Records returned by the prioritization service.
//!
//! The service echoes back whatever task fields it was sent, so every field is
//! optional here and malformed values fall back to a documented default while
//! deserializing. Nothing downstream has to re-check for missing data.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::task::TaskRef;

/// One scored task.
///
/// Defaults: `score` 0, `dependents_count` 0, `in_cycle` false, `explanation`
/// empty, `dependencies` empty when missing or not a list. A truthy non-string
/// `title`, `due_date` or `explanation` is kept in its printed form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskResult {
    #[serde(default, deserialize_with = "lenient_ref")]
    pub id: Option<TaskRef>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_label")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub importance: Option<Value>,
    #[serde(default)]
    pub estimated_hours: Option<Value>,
    #[serde(default, deserialize_with = "lenient_refs")]
    pub dependencies: Vec<TaskRef>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub dependents_count: u64,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub in_cycle: bool,
    #[serde(default, deserialize_with = "lenient_label_text")]
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SuggestionResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_results")]
    pub suggested_tasks: Vec<TaskResult>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub strategy: Option<String>,
}

/// Follows the usual JSON truthiness: `false`, `0`, `""` and `null` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Prints a JSON value the way it reads on a card: strings without quotes and
/// integral numbers without a trailing `.0`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            // -0 prints as 0
            Some(f) if f == 0.0 => "0".to_string(),
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn value_to_ref(value: Value) -> Option<TaskRef> {
    match value {
        Value::Number(n) => Some(TaskRef::Index(n)),
        Value::String(s) => Some(TaskRef::Key(s)),
        Value::Null => None,
        other => Some(TaskRef::Key(other.to_string())),
    }
}

fn lenient_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TaskRef>, D::Error> {
    Ok(value_to_ref(Value::deserialize(deserializer)?))
}

fn lenient_refs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TaskRef>, D::Error> {
    let refs = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| value_to_ref(item).unwrap_or_else(|| TaskRef::Key("null".to_string())))
            .collect(),
        _ => Vec::new(),
    };
    Ok(refs)
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_label<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value).then(|| display_value(&value)))
}

fn lenient_label_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_label(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let count = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    });
    Ok(count.unwrap_or(0))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

fn lenient_results<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<TaskResult>, D::Error> {
    Ok(Option::<Vec<TaskResult>>::deserialize(deserializer)?.unwrap_or_default())
}
