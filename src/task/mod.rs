pub mod buffer;
pub mod form;

pub use buffer::{TaskList, append_task, format_tasks, parse_pending_tasks};
pub use form::{TaskForm, build_task_from_form};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Result, TaskrankError};

const DEFAULT_ESTIMATED_HOURS: i64 = 1;
const DEFAULT_IMPORTANCE: i64 = 5;

/// Largest magnitude at which every integer is exactly representable as an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Identifies another task: either a position in the list or an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskRef {
    Index(Number),
    Key(String),
}

impl TaskRef {
    /// Numeric tokens become `Index`, anything else stays a `Key`.
    pub fn from_token(token: &str) -> Self {
        match parse_number(token) {
            Some(number) => TaskRef::Index(number),
            None => TaskRef::Key(token.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: Number,
    #[serde(default = "default_importance")]
    pub importance: Number,
    #[serde(default)]
    pub dependencies: Vec<TaskRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskRef>,
    /// Keys this client does not model, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: None,
            estimated_hours: default_estimated_hours(),
            importance: default_importance(),
            dependencies: Vec::new(),
            id: None,
            extra: Map::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TaskrankError::Validation("Title is required.".to_string()));
        }

        if self
            .estimated_hours
            .as_f64()
            .is_none_or(|hours| hours <= 0.0)
        {
            return Err(TaskrankError::Validation(format!(
                "Task '{}' must have a positive number of estimated hours",
                self.title
            )));
        }

        let has_empty_dependency = self
            .dependencies
            .iter()
            .any(|dep| matches!(dep, TaskRef::Key(key) if key.trim().is_empty()));
        if has_empty_dependency {
            return Err(TaskrankError::Validation(format!(
                "Task '{}' has an empty dependency reference",
                self.title
            )));
        }

        Ok(())
    }
}

fn default_estimated_hours() -> Number {
    Number::from(DEFAULT_ESTIMATED_HOURS)
}

fn default_importance() -> Number {
    Number::from(DEFAULT_IMPORTANCE)
}

/// Parses a fully numeric token. Integral values (including `2.0` or `1e3`)
/// come back as integers so they serialize without a fractional part;
/// infinities and NaN are rejected.
pub fn parse_number(token: &str) -> Option<Number> {
    if let Ok(integer) = token.parse::<i64>() {
        return Some(Number::from(integer));
    }

    let float = token.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if float.fract() == 0.0 && float.abs() < MAX_SAFE_INTEGER {
        return Some(Number::from(float as i64));
    }

    Number::from_f64(float)
}
