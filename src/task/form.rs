use serde_json::Number;
use tracing::debug;

use super::{Task, TaskRef, parse_number};
use crate::error::{Result, TaskrankError};

/// Raw, unvalidated field values for a new task, exactly as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub importance: String,
    /// Comma-separated dependency tokens.
    pub dependencies: String,
}

pub fn build_task_from_form(form: &TaskForm) -> Result<Task> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(TaskrankError::Validation("Title is required.".to_string()));
    }

    let mut task = Task::new(title);

    let due_date = form.due_date.trim();
    if !due_date.is_empty() {
        task.due_date = Some(due_date.to_string());
    }

    if let Some(hours) = parse_numeric_field("Estimated hours", &form.estimated_hours)? {
        task.estimated_hours = hours;
    }

    if let Some(importance) = parse_numeric_field("Importance", &form.importance)? {
        task.importance = importance;
    }

    task.dependencies = parse_dependency_tokens(&form.dependencies);

    task.validate()?;
    debug!(
        "Built task '{}' with {} dependencies",
        task.title,
        task.dependencies.len()
    );

    Ok(task)
}

/// Splits on commas, trims each token and drops the empty ones.
pub fn parse_dependency_tokens(raw: &str) -> Vec<TaskRef> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(TaskRef::from_token)
        .collect()
}

fn parse_numeric_field(name: &str, raw: &str) -> Result<Option<Number>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    parse_number(raw).map(Some).ok_or_else(|| {
        TaskrankError::Validation(format!("{} must be a number, got '{}'", name, raw))
    })
}
