//! Conversion between the pending task list and its JSON text form.

use std::{fs, io::ErrorKind, path::Path};

use serde_json::Value;
use tracing::debug;

use super::Task;
use crate::error::{Result, TaskrankError};

/// The ordered list of tasks waiting to be submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_buffer(buffer: &str) -> Result<Self> {
        parse_pending_tasks(buffer).map(|tasks| Self { tasks })
    }

    pub fn to_buffer(&self) -> Result<String> {
        format_tasks(&self.tasks)
    }

    /// Reads the buffer file. A file that does not exist yet is an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let list = Self::from_buffer(&contents)?;
                debug!("Loaded {} task(s) from {}", list.len(), path.display());
                Ok(list)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist, starting empty", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut contents = self.to_buffer()?;
        contents.push('\n');
        fs::write(path, contents)?;
        debug!("Saved {} task(s) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn last(&self) -> Option<&Task> {
        self.tasks.last()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Parses the buffer as a JSON array of tasks. Blank text reads as `[]`.
pub fn parse_pending_tasks(buffer: &str) -> Result<Vec<Task>> {
    let buffer = if buffer.trim().is_empty() {
        "[]"
    } else {
        buffer
    };

    let value: Value = serde_json::from_str(buffer)
        .map_err(|e| TaskrankError::InputShape(format!("not valid JSON ({})", e)))?;

    let Value::Array(items) = value else {
        return Err(TaskrankError::InputShape(
            "JSON must be an array of tasks.".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let task: Task = serde_json::from_value(item)
                .map_err(|e| TaskrankError::InputShape(format!("task {}: {}", index + 1, e)))?;
            task.validate()
                .map_err(|e| TaskrankError::InputShape(format!("task {}: {}", index + 1, e)))?;
            Ok(task)
        })
        .collect()
}

/// Pretty-prints tasks with two-space indentation.
pub fn format_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string_pretty(tasks)
        .map_err(|e| TaskrankError::InputShape(format!("could not serialize tasks ({})", e)))
}

/// Appends `task` to the list held in `buffer` and returns the rewritten buffer.
/// Fails without producing output when the existing buffer does not parse.
pub fn append_task(buffer: &str, task: Task) -> Result<String> {
    let mut list = TaskList::from_buffer(buffer)?;
    list.push(task);
    list.to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskForm, TaskRef, build_task_from_form};
    use pretty_assertions::assert_eq;
    use serde_json::{Number, json};
    use tempfile::TempDir;

    fn sample_task(title: &str, deps: &str) -> Task {
        build_task_from_form(&TaskForm {
            title: title.to_string(),
            dependencies: deps.to_string(),
            ..TaskForm::default()
        })
        .unwrap()
    }

    #[test]
    fn blank_buffer_is_an_empty_list() {
        assert!(parse_pending_tasks("").unwrap().is_empty());
        assert!(parse_pending_tasks("  \n").unwrap().is_empty());
        assert!(parse_pending_tasks("[]").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_input_shape_error() {
        let err = parse_pending_tasks("[{\"title\": ").unwrap_err();
        assert!(matches!(err, TaskrankError::InputShape(_)));
    }

    #[test]
    fn non_array_json_is_an_input_shape_error() {
        for buffer in ["{\"title\": \"A\"}", "42", "\"tasks\"", "null"] {
            let err = parse_pending_tasks(buffer).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid task list: JSON must be an array of tasks."
            );
        }
    }

    #[test]
    fn malformed_element_names_its_position() {
        let err = parse_pending_tasks(r#"[{"title": "A"}, {"importance": 3}]"#).unwrap_err();
        assert!(err.to_string().contains("task 2"), "{err}");

        let err = parse_pending_tasks(r#"[{"title": "  "}]"#).unwrap_err();
        assert!(matches!(err, TaskrankError::InputShape(_)));
    }

    #[test]
    fn append_preserves_order_and_round_trips() {
        let first = sample_task("First", "");
        let second = sample_task("Second", "1, api");

        let buffer = append_task("[]", first.clone()).unwrap();
        let buffer = append_task(&buffer, second.clone()).unwrap();

        assert_eq!(parse_pending_tasks(&buffer).unwrap(), vec![first, second]);
    }

    #[test]
    fn append_to_unreadable_buffer_fails() {
        let err = append_task("{not json", sample_task("A", "")).unwrap_err();
        assert!(matches!(err, TaskrankError::InputShape(_)));
    }

    #[test]
    fn append_keeps_unknown_keys_of_existing_tasks() {
        let before = r#"[{"title":"A","notes":"keep me","priority_tag":"x"}]"#;
        let after = append_task(before, sample_task("B", "")).unwrap();

        let value: Value = serde_json::from_str(&after).unwrap();
        assert_eq!(
            value[0],
            json!({
                "title": "A",
                "due_date": null,
                "estimated_hours": 1,
                "importance": 5,
                "dependencies": [],
                "notes": "keep me",
                "priority_tag": "x"
            })
        );
        assert_eq!(value[1]["title"], "B");
        assert!(value[1].get("notes").is_none());
    }

    #[test]
    fn scenario_appends_normalized_task_to_empty_buffer() {
        let buffer = append_task("[]", sample_task("Write spec", "2, backend")).unwrap();

        let value: Value = serde_json::from_str(&buffer).unwrap();
        assert_eq!(
            value,
            json!([{
                "title": "Write spec",
                "due_date": null,
                "estimated_hours": 1,
                "importance": 5,
                "dependencies": [2, "backend"]
            }])
        );
    }

    #[test]
    fn buffer_is_pretty_printed() {
        let buffer = append_task("[]", sample_task("A", "")).unwrap();
        assert_eq!(
            buffer,
            "[\n  {\n    \"title\": \"A\",\n    \"due_date\": null,\n    \"estimated_hours\": 1,\n    \"importance\": 5,\n    \"dependencies\": []\n  }\n]"
        );
    }

    #[test]
    fn dependency_shapes_survive_reparsing() {
        let buffer = append_task("[]", sample_task("A", "3, 4.5, db, 10x")).unwrap();

        let once = parse_pending_tasks(&buffer).unwrap();
        let twice = parse_pending_tasks(&format_tasks(&once).unwrap()).unwrap();

        assert_eq!(once, twice);
        assert_eq!(
            twice[0].dependencies,
            vec![
                TaskRef::Index(Number::from(3)),
                TaskRef::Index(Number::from_f64(4.5).unwrap()),
                TaskRef::Key("db".to_string()),
                TaskRef::Key("10x".to_string()),
            ]
        );
    }

    #[test]
    fn load_missing_file_is_empty_and_save_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("tasks.json");

        let mut list = TaskList::load(&path).unwrap();
        assert!(list.is_empty());

        list.push(sample_task("Ship", "backend"));
        list.save(&path).unwrap();

        let reloaded = TaskList::load(&path).unwrap();
        assert_eq!(reloaded, list);
        assert_eq!(reloaded.last().map(|t| t.title.as_str()), Some("Ship"));
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{\"title\": \"not a list\"}").unwrap();

        assert!(matches!(
            TaskList::load(&path),
            Err(TaskrankError::InputShape(_))
        ));
    }
}
