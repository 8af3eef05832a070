use tracing::{debug, info};

use crate::dispatch::ServiceClient;
use crate::error::Result;
use crate::render::{Rendered, render};
use crate::result::TaskResult;
use crate::task::{Task, TaskForm, TaskList, build_task_from_form};

/// State owned by one session: the pending tasks and the last results shown.
///
/// Requests borrow the workspace mutably until they resolve, so a session can
/// never have two in flight and a slow response cannot overwrite a newer one.
#[derive(Debug, Default)]
pub struct Workspace {
    tasks: TaskList,
    summary: Option<String>,
    results: Option<Rendered>,
}

impl Workspace {
    pub fn new(tasks: TaskList) -> Self {
        Self {
            tasks,
            summary: None,
            results: None,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn results(&self) -> Option<&Rendered> {
        self.results.as_ref()
    }

    /// Validates the form and appends the task. The list is untouched on error.
    pub fn add_task(&mut self, form: &TaskForm) -> Result<Task> {
        let task = build_task_from_form(form).inspect_err(|e| debug!("Rejected task: {}", e))?;
        self.tasks.push(task.clone());
        info!("Task list now holds {} task(s)", self.tasks.len());
        Ok(task)
    }

    pub async fn run_analysis(&mut self, client: &ServiceClient, strategy: &str) -> Result<()> {
        let analysis = client
            .analyze(self.tasks.tasks(), strategy)
            .await
            .inspect_err(|e| debug!("Analysis failed, keeping previous results: {}", e))?;

        self.show(analysis.summary, Some(analysis.results.as_slice()));
        Ok(())
    }

    pub async fn run_suggestion(&mut self, client: &ServiceClient, strategy: &str) -> Result<()> {
        let response = client
            .suggest(self.tasks.tasks(), strategy)
            .await
            .inspect_err(|e| debug!("Suggestion failed, keeping previous results: {}", e))?;

        self.show(response.summary, Some(response.suggested_tasks.as_slice()));
        Ok(())
    }

    fn show(&mut self, summary: String, results: Option<&[TaskResult]>) {
        self.summary = Some(summary);
        self.results = Some(render(results));
    }
}
