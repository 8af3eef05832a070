//! HTTP client for the prioritization service.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::{Result, TaskrankError};
use crate::result::{SuggestionResponse, TaskResult};
use crate::task::Task;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/tasks";
pub const DEFAULT_STRATEGY: &str = "smart_balance";

const GENERIC_FAILURE: &str = "Request failed";

/// Ranked results of an analysis together with the line describing them.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: String,
    pub results: Vec<TaskResult>,
}

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TaskrankError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ranks every task. Results come back in the service's order.
    #[instrument(skip(self, tasks), fields(tasks = tasks.len()))]
    pub async fn analyze(&self, tasks: &[Task], strategy: &str) -> Result<Analysis> {
        let results: Vec<TaskResult> = self.post("analyze", tasks, strategy).await?;
        debug!("Service ranked {} task(s)", results.len());

        Ok(Analysis {
            summary: analysis_summary(results.len(), strategy),
            results,
        })
    }

    /// Asks the service to pick a subset of tasks to work on next.
    #[instrument(skip(self, tasks), fields(tasks = tasks.len()))]
    pub async fn suggest(&self, tasks: &[Task], strategy: &str) -> Result<SuggestionResponse> {
        let response: SuggestionResponse = self.post("suggest", tasks, strategy).await?;
        debug!(
            "Service suggested {} task(s) (strategy echoed: {:?})",
            response.suggested_tasks.len(),
            response.strategy
        );
        Ok(response)
    }

    async fn post<R: DeserializeOwned>(
        &self,
        operation: &str,
        tasks: &[Task],
        strategy: &str,
    ) -> Result<R> {
        let url = format!("{}/{}/", self.base_url, operation);
        debug!("POST {} (strategy={})", url, strategy);

        let response = self
            .client
            .post(&url)
            .query(&[("strategy", strategy)])
            .json(tasks)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = failure_message(response).await;
            warn!("{} returned {}: {}", url, status, message);
            return Err(TaskrankError::Request(message));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| TaskrankError::Request(format!("Invalid response from service: {}", e)))
    }
}

pub fn analysis_summary(count: usize, strategy: &str) -> String {
    format!(
        "Analyzed {} task(s) using \"{}\" strategy.",
        count, strategy
    )
}

/// Blank strategies fall back to the default.
pub fn resolve_strategy(strategy: Option<&str>) -> &str {
    strategy
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_STRATEGY)
}

/// Uses the error body's `detail` string when there is one.
async fn failure_message(response: reqwest::Response) -> String {
    let body = match response.json::<Value>().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Error body is not JSON: {}", e);
            return GENERIC_FAILURE.to_string();
        }
    };

    body.get("detail")
        .and_then(Value::as_str)
        .filter(|detail| !detail.is_empty())
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}
