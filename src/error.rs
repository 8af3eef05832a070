use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskrankError {
    /// The task buffer is not JSON, not an array, or holds a malformed task.
    #[error("Invalid task list: {0}")]
    InputShape(String),
    #[error("{0}")]
    Validation(String),
    /// Carries the message shown to the user verbatim.
    #[error("{0}")]
    Request(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for TaskrankError {
    fn from(err: toml::de::Error) -> Self {
        TaskrankError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for TaskrankError {
    fn from(err: reqwest::Error) -> Self {
        TaskrankError::Request(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskrankError>;
