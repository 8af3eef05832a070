use std::{fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::dispatch::{DEFAULT_BASE_URL, resolve_strategy};
use crate::error::Result;
use crate::output::ColorMode;

const DEFAULT_TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Config {
    client: Option<ClientSection>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    pub base_url: Option<String>,
    pub strategy: Option<String>,
    pub tasks_file: Option<String>,
    pub timeout: Option<String>,
    pub color: Option<ColorMode>,
}

/// Settings after merging command-line flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfiguration {
    pub base_url: String,
    pub strategy: String,
    pub tasks_file: PathBuf,
    pub timeout: Option<Duration>,
    pub color: ColorMode,
}

/// Reads the `[client]` table. A missing file yields an empty section.
pub fn load_config(config_path: &str) -> Result<ClientSection> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No config file at {}, using defaults", config_path);
            return Ok(ClientSection::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config: Config = toml::from_str(&contents)?;
    Ok(config.client.unwrap_or_default())
}

impl ClientConfiguration {
    pub fn resolve(args: &Cli, section: ClientSection) -> Self {
        let base_url = args
            .base_url
            .clone()
            .or(section.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let strategy = resolve_strategy(args.strategy.as_deref().or(section.strategy.as_deref()))
            .to_string();

        let tasks_file = args
            .file
            .clone()
            .or(section.tasks_file)
            .unwrap_or_else(|| DEFAULT_TASKS_FILE.to_string())
            .into();

        let timeout = parse_timeout(args.timeout.as_deref(), section.timeout.as_deref());
        let color = args.color.or(section.color).unwrap_or_default();

        Self {
            base_url,
            strategy,
            tasks_file,
            timeout,
            color,
        }
    }
}

pub fn parse_timeout(timeout_str: Option<&str>, default_timeout: Option<&str>) -> Option<Duration> {
    let timeout_to_parse = timeout_str.or(default_timeout)?.trim();

    if timeout_to_parse == "0" || timeout_to_parse.is_empty() {
        return None;
    }

    match timeout_to_parse.parse::<humantime::Duration>() {
        Ok(duration) => Some(duration.into()),
        Err(e) => {
            warn!(
                "Invalid timeout format '{}': {}. Use a duration like '5s', '1m' or '1m30s'",
                timeout_to_parse, e
            );
            None
        }
    }
}
