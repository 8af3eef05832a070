use clap::{Args, Parser, Subcommand};

use crate::output::ColorMode;
use crate::task::TaskForm;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file to use
    #[arg(short = 'c', long = "config", default_value = "taskrank.toml")]
    pub config: String,

    /// JSON file holding the pending task list (default: tasks.json)
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Base URL of the prioritization service
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Ranking strategy, e.g. smart_balance, fastest_wins, high_impact, deadline_driven
    #[arg(short = 's', long = "strategy")]
    pub strategy: Option<String>,

    /// Request timeout (e.g., "10s", "1m")
    #[arg(short = 't', long = "timeout")]
    pub timeout: Option<String>,

    /// When to colour priority badges
    #[arg(long = "color", value_enum)]
    pub color: Option<ColorMode>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Append a task to the pending task list
    Add(AddArgs),
    /// Rank every pending task
    Analyze,
    /// Ask the service which tasks to work on next
    Suggest,
    /// Print the pending task list
    Show,
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Task title
    #[arg(long, default_value = "")]
    pub title: String,

    /// Due date, e.g. 2025-11-30
    #[arg(long, default_value = "")]
    pub due: String,

    /// Estimated effort in hours (default 1)
    #[arg(long, default_value = "")]
    pub hours: String,

    /// Importance on a 1-10 scale (default 5)
    #[arg(long, default_value = "")]
    pub importance: String,

    /// Comma-separated dependencies: task indices or keys
    #[arg(long, default_value = "")]
    pub deps: String,
}

impl From<AddArgs> for TaskForm {
    fn from(args: AddArgs) -> Self {
        TaskForm {
            title: args.title,
            due_date: args.due,
            estimated_hours: args.hours,
            importance: args.importance,
            dependencies: args.deps,
        }
    }
}
