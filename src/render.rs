use std::fmt;

use colored::{ColoredString, Colorize};

use crate::result::{TaskResult, display_value};

pub const EMPTY_MESSAGE: &str = "No tasks to display.";
pub const UNTITLED_TASK: &str = "Untitled task";

const HIGH_THRESHOLD: f64 = 100.0;
const MEDIUM_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Tier::High
        } else if score >= MEDIUM_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub tier: Tier,
    pub score: f64,
}

impl Badge {
    pub fn new(score: f64) -> Self {
        Self {
            tier: Tier::from_score(score),
            score,
        }
    }

    pub fn colored(&self) -> ColoredString {
        let text = self.to_string();
        match self.tier {
            Tier::High => text.red().bold(),
            Tier::Medium => text.yellow().bold(),
            Tier::Low => text.green(),
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0 prints as 0
        let score = if self.score == 0.0 { 0.0 } else { self.score };
        write!(f, "{} ({})", self.tier, score)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub badge: Badge,
    pub meta: String,
    pub explanation: String,
}

impl Card {
    fn write_to(&self, f: &mut fmt::Formatter<'_>, badge: &dyn fmt::Display) -> fmt::Result {
        writeln!(f, "{}  [{}]", self.title, badge)?;
        write!(f, "  {}", self.meta)?;
        if !self.explanation.is_empty() {
            write!(f, "\n  {}", self.explanation)?;
        }
        Ok(())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, &self.badge)
    }
}

/// The contents of the results region.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Empty,
    Cards(Vec<Card>),
}

impl Rendered {
    pub fn cards(&self) -> &[Card] {
        match self {
            Rendered::Empty => &[],
            Rendered::Cards(cards) => cards,
        }
    }

    /// Same layout as `Display`, with badges coloured by tier.
    pub fn to_colored_string(&self) -> String {
        self.layout(true)
    }

    fn layout(&self, colored: bool) -> String {
        match self {
            Rendered::Empty => EMPTY_MESSAGE.to_string(),
            Rendered::Cards(cards) => cards
                .iter()
                .map(|card| {
                    if colored {
                        ColoredCard(card).to_string()
                    } else {
                        card.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.layout(false))
    }
}

struct ColoredCard<'a>(&'a Card);

impl fmt::Display for ColoredCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_to(f, &self.0.badge.colored())
    }
}

/// Builds one card per result, in the order given. `None` and an empty slice
/// both produce `Rendered::Empty`.
pub fn render(tasks: Option<&[TaskResult]>) -> Rendered {
    match tasks {
        Some(tasks) if !tasks.is_empty() => Rendered::Cards(tasks.iter().map(render_card).collect()),
        _ => Rendered::Empty,
    }
}

pub fn render_card(task: &TaskResult) -> Card {
    let title = task
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_TASK)
        .to_string();

    Card {
        title,
        badge: Badge::new(task.score),
        meta: meta_line(task),
        explanation: task.explanation.clone(),
    }
}

fn meta_line(task: &TaskResult) -> String {
    let due = task
        .due_date
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No due date");
    let in_cycle = if task.in_cycle { "Yes" } else { "No" };

    format!(
        "Due: {} | Importance: {} | Hours: {} | Dependencies: {} | Blocks: {} | In cycle: {}",
        due,
        display_scalar(task.importance.as_ref()),
        display_scalar(task.estimated_hours.as_ref()),
        task.dependencies.len(),
        task.dependents_count,
        in_cycle
    )
}

fn display_scalar(value: Option<&serde_json::Value>) -> String {
    value.map_or_else(|| "-".to_string(), display_value)
}
