use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Todo;

/// Which todos a list view shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// The todos this filter lets through, in collection order.
    pub fn apply(self, todos: &[Todo]) -> Vec<&Todo> {
        todos.iter().filter(|t| self.matches(t)).collect()
    }

    /// Cycle to the next filter
    pub fn next(self) -> Self {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" | "open" | "pending" => Ok(Filter::Active),
            "completed" | "complete" | "done" => Ok(Filter::Completed),
            other => Err(format!(
                "unknown filter '{other}' (expected all, active or completed)"
            )),
        }
    }
}
