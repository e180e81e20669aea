//! Todo lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which lifecycle phase a todo is in.
///
/// State transitions:
/// ```text
/// Active ──complete──► Completed
///   ▲                      │
///   └───────reopen─────────┘
///
/// Active | Completed ──archive──► Archived (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoStatus {
    Active,
    Completed,
    Archived,
}

impl TodoStatus {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TodoStatus::Archived)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Active => "Active",
            TodoStatus::Completed => "Completed",
            TodoStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
