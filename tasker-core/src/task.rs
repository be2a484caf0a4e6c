//! Task record and its status enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task. Any status may be set to any other at any
/// time; there is no enforced transition graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Committed,
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Committed => "committed",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Strict lookup by wire name. Callers that want a fallback use
    /// [`TaskStatus::parse_or_default`].
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "committed" => Some(TaskStatus::Committed),
            "in_progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            "cancelled" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }

    /// Lenient lookup for persisted data: unknown names degrade to
    /// `Committed` so an old or hand-edited file still loads.
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_default()
    }
}

/// A unit of tracked work.
///
/// `creation_date` is set once and never changes; `update_date` moves
/// only through [`crate::TaskOrganizer::update`]. Both are UTC at second
/// precision so the persisted form round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub notes: String,
    pub status: TaskStatus,
    pub creation_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip() {
        for status in [
            TaskStatus::Committed,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected_strictly_but_defaults_leniently() {
        assert_eq!(TaskStatus::parse("paused"), None);
        assert_eq!(TaskStatus::parse_or_default("paused"), TaskStatus::Committed);
        assert_eq!(TaskStatus::parse_or_default(""), TaskStatus::Committed);
    }
}
