//! Todo entries referenced by task-kind scheduled items.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo owned by the repository.
///
/// Task items only hold its id; title and completion state are resolved
/// through [`ScheduleRepository::todo_by_id`](crate::storage::ScheduleRepository::todo_by_id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due: Option<NaiveDateTime>,
    #[serde(default)]
    pub done: bool,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(id: impl Into<String>, title: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            due: None,
            done: false,
            owner_id: owner_id.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due(mut self, due: NaiveDateTime) -> Self {
        self.due = Some(due);
        self
    }

    /// Mark as done
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}
