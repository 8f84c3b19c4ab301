//! Task records.
//!
//! A [`Task`] is owned by the repository collaborator. Everything in this
//! workspace reads tasks; nothing here mutates one in place.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random `TaskId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Short title
    pub title: String,
    /// Free-form description
    pub description: String,
    /// Whether the task is completed
    pub is_completed: bool,
}

impl Task {
    /// Creates a new active task with a fresh identifier
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: description.into(),
            is_completed: false,
        }
    }

    /// Returns the task with its completion flag set to `completed`
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.is_completed = completed;
        self
    }

    /// Whether the task is still active (not completed)
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_completed
    }

    /// Title if present, otherwise the description
    #[must_use]
    pub fn title_for_list(&self) -> &str {
        if self.title.is_empty() {
            &self.description
        } else {
            &self.title
        }
    }
}
