//! Repository collaborator contract.
//!
//! View-models reach their tasks only through [`TasksRepository`]. Storage is
//! out of scope for this workspace; the testing crate ships an in-memory
//! implementation.

use crate::task::{Task, TaskId};
use thiserror::Error;

/// Errors reported by a tasks repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached or read
    #[error("Tasks unavailable: {0}")]
    Unavailable(String),

    /// No task exists with the given ID
    #[error("Task {0} not found")]
    NotFound(TaskId),
}

/// Source of task records.
///
/// Implementations must be `Send + Sync` so effects can call them from any
/// thread.
pub trait TasksRepository: Send + Sync {
    /// Returns every task
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] if the tasks cannot be loaded.
    fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Marks a task as completed
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown ID, or
    /// [`RepositoryError::Unavailable`] if the store cannot be written.
    fn complete_task(&self, id: &TaskId) -> Result<(), RepositoryError>;

    /// Marks a task as active again
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown ID, or
    /// [`RepositoryError::Unavailable`] if the store cannot be written.
    fn activate_task(&self, id: &TaskId) -> Result<(), RepositoryError>;

    /// Removes every completed task
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] if the store cannot be written.
    fn clear_completed_tasks(&self) -> Result<(), RepositoryError>;
}
