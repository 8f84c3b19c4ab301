//! In-memory tasks repository
//!
//! [`FakeTasksRepository`] keeps tasks in insertion order and can be switched
//! into a failing mode to exercise the "data unavailable" paths of
//! view-models.

use composable_tasks_core::repository::{RepositoryError, TasksRepository};
use composable_tasks_core::task::{Task, TaskId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory repository for fast, deterministic tests.
///
/// Clones share the same storage, so a test can keep one handle for setup
/// while a view-model owns another.
///
/// # Example
///
/// ```
/// use composable_tasks_testing::FakeTasksRepository;
/// use composable_tasks_core::repository::TasksRepository;
/// use composable_tasks_core::task::Task;
///
/// let repository = FakeTasksRepository::new();
/// repository.add_tasks([
///     Task::new("Title1", "Description1"),
///     Task::new("Title2", "Description2").with_completed(true),
/// ]);
///
/// assert_eq!(repository.get_tasks().unwrap().len(), 2);
///
/// repository.set_return_error(true);
/// assert!(repository.get_tasks().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FakeTasksRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
    return_error: Arc<AtomicBool>,
}

impl FakeTasksRepository {
    /// Create a new empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert tasks, replacing any existing task with the same ID
    pub fn add_tasks(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut stored = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        for task in tasks {
            match stored.iter_mut().find(|t| t.id == task.id) {
                Some(existing) => *existing = task,
                None => stored.push(task),
            }
        }
    }

    /// Make every subsequent call fail with [`RepositoryError::Unavailable`]
    pub fn set_return_error(&self, value: bool) {
        self.return_error.store(value, Ordering::SeqCst);
    }

    /// Number of stored tasks, ignoring the error switch
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the repository holds no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.return_error.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("Test exception".to_string()));
        }
        Ok(())
    }

    fn set_completed(&self, id: &TaskId, completed: bool) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut stored = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        let task = stored
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| RepositoryError::NotFound(*id))?;
        task.is_completed = completed;
        Ok(())
    }
}

impl TasksRepository for FakeTasksRepository {
    fn get_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        self.check_available()?;
        Ok(self.tasks.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn complete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.set_completed(id, true)
    }

    fn activate_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.set_completed(id, false)
    }

    fn clear_completed_tasks(&self) -> Result<(), RepositoryError> {
        self.check_available()?;
        self.tasks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(Task::is_active);
        Ok(())
    }
}
