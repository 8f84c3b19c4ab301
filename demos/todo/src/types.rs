//! Domain types for the Todo example.
//!
//! State and actions for the two screens of the app: the task list and the
//! statistics page. One-shot UI triggers are held as shared
//! [`SingleConsumptionEvent`]s so that republishing state never fires them
//! twice.

use composable_tasks_core::event::SingleConsumptionEvent;
use composable_tasks_core::repository::{RepositoryError, TasksRepository};
use composable_tasks_core::stats::{StatsResult, compute_stats};
use composable_tasks_core::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to a one-shot event
pub type TaskEvent<T> = Arc<SingleConsumptionEvent<T>>;

/// Creates a fresh one-shot event
#[must_use]
pub fn task_event<T>(payload: T) -> TaskEvent<T> {
    Arc::new(SingleConsumptionEvent::new(payload))
}

/// Environment dependencies shared by the Todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Where tasks come from
    pub repository: Arc<dyn TasksRepository>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(repository: Arc<dyn TasksRepository>) -> Self {
        Self { repository }
    }
}

/// Which tasks the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TasksFilterType {
    /// Every task
    #[default]
    AllTasks,
    /// Only tasks that are not completed
    ActiveTasks,
    /// Only completed tasks
    CompletedTasks,
}

impl TasksFilterType {
    /// Heading shown above the filtered list
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllTasks => "All Tasks",
            Self::ActiveTasks => "Active Tasks",
            Self::CompletedTasks => "Completed Tasks",
        }
    }

    /// Whether `task` passes this filter
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::AllTasks => true,
            Self::ActiveTasks => task.is_active(),
            Self::CompletedTasks => task.is_completed,
        }
    }
}

/// State of the task list screen
#[derive(Clone, Debug, Default)]
pub struct TasksState {
    /// Every task from the last successful load
    pub tasks: Vec<Task>,
    /// Current filter
    pub filtering: TasksFilterType,
    /// Whether the last load failed
    pub data_loading_error: bool,
    /// Request to open the add-task screen
    pub new_task_event: Option<TaskEvent<()>>,
    /// Request to open a task's detail screen
    pub open_task_event: Option<TaskEvent<TaskId>>,
    /// Transient message for the user
    pub snackbar_text: Option<TaskEvent<String>>,
}

impl TasksState {
    /// Tasks that pass the current filter
    #[must_use]
    pub fn items(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| self.filtering.matches(task))
            .cloned()
            .collect()
    }

    /// The add button is only offered on the unfiltered list
    #[must_use]
    pub fn tasks_add_view_visible(&self) -> bool {
        self.filtering == TasksFilterType::AllTasks
    }
}

/// Actions for the task list screen
#[derive(Clone, Debug)]
pub enum TasksAction {
    /// Fetch tasks from the repository
    LoadTasks,
    /// Result of a fetch
    TasksLoaded {
        /// Tasks, or why they could not be loaded
        result: Result<Vec<Task>, RepositoryError>,
    },
    /// Change the list filter
    SetFiltering(TasksFilterType),
    /// User pressed the add button
    AddNewTask,
    /// User tapped a task
    OpenTask(TaskId),
    /// User toggled a task's checkbox
    CompleteTask {
        /// Task to update
        id: TaskId,
        /// New completion state
        completed: bool,
    },
    /// User asked to drop every completed task
    ClearCompletedTasks,
    /// Show a transient message
    ShowSnackbarMessage(String),
}

/// State of the statistics screen
#[derive(Clone, Debug, Default)]
pub struct StatisticsState {
    /// Tasks from the last load, `None` if it failed or has not happened
    pub tasks: Option<Vec<Task>>,
    /// Whether the last load failed
    pub error: bool,
}

impl StatisticsState {
    /// Percentages for the current tasks; zero when unavailable
    #[must_use]
    pub fn stats(&self) -> StatsResult {
        compute_stats(self.tasks.as_deref())
    }

    /// No tasks to report on, including after a failed load
    #[must_use]
    pub fn empty(&self) -> bool {
        self.tasks.as_ref().is_none_or(Vec::is_empty)
    }
}

/// Actions for the statistics screen
#[derive(Clone, Debug)]
pub enum StatisticsAction {
    /// Reload tasks and recompute
    Refresh,
    /// Result of a load
    TasksLoaded(Result<Vec<Task>, RepositoryError>),
}
