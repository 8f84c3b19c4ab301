//! View-models for the Todo screens.
//!
//! Each view-model owns a [`Store`] and exposes slices of its state as
//! [`ObservableValue`]s via [`Store::bind`]. Commands are plain `send`s.

use crate::reducer::{StatisticsReducer, TasksReducer};
use crate::types::{
    StatisticsAction, StatisticsState, TaskEvent, TasksAction, TasksFilterType, TasksState,
    TodoEnvironment,
};
use composable_tasks_core::observable::ObservableValue;
use composable_tasks_core::repository::TasksRepository;
use composable_tasks_core::task::{Task, TaskId};
use composable_tasks_runtime::{Store, StoreError};
use std::sync::Arc;

type TasksStore = Store<TasksState, TasksAction, TodoEnvironment, TasksReducer>;
type StatisticsStore = Store<StatisticsState, StatisticsAction, TodoEnvironment, StatisticsReducer>;

/// View-model behind the task list screen
pub struct TasksViewModel {
    store: TasksStore,
    items: ObservableValue<Vec<Task>>,
    data_loading_error: ObservableValue<bool>,
    new_task_event: ObservableValue<TaskEvent<()>>,
    open_task_event: ObservableValue<TaskEvent<TaskId>>,
    snackbar_text: ObservableValue<TaskEvent<String>>,
    tasks_add_view_visible: ObservableValue<bool>,
    current_filtering_label: ObservableValue<&'static str>,
}

impl TasksViewModel {
    /// Creates the view-model, showing all tasks, and loads them
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the initial load does not settle.
    pub fn new(repository: Arc<dyn TasksRepository>) -> Result<Self, StoreError> {
        let store = Store::new(
            TasksState::default(),
            TasksReducer::new(),
            TodoEnvironment::new(repository),
        );

        let view_model = Self {
            items: store.bind(|s| Some(s.items())),
            data_loading_error: store.bind(|s| Some(s.data_loading_error)),
            new_task_event: store.bind(|s| s.new_task_event.clone()),
            open_task_event: store.bind(|s| s.open_task_event.clone()),
            snackbar_text: store.bind(|s| s.snackbar_text.clone()),
            tasks_add_view_visible: store.bind(|s| Some(s.tasks_add_view_visible())),
            current_filtering_label: store.bind(|s| Some(s.filtering.label())),
            store,
        };

        view_model.set_filtering(TasksFilterType::AllTasks)?;
        view_model.load_tasks()?;
        Ok(view_model)
    }

    /// Reloads tasks from the repository
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn load_tasks(&self) -> Result<(), StoreError> {
        self.store.send(TasksAction::LoadTasks)
    }

    /// Changes which tasks are listed
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn set_filtering(&self, filtering: TasksFilterType) -> Result<(), StoreError> {
        self.store.send(TasksAction::SetFiltering(filtering))
    }

    /// Asks the UI to open the add-task screen
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn add_new_task(&self) -> Result<(), StoreError> {
        self.store.send(TasksAction::AddNewTask)
    }

    /// Asks the UI to open a task's details
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn open_task(&self, id: TaskId) -> Result<(), StoreError> {
        self.store.send(TasksAction::OpenTask(id))
    }

    /// Marks `task` completed or active
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn complete_task(&self, task: &Task, completed: bool) -> Result<(), StoreError> {
        self.store.send(TasksAction::CompleteTask {
            id: task.id,
            completed,
        })
    }

    /// Removes every completed task
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn clear_completed_tasks(&self) -> Result<(), StoreError> {
        self.store.send(TasksAction::ClearCompletedTasks)
    }

    /// Tasks passing the current filter
    #[must_use]
    pub const fn items(&self) -> &ObservableValue<Vec<Task>> {
        &self.items
    }

    /// Whether the last load failed
    #[must_use]
    pub const fn data_loading_error(&self) -> &ObservableValue<bool> {
        &self.data_loading_error
    }

    /// One-shot request to open the add-task screen
    #[must_use]
    pub const fn new_task_event(&self) -> &ObservableValue<TaskEvent<()>> {
        &self.new_task_event
    }

    /// One-shot request to open a task
    #[must_use]
    pub const fn open_task_event(&self) -> &ObservableValue<TaskEvent<TaskId>> {
        &self.open_task_event
    }

    /// One-shot message for the user
    #[must_use]
    pub const fn snackbar_text(&self) -> &ObservableValue<TaskEvent<String>> {
        &self.snackbar_text
    }

    /// Whether the add button is shown
    #[must_use]
    pub const fn tasks_add_view_visible(&self) -> &ObservableValue<bool> {
        &self.tasks_add_view_visible
    }

    /// Heading for the current filter
    #[must_use]
    pub const fn current_filtering_label(&self) -> &ObservableValue<&'static str> {
        &self.current_filtering_label
    }
}

/// View-model behind the statistics screen
pub struct StatisticsViewModel {
    store: StatisticsStore,
    active_tasks_percent: ObservableValue<f32>,
    completed_tasks_percent: ObservableValue<f32>,
    error: ObservableValue<bool>,
    empty: ObservableValue<bool>,
}

impl StatisticsViewModel {
    /// Creates the view-model and computes the first statistics
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the initial load does not settle.
    pub fn new(repository: Arc<dyn TasksRepository>) -> Result<Self, StoreError> {
        let store = Store::new(
            StatisticsState::default(),
            StatisticsReducer::new(),
            TodoEnvironment::new(repository),
        );

        let view_model = Self {
            active_tasks_percent: store.bind(|s| Some(s.stats().active_tasks_percent)),
            completed_tasks_percent: store.bind(|s| Some(s.stats().completed_tasks_percent)),
            error: store.bind(|s| Some(s.error)),
            empty: store.bind(|s| Some(s.empty())),
            store,
        };

        view_model.refresh()?;
        Ok(view_model)
    }

    /// Reloads tasks and recomputes the percentages
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the feedback loop does not settle.
    pub fn refresh(&self) -> Result<(), StoreError> {
        self.store.send(StatisticsAction::Refresh)
    }

    /// Share of tasks still open
    #[must_use]
    pub const fn active_tasks_percent(&self) -> &ObservableValue<f32> {
        &self.active_tasks_percent
    }

    /// Share of tasks done
    #[must_use]
    pub const fn completed_tasks_percent(&self) -> &ObservableValue<f32> {
        &self.completed_tasks_percent
    }

    /// Whether the last load failed
    #[must_use]
    pub const fn error(&self) -> &ObservableValue<bool> {
        &self.error
    }

    /// No tasks to report on
    #[must_use]
    pub const fn empty(&self) -> &ObservableValue<bool> {
        &self.empty
    }
}
