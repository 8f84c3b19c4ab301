//! Reducer logic for the Todo screens.
//!
//! State changes happen here; anything touching the repository is returned as
//! an [`Effect::Run`] whose result comes back as a `*Loaded` action or a
//! snackbar message.

use crate::types::{
    StatisticsAction, StatisticsState, TasksAction, TasksState, TodoEnvironment, task_event,
};
use composable_tasks_core::repository::TasksRepository;
use composable_tasks_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Snackbar text after a task is checked
pub const TASK_MARKED_COMPLETE: &str = "Task marked complete";
/// Snackbar text after a task is unchecked
pub const TASK_MARKED_ACTIVE: &str = "Task marked active";
/// Snackbar text after completed tasks are removed
pub const COMPLETED_TASKS_CLEARED: &str = "Completed tasks cleared";

fn load_tasks(repository: Arc<dyn TasksRepository>) -> Effect<TasksAction> {
    Effect::run(move || {
        Some(TasksAction::TasksLoaded {
            result: repository.get_tasks(),
        })
    })
}

/// Reducer for the task list screen
#[derive(Clone, Debug, Default)]
pub struct TasksReducer;

impl TasksReducer {
    /// Creates a new `TasksReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TasksReducer {
    type State = TasksState;
    type Action = TasksAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TasksAction::LoadTasks => smallvec![load_tasks(Arc::clone(&env.repository))],

            TasksAction::TasksLoaded { result } => {
                match result {
                    Ok(tasks) => {
                        tracing::debug!(count = tasks.len(), "Tasks loaded");
                        state.tasks = tasks;
                        state.data_loading_error = false;
                    },
                    Err(error) => {
                        tracing::warn!(%error, "Failed to load tasks");
                        state.tasks.clear();
                        state.data_loading_error = true;
                    },
                }
                SmallVec::new()
            },

            TasksAction::SetFiltering(filtering) => {
                state.filtering = filtering;
                SmallVec::new()
            },

            TasksAction::AddNewTask => {
                state.new_task_event = Some(task_event(()));
                SmallVec::new()
            },

            TasksAction::OpenTask(id) => {
                state.open_task_event = Some(task_event(id));
                SmallVec::new()
            },

            TasksAction::CompleteTask { id, completed } => {
                let repository = Arc::clone(&env.repository);
                let mutation = Effect::run(move || {
                    let result = if completed {
                        repository.complete_task(&id)
                    } else {
                        repository.activate_task(&id)
                    };
                    let message = match result {
                        Ok(()) if completed => TASK_MARKED_COMPLETE.to_string(),
                        Ok(()) => TASK_MARKED_ACTIVE.to_string(),
                        Err(error) => {
                            tracing::warn!(%error, %id, "Failed to update task");
                            error.to_string()
                        },
                    };
                    Some(TasksAction::ShowSnackbarMessage(message))
                });
                smallvec![Effect::chain(vec![
                    mutation,
                    load_tasks(Arc::clone(&env.repository)),
                ])]
            },

            TasksAction::ClearCompletedTasks => {
                let repository = Arc::clone(&env.repository);
                let mutation = Effect::run(move || {
                    let message = match repository.clear_completed_tasks() {
                        Ok(()) => COMPLETED_TASKS_CLEARED.to_string(),
                        Err(error) => {
                            tracing::warn!(%error, "Failed to clear completed tasks");
                            error.to_string()
                        },
                    };
                    Some(TasksAction::ShowSnackbarMessage(message))
                });
                smallvec![Effect::chain(vec![
                    mutation,
                    load_tasks(Arc::clone(&env.repository)),
                ])]
            },

            TasksAction::ShowSnackbarMessage(message) => {
                state.snackbar_text = Some(task_event(message));
                SmallVec::new()
            },
        }
    }
}

/// Reducer for the statistics screen
#[derive(Clone, Debug, Default)]
pub struct StatisticsReducer;

impl StatisticsReducer {
    /// Creates a new `StatisticsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for StatisticsReducer {
    type State = StatisticsState;
    type Action = StatisticsAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StatisticsAction::Refresh => {
                let repository = Arc::clone(&env.repository);
                smallvec![Effect::run(move || {
                    Some(StatisticsAction::TasksLoaded(repository.get_tasks()))
                })]
            },
            StatisticsAction::TasksLoaded(result) => {
                state.error = result.is_err();
                state.tasks = result
                    .inspect_err(|error| {
                        tracing::warn!(%error, "Statistics unavailable, reporting zero");
                    })
                    .ok();
                SmallVec::new()
            },
        }
    }
}
