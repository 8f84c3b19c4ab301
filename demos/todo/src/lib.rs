//! Todo example: task list and statistics screens as reducers.
//!
//! This example shows how view-models are built on the Composable Tasks
//! store. It demonstrates:
//!
//! - Repository access through `Effect::Run` with feedback actions
//! - Screen state exposed as observable values with `Store::bind`
//! - One-shot UI events that fire once even when republished
//! - Zero statistics when tasks cannot be loaded
//! - Testing with `ReducerTest` and `FakeTasksRepository`
//!
//! # Quick Start
//!
//! ```
//! use composable_tasks_core::task::Task;
//! use composable_tasks_testing::{FakeTasksRepository, ObservableValueExt};
//! use std::sync::Arc;
//! use todo::TasksViewModel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = FakeTasksRepository::new();
//! repository.add_tasks([Task::new("Buy milk", "Two litres")]);
//!
//! let view_model = TasksViewModel::new(Arc::new(repository))?;
//! assert_eq!(view_model.items().get_or_await_value()?.len(), 1);
//!
//! view_model.add_new_task()?;
//! let event = view_model.new_task_event().get_or_await_value()?;
//! assert!(event.consume_if_unhandled().is_some());
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;
pub mod view_model;

// Re-export commonly used types
pub use reducer::{StatisticsReducer, TasksReducer};
pub use types::{
    StatisticsAction, StatisticsState, TaskEvent, TasksAction, TasksFilterType, TasksState,
    TodoEnvironment,
};
pub use view_model::{StatisticsViewModel, TasksViewModel};
