//! Task completion statistics.
//!
//! An absent task list means the upstream load failed. Statistics degrade to
//! zero in that case instead of surfacing an error, and the same holds for an
//! empty list.

use crate::task::Task;
use serde::{Deserialize, Serialize};

/// Active and completed percentages for a set of tasks
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    /// Share of tasks that are still active, in `[0, 100]`
    pub active_tasks_percent: f32,
    /// Share of tasks that are completed, in `[0, 100]`
    pub completed_tasks_percent: f32,
}

impl StatsResult {
    /// Result for an empty or unavailable task list
    pub const ZERO: Self = Self {
        active_tasks_percent: 0.0,
        completed_tasks_percent: 0.0,
    };
}

/// Computes the active and completed percentages of `tasks`.
///
/// `None` and an empty slice both yield [`StatsResult::ZERO`].
///
/// # Example
///
/// ```
/// use composable_tasks_core::stats::compute_stats;
/// use composable_tasks_core::task::Task;
///
/// let tasks = vec![
///     Task::new("Title", "desc").with_completed(true),
///     Task::new("Title", "desc"),
/// ];
/// let result = compute_stats(Some(&tasks));
/// assert_eq!(result.completed_tasks_percent, 50.0);
/// assert_eq!(result.active_tasks_percent, 50.0);
/// ```
#[must_use]
// Task counts far below 2^24 convert to f32 exactly
#[allow(clippy::cast_precision_loss)]
pub fn compute_stats(tasks: Option<&[Task]>) -> StatsResult {
    let Some(tasks) = tasks.filter(|tasks| !tasks.is_empty()) else {
        return StatsResult::ZERO;
    };

    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.is_completed).count();
    let active = total - completed;

    StatsResult {
        active_tasks_percent: 100.0 * active as f32 / total as f32,
        completed_tasks_percent: 100.0 * completed as f32 / total as f32,
    }
}
