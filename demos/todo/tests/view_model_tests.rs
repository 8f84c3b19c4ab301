//! Integration tests for the Todo view-models
//!
//! The tasks view-model runs against a [`FakeTasksRepository`] seeded with one
//! active and two completed tasks.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use composable_tasks_core::repository::TasksRepository;
use composable_tasks_core::task::Task;
use composable_tasks_testing::{FakeTasksRepository, ObservableValueExt, init_test_tracing};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use todo::reducer::{COMPLETED_TASKS_CLEARED, TASK_MARKED_ACTIVE, TASK_MARKED_COMPLETE};
use todo::{StatisticsViewModel, TasksFilterType, TasksViewModel};

// ============================================================================
// Test Fixtures
// ============================================================================

fn seeded_repository() -> FakeTasksRepository {
    init_test_tracing();
    let repository = FakeTasksRepository::new();
    repository.add_tasks([
        Task::new("Title1", "Description1"),
        Task::new("Title2", "Description2").with_completed(true),
        Task::new("Title3", "Description3").with_completed(true),
    ]);
    repository
}

fn tasks_view_model(repository: &FakeTasksRepository) -> TasksViewModel {
    TasksViewModel::new(Arc::new(repository.clone())).unwrap()
}

fn snackbar_message(view_model: &TasksViewModel) -> String {
    let event = view_model.snackbar_text().get_or_await_value().unwrap();
    event.consume_if_unhandled().cloned().expect("snackbar already shown")
}

// ============================================================================
// Tasks view-model
// ============================================================================

#[test]
fn add_new_task_sets_new_task_event() {
    let view_model = tasks_view_model(&seeded_repository());

    view_model.add_new_task().unwrap();

    let value = view_model.new_task_event().get_or_await_value().unwrap();
    assert!(value.consume_if_unhandled().is_some());
}

#[test]
fn add_new_task_event_fires_once_across_watchers() {
    let view_model = tasks_view_model(&seeded_repository());
    let fired = Arc::new(AtomicUsize::new(0));

    let guards: Vec<_> = (0..3)
        .map(|_| {
            let fired = Arc::clone(&fired);
            view_model.new_task_event().watch(move |event| {
                if event.consume_if_unhandled().is_some() {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    view_model.add_new_task().unwrap();
    // Unrelated sends republish the same event
    view_model.set_filtering(TasksFilterType::ActiveTasks).unwrap();
    view_model.load_tasks().unwrap();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    drop(guards);
    assert_eq!(view_model.new_task_event().watcher_count(), 0);
}

#[test]
fn set_filtering_all_tasks_shows_add_view() {
    let view_model = tasks_view_model(&seeded_repository());

    view_model.set_filtering(TasksFilterType::AllTasks).unwrap();

    assert_eq!(view_model.tasks_add_view_visible().get_or_await_value(), Ok(true));
}

#[test]
fn set_filtering_all_tasks_shows_add_view_with_watcher() {
    let view_model = tasks_view_model(&seeded_repository());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let guard = view_model
        .tasks_add_view_visible()
        .watch(move |visible: &bool| sink.lock().unwrap().push(*visible));

    view_model.set_filtering(TasksFilterType::AllTasks).unwrap();

    assert_eq!(view_model.tasks_add_view_visible().get_or_await_value(), Ok(true));
    assert_eq!(seen.lock().unwrap().last(), Some(&true));
    drop(guard);
}

#[test]
fn filtering_changes_items_and_label() {
    let view_model = tasks_view_model(&seeded_repository());
    assert_eq!(view_model.items().get_or_await_value().unwrap().len(), 3);

    view_model.set_filtering(TasksFilterType::ActiveTasks).unwrap();
    assert_eq!(view_model.items().get_or_await_value().unwrap().len(), 1);
    assert_eq!(
        view_model.current_filtering_label().get_or_await_value(),
        Ok("Active Tasks")
    );
    assert_eq!(view_model.tasks_add_view_visible().get_or_await_value(), Ok(false));

    view_model.set_filtering(TasksFilterType::CompletedTasks).unwrap();
    assert_eq!(view_model.items().get_or_await_value().unwrap().len(), 2);
    assert_eq!(
        view_model.current_filtering_label().get_or_await_value(),
        Ok("Completed Tasks")
    );
}

#[test]
fn load_failure_sets_error_and_empties_items() {
    let repository = seeded_repository();
    let view_model = tasks_view_model(&repository);

    repository.set_return_error(true);
    view_model.load_tasks().unwrap();

    assert_eq!(view_model.data_loading_error().get_or_await_value(), Ok(true));
    assert!(view_model.items().get_or_await_value().unwrap().is_empty());

    repository.set_return_error(false);
    view_model.load_tasks().unwrap();
    assert_eq!(view_model.data_loading_error().get_or_await_value(), Ok(false));
}

#[test]
fn open_task_sets_open_task_event() {
    let repository = seeded_repository();
    let view_model = tasks_view_model(&repository);
    let task = view_model.items().get_or_await_value().unwrap()[0].clone();

    view_model.open_task(task.id).unwrap();

    let event = view_model.open_task_event().get_or_await_value().unwrap();
    assert_eq!(event.consume_if_unhandled(), Some(&task.id));
}

#[test]
fn complete_task_shows_snackbar_and_updates_repository() {
    let repository = seeded_repository();
    let view_model = tasks_view_model(&repository);
    let active = Task::new("Title4", "Description4");
    repository.add_tasks([active.clone()]);

    view_model.complete_task(&active, true).unwrap();

    assert_eq!(snackbar_message(&view_model), TASK_MARKED_COMPLETE);
    let items = view_model.items().get_or_await_value().unwrap();
    assert!(items.iter().any(|t| t.id == active.id && t.is_completed));
}

#[test]
fn activate_task_shows_snackbar() {
    let repository = seeded_repository();
    let view_model = tasks_view_model(&repository);
    let completed = repository.get_tasks().unwrap()[1].clone();

    view_model.complete_task(&completed, false).unwrap();

    assert_eq!(snackbar_message(&view_model), TASK_MARKED_ACTIVE);
}

#[test]
fn clear_completed_tasks_shows_snackbar_and_reloads() {
    let repository = seeded_repository();
    let view_model = tasks_view_model(&repository);

    view_model.clear_completed_tasks().unwrap();

    assert_eq!(snackbar_message(&view_model), COMPLETED_TASKS_CLEARED);
    assert_eq!(view_model.items().get_or_await_value().unwrap().len(), 1);
    assert_eq!(repository.len(), 1);
}

// ============================================================================
// Statistics view-model
// ============================================================================

#[test]
fn statistics_reports_percentages() {
    let repository = seeded_repository();
    repository.add_tasks([
        Task::new("Title4", "Description4"),
        Task::new("Title5", "Description5"),
    ]);

    let view_model = StatisticsViewModel::new(Arc::new(repository)).unwrap();

    assert_eq!(view_model.active_tasks_percent().get_or_await_value(), Ok(60.0));
    assert_eq!(view_model.completed_tasks_percent().get_or_await_value(), Ok(40.0));
    assert_eq!(view_model.empty().get_or_await_value(), Ok(false));
}

#[test]
fn statistics_error_reports_zero() {
    let repository = seeded_repository();
    repository.set_return_error(true);

    let view_model = StatisticsViewModel::new(Arc::new(repository)).unwrap();

    assert_eq!(view_model.error().get_or_await_value(), Ok(true));
    assert_eq!(view_model.empty().get_or_await_value(), Ok(true));
    assert_eq!(view_model.active_tasks_percent().get_or_await_value(), Ok(0.0));
    assert_eq!(view_model.completed_tasks_percent().get_or_await_value(), Ok(0.0));
}

#[test]
fn statistics_refresh_recovers_after_error() {
    let repository = seeded_repository();
    repository.set_return_error(true);
    let view_model = StatisticsViewModel::new(Arc::new(repository.clone())).unwrap();

    repository.set_return_error(false);
    view_model.refresh().unwrap();

    assert_eq!(view_model.error().get_or_await_value(), Ok(false));
    let completed = view_model.completed_tasks_percent().get_or_await_value().unwrap();
    assert!((completed - 200.0 / 3.0).abs() < 1e-3);
}

#[test]
fn statistics_with_no_tasks_is_empty() {
    init_test_tracing();
    let view_model = StatisticsViewModel::new(Arc::new(FakeTasksRepository::new())).unwrap();

    assert_eq!(view_model.empty().get_or_await_value(), Ok(true));
    assert_eq!(view_model.error().get_or_await_value(), Ok(false));
    assert_eq!(view_model.active_tasks_percent().get_or_await_value(), Ok(0.0));
}
