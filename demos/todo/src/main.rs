//! Simple CLI demo for the todo example.
//!
//! Drives both view-models against an in-memory repository and prints what a
//! UI bound to their observable values would show. Set `RUST_LOG=debug` to
//! follow the store.

use composable_tasks_core::task::Task;
use composable_tasks_testing::{FakeTasksRepository, ObservableValueExt};
use std::sync::Arc;
use todo::{StatisticsViewModel, TasksFilterType, TasksViewModel};
use tracing_subscriber::EnvFilter;

fn print_items(view_model: &TasksViewModel) -> anyhow::Result<()> {
    let label = view_model.current_filtering_label().get_or_await_value()?;
    let items = view_model.items().get_or_await_value()?;
    println!("\n{label} ({})", items.len());
    for task in &items {
        let status = if task.is_completed { "✓" } else { " " };
        println!("  [{status}] {}", task.title_for_list());
    }
    Ok(())
}

fn print_stats(repository: &FakeTasksRepository) -> anyhow::Result<()> {
    let statistics = StatisticsViewModel::new(Arc::new(repository.clone()))?;
    if statistics.error().get_or_await_value()? {
        println!("\nStatistics unavailable");
    }
    println!(
        "\nActive: {:.1}%  Completed: {:.1}%",
        statistics.active_tasks_percent().get_or_await_value()?,
        statistics.completed_tasks_percent().get_or_await_value()?,
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Todo Example ===");

    let repository = FakeTasksRepository::new();
    let milk = Task::new("Buy milk", "Two litres");
    let docs = Task::new("Write documentation", "");
    let deploy = Task::new("Deploy to production", "After review");
    repository.add_tasks([milk.clone(), docs, deploy]);

    let tasks = TasksViewModel::new(Arc::new(repository.clone()))?;

    // Two screens watch the same snackbar; each message is shown once.
    let _snackbar_guards: Vec<_> = ["list", "overlay"]
        .into_iter()
        .map(|screen| {
            tasks.snackbar_text().watch(move |event| {
                if let Some(text) = event.consume_if_unhandled() {
                    println!("  <{screen}> snackbar: {text}");
                }
            })
        })
        .collect();

    print_items(&tasks)?;

    println!("\nCompleting '{}'...", milk.title);
    tasks.complete_task(&milk, true)?;
    print_items(&tasks)?;

    tasks.set_filtering(TasksFilterType::ActiveTasks)?;
    print_items(&tasks)?;
    println!(
        "Add button visible: {}",
        tasks.tasks_add_view_visible().get_or_await_value()?
    );

    print_stats(&repository)?;

    println!("\nClearing completed tasks...");
    tasks.set_filtering(TasksFilterType::AllTasks)?;
    tasks.clear_completed_tasks()?;
    print_items(&tasks)?;

    tasks.add_new_task()?;
    let event = tasks.new_task_event().get_or_await_value()?;
    if event.consume_if_unhandled().is_some() {
        println!("\nOpening the add-task screen");
    }
    if event.consume_if_unhandled().is_none() {
        println!("Redelivered event ignored");
    }

    repository.set_return_error(true);
    print_stats(&repository)?;

    println!("\n=== Demo Complete ===");
    Ok(())
}
