//! In-memory integration tests for recurring task materialization.

use super::helpers::{TaskHarness, harness};
use crate::test_helpers::utc;
use rstest::rstest;
use taskmill::task::{
    domain::{OwnerId, Recurrence, TaskPage, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn daily_task_spawns_pending_copies(harness: TaskHarness) -> Result<(), eyre::Report> {
    let owner = OwnerId::new();
    let original = harness
        .service
        .create_task(
            owner,
            CreateTaskRequest::new("Stand-up", "2024-03-15T09:30:00Z")
                .with_recurrence("daily")
                .with_location("Room 4"),
        )
        .await?;
    harness
        .service
        .update_task(original.id(), UpdateTaskRequest::new().with_status("Completed"))
        .await?;

    harness.clock.set(utc(2024, 3, 16, 0, 0));
    assert_eq!(harness.fire_triggers().await?, 1);
    harness.clock.set(utc(2024, 3, 17, 0, 0));
    assert_eq!(harness.fire_triggers().await?, 1);

    let tasks = harness
        .service
        .get_tasks_by_owner(owner, TaskPage::default())
        .await?;
    assert_eq!(tasks.len(), 3);

    let spawned: Vec<_> = tasks.iter().filter(|task| task.id() != original.id()).collect();
    assert_eq!(spawned.len(), 2);
    for task in &spawned {
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.name().as_str(), "Stand-up");
        assert_eq!(task.location(), Some("Room 4"));
        assert_eq!(task.recurrence(), Some(Recurrence::Daily));
    }
    let created_at: Vec<_> = spawned.iter().map(|task| task.created_at()).collect();
    assert_eq!(created_at, vec![utc(2024, 3, 16, 0, 0), utc(2024, 3, 17, 0, 0)]);

    assert_eq!(harness.scheduler.registrations()?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_the_original_keeps_its_trigger(harness: TaskHarness) -> Result<(), eyre::Report> {
    let owner = OwnerId::new();
    let original = harness
        .service
        .create_task(
            owner,
            CreateTaskRequest::new("Water plants", "2024-03-15").with_recurrence("weekly"),
        )
        .await?;
    harness.service.delete_task(original.id()).await?;

    assert_eq!(harness.fire_triggers().await?, 1);

    let tasks = harness
        .service
        .get_tasks_by_owner(owner, TaskPage::default())
        .await?;
    let [spawned] = tasks.as_slice() else {
        eyre::bail!("expected one spawned task, found {}", tasks.len());
    };
    assert_ne!(spawned.id(), original.id());
    assert_eq!(spawned.name().as_str(), "Water plants");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_recurrence_never_spawns(harness: TaskHarness) -> Result<(), eyre::Report> {
    let owner = OwnerId::new();
    harness
        .service
        .create_task(
            owner,
            CreateTaskRequest::new("Birthday", "2024-06-01").with_recurrence("yearly"),
        )
        .await?;

    assert_eq!(harness.fire_triggers().await?, 0);
    assert_eq!(harness.repository.len()?, 1);
    Ok(())
}
