//! In-memory integration tests for the overdue sweep.

use super::helpers::{TaskHarness, harness};
use crate::test_helpers::utc;
use rstest::rstest;
use taskmill::task::{
    domain::{OwnerId, TaskStatus},
    services::{CreateTaskRequest, OverdueSweepLoop, SweepConfig},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_cancels_overdue_tasks_across_owners(
    harness: TaskHarness,
) -> Result<(), eyre::Report> {
    harness.clock.set(utc(2024, 3, 1, 9, 0));
    let first = harness
        .service
        .create_task(OwnerId::new(), CreateTaskRequest::new("A", "2024-03-14"))
        .await?;
    let second = harness
        .service
        .create_task(OwnerId::new(), CreateTaskRequest::new("B", "2024-03-10"))
        .await?;
    let in_progress = harness
        .service
        .create_task(
            OwnerId::new(),
            CreateTaskRequest::new("C", "2024-03-10").with_status("In Progress"),
        )
        .await?;

    harness.clock.set(utc(2024, 3, 15, 12, 0));
    let report = harness.service.mark_overdue_tasks_as_cancelled().await?;

    let mut cancelled = report.cancelled().to_vec();
    cancelled.sort();
    let mut expected = vec![first.id(), second.id()];
    expected.sort();
    assert_eq!(cancelled, expected);
    assert!(report.failures().is_empty());

    let untouched = harness.service.get_task_by_id(in_progress.id()).await?;
    assert_eq!(untouched.status(), TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn spawned_copies_become_overdue_too(harness: TaskHarness) -> Result<(), eyre::Report> {
    harness
        .service
        .create_task(
            OwnerId::new(),
            CreateTaskRequest::new("Stretch", "2024-03-20")
                .with_recurrence("daily")
                .with_status("Completed"),
        )
        .await?;
    harness.fire_triggers().await?;

    harness.clock.set(utc(2024, 3, 21, 0, 0));
    let sweep = OverdueSweepLoop::new(harness.service.clone(), SweepConfig::default());
    assert_eq!(sweep.tick().await, Some(1));
    assert_eq!(sweep.tick().await, Some(0));
    Ok(())
}
