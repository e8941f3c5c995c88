//! Then steps for task scheduling BDD scenarios.

use super::world::{TaskSchedulingWorld, run_async};
use rstest_bdd_macros::then;
use taskmill::task::domain::{Task, TaskPage, TaskStatus};

fn owner_tasks(world: &TaskSchedulingWorld) -> Result<Vec<Task>, eyre::Report> {
    let page = TaskPage::new(1, 100)?;
    Ok(run_async(
        world.service.get_tasks_by_owner(world.owner, page),
    )?)
}

#[then(r#"task "{name}" has status "{status}""#)]
fn task_has_status(
    world: &TaskSchedulingWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = run_async(world.service.get_task_by_id(world.task_id(&name)?))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected {name:?} to be {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("the last sweep cancelled {count:usize} tasks")]
fn last_sweep_cancelled(world: &TaskSchedulingWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no sweep has run in this scenario"))?;
    eyre::ensure!(
        report.cancelled().len() == count,
        "expected {count} cancellations, found {}",
        report.cancelled().len()
    );
    eyre::ensure!(report.failures().is_empty(), "sweep reported failures");
    Ok(())
}

#[then("{count:usize} triggers are registered")]
fn triggers_registered(world: &TaskSchedulingWorld, count: usize) -> Result<(), eyre::Report> {
    let registered = world.scheduler.registrations()?.len();
    eyre::ensure!(
        registered == count,
        "expected {count} triggers, found {registered}"
    );
    Ok(())
}

#[then("the owner has {count:usize} tasks")]
fn owner_has_tasks(world: &TaskSchedulingWorld, count: usize) -> Result<(), eyre::Report> {
    let found = owner_tasks(world)?.len();
    eyre::ensure!(found == count, "expected {count} tasks, found {found}");
    Ok(())
}

#[then(r#"{count:usize} pending copies of "{name}" were spawned"#)]
fn pending_copies_spawned(
    world: &TaskSchedulingWorld,
    count: usize,
    name: String,
) -> Result<(), eyre::Report> {
    let original = world.task_id(&name)?;
    let copies = owner_tasks(world)?
        .into_iter()
        .filter(|task| task.id() != original && task.name().as_str() == name)
        .filter(|task| task.status() == TaskStatus::Pending)
        .count();
    eyre::ensure!(copies == count, "expected {count} copies of {name:?}, found {copies}");
    Ok(())
}
