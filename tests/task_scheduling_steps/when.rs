//! When steps for task scheduling BDD scenarios.

use super::world::{TaskSchedulingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskmill::task::domain::parse_scheduled_at;

#[when(r#"the clock moves to "{instant}""#)]
fn clock_moves_to(world: &mut TaskSchedulingWorld, instant: String) -> Result<(), eyre::Report> {
    world.clock.set(parse_scheduled_at(&instant)?);
    Ok(())
}

#[when("the overdue sweep runs")]
fn overdue_sweep_runs(world: &mut TaskSchedulingWorld) -> Result<(), eyre::Report> {
    let report = run_async(world.service.mark_overdue_tasks_as_cancelled())
        .wrap_err("run overdue sweep")?;
    world.last_report = Some(report);
    Ok(())
}

#[when("the recurring triggers fire")]
fn recurring_triggers_fire(world: &mut TaskSchedulingWorld) -> Result<(), eyre::Report> {
    run_async(world.scheduler.fire_all(&world.spawner)).wrap_err("fire recurring triggers")?;
    Ok(())
}

#[when(r#"task "{name}" is deleted"#)]
fn task_is_deleted(world: &mut TaskSchedulingWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    run_async(world.service.delete_task(task_id)).wrap_err("delete task")?;
    Ok(())
}
