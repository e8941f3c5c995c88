//! Given steps for task scheduling BDD scenarios.

use super::world::{TaskSchedulingWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmill::task::{domain::parse_scheduled_at, services::CreateTaskRequest};

fn create_named(
    world: &mut TaskSchedulingWorld,
    name: String,
    request: CreateTaskRequest,
) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_task(world.owner, request))
        .wrap_err_with(|| format!("create task {name:?} for scenario"))?;
    world.tasks_by_name.insert(name, created.id());
    Ok(())
}

#[given(r#"the current time is "{instant}""#)]
fn current_time_is(world: &mut TaskSchedulingWorld, instant: String) -> Result<(), eyre::Report> {
    world.clock.set(parse_scheduled_at(&instant)?);
    Ok(())
}

#[given(r#"a task "{name}" scheduled for "{date}""#)]
fn pending_task(
    world: &mut TaskSchedulingWorld,
    name: String,
    date: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(name.clone(), date);
    create_named(world, name, request)
}

#[given(r#"a "{status}" task "{name}" scheduled for "{date}""#)]
fn task_with_status(
    world: &mut TaskSchedulingWorld,
    status: String,
    name: String,
    date: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(name.clone(), date).with_status(status);
    create_named(world, name, request)
}

#[given(r#"a "{recurrence}" recurring task "{name}" scheduled for "{date}""#)]
fn recurring_task(
    world: &mut TaskSchedulingWorld,
    recurrence: String,
    name: String,
    date: String,
) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(name.clone(), date).with_recurrence(recurrence);
    create_named(world, name, request)
}
