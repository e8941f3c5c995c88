//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskPatchChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        OwnerId, PersistedTaskData, Recurrence, Task, TaskDescription, TaskId, TaskName, TaskPage,
        TaskPatch, TaskPriority, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_fields(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let changeset = to_changeset(patch, updated_at);

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = diesel::delete(tasks::table.find(id.into_inner()))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_owner(
        &self,
        owner_id: OwnerId,
        page: TaskPage,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let offset = i64::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = i64::from(page.limit());

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner_id.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .offset(offset)
                .limit(limit)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_overdue(&self, now: DateTime<Utc>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .filter(tasks::scheduled_at.lt(now))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        name: task.name().as_str().to_owned(),
        description: task.description().map(|value| value.as_str().to_owned()),
        scheduled_at: task.scheduled_at(),
        status: task.status().as_str().to_owned(),
        location: task.location().map(ToOwned::to_owned),
        recurrence: task.recurrence().map(|value| value.as_str().to_owned()),
        priority: task.priority().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskPatchChangeset {
    TaskPatchChangeset {
        name: patch.name.as_ref().map(|value| value.as_str().to_owned()),
        description: patch
            .description
            .as_ref()
            .map(|value| value.as_ref().map(|text| text.as_str().to_owned())),
        scheduled_at: patch.scheduled_at,
        status: patch.status.map(|value| value.as_str().to_owned()),
        location: patch.location.clone(),
        recurrence: patch
            .recurrence
            .map(|value| value.map(|keyword| keyword.as_str().to_owned())),
        priority: patch.priority.map(|value| value.as_str().to_owned()),
        updated_at,
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_id,
        name,
        description,
        scheduled_at,
        status,
        location,
        recurrence,
        priority,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: OwnerId::from_uuid(owner_id),
        name: TaskName::new(name).map_err(TaskRepositoryError::persistence)?,
        description: description
            .map(TaskDescription::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        scheduled_at,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        location,
        recurrence: recurrence
            .as_deref()
            .map(Recurrence::try_from)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
