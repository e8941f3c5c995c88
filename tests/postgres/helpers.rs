//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use rstest::fixture;
use taskmill::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use uuid::Uuid;

/// Boxed error type for fixture results.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "TASKMILL_TEST_DATABASE_URL";

/// SQL creating the task table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks/up.sql");

/// Points every pooled connection at one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// A repository bound to a throwaway schema.
pub struct PgTestContext {
    /// Repository under test.
    pub repository: PostgresTaskRepository,
    url: String,
    schema: String,
}

impl Drop for PgTestContext {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            let _outcome =
                connection.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema));
        }
    }
}

/// Creates a schema, applies the migration, and builds a repository on it.
///
/// # Errors
///
/// Returns an error when the database cannot be reached or migrated.
pub async fn setup_context(url: String) -> Result<PgTestContext, BoxError> {
    let schema = format!("taskmill_test_{}", Uuid::new_v4().simple());
    let migrate_url = url.clone();
    let migrate_schema = schema.clone();
    tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        let mut connection = PgConnection::establish(&migrate_url)?;
        connection.batch_execute(&format!(
            "CREATE SCHEMA {migrate_schema}; SET search_path TO {migrate_schema};"
        ))?;
        connection.batch_execute(CREATE_TASKS_SQL)?;
        Ok(())
    })
    .await??;

    let manager = ConnectionManager::<PgConnection>::new(url.as_str());
    let pool: TaskPgPool = Pool::builder()
        .max_size(2)
        .connection_customizer(Box::new(SearchPath(schema.clone())))
        .build(manager)?;
    Ok(PgTestContext {
        repository: PostgresTaskRepository::new(pool),
        url,
        schema,
    })
}

/// Provides a prepared context on the database named by
/// [`DATABASE_URL_ENV`].
///
/// # Errors
///
/// Returns an error when the variable is unset or blank, or when setup
/// fails.
#[fixture]
pub async fn pg_context() -> Result<PgTestContext, BoxError> {
    let url = std::env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("{DATABASE_URL_ENV} must name a test database"))?;
    setup_context(url).await
}
