//! Runs the overdue sweep against a `PostgreSQL` task store.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/taskmill taskmill-worker
//! ```
//!
//! Environment:
//!
//! - `DATABASE_URL` (required): connection string for the task database.
//! - `TASKMILL_SWEEP_INTERVAL_SECS`: seconds between sweeps, default 60.
//! - `TASKMILL_POOL_SIZE`: maximum pooled connections, default 4.
//! - `RUST_LOG`: log filter, default `info`.
//!
//! The worker sweeps until it receives Ctrl-C. It never creates tasks itself,
//! so its Tokio recurrence scheduler only fires for an embedding layer (an
//! HTTP front end, say) that calls `create_task` on the same service. Such
//! triggers live only as long as the process runs; processes that create
//! recurring tasks must host their own scheduler.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use mockable::DefaultClock;
use std::env;
use std::num::ParseIntError;
use std::sync::Arc;
use std::time::Duration;
use taskmill::task::{
    adapters::{
        postgres::{PostgresTaskRepository, TaskPgPool},
        runtime::TokioRecurrenceScheduler,
    },
    ports::TriggerHandler,
    services::{OverdueSweepLoop, RecurringTaskSpawner, SweepConfig, TaskLifecycleService},
};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const SWEEP_INTERVAL_ENV: &str = "TASKMILL_SWEEP_INTERVAL_SECS";
const POOL_SIZE_ENV: &str = "TASKMILL_POOL_SIZE";
const DEFAULT_POOL_SIZE: u32 = 4;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while starting or running the worker.
#[derive(Debug, Error)]
enum WorkerError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value {value:?} for {key}: {source}")]
    InvalidVar {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] PoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Worker settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WorkerSettings {
    database_url: String,
    sweep: SweepConfig,
    pool_size: u32,
}

impl WorkerSettings {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WorkerError> {
        let database_url = lookup(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(WorkerError::MissingVar(DATABASE_URL_ENV))?;
        let sweep = parse_positive(&lookup, SWEEP_INTERVAL_ENV)?.map_or_else(
            SweepConfig::default,
            |secs| SweepConfig::every(Duration::from_secs(u64::from(secs))),
        );
        let pool_size = parse_positive(&lookup, POOL_SIZE_ENV)?.unwrap_or(DEFAULT_POOL_SIZE);

        Ok(Self {
            database_url,
            sweep,
            pool_size,
        })
    }
}

fn parse_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u32>, WorkerError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|source| WorkerError::InvalidVar {
            key,
            value: raw.clone(),
            source,
        })?;
    if value == 0 {
        return Err(WorkerError::ZeroValue(key));
    }
    Ok(Some(value))
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let settings = WorkerSettings::from_lookup(|key| env::var(key).ok())?;
    let runtime = build_runtime()?;
    runtime.block_on(run(settings)).map_err(Into::into)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_runtime() -> Result<tokio::runtime::Runtime, WorkerError> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(WorkerError::RuntimeInit)
}

fn build_pool(settings: &WorkerSettings) -> Result<TaskPgPool, WorkerError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.database_url.as_str());
    Pool::builder()
        .max_size(settings.pool_size)
        .build(manager)
        .map_err(WorkerError::Pool)
}

async fn run(settings: WorkerSettings) -> Result<(), WorkerError> {
    let pool = build_pool(&settings)?;
    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let clock = Arc::new(DefaultClock);
    let spawner: Arc<dyn TriggerHandler> = Arc::new(RecurringTaskSpawner::new(
        Arc::clone(&repository),
        Arc::clone(&clock),
    ));
    let scheduler = Arc::new(TokioRecurrenceScheduler::new(spawner, Arc::clone(&clock)));
    let service = TaskLifecycleService::new(repository, scheduler, clock);

    info!(
        interval_secs = settings.sweep.interval.as_secs(),
        pool_size = settings.pool_size,
        "taskmill worker started"
    );
    let sweep = OverdueSweepLoop::new(service, settings.sweep);
    tokio::select! {
        () = sweep.run() => Ok(()),
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(|err| {
                error!(error = %err, "shutdown signal listener failed");
                WorkerError::Signal(err)
            })?;
            info!("taskmill worker stopping");
            Ok(())
        }
    }
}
