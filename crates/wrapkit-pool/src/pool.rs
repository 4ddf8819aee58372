//! ---
//! wk_section: "03-worker-pool"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Worker pool abstraction and the threaded repeat wrapper."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;
use wrapkit_common::config::PoolConfig;

const DEFAULT_WORKERS: usize = 4;
const WORKER_THREAD_NAME: &str = "wrapkit-worker";

static SHARED_POOL: Lazy<WorkerPool> = Lazy::new(|| {
    debug!(
        target: "wrapkit::pool",
        workers = DEFAULT_WORKERS,
        "building shared worker pool"
    );
    WorkerPool::with_workers(DEFAULT_WORKERS).expect("shared worker pool must build")
});

/// Failures surfaced by the pool and its job handles.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The underlying runtime could not be built.
    #[error("failed to build worker pool: {0}")]
    Spawn(#[from] std::io::Error),
    /// The job panicked; the payload is not preserved.
    #[error("submitted job panicked")]
    JobPanicked,
    /// The job was cancelled before it ran to completion.
    #[error("submitted job was cancelled before completion")]
    JobCancelled,
}

#[derive(Debug, Clone)]
enum PoolInner {
    Owned(Arc<Runtime>),
    Adopted(Handle),
}

/// Bounded set of worker threads accepting submitted jobs.
///
/// Cloning a pool clones a handle to the same workers. The process-wide
/// shared pool ([`WorkerPool::shared`]) is created lazily and lives for the
/// rest of the process; caller-owned pools shut down when their last clone is
/// dropped.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    inner: PoolInner,
}

impl WorkerPool {
    /// Handle to the process-wide shared pool, building it on first use.
    pub fn shared() -> WorkerPool {
        SHARED_POOL.clone()
    }

    /// Build a caller-owned pool with `workers` job threads (minimum 1).
    pub fn with_workers(workers: usize) -> Result<Self, PoolError> {
        let workers = workers.max(1);
        // Jobs run on the blocking thread set; one core thread drives the
        // runtime machinery.
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(workers)
            .thread_name(WORKER_THREAD_NAME)
            .enable_all()
            .build()?;
        Ok(Self {
            inner: PoolInner::Owned(Arc::new(runtime)),
        })
    }

    /// Build a pool from host configuration.
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        match config.worker_threads {
            Some(workers) => Self::with_workers(workers),
            None => Ok(Self::shared()),
        }
    }

    /// Adopt an existing tokio runtime as the job substrate.
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            inner: PoolInner::Adopted(handle),
        }
    }

    fn handle(&self) -> Handle {
        match &self.inner {
            PoolInner::Owned(runtime) => runtime.handle().clone(),
            PoolInner::Adopted(handle) => handle.clone(),
        }
    }

    /// Submit one job for execution, returning its handle immediately.
    ///
    /// Jobs may run in parallel bounded by pool capacity; no ordering among
    /// submissions is guaranteed.
    pub fn submit<J, T>(&self, job: J) -> JobHandle<T>
    where
        J: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let handle = self.handle();
        JobHandle {
            task: handle.spawn_blocking(job),
            runtime: handle,
        }
    }
}

/// Handle to the eventual outcome of one submitted job.
///
/// Dropping the handle detaches the job: it still runs, but its outcome
/// (including a panic) becomes unobservable.
#[derive(Debug)]
pub struct JobHandle<T> {
    task: tokio::task::JoinHandle<T>,
    runtime: Handle,
}

impl<T> JobHandle<T> {
    /// Whether the job has finished running.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Block the calling thread until the job completes.
    ///
    /// Must not be called from a pool worker; it parks the calling thread on
    /// the pool's own runtime.
    pub fn join(self) -> Result<T, PoolError> {
        self.runtime.block_on(self.task).map_err(|err| {
            if err.is_cancelled() {
                PoolError::JobCancelled
            } else {
                PoolError::JobPanicked
            }
        })
    }

    /// Explicitly detach the job, discarding its outcome.
    pub fn detach(self) {
        drop(self.task);
    }
}
