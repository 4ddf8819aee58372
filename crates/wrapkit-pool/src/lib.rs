//! ---
//! wk_section: "03-worker-pool"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Worker pool abstraction and the threaded repeat wrapper."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
//! Worker pool abstraction and the threaded repeat wrapper.
//!
//! [`WorkerPool`] is a submit-and-get-handle facade over a tokio runtime; the
//! process-wide shared pool is created lazily on first use and never torn
//! down. [`ThreadedRepeat`] submits a batch of independent invocations and
//! hands back the handle of the last submission only.
#![warn(missing_docs)]

pub mod pool;
pub mod threaded_repeat;

pub use pool::{JobHandle, PoolError, WorkerPool};
pub use threaded_repeat::{threaded_repeat, ThreadedRepeat, ThreadedRepeatPolicy};

/// Crate prelude collecting the most commonly used constructors.
pub mod prelude {
    pub use super::pool::{JobHandle, PoolError, WorkerPool};
    pub use super::threaded_repeat::{threaded_repeat, ThreadedRepeatPolicy};
}
