//! ---
//! wk_section: "03-worker-pool"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Worker pool abstraction and the threaded repeat wrapper."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::borrow::Cow;
use std::sync::Arc;

use tracing::trace;
use wrapkit_core::callable::{Callable, UNNAMED};

use crate::pool::{JobHandle, WorkerPool};

/// Policy parameters controlling pool-backed repetition.
#[derive(Debug, Clone)]
pub struct ThreadedRepeatPolicy {
    n: u32,
    pool: Option<WorkerPool>,
}

impl Default for ThreadedRepeatPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ThreadedRepeatPolicy {
    /// Construct a policy submitting `n` jobs per call.
    pub fn new(n: u32) -> Self {
        Self { n, pool: None }
    }

    /// Route submissions to a specific pool instead of the shared one.
    pub fn on(mut self, pool: WorkerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Wrap a function with this policy.
    pub fn wrap<F>(self, f: F) -> ThreadedRepeat<F> {
        self.wrap_named(UNNAMED, f)
    }

    /// Wrap a function with this policy, attaching a label.
    pub fn wrap_named<F>(self, label: impl Into<Cow<'static, str>>, f: F) -> ThreadedRepeat<F> {
        ThreadedRepeat {
            policy: self,
            label: label.into(),
            f: Arc::new(f),
        }
    }
}

/// Construct a threaded repeat policy; `threaded_repeat(n).wrap(f)` builds
/// the wrapper.
pub fn threaded_repeat(n: u32) -> ThreadedRepeatPolicy {
    ThreadedRepeatPolicy::new(n)
}

/// Wrapper submitting `n` independent invocations to a worker pool per call.
///
/// Each call submits exactly `n` jobs, every job receiving a clone of the
/// arguments, and returns the [`JobHandle`] of the LAST submission only
/// ("last" in submission order, not completion order). The n−1 earlier
/// handles are detached on purpose: their failures are unobservable through
/// this API, and callers who need every outcome should submit through
/// [`WorkerPool::submit`] themselves. A call with `n = 0` submits nothing and
/// returns `None`.
#[derive(Debug)]
pub struct ThreadedRepeat<F> {
    policy: ThreadedRepeatPolicy,
    label: Cow<'static, str>,
    f: Arc<F>,
}

impl<F, A, T> Callable<A> for ThreadedRepeat<F>
where
    F: Fn(A) -> T + Send + Sync + 'static,
    A: Clone + Send + 'static,
    T: Send + 'static,
{
    type Output = Option<JobHandle<T>>;

    fn call(&mut self, args: A) -> Option<JobHandle<T>> {
        let pool = self
            .policy
            .pool
            .clone()
            .unwrap_or_else(WorkerPool::shared);
        trace!(
            target: "wrapkit::pool::threaded_repeat",
            callee = %self.label,
            submissions = self.policy.n,
            "submitting batch"
        );
        let mut last = None;
        for _ in 0..self.policy.n {
            let f = Arc::clone(&self.f);
            let job_args = args.clone();
            // Replacing the slot detaches the previous handle; only the last
            // submission stays observable.
            last = Some(pool.submit(move || f(job_args)));
        }
        last
    }

    fn label(&self) -> &str {
        &self.label
    }
}
