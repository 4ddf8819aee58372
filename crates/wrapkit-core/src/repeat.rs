//! ---
//! wk_section: "02-core-combinators"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Sequential call-wrapping combinators."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::callable::Callable;

fn default_repeat_count() -> u32 {
    1
}

/// Policy parameters controlling sequential repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatPolicy {
    /// Number of sequential invocations per call of the wrapper.
    #[serde(default = "default_repeat_count")]
    pub n: u32,
}

impl RepeatPolicy {
    /// Construct a policy repeating `n` times.
    pub fn new(n: u32) -> Self {
        Self { n }
    }

    /// Wrap a callable with this policy.
    pub fn wrap<C>(self, inner: C) -> Repeat<C> {
        Repeat {
            policy: self,
            inner,
        }
    }
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Construct a repeat policy; `repeat(n).wrap(f)` builds the wrapper.
pub fn repeat(n: u32) -> RepeatPolicy {
    RepeatPolicy::new(n)
}

/// Wrapper invoking its inner callable a fixed number of times per call.
///
/// Each call of the wrapper performs exactly `n` sequential invocations with
/// clones of the supplied arguments, returning `Some(last result)`, or `None`
/// when `n` is zero. Iterations share whatever external state the callee
/// touches; there is no isolation between them. A panic on any iteration
/// aborts the remainder.
#[derive(Debug, Clone)]
pub struct Repeat<C> {
    policy: RepeatPolicy,
    inner: C,
}

impl<C> Repeat<C> {
    /// The policy this wrapper was built with.
    pub fn policy(&self) -> RepeatPolicy {
        self.policy
    }
}

impl<C, A> Callable<A> for Repeat<C>
where
    C: Callable<A>,
    A: Clone,
{
    type Output = Option<C::Output>;

    fn call(&mut self, args: A) -> Option<C::Output> {
        let mut last = None;
        for _ in 0..self.policy.n {
            last = Some(self.inner.call(args.clone()));
        }
        last
    }

    fn label(&self) -> &str {
        self.inner.label()
    }
}
