//! ---
//! wk_section: "02-core-combinators"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Sequential call-wrapping combinators."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::time::Duration;

use tracing::info;
use wrapkit_common::time::{Clock, MonotonicClock};

use crate::callable::Callable;

/// Handler type used when none is configured.
pub type DefaultTimingHandler = fn(&str, Duration);

/// Default handler: emit a structured tracing event per timed call.
fn log_timing(label: &str, elapsed: Duration) {
    info!(
        target: "wrapkit::core::timeit",
        callee = label,
        elapsed_us = elapsed.as_micros() as u64,
        "call timed",
    );
}

/// Builder selecting the clock and handler for a [`Timed`] wrapper.
#[derive(Debug, Clone)]
pub struct TimingPolicy<K = MonotonicClock, H = DefaultTimingHandler> {
    clock: K,
    handler: H,
}

impl TimingPolicy {
    /// Policy with the monotonic clock and the tracing handler.
    pub fn new() -> Self {
        Self {
            clock: MonotonicClock,
            handler: log_timing,
        }
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> TimingPolicy<K, H> {
    /// Replace the clock.
    pub fn clock<K2: Clock>(self, clock: K2) -> TimingPolicy<K2, H> {
        TimingPolicy {
            clock,
            handler: self.handler,
        }
    }

    /// Replace the handler receiving `(label, elapsed)` per call.
    pub fn handler<H2>(self, handler: H2) -> TimingPolicy<K, H2>
    where
        H2: FnMut(&str, Duration),
    {
        TimingPolicy {
            clock: self.clock,
            handler,
        }
    }

    /// Wrap a callable with this policy.
    pub fn wrap<C>(self, inner: C) -> Timed<C, K, H> {
        Timed {
            inner,
            clock: self.clock,
            handler: self.handler,
        }
    }
}

/// Wrap a callable with the default clock and handler.
pub fn timeit<C>(inner: C) -> Timed<C> {
    TimingPolicy::new().wrap(inner)
}

/// Wrapper measuring the elapsed time of every call.
///
/// Each call reads the clock, invokes the inner callable, reads the clock
/// again, and hands `(label, elapsed)` to the handler exactly once before
/// returning the inner result unchanged. If the inner callable panics the
/// handler is not invoked and the unwind propagates.
#[derive(Debug, Clone)]
pub struct Timed<C, K = MonotonicClock, H = DefaultTimingHandler> {
    inner: C,
    clock: K,
    handler: H,
}

impl<C, K, H, A> Callable<A> for Timed<C, K, H>
where
    C: Callable<A>,
    K: Clock,
    H: FnMut(&str, Duration),
{
    type Output = C::Output;

    fn call(&mut self, args: A) -> C::Output {
        let start = self.clock.now();
        let output = self.inner.call(args);
        let elapsed = self.clock.now().saturating_sub(start);
        (self.handler)(self.inner.label(), elapsed);
        output
    }

    fn label(&self) -> &str {
        self.inner.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::named;
    use std::panic::AssertUnwindSafe;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use wrapkit_common::time::ManualClock;

    #[test]
    fn handler_fires_once_with_label_and_elapsed() {
        let clock = ManualClock::new();
        let driver = clock.clone();
        let mut observed = Vec::new();
        {
            let mut wrapper = TimingPolicy::new()
                .clock(clock)
                .handler(|label: &str, elapsed: Duration| observed.push((label.to_owned(), elapsed)))
                .wrap(named("slow_add", move |(a, b): (u64, u64)| {
                    driver.advance(Duration::from_millis(40));
                    a + b
                }));
            assert_eq!(wrapper.call((2, 3)), 5);
        }
        assert_eq!(
            observed,
            vec![("slow_add".to_owned(), Duration::from_millis(40))]
        );
    }

    #[test]
    fn result_is_returned_unchanged() {
        let mut wrapper = timeit(|x: i32| x * 3);
        assert_eq!(wrapper.call(14), 42);
    }

    #[test]
    fn panicking_callee_reports_no_timing() {
        let reports = Arc::new(AtomicU32::new(0));
        let reports_in_handler = Arc::clone(&reports);
        let mut wrapper = TimingPolicy::new()
            .handler(move |_: &str, _: Duration| {
                reports_in_handler.fetch_add(1, Ordering::SeqCst);
            })
            .wrap(|()| -> () { panic!("inner failure") });
        let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| wrapper.call(())));
        assert!(outcome.is_err());
        assert_eq!(reports.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn zero_elapsed_is_reported_for_an_idle_clock() {
        let clock = ManualClock::new();
        let mut last = None;
        {
            let mut wrapper = TimingPolicy::new()
                .clock(clock)
                .handler(|_: &str, elapsed: Duration| last = Some(elapsed))
                .wrap(|()| ());
            wrapper.call(());
        }
        assert_eq!(last, Some(Duration::ZERO));
    }
}
