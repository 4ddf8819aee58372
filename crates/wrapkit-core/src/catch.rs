//! ---
//! wk_section: "02-core-combinators"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Sequential call-wrapping combinators."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::fmt;

use anyhow::Result;
use tracing::debug;

use crate::callable::Callable;

/// Decides which errors a [`Catch`] wrapper intercepts.
///
/// Callees surface failures as [`anyhow::Error`]; a matcher inspects the
/// error before the policy absorbs it. Anything the matcher rejects
/// propagates unchanged.
pub enum ErrorMatcher {
    /// Intercept every error.
    Any,
    /// Intercept errors satisfying the predicate.
    Predicate(Box<dyn Fn(&anyhow::Error) -> bool + Send + Sync>),
}

impl ErrorMatcher {
    /// Matcher intercepting errors that downcast to `E`.
    pub fn of<E>() -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Predicate(Box::new(|err| err.is::<E>()))
    }

    /// Matcher intercepting errors satisfying an arbitrary predicate.
    pub fn when<P>(predicate: P) -> Self
    where
        P: Fn(&anyhow::Error) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Box::new(predicate))
    }

    /// Widen this matcher to also intercept errors downcasting to `E`.
    pub fn or<E>(self) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::Any => Self::Any,
            Self::Predicate(previous) => {
                Self::Predicate(Box::new(move |err| previous(err) || err.is::<E>()))
            }
        }
    }

    /// Whether the matcher intercepts the given error.
    pub fn matches(&self, err: &anyhow::Error) -> bool {
        match self {
            Self::Any => true,
            Self::Predicate(predicate) => predicate(err),
        }
    }
}

impl Default for ErrorMatcher {
    fn default() -> Self {
        Self::Any
    }
}

impl fmt::Debug for ErrorMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ErrorMatcher::Any"),
            Self::Predicate(_) => f.write_str("ErrorMatcher::Predicate(..)"),
        }
    }
}

/// Policy controlling error interception.
#[derive(Debug, Default)]
pub struct CatchPolicy {
    matcher: ErrorMatcher,
    silent: bool,
}

impl CatchPolicy {
    /// Build a policy around a matcher; not silent by default.
    pub fn new(matcher: ErrorMatcher) -> Self {
        Self {
            matcher,
            silent: false,
        }
    }

    /// Absorb matched errors instead of re-raising them.
    ///
    /// Without a handler, a non-silent policy propagates even matched errors;
    /// a silent one swallows them and the caller sees `Ok(None)`.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Wrap a callable; matched errors yield `Ok(None)` when the policy is
    /// silent and re-raise otherwise.
    pub fn wrap<C>(self, inner: C) -> Catch<C> {
        Catch {
            policy: self,
            inner,
        }
    }

    /// Wrap a callable, routing absorbed errors to `handler`.
    ///
    /// The handler receives the error exactly once and decides the caller's
    /// value.
    pub fn wrap_with<C, H>(self, inner: C, handler: H) -> CatchWith<C, H> {
        CatchWith {
            policy: self,
            inner,
            handler,
        }
    }
}

/// Construct a catch policy; `catch(matcher).wrap(f)` builds the wrapper.
pub fn catch(matcher: ErrorMatcher) -> CatchPolicy {
    CatchPolicy::new(matcher)
}

/// Wrapper intercepting matched errors from a `Result`-returning callable.
///
/// A successful inner call maps to `Ok(Some(value))`. A matched error is
/// swallowed as `Ok(None)` when the policy is silent; otherwise it re-raises,
/// since no handler is attached to consume it. Unmatched errors always
/// propagate as `Err` unchanged.
#[derive(Debug)]
pub struct Catch<C> {
    policy: CatchPolicy,
    inner: C,
}

impl<C, A, T> Callable<A> for Catch<C>
where
    C: Callable<A, Output = Result<T>>,
{
    type Output = Result<Option<T>>;

    fn call(&mut self, args: A) -> Result<Option<T>> {
        match self.inner.call(args) {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.policy.silent && self.policy.matcher.matches(&err) => {
                debug!(
                    target: "wrapkit::core::catch",
                    callee = self.inner.label(),
                    error = ?err,
                    "swallowed error",
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn label(&self) -> &str {
        self.inner.label()
    }
}

/// [`Catch`] variant routing absorbed errors to a handler callback.
#[derive(Debug)]
pub struct CatchWith<C, H> {
    policy: CatchPolicy,
    inner: C,
    handler: H,
}

impl<C, A, T, H> Callable<A> for CatchWith<C, H>
where
    C: Callable<A, Output = Result<T>>,
    H: FnMut(anyhow::Error) -> Option<T>,
{
    type Output = Result<Option<T>>;

    fn call(&mut self, args: A) -> Result<Option<T>> {
        match self.inner.call(args) {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.policy.matcher.matches(&err) => Ok((self.handler)(err)),
            Err(err) => Err(err),
        }
    }

    fn label(&self) -> &str {
        self.inner.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::num::ParseIntError;

    fn parse_int(raw: &str) -> Result<i32> {
        Ok(raw.parse::<i32>()?)
    }

    #[test]
    fn success_is_passed_through() {
        let mut wrapper = catch(ErrorMatcher::Any).wrap(parse_int);
        assert_eq!(wrapper.call("42").unwrap(), Some(42));
    }

    #[test]
    fn matched_errors_are_absorbed_silently() {
        let mut wrapper = catch(ErrorMatcher::of::<ParseIntError>())
            .silent(true)
            .wrap(parse_int);
        assert_eq!(wrapper.call("not a number").unwrap(), None);
    }

    #[test]
    fn matched_errors_reraise_without_silent_or_handler() {
        let mut wrapper = catch(ErrorMatcher::of::<ParseIntError>()).wrap(parse_int);
        let err = wrapper.call("x").unwrap_err();
        assert!(err.is::<ParseIntError>());
    }

    #[test]
    fn unmatched_errors_propagate_unchanged() {
        let mut wrapper = catch(ErrorMatcher::of::<std::io::Error>()).wrap(parse_int);
        let err = wrapper.call("nope").unwrap_err();
        assert!(err.is::<ParseIntError>());
    }

    #[test]
    fn handler_runs_exactly_once_with_the_error() {
        let mut seen = Vec::new();
        {
            let mut wrapper = catch(ErrorMatcher::of::<ParseIntError>()).wrap_with(
                parse_int,
                |err: anyhow::Error| {
                    seen.push(err.to_string());
                    Some(-1)
                },
            );
            assert_eq!(wrapper.call("x").unwrap(), Some(-1));
        }
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn or_widens_a_typed_matcher() {
        let matcher = ErrorMatcher::of::<std::io::Error>().or::<ParseIntError>();
        assert!(matcher.matches(&anyhow::Error::from("7a".parse::<i32>().unwrap_err())));
        assert!(!matcher.matches(&anyhow!("untyped failure")));
    }

    #[test]
    fn predicate_matchers_see_the_error_chain() {
        let matcher = ErrorMatcher::when(|err| err.to_string().contains("disk"));
        assert!(matcher.matches(&anyhow!("disk full")));
        assert!(!matcher.matches(&anyhow!("network down")));
    }
}
