//! ---
//! wk_section: "02-core-combinators"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Sequential call-wrapping combinators."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use std::borrow::Cow;

/// Label reported by callables that were never given one.
pub const UNNAMED: &str = "<unnamed>";

/// A callable unit of work accepting `Args` per invocation.
///
/// Multi-argument callees use a tuple for `Args`; zero-argument callees use
/// `()`. Every `FnMut(Args) -> R` closure implements this trait, and every
/// wrapper in this workspace implements it as well, so wrappers compose by
/// nesting.
pub trait Callable<Args> {
    /// Value produced by one invocation.
    type Output;

    /// Invoke the callable once.
    fn call(&mut self, args: Args) -> Self::Output;

    /// Human-readable identity of the underlying callee.
    ///
    /// Wrappers delegate to their inner callable, so the label survives any
    /// depth of nesting.
    fn label(&self) -> &str {
        UNNAMED
    }
}

impl<F, A, R> Callable<A> for F
where
    F: FnMut(A) -> R,
{
    type Output = R;

    fn call(&mut self, args: A) -> R {
        self(args)
    }
}

/// Adapter attaching a label to a callable.
#[derive(Debug, Clone)]
pub struct Named<C> {
    label: Cow<'static, str>,
    inner: C,
}

/// Attach a label to a callable so wrappers and handlers can identify it.
pub fn named<C>(label: impl Into<Cow<'static, str>>, inner: C) -> Named<C> {
    Named {
        label: label.into(),
        inner,
    }
}

impl<C> Named<C> {
    /// Consume the adapter, returning the inner callable.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, A> Callable<A> for Named<C>
where
    C: Callable<A>,
{
    type Output = C::Output;

    fn call(&mut self, args: A) -> Self::Output {
        self.inner.call(args)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_callables() {
        let mut double = |x: i32| x * 2;
        assert_eq!(double.call(21), 42);
        assert_eq!(Callable::<i32>::label(&double), UNNAMED);
    }

    #[test]
    fn tuple_args_carry_multiple_parameters() {
        let mut add = |(a, b): (i32, i32)| a + b;
        assert_eq!(add.call((40, 2)), 42);
    }

    #[test]
    fn named_attaches_a_label() {
        let mut greet = named("greet", |name: &str| format!("hello {name}"));
        assert_eq!(greet.label(), "greet");
        assert_eq!(greet.call("world"), "hello world");
    }
}
