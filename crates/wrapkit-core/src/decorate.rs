//! ---
//! wk_section: "02-core-combinators"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Sequential call-wrapping combinators."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
use crate::callable::Callable;

/// Reusable factory turning a wrapping body plus a configuration struct into
/// a decorator.
///
/// The body receives the callee first, then the call arguments, then the
/// bound configuration: `FnMut(&mut C, Args, &Cfg) -> R`. Configuration is an
/// explicit struct with named fields; defaults come from the value handed to
/// [`decorator`], overrides from [`DecoratorFactory::configure`].
///
/// The factory clones the body and configuration per application and never
/// mutates its own copies, so one factory decorates any number of callables.
/// Shared mutable state captured inside the body or configuration is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct DecoratorFactory<B, Cfg> {
    body: B,
    defaults: Cfg,
}

/// Build a decorator factory from default configuration and a wrapping body.
pub fn decorator<B, Cfg>(defaults: Cfg, body: B) -> DecoratorFactory<B, Cfg>
where
    B: Clone,
    Cfg: Clone,
{
    DecoratorFactory { body, defaults }
}

impl<B, Cfg> DecoratorFactory<B, Cfg>
where
    B: Clone,
    Cfg: Clone,
{
    /// Apply the decorator with its default configuration ("bare" mode).
    pub fn apply<C>(&self, callee: C) -> Decorated<C, B, Cfg> {
        Decorated {
            callee,
            body: self.body.clone(),
            config: self.defaults.clone(),
        }
    }

    /// Bind an override configuration, producing a decorator that can be
    /// applied to callables.
    pub fn configure(&self, config: Cfg) -> BoundDecorator<B, Cfg> {
        BoundDecorator {
            body: self.body.clone(),
            config,
        }
    }

    /// Shorthand for `configure(config).apply(callee)`.
    pub fn apply_with<C>(&self, config: Cfg, callee: C) -> Decorated<C, B, Cfg> {
        Decorated {
            callee,
            body: self.body.clone(),
            config,
        }
    }
}

/// A decorator bound to one configuration, ready to wrap callables.
#[derive(Debug, Clone)]
pub struct BoundDecorator<B, Cfg> {
    body: B,
    config: Cfg,
}

impl<B, Cfg> BoundDecorator<B, Cfg>
where
    B: Clone,
    Cfg: Clone,
{
    /// Wrap a callable with the bound configuration.
    pub fn apply<C>(&self, callee: C) -> Decorated<C, B, Cfg> {
        Decorated {
            callee,
            body: self.body.clone(),
            config: self.config.clone(),
        }
    }
}

/// A callable produced by a decorator factory.
///
/// `label()` delegates to the callee, so identity metadata is preserved in
/// both bare and configured mode.
#[derive(Debug, Clone)]
pub struct Decorated<C, B, Cfg> {
    callee: C,
    body: B,
    config: Cfg,
}

impl<C, B, Cfg, A, R> Callable<A> for Decorated<C, B, Cfg>
where
    C: Callable<A>,
    B: FnMut(&mut C, A, &Cfg) -> R,
{
    type Output = R;

    fn call(&mut self, args: A) -> R {
        (self.body)(&mut self.callee, args, &self.config)
    }

    fn label(&self) -> &str {
        self.callee.label()
    }
}
