//! ---
//! wk_section: "02-core-combinators"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Sequential call-wrapping combinators."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
//! Sequential call-wrapping combinators.
//!
//! Everything here operates on the [`Callable`] trait: plain closures get a
//! blanket implementation, and every wrapper is itself a `Callable`, so
//! wrappers nest freely. The label attached with [`named`] passes through
//! every layer, keeping wrapped callables transparent to diagnostics.
#![warn(missing_docs)]

pub mod callable;
pub mod catch;
pub mod decorate;
pub mod repeat;
pub mod timeit;

pub use callable::{named, Callable, Named};
pub use catch::{catch, Catch, CatchPolicy, CatchWith, ErrorMatcher};
pub use decorate::{decorator, BoundDecorator, Decorated, DecoratorFactory};
pub use repeat::{repeat, Repeat, RepeatPolicy};
pub use timeit::{timeit, Timed, TimingPolicy};

/// Crate prelude collecting the most commonly used constructors.
pub mod prelude {
    pub use super::callable::{named, Callable};
    pub use super::catch::{catch, CatchPolicy, ErrorMatcher};
    pub use super::decorate::decorator;
    pub use super::repeat::{repeat, RepeatPolicy};
    pub use super::timeit::{timeit, TimingPolicy};
}
