//! ---
//! wk_section: "01-shared-primitives"
//! wk_subsection: "module"
//! wk_type: "source"
//! wk_scope: "code"
//! wk_description: "Shared primitives and utilities for the wrapper crates."
//! wk_version: "v0.1.0"
//! wk_owner: "tbd"
//! ---
//! Shared primitives for the Wrapkit workspace.
//! This crate exposes configuration loading, tracing initialisation, the
//! clock abstraction, and timing aggregation utilities consumed by the
//! combinator crates.
#![warn(missing_docs)]

pub mod config;
pub mod ledger;
pub mod logging;
pub mod time;

pub use config::{LoggingConfig, PoolConfig, WrapkitConfig};
pub use ledger::{LedgerEntry, TimingLedger};
pub use logging::{init_tracing, LogFormat};
pub use time::{Clock, ManualClock, MonotonicClock};
