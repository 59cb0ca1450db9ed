//! # pairweek-scheduler
//!
//! Periodic triggers for the matching engine:
//!
//! - [`Scheduler`] - ticks that fire the weekly pairing run and the
//!   reminder sweeps at their configured weekdays
//! - [`run_reaction_dispatcher`] - consumes typed reaction events from
//!   the platform adapter and feeds them to the lifecycle service
//!
//! Both loops stop when the shared shutdown signal flips. All handlers
//! are idempotent, so a double fire around a restart is harmless.

mod dispatcher;
mod scheduler;

pub use dispatcher::run_reaction_dispatcher;
pub use scheduler::Scheduler;
