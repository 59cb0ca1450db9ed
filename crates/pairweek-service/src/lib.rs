//! # pairweek-service
//!
//! Business logic layer for the weekly matching engine.
//!
//! ## Services
//!
//! - [`PoolService`] - opt-in pool membership, skips and history
//! - [`PairingService`] - weekly pairing runs and rematches
//! - [`MatchLifecycleService`] - collaboration spaces and reaction handling
//! - [`ReminderService`] - capped nudges for pending matches
//!
//! All services borrow a [`ServiceContext`], the dependency container
//! holding the repositories, the platform adapter and the matching policy.

pub mod dto;
pub mod services;

pub use services::{
    MatchLifecycleService, PairingReport, PairingService, PoolService, RematchOutcome,
    ReminderService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
