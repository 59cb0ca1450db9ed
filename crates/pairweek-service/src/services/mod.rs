//! Service layer modules

pub mod context;
pub mod error;
pub mod lifecycle;
pub mod pairing;
pub mod pool;
pub mod reminder;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use lifecycle::MatchLifecycleService;
pub use pairing::{PairingReport, PairingService, RematchOutcome};
pub use pool::PoolService;
pub use reminder::ReminderService;
