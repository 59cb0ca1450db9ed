//! PostgreSQL repository implementations

mod error;
mod matches;
mod pool;

pub use matches::PgMatchRepository;
pub use pool::PgPoolRepository;
