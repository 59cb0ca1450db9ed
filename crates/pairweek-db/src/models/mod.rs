//! Database row models with SQLx `FromRow` derives

mod matches;
mod pool_member;

pub use matches::MatchModel;
pub use pool_member::PoolMemberModel;
