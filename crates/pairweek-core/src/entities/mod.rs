//! Domain entities

mod matches;
mod pool_membership;

pub use matches::{Match, NewMatch, ParticipantStatus, StatusParseError};
pub use pool_membership::PoolMembership;
