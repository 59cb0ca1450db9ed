//! # pairweek-core
//!
//! Domain layer containing entities, value objects, ports, and the reaction
//! event type. This crate has zero dependencies on infrastructure (database,
//! messaging platform, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Match, NewMatch, ParticipantStatus, PoolMembership, StatusParseError};
pub use error::DomainError;
pub use events::{MarkerKind, ReactionEvent};
pub use traits::{CollabPlatform, MatchRepository, PlatformResult, PoolRepository, RepoResult};
pub use value_objects::{MatchId, Snowflake, SnowflakeParseError, WeekKey, WeekKeyParseError};
