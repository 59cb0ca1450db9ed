//! Value objects - immutable identifiers and keys

mod match_id;
mod snowflake;
mod week_key;

pub use match_id::MatchId;
pub use snowflake::{Snowflake, SnowflakeParseError};
pub use week_key::{WeekKey, WeekKeyParseError};
