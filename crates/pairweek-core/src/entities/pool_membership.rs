//! Pool membership entity - a user's opt-in to weekly pairing
//!
//! Existence of the record is the "opted in" flag: joining creates it,
//! leaving deletes it.

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{Snowflake, WeekKey};

/// One row per (community, user) in the matching pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMembership {
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    /// Set on join, immutable afterwards
    pub joined_at: DateTime<Utc>,
    /// While set and beyond the current week key, the user is excluded
    pub skip_until: Option<NaiveDate>,
    /// Updated whenever this user is the odd-one-out
    pub last_sat_out_at: Option<DateTime<Utc>>,
}

impl PoolMembership {
    /// Create a new membership effective now
    pub fn new(community_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            community_id,
            user_id,
            joined_at: Utc::now(),
            skip_until: None,
            last_sat_out_at: None,
        }
    }

    /// Whether the member is skipping the given week
    pub fn is_skipping(&self, week: WeekKey) -> bool {
        match self.skip_until {
            Some(until) => until > week.as_date(),
            None => false,
        }
    }
}
