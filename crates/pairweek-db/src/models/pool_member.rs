//! Pool membership database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Row model for the `pool_members` table
#[derive(Debug, Clone, FromRow)]
pub struct PoolMemberModel {
    pub community_id: i64,
    pub user_id: i64,
    pub joined_at: DateTime<Utc>,
    pub skip_until: Option<NaiveDate>,
    pub last_sat_out_at: Option<DateTime<Utc>>,
}
