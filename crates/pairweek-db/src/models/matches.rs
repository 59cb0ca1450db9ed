//! Match database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Row model for the `matches` table
#[derive(Debug, Clone, FromRow)]
pub struct MatchModel {
    pub id: i64,
    pub community_id: i64,
    pub week_key: NaiveDate,
    pub user_a: i64,
    pub user_b: i64,
    pub space_handle: Option<i64>,
    pub status_a: String,
    pub status_b: String,
    pub reminder_count: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
