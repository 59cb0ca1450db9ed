//! Data transfer objects for service responses

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use pairweek_core::{Match, MatchId, ParticipantStatus, Snowflake, WeekKey};

/// Pool membership status as seen by the member
#[derive(Debug, Clone, Serialize)]
pub struct PoolStatusResponse {
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
    pub skip_until: Option<NaiveDate>,
    pub skipping: bool,
}

/// One past or current match from a member's point of view
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub id: MatchId,
    pub week_key: WeekKey,
    pub partner: Snowflake,
    pub my_status: ParticipantStatus,
    pub partner_status: ParticipantStatus,
    pub completed: bool,
}

impl MatchSummary {
    /// Build a summary for the given viewer, who must be a participant
    pub fn for_viewer(m: &Match, viewer: Snowflake) -> Option<Self> {
        let partner = m.partner_of(viewer)?;
        Some(Self {
            id: m.id,
            week_key: m.week_key,
            partner,
            my_status: m.status_of(viewer)?,
            partner_status: m.status_of(partner)?,
            completed: m.is_complete(),
        })
    }
}
