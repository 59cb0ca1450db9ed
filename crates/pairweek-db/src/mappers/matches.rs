//! MatchModel ↔ Match mapper
//!
//! Status columns are free text in the database, so the conversion is
//! fallible. An unknown status value means the row was written by
//! something other than this crate and is surfaced as an internal error.

use pairweek_core::{DomainError, Match, MatchId, ParticipantStatus, Snowflake, WeekKey};

use crate::models::MatchModel;

impl TryFrom<MatchModel> for Match {
    type Error = DomainError;

    fn try_from(model: MatchModel) -> Result<Self, Self::Error> {
        let status_a: ParticipantStatus = model
            .status_a
            .parse()
            .map_err(|e| DomainError::Internal(format!("match {}: {e}", model.id)))?;
        let status_b: ParticipantStatus = model
            .status_b
            .parse()
            .map_err(|e| DomainError::Internal(format!("match {}: {e}", model.id)))?;

        Ok(Self {
            id: MatchId::new(model.id),
            community_id: Snowflake::new(model.community_id),
            week_key: WeekKey::for_date(model.week_key),
            user_a: Snowflake::new(model.user_a),
            user_b: Snowflake::new(model.user_b),
            space_handle: model.space_handle.map(Snowflake::new),
            status_a,
            status_b,
            reminder_count: model.reminder_count,
            created_at: model.created_at,
            completed_at: model.completed_at,
        })
    }
}
