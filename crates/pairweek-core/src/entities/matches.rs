//! Match entity - one pairing attempt (including rematches)

use chrono::{DateTime, Utc};

use crate::value_objects::{MatchId, Snowflake, WeekKey};

/// Per-participant confirmation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

impl ParticipantStatus {
    /// Text codec used for persistence
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }
}

/// Error when parsing a ParticipantStatus from its text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown participant status: {0}")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for ParticipantStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match entity
///
/// Completion is terminal: once `completed_at` is set, no further status
/// mutation or reminder is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub community_id: Snowflake,
    pub week_key: WeekKey,
    pub user_a: Snowflake,
    pub user_b: Snowflake,
    /// Absent if collaboration-space creation failed
    pub space_handle: Option<Snowflake>,
    pub status_a: ParticipantStatus,
    pub status_b: ParticipantStatus,
    pub reminder_count: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    /// A match is complete iff `completed_at` is set
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether the given user is one of the two participants
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other participant, if `user_id` is one of the two
    pub fn partner_of(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.user_a {
            Some(self.user_b)
        } else if user_id == self.user_b {
            Some(self.user_a)
        } else {
            None
        }
    }

    /// The given participant's status, if they are in this match
    pub fn status_of(&self, user_id: Snowflake) -> Option<ParticipantStatus> {
        if user_id == self.user_a {
            Some(self.status_a)
        } else if user_id == self.user_b {
            Some(self.status_b)
        } else {
            None
        }
    }

    /// Whether both sides have confirmed
    pub fn both_confirmed(&self) -> bool {
        self.status_a == ParticipantStatus::Confirmed
            && self.status_b == ParticipantStatus::Confirmed
    }

    /// Participants whose status is still pending
    pub fn pending_sides(&self) -> Vec<Snowflake> {
        let mut pending = Vec::with_capacity(2);
        if self.status_a == ParticipantStatus::Pending {
            pending.push(self.user_a);
        }
        if self.status_b == ParticipantStatus::Pending {
            pending.push(self.user_b);
        }
        pending
    }
}

/// Values for inserting a new match record
///
/// Both statuses start pending and the reminder count at zero; the store
/// assigns the id and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub community_id: Snowflake,
    pub week_key: WeekKey,
    pub user_a: Snowflake,
    pub user_b: Snowflake,
    pub space_handle: Option<Snowflake>,
}
