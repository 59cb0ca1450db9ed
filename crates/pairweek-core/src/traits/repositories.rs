//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer provides
//! the implementation. The stores are the sole source of truth and the
//! concurrency arbiters: services never cache their contents.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{Match, NewMatch, ParticipantStatus, PoolMembership};
use crate::error::DomainError;
use crate::value_objects::{MatchId, Snowflake, WeekKey};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Pool Repository
// ============================================================================

#[async_trait]
pub trait PoolRepository: Send + Sync {
    /// Add a user to the pool. Returns false if already present (idempotent).
    async fn join(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Remove a user from the pool. Returns false if absent (idempotent).
    async fn leave(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Find a user's membership record
    async fn find(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<PoolMembership>>;

    /// Set or clear the skip-until date
    async fn set_skip_until(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        skip_until: Option<NaiveDate>,
    ) -> RepoResult<()>;

    /// Members whose skip-until is unset or at/before the week key
    async fn list_eligible(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
    ) -> RepoResult<Vec<Snowflake>>;

    /// Record that a user was the odd-one-out (sets last_sat_out_at = now)
    async fn mark_sat_out(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    /// Users who sat out at or after the given instant
    async fn list_recent_sit_outs(
        &self,
        community_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Snowflake>>;

    /// Distinct communities that have at least one pool member
    async fn list_communities(&self) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Match Repository
// ============================================================================

#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Persist a new match (both sides pending). Returns the assigned id.
    async fn create(&self, new_match: &NewMatch) -> RepoResult<MatchId>;

    /// Find a match by its id
    async fn find_by_id(&self, id: MatchId) -> RepoResult<Option<Match>>;

    /// Find a match by its collaboration-space handle
    async fn find_by_space(&self, space_handle: Snowflake) -> RepoResult<Option<Match>>;

    /// Set one participant's status. Errors with not-found if the match
    /// does not exist or the user is not a participant.
    async fn set_status(
        &self,
        id: MatchId,
        user_id: Snowflake,
        status: ParticipantStatus,
    ) -> RepoResult<()>;

    /// Mark the match completed (sets completed_at = now)
    async fn complete(&self, id: MatchId) -> RepoResult<()>;

    /// Increment the reminder count by one
    async fn increment_reminder(&self, id: MatchId) -> RepoResult<()>;

    /// Matches still open this week, under the reminder cap, with at least
    /// one side pending
    async fn list_needing_reminder(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
        cap: i32,
    ) -> RepoResult<Vec<Match>>;

    /// A user's past matches, newest first
    async fn list_history(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<Match>>;

    /// All users appearing in any match for the given week (either side)
    async fn list_matched_this_week(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
    ) -> RepoResult<HashSet<Snowflake>>;

    /// Everyone the given user has been paired with in the given week
    async fn list_partners_this_week(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        week_key: WeekKey,
    ) -> RepoResult<HashSet<Snowflake>>;
}
