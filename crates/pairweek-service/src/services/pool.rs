//! Pool service
//!
//! Opt-in pool membership: join, leave, skip and history queries.

use chrono::{Duration, NaiveDate};
use tracing::{info, instrument};

use pairweek_core::{Snowflake, WeekKey};

use crate::dto::{MatchSummary, PoolStatusResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Pool service
pub struct PoolService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PoolService<'a> {
    /// Create a new PoolService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a member to the opt-in pool
    ///
    /// Returns `true` if the member was newly added, `false` if they were
    /// already in the pool.
    #[instrument(skip(self))]
    pub async fn join(&self, community_id: Snowflake, user_id: Snowflake) -> ServiceResult<bool> {
        let added = self.ctx.pool_repo().join(community_id, user_id).await?;

        if added {
            info!(community_id = %community_id, user_id = %user_id, "Member joined pool");
        }

        Ok(added)
    }

    /// Remove a member from the opt-in pool
    ///
    /// Returns `true` if the member was removed, `false` if they were not
    /// in the pool. Existing matches are unaffected.
    #[instrument(skip(self))]
    pub async fn leave(&self, community_id: Snowflake, user_id: Snowflake) -> ServiceResult<bool> {
        let removed = self.ctx.pool_repo().leave(community_id, user_id).await?;

        if removed {
            info!(community_id = %community_id, user_id = %user_id, "Member left pool");
        }

        Ok(removed)
    }

    /// Pause a member for the given number of upcoming weeks
    ///
    /// Returns the date the pause expires (the Monday of the first week
    /// the member is eligible again).
    #[instrument(skip(self))]
    pub async fn skip_weeks(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        weeks: u32,
    ) -> ServiceResult<NaiveDate> {
        let max = self.ctx.matching().max_skip_weeks;
        if weeks == 0 || weeks > max {
            return Err(ServiceError::validation(format!(
                "skip weeks must be between 1 and {max}"
            )));
        }

        let skip_until = WeekKey::current().as_date() + Duration::weeks(i64::from(weeks));
        self.ctx
            .pool_repo()
            .set_skip_until(community_id, user_id, Some(skip_until))
            .await?;

        info!(
            community_id = %community_id,
            user_id = %user_id,
            skip_until = %skip_until,
            "Member paused"
        );

        Ok(skip_until)
    }

    /// Clear a member's pause, making them eligible again immediately
    #[instrument(skip(self))]
    pub async fn clear_skip(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        self.ctx
            .pool_repo()
            .set_skip_until(community_id, user_id, None)
            .await?;

        info!(community_id = %community_id, user_id = %user_id, "Member pause cleared");

        Ok(())
    }

    /// Get a member's pool status, or `None` if they are not in the pool
    #[instrument(skip(self))]
    pub async fn status(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Option<PoolStatusResponse>> {
        let membership = self.ctx.pool_repo().find(community_id, user_id).await?;

        Ok(membership.map(|m| {
            let skipping = m.is_skipping(WeekKey::current());
            PoolStatusResponse {
                user_id: m.user_id,
                joined_at: m.joined_at,
                skip_until: m.skip_until,
                skipping,
            }
        }))
    }

    /// Get a member's recent match history, newest first
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<MatchSummary>> {
        let limit = self.ctx.matching().history_limit;
        let matches = self
            .ctx
            .match_repo()
            .list_history(community_id, user_id, limit)
            .await?;

        Ok(matches
            .iter()
            .filter_map(|m| MatchSummary::for_viewer(m, user_id))
            .collect())
    }
}
