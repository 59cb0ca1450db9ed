//! PostgreSQL implementation of PoolRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pairweek_core::{PoolMembership, PoolRepository, RepoResult, Snowflake, WeekKey};

use crate::models::PoolMemberModel;

use super::error::{map_db_error, pool_member_not_found};

/// PostgreSQL implementation of PoolRepository
#[derive(Clone)]
pub struct PgPoolRepository {
    pool: PgPool,
}

impl PgPoolRepository {
    /// Create a new PgPoolRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PoolRepository for PgPoolRepository {
    #[instrument(skip(self))]
    async fn join(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO pool_members (community_id, user_id, joined_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (community_id, user_id) DO NOTHING
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn leave(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM pool_members WHERE community_id = $1 AND user_id = $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<PoolMembership>> {
        let result = sqlx::query_as::<_, PoolMemberModel>(
            r#"
            SELECT community_id, user_id, joined_at, skip_until, last_sat_out_at
            FROM pool_members
            WHERE community_id = $1 AND user_id = $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PoolMembership::from))
    }

    #[instrument(skip(self))]
    async fn set_skip_until(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        skip_until: Option<NaiveDate>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE pool_members
            SET skip_until = $3
            WHERE community_id = $1 AND user_id = $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .bind(skip_until)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(pool_member_not_found(user_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_eligible(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
    ) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id
            FROM pool_members
            WHERE community_id = $1
              AND (skip_until IS NULL OR skip_until <= $2)
            ORDER BY joined_at
            "#,
        )
        .bind(community_id.into_inner())
        .bind(week_key.as_date())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn mark_sat_out(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE pool_members
            SET last_sat_out_at = $3
            WHERE community_id = $1 AND user_id = $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent_sit_outs(
        &self,
        community_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id
            FROM pool_members
            WHERE community_id = $1 AND last_sat_out_at >= $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn list_communities(&self) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT community_id FROM pool_members
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }
}
