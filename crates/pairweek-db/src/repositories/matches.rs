//! PostgreSQL implementation of MatchRepository

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use pairweek_core::{
    Match, MatchId, MatchRepository, NewMatch, ParticipantStatus, RepoResult, Snowflake, WeekKey,
};

use crate::models::MatchModel;

use super::error::{map_db_error, match_not_found};

const MATCH_COLUMNS: &str = "id, community_id, week_key, user_a, user_b, space_handle, \
     status_a, status_b, reminder_count, created_at, completed_at";

/// PostgreSQL implementation of MatchRepository
#[derive(Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    /// Create a new PgMatchRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_rows(models: Vec<MatchModel>) -> RepoResult<Vec<Match>> {
    models.into_iter().map(Match::try_from).collect()
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    #[instrument(skip(self))]
    async fn create(&self, new_match: &NewMatch) -> RepoResult<MatchId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO matches (community_id, week_key, user_a, user_b, space_handle, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(new_match.community_id.into_inner())
        .bind(new_match.week_key.as_date())
        .bind(new_match.user_a.into_inner())
        .bind(new_match.user_b.into_inner())
        .bind(new_match.space_handle.map(Snowflake::into_inner))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(MatchId::new(id))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MatchId) -> RepoResult<Option<Match>> {
        let result = sqlx::query_as::<_, MatchModel>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Match::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_space(&self, space_handle: Snowflake) -> RepoResult<Option<Match>> {
        let result = sqlx::query_as::<_, MatchModel>(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE space_handle = $1"
        ))
        .bind(space_handle.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Match::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        id: MatchId,
        user_id: Snowflake,
        status: ParticipantStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET status_a = CASE WHEN user_a = $2 THEN $3 ELSE status_a END,
                status_b = CASE WHEN user_b = $2 THEN $3 ELSE status_b END
            WHERE id = $1 AND (user_a = $2 OR user_b = $2)
            "#,
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(match_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn complete(&self, id: MatchId) -> RepoResult<()> {
        // Completion timestamp is write-once.
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET completed_at = COALESCE(completed_at, $2)
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(match_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_reminder(&self, id: MatchId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE matches SET reminder_count = reminder_count + 1 WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(match_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_needing_reminder(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
        cap: i32,
    ) -> RepoResult<Vec<Match>> {
        let results = sqlx::query_as::<_, MatchModel>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM matches
            WHERE community_id = $1
              AND week_key = $2
              AND completed_at IS NULL
              AND reminder_count < $3
              AND (status_a = 'pending' OR status_b = 'pending')
            ORDER BY id
            "#
        ))
        .bind(community_id.into_inner())
        .bind(week_key.as_date())
        .bind(cap)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(results)
    }

    #[instrument(skip(self))]
    async fn list_history(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<Match>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, MatchModel>(&format!(
            r#"
            SELECT {MATCH_COLUMNS}
            FROM matches
            WHERE community_id = $1 AND (user_a = $2 OR user_b = $2)
            ORDER BY week_key DESC, id DESC
            LIMIT $3
            "#
        ))
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_rows(results)
    }

    #[instrument(skip(self))]
    async fn list_matched_this_week(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
    ) -> RepoResult<HashSet<Snowflake>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT user_a, user_b FROM matches WHERE community_id = $1 AND week_key = $2
            "#,
        )
        .bind(community_id.into_inner())
        .bind(week_key.as_date())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut users = HashSet::with_capacity(rows.len() * 2);
        for (a, b) in rows {
            users.insert(Snowflake::new(a));
            users.insert(Snowflake::new(b));
        }
        Ok(users)
    }

    #[instrument(skip(self))]
    async fn list_partners_this_week(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        week_key: WeekKey,
    ) -> RepoResult<HashSet<Snowflake>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT user_a, user_b
            FROM matches
            WHERE community_id = $1 AND week_key = $2 AND (user_a = $3 OR user_b = $3)
            "#,
        )
        .bind(community_id.into_inner())
        .bind(week_key.as_date())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let me = user_id.into_inner();
        let partners = rows
            .into_iter()
            .map(|(a, b)| Snowflake::new(if a == me { b } else { a }))
            .collect();
        Ok(partners)
    }
}
