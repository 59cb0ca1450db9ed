//! Pairing service
//!
//! Runs the weekly pairing algorithm and in-week rematches. Every run
//! reads fresh state from the stores, so re-running within the same week
//! is safe: members already matched this week are never paired again.

use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use tracing::{info, instrument, warn};

use pairweek_core::{Snowflake, WeekKey};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lifecycle::MatchLifecycleService;

/// Outcome of a weekly pairing run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairingReport {
    /// Matches successfully created
    pub pairs_created: u32,
    /// Pairs dropped because collaboration-space creation failed
    pub pairs_failed: u32,
    /// The member sitting out this week, if the eligible count was odd
    pub sat_out: Option<Snowflake>,
}

/// Outcome of a rematch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RematchOutcome {
    /// A new match was created
    Matched(pairweek_core::MatchId),
    /// No unmatched candidate was available (or space creation failed)
    NoCandidate,
}

/// Pairing service
pub struct PairingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PairingService<'a> {
    /// Create a new PairingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Run the weekly pairing for one community
    ///
    /// Eligible members not yet matched this week are shuffled and paired
    /// off. With an odd count, one member sits out, preferring those who
    /// have not sat out within the configured window.
    #[instrument(skip(self))]
    pub async fn run_weekly_pairing(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
    ) -> ServiceResult<PairingReport> {
        let eligible = self
            .ctx
            .pool_repo()
            .list_eligible(community_id, week_key)
            .await?;
        let already_matched = self
            .ctx
            .match_repo()
            .list_matched_this_week(community_id, week_key)
            .await?;

        let mut candidates: Vec<Snowflake> = eligible
            .into_iter()
            .filter(|u| !already_matched.contains(u))
            .collect();

        let mut report = PairingReport::default();

        if candidates.len() < 2 {
            info!(
                community_id = %community_id,
                week_key = %week_key,
                candidates = candidates.len(),
                "Not enough unmatched members to pair"
            );
            return Ok(report);
        }

        if candidates.len() % 2 == 1 {
            let sit_out = self.pick_sit_out(community_id, &candidates).await?;
            self.ctx
                .pool_repo()
                .mark_sat_out(community_id, sit_out)
                .await?;
            candidates.retain(|u| *u != sit_out);
            report.sat_out = Some(sit_out);

            info!(
                community_id = %community_id,
                week_key = %week_key,
                user_id = %sit_out,
                "Member sits out this week"
            );
        }

        {
            let mut rng = rand::thread_rng();
            candidates.shuffle(&mut rng);
        }

        // One pair failing must not abort the rest of the run.
        let lifecycle = MatchLifecycleService::new(self.ctx);
        for pair in candidates.chunks(2) {
            let [user_a, user_b] = pair else { continue };
            match lifecycle
                .create_match(community_id, week_key, *user_a, *user_b, false)
                .await
            {
                Ok(Some(_)) => report.pairs_created += 1,
                Ok(None) => report.pairs_failed += 1,
                Err(e) => {
                    warn!(
                        user_a = %user_a,
                        user_b = %user_b,
                        error = %e,
                        "Failed to create match for pair"
                    );
                    report.pairs_failed += 1;
                }
            }
        }

        info!(
            community_id = %community_id,
            week_key = %week_key,
            pairs_created = report.pairs_created,
            pairs_failed = report.pairs_failed,
            "Weekly pairing finished"
        );

        Ok(report)
    }

    /// Try to find a new partner for `user_id` within the same week
    ///
    /// Candidates are eligible members without any match this week who have
    /// not already been partnered with `user_id` this week.
    #[instrument(skip(self))]
    pub async fn attempt_rematch(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
        week_key: WeekKey,
    ) -> ServiceResult<RematchOutcome> {
        let eligible = self
            .ctx
            .pool_repo()
            .list_eligible(community_id, week_key)
            .await?;
        let already_matched = self
            .ctx
            .match_repo()
            .list_matched_this_week(community_id, week_key)
            .await?;
        let past_partners = self
            .ctx
            .match_repo()
            .list_partners_this_week(community_id, user_id, week_key)
            .await?;

        let candidates: Vec<Snowflake> = eligible
            .into_iter()
            .filter(|u| {
                *u != user_id && !already_matched.contains(u) && !past_partners.contains(u)
            })
            .collect();

        let Some(partner) = pick_uniform(&candidates) else {
            info!(
                community_id = %community_id,
                user_id = %user_id,
                "No rematch candidate available"
            );
            return Ok(RematchOutcome::NoCandidate);
        };

        let lifecycle = MatchLifecycleService::new(self.ctx);
        match lifecycle
            .create_match(community_id, week_key, user_id, partner, true)
            .await?
        {
            Some(id) => {
                info!(
                    community_id = %community_id,
                    user_id = %user_id,
                    partner = %partner,
                    match_id = %id,
                    "Rematch created"
                );
                Ok(RematchOutcome::Matched(id))
            }
            None => {
                warn!(
                    community_id = %community_id,
                    user_id = %user_id,
                    "Rematch space creation failed"
                );
                Ok(RematchOutcome::NoCandidate)
            }
        }
    }

    /// Pick the sit-out member for an odd-sized candidate set
    ///
    /// Members who sat out within the configured window are only chosen
    /// when every candidate did.
    async fn pick_sit_out(
        &self,
        community_id: Snowflake,
        candidates: &[Snowflake],
    ) -> ServiceResult<Snowflake> {
        let window = Duration::weeks(self.ctx.matching().sit_out_window_weeks);
        let recent = self
            .ctx
            .pool_repo()
            .list_recent_sit_outs(community_id, Utc::now() - window)
            .await?;

        let preferred: Vec<Snowflake> = candidates
            .iter()
            .copied()
            .filter(|u| !recent.contains(u))
            .collect();

        let pick = if preferred.is_empty() {
            pick_uniform(candidates)
        } else {
            pick_uniform(&preferred)
        };

        // candidates is non-empty by construction
        pick.ok_or_else(|| super::error::ServiceError::internal("empty sit-out candidate set"))
    }
}

fn pick_uniform(candidates: &[Snowflake]) -> Option<Snowflake> {
    let mut rng = rand::thread_rng();
    candidates.choose(&mut rng).copied()
}
