//! Match lifecycle service
//!
//! Drives a match from creation through confirmation or decline to
//! completion. Status mutations always commit before any notification
//! side effect, so adapter failures never roll back state.

use tracing::{debug, info, instrument, warn};

use pairweek_core::{
    MarkerKind, Match, MatchId, NewMatch, ParticipantStatus, ReactionEvent, Snowflake, WeekKey,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::pairing::{PairingService, RematchOutcome};

/// Match lifecycle service
pub struct MatchLifecycleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MatchLifecycleService<'a> {
    /// Create a new MatchLifecycleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a match: collaboration space, protocol instructions, record
    ///
    /// Returns `None` when space creation fails; the failure is logged and
    /// no record is persisted, so a later pairing run can pick the pair up
    /// again. Rematches get a marked title and an extra line in the
    /// instructions so participants can tell them from first pairings.
    #[instrument(skip(self))]
    pub async fn create_match(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
        user_a: Snowflake,
        user_b: Snowflake,
        rematch: bool,
    ) -> ServiceResult<Option<MatchId>> {
        let title = if rematch {
            format!("1:1 - week of {week_key} (rematch)")
        } else {
            format!("1:1 - week of {week_key}")
        };
        let space_handle = match self.ctx.platform().create_space(community_id, &title).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!(
                    community_id = %community_id,
                    user_a = %user_a,
                    user_b = %user_b,
                    error = %e,
                    "Collaboration space creation failed, skipping pair"
                );
                return Ok(None);
            }
        };

        let id = self
            .ctx
            .match_repo()
            .create(&NewMatch {
                community_id,
                week_key,
                user_a,
                user_b,
                space_handle: Some(space_handle),
            })
            .await?;

        let rematch_note = if rematch {
            "(This is a rematch after the original pairing did not work out.)\n"
        } else {
            ""
        };
        let instructions = format!(
            "{} {} you have been paired for a 1:1 this week!\n\
             {rematch_note}\
             Find a time that works for both of you.\n\
             React with {} once you have met, or {} if you cannot make it this week.",
            mention(user_a),
            mention(user_b),
            MarkerKind::Confirm.as_emoji(),
            MarkerKind::Decline.as_emoji(),
        );

        match self.ctx.platform().post(space_handle, &instructions).await {
            Ok(message_ref) => {
                for marker in [MarkerKind::Confirm, MarkerKind::Decline] {
                    if let Err(e) = self
                        .ctx
                        .platform()
                        .add_marker(space_handle, message_ref, marker)
                        .await
                    {
                        warn!(match_id = %id, error = %e, "Failed to seed reaction marker");
                    }
                }
            }
            Err(e) => {
                warn!(match_id = %id, error = %e, "Failed to post match instructions");
            }
        }

        info!(
            match_id = %id,
            community_id = %community_id,
            week_key = %week_key,
            user_a = %user_a,
            user_b = %user_b,
            "Match created"
        );

        Ok(Some(id))
    }

    /// Dispatch a reaction event against the match owning its space
    ///
    /// Events are ignored unless they map to an existing, non-completed
    /// match and the actor is one of the two participants.
    #[instrument(skip(self))]
    pub async fn handle_reaction(&self, event: ReactionEvent) -> ServiceResult<()> {
        let Some(m) = self
            .ctx
            .match_repo()
            .find_by_space(event.space_handle)
            .await?
        else {
            debug!(space_handle = %event.space_handle, "Reaction in unknown space ignored");
            return Ok(());
        };

        if m.is_complete() {
            debug!(match_id = %m.id, "Reaction on completed match ignored");
            return Ok(());
        }

        if !m.involves(event.user_id) {
            debug!(
                match_id = %m.id,
                user_id = %event.user_id,
                "Reaction from non-participant ignored"
            );
            return Ok(());
        }

        match event.marker {
            MarkerKind::Confirm => self.on_confirm(&m, event.user_id).await,
            MarkerKind::Decline => self.on_decline(&m, event.user_id).await,
        }
    }

    /// Apply a confirmation from one participant
    ///
    /// Idempotent: a second confirmation from the same user changes nothing.
    /// When both sides have confirmed, the match completes and a notice is
    /// posted to the space.
    #[instrument(skip(self, m), fields(match_id = %m.id))]
    pub async fn on_confirm(&self, m: &Match, user_id: Snowflake) -> ServiceResult<()> {
        if m.status_of(user_id) == Some(ParticipantStatus::Confirmed) {
            return Ok(());
        }

        self.ctx
            .match_repo()
            .set_status(m.id, user_id, ParticipantStatus::Confirmed)
            .await?;

        let updated = self
            .ctx
            .match_repo()
            .find_by_id(m.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Match", m.id.to_string()))?;

        if updated.both_confirmed() {
            self.ctx.match_repo().complete(m.id).await?;

            info!(match_id = %m.id, "Both sides confirmed, match completed");

            if let Some(space) = updated.space_handle {
                if let Err(e) = self
                    .ctx
                    .platform()
                    .post(space, "Both of you confirmed. Nice work, see you next round!")
                    .await
                {
                    warn!(match_id = %m.id, error = %e, "Failed to post completion notice");
                }
            }
        } else {
            info!(match_id = %m.id, user_id = %user_id, "One side confirmed");
        }

        Ok(())
    }

    /// Apply a decline from one participant
    ///
    /// Decline is always terminal: the match completes regardless of the
    /// partner's status, and a rematch is attempted for the partner.
    #[instrument(skip(self, m), fields(match_id = %m.id))]
    pub async fn on_decline(&self, m: &Match, user_id: Snowflake) -> ServiceResult<()> {
        let partner = m
            .partner_of(user_id)
            .ok_or_else(|| ServiceError::internal("decline from non-participant"))?;

        self.ctx
            .match_repo()
            .set_status(m.id, user_id, ParticipantStatus::Declined)
            .await?;
        self.ctx.match_repo().complete(m.id).await?;

        info!(match_id = %m.id, user_id = %user_id, "Match declined");

        if let Some(space) = m.space_handle {
            let notice = format!(
                "{} your partner cannot make it this week. Looking for a new match for you...",
                mention(partner)
            );
            if let Err(e) = self.ctx.platform().post(space, &notice).await {
                warn!(match_id = %m.id, error = %e, "Failed to post decline notice");
            }
        }

        let outcome = PairingService::new(self.ctx)
            .attempt_rematch(m.community_id, partner, m.week_key)
            .await?;

        if outcome == RematchOutcome::NoCandidate {
            if let Err(e) = self
                .ctx
                .platform()
                .notify_direct(
                    partner,
                    "We could not find you a new 1:1 partner this week. You will be back in the pool next week.",
                )
                .await
            {
                warn!(match_id = %m.id, user_id = %partner, error = %e, "Failed to send no-rematch notice");
            }
        }

        Ok(())
    }
}

fn mention(user_id: Snowflake) -> String {
    format!("<@{user_id}>")
}
