//! Reminder service
//!
//! Periodic nudges for matches with a pending side. Bounded by the
//! per-match reminder cap; the count only moves after a successful post,
//! so a failed nudge does not consume budget.

use tracing::{debug, info, instrument, warn};

use pairweek_core::{MarkerKind, Snowflake, WeekKey};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reminder service
pub struct ReminderService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReminderService<'a> {
    /// Create a new ReminderService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Nudge every open match of the week that still has a pending side
    ///
    /// Returns the number of reminders actually posted. Matches whose
    /// collaboration space is gone are skipped silently.
    #[instrument(skip(self))]
    pub async fn send_due_reminders(
        &self,
        community_id: Snowflake,
        week_key: WeekKey,
    ) -> ServiceResult<u32> {
        let cap = self.ctx.matching().reminder_cap;
        let due = self
            .ctx
            .match_repo()
            .list_needing_reminder(community_id, week_key, cap)
            .await?;

        let mut sent = 0u32;

        for m in due {
            let Some(space) = m.space_handle else {
                debug!(match_id = %m.id, "Match has no collaboration space, skipping reminder");
                continue;
            };

            let pending = m.pending_sides();
            if pending.is_empty() {
                continue;
            }

            let mentions = pending
                .iter()
                .map(|u| format!("<@{u}>"))
                .collect::<Vec<_>>()
                .join(" ");
            let text = format!(
                "Reminder: {mentions} please react with {} once you have met, \
                 or {} if it is not happening this week.",
                MarkerKind::Confirm.as_emoji(),
                MarkerKind::Decline.as_emoji(),
            );

            match self.ctx.platform().post(space, &text).await {
                Ok(_) => {
                    // One match's bookkeeping failure must not abort the sweep.
                    if let Err(e) = self.ctx.match_repo().increment_reminder(m.id).await {
                        warn!(match_id = %m.id, error = %e, "Failed to record reminder count");
                    }
                    sent += 1;
                }
                Err(e) if e.is_not_found() => {
                    debug!(match_id = %m.id, "Collaboration space gone, skipping reminder");
                }
                Err(e) => {
                    warn!(match_id = %m.id, error = %e, "Failed to post reminder");
                }
            }
        }

        info!(
            community_id = %community_id,
            week_key = %week_key,
            sent,
            "Reminder sweep finished"
        );

        Ok(sent)
    }
}
