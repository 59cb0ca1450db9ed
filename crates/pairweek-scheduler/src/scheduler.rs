//! Tick-driven triggers for pairing runs and reminder sweeps
//!
//! Coarse intervals paired with a ran-today guard: the pairing tick fires
//! once the configured weekday and hour are reached, the reminder tick
//! once per configured weekday. Re-running after a restart is safe because
//! the week-key dedup in the services absorbs duplicate fires.

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{error, info};

use pairweek_common::SchedulerConfig;
use pairweek_core::WeekKey;
use pairweek_service::{PairingService, ReminderService, ServiceContext};

/// Periodic trigger loop for one deployment
pub struct Scheduler {
    ctx: ServiceContext,
    config: SchedulerConfig,
    last_pairing_run: Option<NaiveDate>,
    last_reminder_run: Option<NaiveDate>,
}

impl Scheduler {
    /// Create a new Scheduler
    pub fn new(ctx: ServiceContext, config: SchedulerConfig) -> Self {
        Self {
            ctx,
            config,
            last_pairing_run: None,
            last_reminder_run: None,
        }
    }

    /// Run until the shutdown signal flips to `true`
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut pairing_tick = interval(Duration::from_secs(self.config.pairing_tick_secs));
        let mut reminder_tick = interval(Duration::from_secs(self.config.reminder_tick_secs));

        info!(
            pairing_weekday = %self.config.pairing_weekday,
            pairing_hour_utc = self.config.pairing_hour_utc,
            "Scheduler started"
        );

        loop {
            tokio::select! {
                _ = pairing_tick.tick() => {
                    let now = Utc::now();
                    if pairing_due(&self.config, now, self.last_pairing_run) {
                        self.last_pairing_run = Some(now.date_naive());
                        self.run_pairing().await;
                    }
                }
                _ = reminder_tick.tick() => {
                    let now = Utc::now();
                    if reminder_due(&self.config, now, self.last_reminder_run) {
                        self.last_reminder_run = Some(now.date_naive());
                        self.run_reminders().await;
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Scheduler shutting down");
                        return;
                    }
                }
            }
        }
    }

    /// Pair every community with pool members; failures are isolated per community
    async fn run_pairing(&self) {
        let week_key = WeekKey::current();
        let communities = match self.ctx.pool_repo().list_communities().await {
            Ok(communities) => communities,
            Err(e) => {
                error!(error = %e, "Failed to list communities for pairing");
                return;
            }
        };

        let pairing = PairingService::new(&self.ctx);
        for community_id in communities {
            if let Err(e) = pairing.run_weekly_pairing(community_id, week_key).await {
                error!(
                    community_id = %community_id,
                    error = %e,
                    "Weekly pairing failed"
                );
            }
        }
    }

    /// Sweep reminders for every community; failures are isolated per community
    async fn run_reminders(&self) {
        let week_key = WeekKey::current();
        let communities = match self.ctx.pool_repo().list_communities().await {
            Ok(communities) => communities,
            Err(e) => {
                error!(error = %e, "Failed to list communities for reminders");
                return;
            }
        };

        let reminders = ReminderService::new(&self.ctx);
        for community_id in communities {
            if let Err(e) = reminders.send_due_reminders(community_id, week_key).await {
                error!(
                    community_id = %community_id,
                    error = %e,
                    "Reminder sweep failed"
                );
            }
        }
    }
}

/// Whether the pairing run should fire at `now`
fn pairing_due(config: &SchedulerConfig, now: DateTime<Utc>, last_run: Option<NaiveDate>) -> bool {
    now.weekday() == config.pairing_weekday
        && now.hour() >= config.pairing_hour_utc
        && last_run != Some(now.date_naive())
}

/// Whether the reminder sweep should fire at `now`
fn reminder_due(config: &SchedulerConfig, now: DateTime<Utc>, last_run: Option<NaiveDate>) -> bool {
    config.reminder_weekdays.contains(&now.weekday())
        && last_run != Some(now.date_naive())
}
