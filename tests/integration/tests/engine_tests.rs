//! End-to-end behavioral tests for the matching engine
//!
//! Pairing output is order-dependent on an internal shuffle, so these
//! tests assert on "some valid partition" properties rather than exact
//! pair sequences.

use std::collections::HashMap;

use chrono::{Duration, Utc};

use integration_tests::TestEngine;
use pairweek_common::MatchingConfig;
use pairweek_core::{
    MarkerKind, MatchRepository, ParticipantStatus, PoolRepository, ReactionEvent, Snowflake,
    WeekKey,
};
use pairweek_service::{
    MatchLifecycleService, PairingService, PoolService, RematchOutcome, ReminderService,
};

const COMMUNITY: Snowflake = Snowflake::new(1);

fn reaction(space: Snowflake, user: Snowflake, marker: MarkerKind) -> ReactionEvent {
    ReactionEvent {
        space_handle: space,
        user_id: user,
        marker,
    }
}

// ============================================================================
// Weekly pairing
// ============================================================================

#[tokio::test]
async fn even_pool_pairs_everyone_once() {
    let engine = TestEngine::new();
    let users = engine.join_users(COMMUNITY, 6).await;
    let week = WeekKey::current();

    let report = PairingService::new(&engine.ctx)
        .run_weekly_pairing(COMMUNITY, week)
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 3);
    assert_eq!(report.pairs_failed, 0);
    assert!(report.sat_out.is_none());

    // Every user appears in exactly one pair
    let mut appearances: HashMap<Snowflake, u32> = HashMap::new();
    for m in engine.matches.all() {
        assert_eq!(m.week_key, week);
        *appearances.entry(m.user_a).or_default() += 1;
        *appearances.entry(m.user_b).or_default() += 1;
    }
    for user in &users {
        assert_eq!(appearances.get(user), Some(&1));
    }
}

#[tokio::test]
async fn odd_pool_sits_out_exactly_one() {
    let engine = TestEngine::new();
    let users = engine.join_users(COMMUNITY, 5).await;
    let week = WeekKey::current();

    let report = PairingService::new(&engine.ctx)
        .run_weekly_pairing(COMMUNITY, week)
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 2);
    let sat_out = report.sat_out.expect("one member must sit out");
    assert!(users.contains(&sat_out));

    // The sit-out is recorded and not in any pair
    assert!(engine.pool.last_sat_out(COMMUNITY, sat_out).is_some());
    let matched = engine
        .matches
        .list_matched_this_week(COMMUNITY, week)
        .await
        .unwrap();
    assert!(!matched.contains(&sat_out));
    assert_eq!(matched.len(), 4);
}

#[tokio::test]
async fn recent_sit_out_is_spared_while_alternatives_exist() {
    let engine = TestEngine::new();
    let users = engine.join_users(COMMUNITY, 3).await;
    engine
        .pool
        .set_last_sat_out(COMMUNITY, users[0], Some(Utc::now() - Duration::weeks(1)));

    let report = PairingService::new(&engine.ctx)
        .run_weekly_pairing(COMMUNITY, WeekKey::current())
        .await
        .unwrap();

    let sat_out = report.sat_out.unwrap();
    assert_ne!(sat_out, users[0]);
}

#[tokio::test]
async fn sit_out_falls_back_when_everyone_sat_out_recently() {
    let engine = TestEngine::new();
    let users = engine.join_users(COMMUNITY, 3).await;
    for user in &users {
        engine
            .pool
            .set_last_sat_out(COMMUNITY, *user, Some(Utc::now() - Duration::weeks(1)));
    }

    let report = PairingService::new(&engine.ctx)
        .run_weekly_pairing(COMMUNITY, WeekKey::current())
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 1);
    assert!(report.sat_out.is_some());
}

#[tokio::test]
async fn rerun_within_same_week_creates_nothing() {
    let engine = TestEngine::new();
    engine.join_users(COMMUNITY, 4).await;
    let week = WeekKey::current();
    let pairing = PairingService::new(&engine.ctx);

    let first = pairing.run_weekly_pairing(COMMUNITY, week).await.unwrap();
    assert_eq!(first.pairs_created, 2);

    let second = pairing.run_weekly_pairing(COMMUNITY, week).await.unwrap();
    assert_eq!(second.pairs_created, 0);
    assert!(second.sat_out.is_none());
    assert_eq!(engine.matches.all().len(), 2);
}

#[tokio::test]
async fn fewer_than_two_candidates_is_a_no_op() {
    let engine = TestEngine::new();
    let users = engine.join_users(COMMUNITY, 1).await;

    let report = PairingService::new(&engine.ctx)
        .run_weekly_pairing(COMMUNITY, WeekKey::current())
        .await
        .unwrap();

    assert_eq!(report, Default::default());
    assert!(engine.matches.all().is_empty());
    // A lone member never counts as a sit-out
    assert!(engine.pool.last_sat_out(COMMUNITY, users[0]).is_none());
}

#[tokio::test]
async fn skipping_members_are_excluded() {
    let engine = TestEngine::new();
    let users = engine.join_users(COMMUNITY, 3).await;
    let week = WeekKey::current();

    // users[2] pauses for one week
    PoolService::new(&engine.ctx)
        .skip_weeks(COMMUNITY, users[2], 1)
        .await
        .unwrap();

    let report = PairingService::new(&engine.ctx)
        .run_weekly_pairing(COMMUNITY, week)
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 1);
    assert!(report.sat_out.is_none());
    let matched = engine
        .matches
        .list_matched_this_week(COMMUNITY, week)
        .await
        .unwrap();
    assert!(!matched.contains(&users[2]));
}

#[tokio::test]
async fn space_failure_drops_pair_without_record() {
    let engine = TestEngine::new();
    engine.join_users(COMMUNITY, 2).await;
    let week = WeekKey::current();
    let pairing = PairingService::new(&engine.ctx);

    engine
        .platform
        .fail_create_space
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let report = pairing.run_weekly_pairing(COMMUNITY, week).await.unwrap();
    assert_eq!(report.pairs_created, 0);
    assert_eq!(report.pairs_failed, 1);
    assert!(engine.matches.all().is_empty());

    // The pair is picked up again once the platform recovers
    engine
        .platform
        .fail_create_space
        .store(false, std::sync::atomic::Ordering::SeqCst);
    let retry = pairing.run_weekly_pairing(COMMUNITY, week).await.unwrap();
    assert_eq!(retry.pairs_created, 1);
}

#[tokio::test]
async fn store_failure_on_one_pair_does_not_abort_the_run() {
    let engine = TestEngine::new();
    engine.join_users(COMMUNITY, 4).await;
    let week = WeekKey::current();
    let pairing = PairingService::new(&engine.ctx);

    engine.matches.fail_next_create();

    let report = pairing.run_weekly_pairing(COMMUNITY, week).await.unwrap();
    assert_eq!(report.pairs_created, 1);
    assert_eq!(report.pairs_failed, 1);
    assert_eq!(engine.matches.all().len(), 1);

    // The dropped pair is still unmatched and picked up by the next run
    let retry = pairing.run_weekly_pairing(COMMUNITY, week).await.unwrap();
    assert_eq!(retry.pairs_created, 1);
    assert_eq!(engine.matches.all().len(), 2);
}

// ============================================================================
// Match lifecycle
// ============================================================================

#[tokio::test]
async fn match_creation_posts_instructions_and_markers() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));

    let id = MatchLifecycleService::new(&engine.ctx)
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .expect("match should be created");

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    let space = m.space_handle.unwrap();

    let posts = engine.platform.posts_in(space);
    assert_eq!(posts.len(), 1);
    assert!(posts[0].contains("<@100>"));
    assert!(posts[0].contains("<@101>"));

    let markers = engine.platform.markers.lock().unwrap();
    let kinds: Vec<MarkerKind> = markers.iter().map(|(_, _, k)| *k).collect();
    assert!(kinds.contains(&MarkerKind::Confirm));
    assert!(kinds.contains(&MarkerKind::Decline));
}

#[tokio::test]
async fn confirm_twice_is_idempotent() {
    let engine = TestEngine::new();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));
    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, WeekKey::current(), a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    lifecycle
        .handle_reaction(reaction(space, a, MarkerKind::Confirm))
        .await
        .unwrap();
    let after_first = engine.matches.find_by_id(id).await.unwrap().unwrap();

    lifecycle
        .handle_reaction(reaction(space, a, MarkerKind::Confirm))
        .await
        .unwrap();
    let after_second = engine.matches.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(after_first.status_a, ParticipantStatus::Confirmed);
    assert_eq!(after_first, after_second);
    assert!(!after_second.is_complete());
}

#[tokio::test]
async fn both_confirm_completes_and_silences_reminders() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));
    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    lifecycle
        .handle_reaction(reaction(space, a, MarkerKind::Confirm))
        .await
        .unwrap();
    lifecycle
        .handle_reaction(reaction(space, b, MarkerKind::Confirm))
        .await
        .unwrap();

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert!(m.is_complete());
    assert!(m.both_confirmed());

    // Completion notice was posted
    let posts = engine.platform.posts_in(space);
    assert!(posts.iter().any(|p| p.contains("confirmed")));

    // And no reminder is ever sent for it again
    let sent = ReminderService::new(&engine.ctx)
        .send_due_reminders(COMMUNITY, week)
        .await
        .unwrap();
    assert_eq!(sent, 0);
    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(m.reminder_count, 0);
}

#[tokio::test]
async fn decline_is_terminal_and_rematches_the_partner() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b, c) = (Snowflake::new(100), Snowflake::new(101), Snowflake::new(102));
    for user in [a, b, c] {
        engine.pool.join(COMMUNITY, user).await.unwrap();
    }

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    // B declines while A is still pending
    lifecycle
        .handle_reaction(reaction(space, b, MarkerKind::Decline))
        .await
        .unwrap();

    let declined = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert!(declined.is_complete());
    assert_eq!(declined.status_of(b), Some(ParticipantStatus::Declined));

    // The decline notice names the partner
    let posts = engine.platform.posts_in(space);
    assert!(posts.iter().any(|p| p.contains("<@100>")));

    // A new match exists for A and C, same week; the decliner got nothing
    let all = engine.matches.all();
    assert_eq!(all.len(), 2);
    let rematch = all.iter().find(|m| m.id != id).unwrap();
    assert_eq!(rematch.week_key, week);
    assert!(rematch.involves(a));
    assert!(rematch.involves(c));
    assert!(!rematch.involves(b));
}

#[tokio::test]
async fn rematch_space_is_labelled_as_a_rematch() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b, c) = (Snowflake::new(100), Snowflake::new(101), Snowflake::new(102));
    for user in [a, b, c] {
        engine.pool.join(COMMUNITY, user).await.unwrap();
    }

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let first_space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    let first_title = engine.platform.space_title(first_space).unwrap();
    assert!(!first_title.contains("rematch"));

    lifecycle
        .handle_reaction(reaction(first_space, b, MarkerKind::Decline))
        .await
        .unwrap();

    let rematch = engine
        .matches
        .all()
        .into_iter()
        .find(|m| m.id != id)
        .unwrap();
    let space = rematch.space_handle.unwrap();
    assert!(engine.platform.space_title(space).unwrap().contains("(rematch)"));

    let posts = engine.platform.posts_in(space);
    assert!(posts.iter().any(|p| p.contains("This is a rematch")));
}

#[tokio::test]
async fn decline_without_candidate_notifies_the_partner() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));
    for user in [a, b] {
        engine.pool.join(COMMUNITY, user).await.unwrap();
    }

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    lifecycle
        .handle_reaction(reaction(space, b, MarkerKind::Decline))
        .await
        .unwrap();

    assert_eq!(engine.matches.all().len(), 1);
    assert!(!engine.platform.notifications_for(a).is_empty());
    assert!(engine.platform.notifications_for(b).is_empty());
}

#[tokio::test]
async fn rematch_never_proposes_already_matched_users() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let users = engine.join_users(COMMUNITY, 4).await;
    let (a, b, c, d) = (users[0], users[1], users[2], users[3]);

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    lifecycle
        .create_match(COMMUNITY, week, c, d, false)
        .await
        .unwrap()
        .unwrap();

    // Everyone else is matched this week, so A has no candidate
    let outcome = PairingService::new(&engine.ctx)
        .attempt_rematch(COMMUNITY, a, week)
        .await
        .unwrap();
    assert_eq!(outcome, RematchOutcome::NoCandidate);
    assert_eq!(engine.matches.all().len(), 2);
}

#[tokio::test]
async fn stray_reactions_are_ignored() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));
    let outsider = Snowflake::new(999);

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    // Unknown space
    lifecycle
        .handle_reaction(reaction(Snowflake::new(424_242), a, MarkerKind::Confirm))
        .await
        .unwrap();

    // Non-participant
    lifecycle
        .handle_reaction(reaction(space, outsider, MarkerKind::Decline))
        .await
        .unwrap();

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(m.status_a, ParticipantStatus::Pending);
    assert_eq!(m.status_b, ParticipantStatus::Pending);
    assert!(!m.is_complete());

    // Reactions after completion change nothing and spawn no rematch
    lifecycle
        .handle_reaction(reaction(space, a, MarkerKind::Confirm))
        .await
        .unwrap();
    lifecycle
        .handle_reaction(reaction(space, b, MarkerKind::Confirm))
        .await
        .unwrap();
    lifecycle
        .handle_reaction(reaction(space, b, MarkerKind::Decline))
        .await
        .unwrap();

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert!(m.both_confirmed());
    assert_eq!(engine.matches.all().len(), 1);
}

// ============================================================================
// Reminders
// ============================================================================

#[tokio::test]
async fn reminders_mention_only_pending_sides() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    lifecycle
        .handle_reaction(reaction(space, a, MarkerKind::Confirm))
        .await
        .unwrap();

    let sent = ReminderService::new(&engine.ctx)
        .send_due_reminders(COMMUNITY, week)
        .await
        .unwrap();
    assert_eq!(sent, 1);

    let posts = engine.platform.posts_in(space);
    let reminder = posts.iter().find(|p| p.contains("Reminder")).unwrap();
    assert!(reminder.contains("<@101>"));
    assert!(!reminder.contains("<@100>"));

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(m.reminder_count, 1);
}

#[tokio::test]
async fn reminder_count_never_exceeds_cap() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));

    let id = MatchLifecycleService::new(&engine.ctx)
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();

    let reminders = ReminderService::new(&engine.ctx);
    assert_eq!(reminders.send_due_reminders(COMMUNITY, week).await.unwrap(), 1);
    assert_eq!(reminders.send_due_reminders(COMMUNITY, week).await.unwrap(), 1);
    // Cap (2 by default) reached: nothing more goes out
    assert_eq!(reminders.send_due_reminders(COMMUNITY, week).await.unwrap(), 0);

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(m.reminder_count, 2);
}

#[tokio::test]
async fn dead_space_skips_reminder_without_spending_budget() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));

    let id = MatchLifecycleService::new(&engine.ctx)
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    engine.platform.mark_space_dead(space);

    let sent = ReminderService::new(&engine.ctx)
        .send_due_reminders(COMMUNITY, week)
        .await
        .unwrap();
    assert_eq!(sent, 0);

    let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(m.reminder_count, 0);
}

#[tokio::test]
async fn bookkeeping_failure_on_one_reminder_does_not_abort_the_sweep() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    lifecycle
        .create_match(COMMUNITY, week, Snowflake::new(100), Snowflake::new(101), false)
        .await
        .unwrap()
        .unwrap();
    lifecycle
        .create_match(COMMUNITY, week, Snowflake::new(102), Snowflake::new(103), false)
        .await
        .unwrap()
        .unwrap();

    // The first match's count update fails; the sweep still reaches the second
    engine.matches.fail_next_increment();

    let sent = ReminderService::new(&engine.ctx)
        .send_due_reminders(COMMUNITY, week)
        .await
        .unwrap();
    assert_eq!(sent, 2);

    let counts: Vec<i32> = engine
        .matches
        .all()
        .iter()
        .map(|m| m.reminder_count)
        .collect();
    assert_eq!(counts, vec![0, 1]);
}

// ============================================================================
// Reaction dispatch
// ============================================================================

#[tokio::test]
async fn dispatcher_feeds_reactions_to_the_lifecycle() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));

    let id = MatchLifecycleService::new(&engine.ctx)
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();

    let (event_tx, event_rx) = tokio::sync::mpsc::channel(8);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let dispatcher = tokio::spawn(pairweek_scheduler::run_reaction_dispatcher(
        engine.ctx.clone(),
        event_rx,
        shutdown_rx,
    ));

    event_tx
        .send(reaction(space, a, MarkerKind::Confirm))
        .await
        .unwrap();

    // The dispatcher is asynchronous; wait for the status to land
    let mut confirmed = false;
    for _ in 0..100 {
        let m = engine.matches.find_by_id(id).await.unwrap().unwrap();
        if m.status_a == ParticipantStatus::Confirmed {
            confirmed = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(confirmed);

    shutdown_tx.send(true).unwrap();
    dispatcher.await.unwrap();
}

// ============================================================================
// Pool service
// ============================================================================

#[tokio::test]
async fn join_and_leave_are_idempotent() {
    let engine = TestEngine::new();
    let pool = PoolService::new(&engine.ctx);
    let user = Snowflake::new(100);

    assert!(pool.join(COMMUNITY, user).await.unwrap());
    assert!(!pool.join(COMMUNITY, user).await.unwrap());
    assert!(pool.leave(COMMUNITY, user).await.unwrap());
    assert!(!pool.leave(COMMUNITY, user).await.unwrap());
}

#[tokio::test]
async fn skip_weeks_validates_bounds() {
    let engine = TestEngine::new();
    let pool = PoolService::new(&engine.ctx);
    let user = Snowflake::new(100);
    pool.join(COMMUNITY, user).await.unwrap();

    assert!(pool.skip_weeks(COMMUNITY, user, 0).await.is_err());
    let max = MatchingConfig::default().max_skip_weeks;
    assert!(pool.skip_weeks(COMMUNITY, user, max + 1).await.is_err());

    let until = pool.skip_weeks(COMMUNITY, user, 2).await.unwrap();
    assert_eq!(until, WeekKey::current().as_date() + Duration::weeks(2));

    let status = pool.status(COMMUNITY, user).await.unwrap().unwrap();
    assert!(status.skipping);
    assert_eq!(status.skip_until, Some(until));

    pool.clear_skip(COMMUNITY, user).await.unwrap();
    let status = pool.status(COMMUNITY, user).await.unwrap().unwrap();
    assert!(!status.skipping);
    assert!(status.skip_until.is_none());
}

#[tokio::test]
async fn history_reports_matches_from_the_viewer_side() {
    let engine = TestEngine::new();
    let week = WeekKey::current();
    let (a, b) = (Snowflake::new(100), Snowflake::new(101));
    engine.pool.join(COMMUNITY, a).await.unwrap();
    engine.pool.join(COMMUNITY, b).await.unwrap();

    let lifecycle = MatchLifecycleService::new(&engine.ctx);
    let id = lifecycle
        .create_match(COMMUNITY, week, a, b, false)
        .await
        .unwrap()
        .unwrap();
    let space = engine
        .matches
        .find_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .space_handle
        .unwrap();
    lifecycle
        .handle_reaction(reaction(space, b, MarkerKind::Confirm))
        .await
        .unwrap();

    let history = PoolService::new(&engine.ctx)
        .history(COMMUNITY, a)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].partner, b);
    assert_eq!(history[0].my_status, ParticipantStatus::Pending);
    assert_eq!(history[0].partner_status, ParticipantStatus::Confirmed);
    assert!(!history[0].completed);

    // The outsider has no history
    let none = PoolService::new(&engine.ctx)
        .history(COMMUNITY, Snowflake::new(999))
        .await
        .unwrap();
    assert!(none.is_empty());
}
