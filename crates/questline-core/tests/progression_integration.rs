//! End-to-end progression scenarios through the `App` reducers.

use chrono::{TimeZone, Utc};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use questline_core::app::{App, AppState};
use questline_core::clock::FixedClock;
use questline_core::quests::{QUEST_COMPLETE_MICRO, QUEST_GAIN_XP};
use questline_core::task::MicroTaskDraft;
use questline_core::{Event, LeagueTier, ShopItem};

fn new_app(growth_probability: f64) -> App<FixedClock, Pcg64Mcg> {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap());
    App::new(
        AppState::default(),
        clock,
        Pcg64Mcg::seed_from_u64(42),
        growth_probability,
    )
}

fn draft(title: &str, xp: u32) -> MicroTaskDraft {
    MicroTaskDraft {
        title: title.to_string(),
        duration_est_min: 10,
        difficulty: 2,
        friction_score: 2,
        xp_reward: xp,
        success_criteria: "done".to_string(),
        next_hint: "keep going".to_string(),
    }
}

/// Complete the current active quest after `minutes` of focus.
fn complete_after(app: &mut App<FixedClock, Pcg64Mcg>, minutes: i64) -> Vec<Event> {
    let id = app.state.active_quest_id.clone().unwrap();
    app.start_quest(&id).unwrap();
    app.clock.advance_secs(minutes * 60);
    app.complete_active_quest().unwrap().events
}

#[test]
fn fresh_user_first_completion_is_exactly_the_task_reward() {
    let mut app = new_app(0.0);
    app.session_start();

    // Fresh user completes a 50-XP task estimated at 10 minutes in 9.
    let goal = app.create_macro_task("Write the report", "work").unwrap();
    app.attach_drafts(
        &goal.id,
        vec![draft("Open the document", 50), draft("Write the intro", 50)],
    )
    .unwrap();
    complete_after(&mut app, 9);

    let user = &app.state.user;
    assert_eq!(user.total_xp, 50);
    assert_eq!(user.level, 1);
    assert_eq!(user.streak_count, 1);
    assert_eq!(user.league_tier, LeagueTier::Bronze);
    assert!((user.recent_accuracy_ratio() - 0.9).abs() < 1e-9);
    assert!(app
        .state
        .daily_quests
        .get(QUEST_COMPLETE_MICRO)
        .unwrap()
        .completed());
    assert_eq!(
        app.state.daily_quests.get(QUEST_GAIN_XP).unwrap().current_value,
        50
    );

    // A completion the next day takes the streak to 2.
    app.clock.advance_days(1);
    app.session_start();
    complete_after(&mut app, 10);
    assert_eq!(app.state.user.streak_count, 2);
    assert_eq!(app.state.user.total_xp, 100);
}

#[test]
fn level_and_league_cross_together_at_one_thousand_xp() {
    let mut app = new_app(0.0);
    app.session_start();

    let goal = app.create_macro_task("Grind", "study").unwrap();
    let drafts: Vec<_> = (0..4).map(|i| draft(&format!("step {i}"), 300)).collect();
    app.attach_drafts(&goal.id, drafts).unwrap();

    complete_after(&mut app, 10);
    complete_after(&mut app, 10);
    complete_after(&mut app, 10);
    assert_eq!(app.state.user.total_xp, 900);
    assert_eq!(app.state.user.level, 1);

    let events = complete_after(&mut app, 10);
    assert_eq!(app.state.user.total_xp, 1200);
    assert_eq!(app.state.user.level, 2);
    assert_eq!(app.state.user.league_tier, LeagueTier::Silver);
    assert!(events.iter().any(|e| matches!(e, Event::LevelUp { level: 2 })));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::LeaguePromoted {
            tier: LeagueTier::Silver
        }
    )));
}

#[test]
fn garden_grows_on_every_completion_at_probability_one() {
    let mut app = new_app(1.0);
    app.session_start();

    let goal = app.create_macro_task("Revise notes", "study").unwrap();
    let drafts: Vec<_> = (0..3).map(|i| draft(&format!("step {i}"), 20)).collect();
    app.attach_drafts(&goal.id, drafts).unwrap();

    for _ in 0..3 {
        let events = complete_after(&mut app, 5);
        assert!(events.iter().any(|e| matches!(e, Event::PlantGrown { .. })));
    }
    assert_eq!(app.state.user.garden.len(), 3);
    // Study completions grow the study plant.
    assert!(app.state.user.garden.iter().all(|p| p.plant_type == "🌳"));
    // Distinct slots.
    let mut positions: Vec<u8> = app.state.user.garden.iter().map(|p| p.position).collect();
    positions.sort_unstable();
    positions.dedup();
    assert_eq!(positions.len(), 3);
}

#[test]
fn garden_never_grows_at_probability_zero() {
    let mut app = new_app(0.0);
    app.session_start();

    let goal = app.create_macro_task("Tidy up", "home").unwrap();
    app.attach_drafts(&goal.id, vec![draft("clear the desk", 20)])
        .unwrap();
    let events = complete_after(&mut app, 5);
    assert!(!events.iter().any(|e| matches!(e, Event::PlantGrown { .. })));
    assert!(app.state.user.garden.is_empty());
}

#[test]
fn streak_freeze_purchase_survives_a_missed_day() {
    let mut app = new_app(0.0);
    app.session_start();

    let goal = app.create_macro_task("Routine", "health").unwrap();
    let drafts: Vec<_> = (0..3).map(|i| draft(&format!("day {i}"), 200)).collect();
    app.attach_drafts(&goal.id, drafts).unwrap();

    complete_after(&mut app, 5);
    app.clock.advance_days(1);
    app.session_start();
    complete_after(&mut app, 5);
    assert_eq!(app.state.user.streak_count, 2);

    app.buy_item(ShopItem::StreakFreeze).unwrap();
    assert_eq!(app.state.user.total_xp, 100);
    assert_eq!(app.state.user.inventory.streak_freeze, 1);

    // Miss a full day.
    app.clock.advance_days(2);
    let events = app.session_start();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::StreakProtected {
            remaining_freezes: 0
        }
    )));
    assert_eq!(app.state.user.streak_count, 2);

    // A completion later that day extends normally.
    complete_after(&mut app, 5);
    assert_eq!(app.state.user.streak_count, 3);
}

#[test]
fn badges_unlock_once_and_stay() {
    let mut app = new_app(0.0);
    app.session_start();

    let goal = app.create_macro_task("Deep work", "work").unwrap();
    let drafts: Vec<_> = (0..2).map(|i| draft(&format!("block {i}"), 10)).collect();
    app.attach_drafts(&goal.id, drafts).unwrap();

    // 60 focused minutes in one completion unlocks the focused-hour badge.
    let events = complete_after(&mut app, 60);
    assert!(events.iter().any(|e| matches!(
        e,
        Event::BadgeUnlocked { badge_id } if badge_id == "first_step"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::BadgeUnlocked { badge_id } if badge_id == "focused_hour"
    )));

    // No re-emission on the next completion.
    let events = complete_after(&mut app, 5);
    assert!(!events.iter().any(|e| matches!(e, Event::BadgeUnlocked { .. })));
    assert!(app.state.user.unlocked_badges.contains("first_step"));
}

#[test]
fn accuracy_window_tracks_the_last_five_completions() {
    let mut app = new_app(0.0);
    app.session_start();

    let goal = app.create_macro_task("Calibrate", "study").unwrap();
    let drafts: Vec<_> = (0..3).map(|i| draft(&format!("step {i}"), 10)).collect();
    app.attach_drafts(&goal.id, drafts).unwrap();

    // Estimates are 10 minutes each; actuals 10, 20, 15.
    complete_after(&mut app, 10);
    complete_after(&mut app, 20);
    complete_after(&mut app, 15);

    let ratio = app.state.user.recent_accuracy_ratio();
    assert!((ratio - 1.5).abs() < 1e-9);
    assert!((app.pacing_profile().accuracy_ratio - 1.5).abs() < 1e-9);
}
