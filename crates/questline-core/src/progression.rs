//! Progression engine.
//!
//! Pure reducers over the `User` ledger: XP, level, league, counters, and
//! atomic shop purchases. The level is derived deterministically from XP
//! and recomputed on every mutation, so `level == total_xp / 1000 + 1`
//! holds for all reachable states.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::events::Event;
use crate::streak;
use crate::task::MicroTask;
use crate::user::{LeagueTier, User};

/// XP required per level.
pub const XP_PER_LEVEL: u64 = 1000;

/// Flat reward for submitting a daily reflection.
pub const FEEDBACK_XP: u32 = 20;

/// Reward for cheering a friend (once per friend per day).
pub const CHEER_XP: u32 = 2;

/// Level derived from total XP.
pub fn level_for_xp(total_xp: u64) -> u32 {
    (total_xp / XP_PER_LEVEL) as u32 + 1
}

/// Recompute level and league after an XP change, emitting notifications
/// for upward crossings. Downward level moves (shop spends) are silent.
fn reconcile_xp_derived(user: &mut User, events: &mut Vec<Event>) {
    let level = level_for_xp(user.total_xp);
    if level > user.level {
        events.push(Event::LevelUp { level });
    }
    user.level = level;

    let tier = LeagueTier::for_xp(user.total_xp);
    if tier > user.league_tier {
        events.push(Event::LeaguePromoted { tier });
    }
    user.league_tier = tier;
}

/// Credit XP and reconcile derived fields.
fn award_xp(user: &mut User, amount: u32, events: &mut Vec<Event>) {
    user.total_xp += amount as u64;
    reconcile_xp_derived(user, events);
}

/// Apply a micro-task completion to the ledger.
///
/// Credits the task's XP reward, bumps the completion and focus-minute
/// counters, feeds the pacing window, and registers the day with the
/// streak machine. `actual_minutes` comes from the timer and is >= 1.
pub fn apply_task_completion(
    user: &mut User,
    task: &MicroTask,
    actual_minutes: u32,
    today: NaiveDate,
) -> Vec<Event> {
    let mut events = Vec::new();

    user.total_completed_tasks += 1;
    user.total_focus_minutes += actual_minutes as u64;
    user.accuracy_window
        .record(actual_minutes, task.duration_est_min);
    award_xp(user, task.xp_reward, &mut events);

    if let Some(event) = streak::record_completion(user, today) {
        events.push(event);
    }

    events
}

/// Flat XP award for submitting a reflection.
///
/// The engine itself does not enforce once-per-day; that guard is the
/// reflection daily quest's target of 1, applied by the caller.
pub fn apply_feedback_reward(user: &mut User) -> Vec<Event> {
    let mut events = Vec::new();
    award_xp(user, FEEDBACK_XP, &mut events);
    events
}

/// Reward for cheering a friend.
pub fn apply_cheer_reward(user: &mut User) -> Vec<Event> {
    let mut events = Vec::new();
    award_xp(user, CHEER_XP, &mut events);
    events
}

/// Purchasable shop items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    /// Preserves the streak across one missed day.
    StreakFreeze,
    /// A rare seed for the garden.
    SeedPack,
}

impl ShopItem {
    pub fn cost(&self) -> u64 {
        match self {
            ShopItem::StreakFreeze => 300,
            ShopItem::SeedPack => 150,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShopItem::StreakFreeze => "Streak Freeze",
            ShopItem::SeedPack => "Rare Seed Pack",
        }
    }
}

/// Atomic purchase: either the full cost is debited and exactly one unit
/// granted, or the ledger is untouched and the rejection is returned.
pub fn buy_item(user: &mut User, item: ShopItem) -> Result<Vec<Event>, ValidationError> {
    let cost = item.cost();
    if user.total_xp < cost {
        return Err(ValidationError::InsufficientXp {
            cost,
            balance: user.total_xp,
        });
    }

    user.total_xp -= cost;
    match item {
        ShopItem::StreakFreeze => user.inventory.streak_freeze += 1,
        ShopItem::SeedPack => user.inventory.rare_seeds += 1,
    }

    let mut events = Vec::new();
    reconcile_xp_derived(user, &mut events);
    Ok(events)
}
