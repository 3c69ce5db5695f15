//! User profile and social types.
//!
//! The `User` is a singleton profile owned by the running session and
//! persisted as part of the snapshot. All progression counters live here;
//! the reducers in `progression`/`streak` are the only writers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::garden::GardenPlant;
use crate::pacing::PacingWindow;
use crate::task::EnergyMode;

/// League tier derived from lifetime XP.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LeagueTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Diamond,
}

impl LeagueTier {
    /// Tier thresholds over lifetime XP.
    pub fn for_xp(total_xp: u64) -> Self {
        match total_xp {
            0..=999 => LeagueTier::Bronze,
            1000..=4999 => LeagueTier::Silver,
            5000..=14999 => LeagueTier::Gold,
            _ => LeagueTier::Diamond,
        }
    }
}

/// Consumable item counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    /// Charges that each preserve the streak across one missed day.
    #[serde(default)]
    pub streak_freeze: u32,
    /// Seeds from the shop's rare seed pack.
    #[serde(default)]
    pub rare_seeds: u32,
}

/// One reflection plus the advice it received. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: String,
    pub date: NaiveDate,
    pub user_reflection: String,
    pub ai_advice: String,
}

/// A friend shown on the social screen. Local fixture data only; there is
/// no backend behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub nickname: String,
    pub level: u32,
    pub streak_count: u32,
    #[serde(default)]
    pub current_task_title: Option<String>,
    pub avatar: String,
    /// Reset on day rollover; each friend can be cheered once per day.
    #[serde(default)]
    pub cheered_today: bool,
}

/// Singleton user profile.
///
/// Invariant: `level == total_xp / 1000 + 1` after every XP mutation
/// (`progression` recomputes it on each write).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub nickname: String,
    pub avatar: String,
    /// Consecutive active days. Increments at most once per calendar day.
    #[serde(default)]
    pub streak_count: u32,
    #[serde(default)]
    pub max_streak: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
    /// Derived from total_xp; stored for display and snapshots.
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub league_tier: LeagueTier,
    #[serde(default)]
    pub total_focus_minutes: u64,
    #[serde(default)]
    pub total_completed_tasks: u64,
    #[serde(default)]
    pub received_cheers: u32,
    #[serde(default)]
    pub inventory: Inventory,
    /// Grows only; a badge is never revoked.
    #[serde(default)]
    pub unlocked_badges: BTreeSet<String>,
    /// Rolling actual/estimated window feeding the accuracy ratio.
    #[serde(default)]
    pub accuracy_window: PacingWindow,
    #[serde(default)]
    pub energy_mode: EnergyMode,
    #[serde(default)]
    pub feedback_history: Vec<FeedbackEntry>,
    /// Bounded to 12 plants by the garden model.
    #[serde(default)]
    pub garden: Vec<GardenPlant>,
}

fn default_level() -> u32 {
    1
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            nickname: "Questmaster".to_string(),
            avatar: "👨‍🚀".to_string(),
            streak_count: 0,
            max_streak: 0,
            last_active_date: None,
            level: 1,
            total_xp: 0,
            league_tier: LeagueTier::Bronze,
            total_focus_minutes: 0,
            total_completed_tasks: 0,
            received_cheers: 0,
            inventory: Inventory::default(),
            unlocked_badges: BTreeSet::new(),
            accuracy_window: PacingWindow::default(),
            energy_mode: EnergyMode::Normal,
            feedback_history: Vec::new(),
            garden: Vec::new(),
        }
    }
}

impl User {
    /// Current rolling accuracy ratio (1.0 when uncalibrated).
    pub fn recent_accuracy_ratio(&self) -> f64 {
        self.accuracy_window.ratio()
    }
}
