use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::LeagueTier;

/// Every reducer returns the notifications it produced as Events.
/// The CLI prints them; a GUI would subscribe to them. Events are a side
/// channel only -- replaying state never depends on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Total XP crossed a level boundary.
    LevelUp { level: u32 },
    /// Lifetime XP moved the user into a higher league.
    LeaguePromoted { tier: LeagueTier },
    /// First qualifying completion of the day extended the streak.
    StreakExtended { streak: u32 },
    /// A missed day was absorbed by a streak freeze.
    StreakProtected { remaining_freezes: u32 },
    /// A missed day with no freeze available reset the streak.
    StreakBroken { lost_streak: u32 },
    BadgeUnlocked { badge_id: String },
    /// The garden grew a new plant as a completion side-effect.
    PlantGrown { plant_type: String, position: u8 },
    DailyQuestCompleted { quest_id: String, xp_reward: u32 },
    /// Calendar day changed; daily quests went back to their template.
    DailyQuestsReset,
    TimerStarted { at: DateTime<Utc> },
    TimerPaused { elapsed_ms: u64, at: DateTime<Utc> },
    TimerResumed { at: DateTime<Utc> },
    /// Focus session closed out; minutes is the floored-at-1 rounding.
    TimerFinished { minutes: u32, at: DateTime<Utc> },
}
