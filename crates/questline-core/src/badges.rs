//! Badge catalog and achievement evaluator.
//!
//! Badges are static catalog entries paired with unlock predicates over
//! cumulative user state. Evaluation runs after every progression mutation;
//! unlocking is one-way and idempotent -- a badge survives even if the
//! counter that unlocked it later regresses (a broken streak does not
//! revoke `streak_3`).

use crate::events::Event;
use crate::user::User;

/// One catalog entry with its unlock predicate.
pub struct BadgeSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub unlocked: fn(&User) -> bool,
}

/// The full badge catalog. Order is presentation order only; evaluation
/// does not depend on it.
pub static CATALOG: &[BadgeSpec] = &[
    BadgeSpec {
        id: "first_step",
        title: "First Step",
        emoji: "👟",
        description: "Complete your first micro-quest",
        unlocked: |u| u.total_completed_tasks >= 1,
    },
    BadgeSpec {
        id: "ten_steps",
        title: "Momentum",
        emoji: "🚶",
        description: "Complete 10 micro-quests",
        unlocked: |u| u.total_completed_tasks >= 10,
    },
    BadgeSpec {
        id: "fifty_steps",
        title: "Unstoppable",
        emoji: "🏃",
        description: "Complete 50 micro-quests",
        unlocked: |u| u.total_completed_tasks >= 50,
    },
    BadgeSpec {
        id: "streak_3",
        title: "Warming Up",
        emoji: "🔥",
        description: "Keep a 3-day streak",
        unlocked: |u| u.streak_count >= 3,
    },
    BadgeSpec {
        id: "streak_7",
        title: "One Full Week",
        emoji: "📅",
        description: "Keep a 7-day streak",
        unlocked: |u| u.streak_count >= 7,
    },
    BadgeSpec {
        id: "streak_30",
        title: "Habit Forged",
        emoji: "⚒️",
        description: "Keep a 30-day streak",
        unlocked: |u| u.streak_count >= 30,
    },
    BadgeSpec {
        id: "level_5",
        title: "Adventurer",
        emoji: "🗺️",
        description: "Reach level 5",
        unlocked: |u| u.level >= 5,
    },
    BadgeSpec {
        id: "level_10",
        title: "Veteran",
        emoji: "🛡️",
        description: "Reach level 10",
        unlocked: |u| u.level >= 10,
    },
    BadgeSpec {
        id: "focused_hour",
        title: "Deep Focus",
        emoji: "🧘",
        description: "Accumulate 60 focused minutes",
        unlocked: |u| u.total_focus_minutes >= 60,
    },
    BadgeSpec {
        id: "gardener",
        title: "Green Thumb",
        emoji: "🌱",
        description: "Grow 5 plants in your garden",
        unlocked: |u| u.garden.len() >= 5,
    },
    BadgeSpec {
        id: "garden_full",
        title: "Secret Garden",
        emoji: "🏡",
        description: "Fill all 12 garden slots",
        unlocked: |u| u.garden.len() >= 12,
    },
    BadgeSpec {
        id: "reflective",
        title: "Looking Inward",
        emoji: "📖",
        description: "Write 5 reflections",
        unlocked: |u| u.feedback_history.len() >= 5,
    },
];

/// Look up a catalog entry by id.
pub fn find(badge_id: &str) -> Option<&'static BadgeSpec> {
    CATALOG.iter().find(|b| b.id == badge_id)
}

/// Unlock every badge whose predicate is newly true.
///
/// Idempotent: already-unlocked badges are skipped, so calling this twice
/// on unchanged state emits nothing the second time.
pub fn evaluate(user: &mut User) -> Vec<Event> {
    let newly: Vec<&'static str> = CATALOG
        .iter()
        .filter(|spec| !user.unlocked_badges.contains(spec.id) && (spec.unlocked)(user))
        .map(|spec| spec.id)
        .collect();

    newly
        .into_iter()
        .map(|id| {
            user.unlocked_badges.insert(id.to_string());
            Event::BadgeUnlocked {
                badge_id: id.to_string(),
            }
        })
        .collect()
}
