//! Streak and daily-reset state machine.
//!
//! Two entry points, matching the two moments streak state can change:
//!
//! - [`apply_day_rollover`] runs once per calendar day at session start,
//!   *before* any new completion. A gap of one or more fully missed days
//!   either consumes a streak freeze or breaks the streak.
//! - [`record_completion`] runs on each task completion and extends the
//!   streak at most once per calendar day. Task completion is the sole
//!   streak driver; reflections never touch it.
//!
//! All comparisons are calendar-day arithmetic on `NaiveDate`, fed by the
//! injected clock.

use chrono::{Duration, NaiveDate};

use crate::events::Event;
use crate::user::User;

/// Calendar days between the last active date and today.
fn day_gap(last: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(last).num_days()
}

/// Resolve a missed-day gap detected at load time.
///
/// `gap >= 2` means at least one full day passed with no activity:
/// a streak freeze (if any) is consumed and the streak survives, otherwise
/// the streak resets to 0. Either way the last-active marker moves up to
/// yesterday so a completion later today extends normally and repeated
/// same-day loads do not re-trigger the transition.
pub fn apply_day_rollover(user: &mut User, today: NaiveDate) -> Vec<Event> {
    let mut events = Vec::new();

    let Some(last) = user.last_active_date else {
        return events;
    };
    if day_gap(last, today) < 2 {
        return events;
    }

    if user.inventory.streak_freeze > 0 {
        user.inventory.streak_freeze -= 1;
        events.push(Event::StreakProtected {
            remaining_freezes: user.inventory.streak_freeze,
        });
    } else {
        let lost = user.streak_count;
        user.streak_count = 0;
        events.push(Event::StreakBroken { lost_streak: lost });
    }
    user.last_active_date = Some(today - Duration::days(1));

    events
}

/// Register a qualifying completion for `today`.
///
/// Extends the streak on the first completion of a new calendar day;
/// further completions the same day leave it unchanged.
pub fn record_completion(user: &mut User, today: NaiveDate) -> Option<Event> {
    let extended = match user.last_active_date {
        None => {
            user.streak_count = 1;
            true
        }
        Some(last) if day_gap(last, today) == 0 => false,
        Some(_) => {
            // Gaps >= 2 were resolved by the rollover; from here the
            // previous active day is effectively yesterday.
            user.streak_count += 1;
            true
        }
    };

    user.last_active_date = Some(today);
    if !extended {
        return None;
    }
    user.max_streak = user.max_streak.max(user.streak_count);
    Some(Event::StreakExtended {
        streak: user.streak_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn user_active_on(d: NaiveDate, streak: u32) -> User {
        User {
            last_active_date: Some(d),
            streak_count: streak,
            max_streak: streak,
            ..User::default()
        }
    }

    #[test]
    fn completion_after_yesterday_extends_by_one() {
        let mut user = user_active_on(day(1), 4);
        let event = record_completion(&mut user, day(2));
        assert_eq!(user.streak_count, 5);
        assert_eq!(user.max_streak, 5);
        assert!(matches!(event, Some(Event::StreakExtended { streak: 5 })));
    }

    #[test]
    fn second_completion_same_day_does_not_extend() {
        let mut user = user_active_on(day(2), 5);
        assert!(record_completion(&mut user, day(2)).is_none());
        assert_eq!(user.streak_count, 5);
    }

    #[test]
    fn first_ever_completion_starts_streak_at_one() {
        let mut user = User::default();
        record_completion(&mut user, day(3));
        assert_eq!(user.streak_count, 1);
        assert_eq!(user.max_streak, 1);
    }

    #[test]
    fn two_day_gap_without_freeze_breaks_streak() {
        let mut user = user_active_on(day(1), 7);
        let events = apply_day_rollover(&mut user, day(3));
        assert_eq!(user.streak_count, 0);
        assert!(matches!(events[0], Event::StreakBroken { lost_streak: 7 }));
        // max_streak is historical and survives the break.
        assert_eq!(user.max_streak, 7);
    }

    #[test]
    fn two_day_gap_with_freeze_preserves_streak() {
        let mut user = user_active_on(day(1), 7);
        user.inventory.streak_freeze = 2;
        let events = apply_day_rollover(&mut user, day(3));
        assert_eq!(user.streak_count, 7);
        assert_eq!(user.inventory.streak_freeze, 1);
        assert!(matches!(
            events[0],
            Event::StreakProtected {
                remaining_freezes: 1
            }
        ));
    }

    #[test]
    fn protected_streak_extends_on_completion_that_day() {
        let mut user = user_active_on(day(1), 7);
        user.inventory.streak_freeze = 1;
        apply_day_rollover(&mut user, day(4));
        record_completion(&mut user, day(4));
        assert_eq!(user.streak_count, 8);
    }

    #[test]
    fn one_day_gap_is_not_a_rollover_break() {
        let mut user = user_active_on(day(1), 3);
        assert!(apply_day_rollover(&mut user, day(2)).is_empty());
        assert_eq!(user.streak_count, 3);
    }

    #[test]
    fn rollover_without_history_is_a_noop() {
        let mut user = User::default();
        assert!(apply_day_rollover(&mut user, day(5)).is_empty());
    }
}
