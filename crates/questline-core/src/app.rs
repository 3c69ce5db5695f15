//! Application state and its reducers.
//!
//! `AppState` is the single explicit state struct: no ambient globals. The
//! `App` driver wraps it with the injected clock and RNG and exposes every
//! user-facing mutation as a reducer that applies atomically and returns
//! the events it produced. Events are processed one at a time in arrival
//! order; the only async work (the gateway call) happens outside, and its
//! drafts are only committed here after the call resolves.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::ValidationError;
use crate::events::Event;
use crate::garden;
use crate::gateway::PacingProfile;
use crate::progression::{self, ShopItem};
use crate::quests::{QuestBoard, QUEST_COMPLETE_MICRO, QUEST_GAIN_XP, QUEST_REFLECT};
use crate::streak;
use crate::task::{MacroTask, MicroTask, MicroTaskDraft, TaskStatus};
use crate::timer::FocusTimer;
use crate::user::{FeedbackEntry, Friend, User};
use crate::{badges, quests};

/// The whole persisted session: serialized as-is into the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub friends: Vec<Friend>,
    #[serde(default)]
    pub macro_tasks: Vec<MacroTask>,
    #[serde(default)]
    pub micro_tasks: Vec<MicroTask>,
    #[serde(default)]
    pub daily_quests: QuestBoard,
    #[serde(default)]
    pub active_quest_id: Option<String>,
    #[serde(default)]
    pub timer: FocusTimer,
    /// Last calendar day the rollover transition ran; guards it to once
    /// per day however often the app is loaded.
    #[serde(default)]
    pub last_rollover: Option<NaiveDate>,
}

impl AppState {
    pub fn micro_task(&self, id: &str) -> Option<&MicroTask> {
        self.micro_tasks.iter().find(|t| t.id == id)
    }

    pub fn macro_task(&self, id: &str) -> Option<&MacroTask> {
        self.macro_tasks.iter().find(|t| t.id == id)
    }

    /// Micro-tasks of one macro-task in presentation order.
    pub fn micro_tasks_of(&self, macro_id: &str) -> Vec<&MicroTask> {
        let mut tasks: Vec<&MicroTask> = self
            .micro_tasks
            .iter()
            .filter(|t| t.macro_task_id == macro_id)
            .collect();
        tasks.sort_by_key(|t| t.order_index);
        tasks
    }
}

/// Outcome of completing the active quest.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub minutes: u32,
    pub xp_gained: u32,
    /// Next suggested quest, if any micro-task is still open.
    pub next_quest_id: Option<String>,
    pub events: Vec<Event>,
}

/// State plus its injected collaborators.
pub struct App<C: Clock, R: Rng> {
    pub state: AppState,
    pub clock: C,
    rng: R,
    growth_probability: f64,
}

impl<C: Clock, R: Rng> App<C, R> {
    pub fn new(state: AppState, clock: C, rng: R, growth_probability: f64) -> Self {
        Self {
            state,
            clock,
            rng,
            growth_probability: growth_probability.clamp(0.0, 1.0),
        }
    }

    /// Day-rollover transition, run once per calendar day at session start
    /// and before any new completion: resolve streak gaps, reset daily
    /// quests and per-day cheer flags.
    pub fn session_start(&mut self) -> Vec<Event> {
        let today = self.clock.today();
        if self.state.last_rollover == Some(today) {
            return Vec::new();
        }

        let mut events = streak::apply_day_rollover(&mut self.state.user, today);

        if self.state.last_rollover.is_some() {
            self.state.daily_quests.reset();
            for friend in &mut self.state.friends {
                friend.cheered_today = false;
            }
            events.push(Event::DailyQuestsReset);
        }
        self.state.last_rollover = Some(today);
        events
    }

    /// Pacing parameters for the next decomposition request, passed through
    /// to the gateway unmodified.
    pub fn pacing_profile(&self) -> PacingProfile {
        let user = &self.state.user;
        PacingProfile {
            level: user.level,
            streak: user.streak_count,
            energy_mode: user.energy_mode,
            accuracy_ratio: user.recent_accuracy_ratio(),
        }
    }

    /// Stats summary attached to advice requests.
    pub fn stats_summary(&self) -> serde_json::Value {
        let user = &self.state.user;
        json!({
            "level": user.level,
            "streakCount": user.streak_count,
            "totalXP": user.total_xp,
        })
    }

    /// Register a new high-level goal. Decomposition happens separately;
    /// see [`App::attach_drafts`].
    pub fn create_macro_task(
        &mut self,
        title: &str,
        category: &str,
    ) -> Result<MacroTask, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyGoal);
        }
        let macro_task = MacroTask::new(title.trim(), category, self.clock.now());
        self.state.macro_tasks.push(macro_task.clone());
        Ok(macro_task)
    }

    /// Commit a batch of gateway drafts as this macro-task's micro-tasks,
    /// assigning ids and order in list order. Nothing was committed while
    /// the gateway call was in flight.
    pub fn attach_drafts(
        &mut self,
        macro_id: &str,
        drafts: Vec<MicroTaskDraft>,
    ) -> Result<Vec<String>, ValidationError> {
        let macro_task = self
            .state
            .macro_tasks
            .iter_mut()
            .find(|m| m.id == macro_id)
            .ok_or_else(|| ValidationError::UnknownTask(macro_id.to_string()))?;
        if macro_task.status == TaskStatus::Todo {
            macro_task.status = TaskStatus::Doing;
        }
        let macro_task = macro_task.clone();

        let start_order = self
            .state
            .micro_tasks_of(macro_id)
            .last()
            .map(|t| t.order_index + 1)
            .unwrap_or(0);

        let mut ids = Vec::with_capacity(drafts.len());
        for (offset, draft) in drafts.into_iter().enumerate() {
            let micro = MicroTask::from_draft(draft, &macro_task, start_order + offset);
            ids.push(micro.id.clone());
            self.state.micro_tasks.push(micro);
        }

        if self.state.active_quest_id.is_none() {
            self.state.active_quest_id = ids.first().cloned();
        }
        Ok(ids)
    }

    /// Refinement accepted: the replacement list fully supersedes the
    /// macro-task's prior micro-tasks. (On gateway failure the caller
    /// never gets here and the prior list stays untouched.)
    pub fn replace_drafts(
        &mut self,
        macro_id: &str,
        drafts: Vec<MicroTaskDraft>,
    ) -> Result<Vec<String>, ValidationError> {
        if self.state.macro_task(macro_id).is_none() {
            return Err(ValidationError::UnknownTask(macro_id.to_string()));
        }

        if let Some(active) = &self.state.active_quest_id {
            let active_belongs = self
                .state
                .micro_task(active)
                .is_some_and(|t| t.macro_task_id == macro_id);
            if active_belongs {
                self.state.active_quest_id = None;
                self.state.timer.reset();
            }
        }
        self.state.micro_tasks.retain(|t| t.macro_task_id != macro_id);

        self.attach_drafts(macro_id, drafts)
    }

    /// Make a micro-task the active quest. The timer is reset first:
    /// partial elapsed time never carries across tasks.
    pub fn start_quest(&mut self, micro_id: &str) -> Result<Vec<Event>, ValidationError> {
        let task = self
            .state
            .micro_task(micro_id)
            .ok_or_else(|| ValidationError::UnknownTask(micro_id.to_string()))?;
        if task.is_done() {
            return Err(ValidationError::AlreadyDone(micro_id.to_string()));
        }

        self.state.active_quest_id = Some(micro_id.to_string());
        self.state.timer.reset();
        Ok(self.state.timer.start(self.clock.now()).into_iter().collect())
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.state.timer.pause(self.clock.now())
    }

    pub fn resume_timer(&mut self) -> Option<Event> {
        let now = self.clock.now();
        self.state.timer.start(now).map(|_| Event::TimerResumed { at: now })
    }

    /// Live elapsed time of the current session, for display.
    pub fn timer_elapsed_ms(&self) -> u64 {
        self.state.timer.elapsed_ms(self.clock.now())
    }

    /// Complete the active quest: close out the timer, mutate the task
    /// once, and run the full progression pipeline (ledger, streak,
    /// daily quests, garden roll, badge evaluation).
    pub fn complete_active_quest(&mut self) -> Result<CompletionOutcome, ValidationError> {
        let quest_id = self
            .state
            .active_quest_id
            .clone()
            .ok_or(ValidationError::NoActiveQuest)?;
        let idx = self
            .state
            .micro_tasks
            .iter()
            .position(|t| t.id == quest_id)
            .ok_or_else(|| ValidationError::UnknownTask(quest_id.clone()))?;
        if self.state.micro_tasks[idx].is_done() {
            return Err(ValidationError::AlreadyDone(quest_id));
        }

        let now = self.clock.now();
        let today = self.clock.today();
        let mut events = Vec::new();

        let minutes = self.state.timer.finish(now);
        events.push(Event::TimerFinished { minutes, at: now });

        {
            let task = &mut self.state.micro_tasks[idx];
            task.status = TaskStatus::Done;
            task.actual_duration_min = Some(minutes);
        }
        let task = self.state.micro_tasks[idx].clone();

        events.extend(progression::apply_task_completion(
            &mut self.state.user,
            &task,
            minutes,
            today,
        ));

        // Quest increments are bound to event types: one completion, plus
        // the XP it brought in.
        events.extend(self.state.daily_quests.increment(QUEST_COMPLETE_MICRO, 1)?);
        events.extend(
            self.state
                .daily_quests
                .increment(QUEST_GAIN_XP, task.xp_reward)?,
        );

        events.extend(garden::try_grow(
            &mut self.state.user.garden,
            &task.category,
            self.growth_probability,
            &mut self.rng,
            now,
        ));

        events.extend(badges::evaluate(&mut self.state.user));

        if self
            .state
            .micro_tasks_of(&task.macro_task_id)
            .iter()
            .all(|t| t.is_done())
        {
            if let Some(m) = self
                .state
                .macro_tasks
                .iter_mut()
                .find(|m| m.id == task.macro_task_id)
            {
                m.status = TaskStatus::Done;
            }
        }

        let next_quest_id = self.next_open_quest(&task.macro_task_id);
        self.state.active_quest_id = next_quest_id.clone();
        self.state.timer.reset();

        Ok(CompletionOutcome {
            minutes,
            xp_gained: task.xp_reward,
            next_quest_id,
            events,
        })
    }

    /// Next open micro-task: same macro first (by order), then any other.
    fn next_open_quest(&self, macro_id: &str) -> Option<String> {
        self.state
            .micro_tasks_of(macro_id)
            .iter()
            .find(|t| !t.is_done())
            .map(|t| t.id.clone())
            .or_else(|| {
                self.state
                    .micro_tasks
                    .iter()
                    .find(|t| !t.is_done())
                    .map(|t| t.id.clone())
            })
    }

    /// Record a reflection and its advice. The flat XP reward applies only
    /// while the reflection daily quest is still open -- that target of 1
    /// is the once-per-day guard. Reflections never touch the streak.
    pub fn submit_reflection(
        &mut self,
        reflection: &str,
        advice: &str,
    ) -> Result<Vec<Event>, ValidationError> {
        let mut events = Vec::new();

        self.state.user.feedback_history.push(FeedbackEntry {
            id: Uuid::new_v4().to_string(),
            date: self.clock.today(),
            user_reflection: reflection.to_string(),
            ai_advice: advice.to_string(),
        });

        let already_rewarded = self
            .state
            .daily_quests
            .get(QUEST_REFLECT)
            .is_some_and(quests::DailyQuest::completed);
        if !already_rewarded {
            events.extend(progression::apply_feedback_reward(&mut self.state.user));
            events.extend(self.state.daily_quests.increment(QUEST_REFLECT, 1)?);
        }

        events.extend(badges::evaluate(&mut self.state.user));
        Ok(events)
    }

    /// Cheer a friend: +2 XP, once per friend per day.
    pub fn cheer_friend(&mut self, friend_id: &str) -> Result<Vec<Event>, ValidationError> {
        let friend = self
            .state
            .friends
            .iter_mut()
            .find(|f| f.id == friend_id)
            .ok_or_else(|| ValidationError::UnknownFriend(friend_id.to_string()))?;
        if friend.cheered_today {
            return Err(ValidationError::AlreadyCheered(friend.nickname.clone()));
        }
        friend.cheered_today = true;
        Ok(progression::apply_cheer_reward(&mut self.state.user))
    }

    /// Atomic shop purchase; see [`progression::buy_item`].
    pub fn buy_item(&mut self, item: ShopItem) -> Result<Vec<Event>, ValidationError> {
        progression::buy_item(&mut self.state.user, item)
    }

    /// Manual full reset: clears tasks and daily-quest progress, keeps the
    /// profile. The explicit user confirmation lives at the CLI boundary.
    pub fn full_reset(&mut self) {
        self.state.macro_tasks.clear();
        self.state.micro_tasks.clear();
        self.state.daily_quests.reset();
        self.state.active_quest_id = None;
        self.state.timer.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn app() -> App<FixedClock, Pcg64Mcg> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
        App::new(AppState::default(), clock, Pcg64Mcg::seed_from_u64(1), 0.0)
    }

    fn drafts(n: usize) -> Vec<MicroTaskDraft> {
        (0..n)
            .map(|i| MicroTaskDraft {
                title: format!("step {i}"),
                duration_est_min: 10,
                difficulty: 2,
                friction_score: 2,
                xp_reward: 25,
                success_criteria: "done".into(),
                next_hint: "go on".into(),
            })
            .collect()
    }

    #[test]
    fn attach_assigns_order_and_activates_first() {
        let mut app = app();
        let goal = app.create_macro_task("Write report", "work").unwrap();
        let ids = app.attach_drafts(&goal.id, drafts(3)).unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(app.state.active_quest_id, Some(ids[0].clone()));
        let orders: Vec<usize> = app
            .state
            .micro_tasks_of(&goal.id)
            .iter()
            .map(|t| t.order_index)
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(app.state.macro_task(&goal.id).unwrap().status, TaskStatus::Doing);
    }

    #[test]
    fn empty_goal_is_rejected() {
        let mut app = app();
        assert!(matches!(
            app.create_macro_task("  ", "work"),
            Err(ValidationError::EmptyGoal)
        ));
        assert!(app.state.macro_tasks.is_empty());
    }

    #[test]
    fn replace_drafts_supersedes_prior_list() {
        let mut app = app();
        let goal = app.create_macro_task("Write report", "work").unwrap();
        let old_ids = app.attach_drafts(&goal.id, drafts(3)).unwrap();
        let new_ids = app.replace_drafts(&goal.id, drafts(4)).unwrap();
        assert_eq!(app.state.micro_tasks.len(), 4);
        assert!(app.state.micro_task(&old_ids[0]).is_none());
        assert_eq!(app.state.active_quest_id, Some(new_ids[0].clone()));
    }

    #[test]
    fn switching_quests_discards_partial_time() {
        let mut app = app();
        let goal = app.create_macro_task("Goal", "study").unwrap();
        let ids = app.attach_drafts(&goal.id, drafts(2)).unwrap();

        app.start_quest(&ids[0]).unwrap();
        app.clock.advance_secs(10 * 60);
        assert_eq!(app.timer_elapsed_ms(), 10 * 60_000);

        app.start_quest(&ids[1]).unwrap();
        assert_eq!(app.timer_elapsed_ms(), 0);
    }

    #[test]
    fn completion_runs_the_full_pipeline() {
        let mut app = app();
        app.session_start();
        let goal = app.create_macro_task("Goal", "study").unwrap();
        let ids = app.attach_drafts(&goal.id, drafts(2)).unwrap();
        app.start_quest(&ids[0]).unwrap();
        app.clock.advance_secs(9 * 60);

        let outcome = app.complete_active_quest().unwrap();
        assert_eq!(outcome.minutes, 9);
        assert_eq!(outcome.xp_gained, 25);
        assert_eq!(outcome.next_quest_id, Some(ids[1].clone()));

        let user = &app.state.user;
        assert_eq!(user.total_xp, 25);
        assert_eq!(user.total_completed_tasks, 1);
        assert_eq!(user.streak_count, 1);
        assert!(user.unlocked_badges.contains("first_step"));
        assert!(app
            .state
            .daily_quests
            .get(QUEST_COMPLETE_MICRO)
            .unwrap()
            .completed());
        assert_eq!(
            app.state.daily_quests.get(QUEST_GAIN_XP).unwrap().current_value,
            25
        );
    }

    #[test]
    fn completing_twice_is_rejected() {
        let mut app = app();
        let goal = app.create_macro_task("Goal", "study").unwrap();
        let ids = app.attach_drafts(&goal.id, drafts(1)).unwrap();
        app.start_quest(&ids[0]).unwrap();
        app.complete_active_quest().unwrap();

        // Active quest advanced to None; completing again has no target.
        assert!(matches!(
            app.complete_active_quest(),
            Err(ValidationError::NoActiveQuest)
        ));
        // And the macro-task is closed.
        assert_eq!(app.state.macro_task(&goal.id).unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn reflection_reward_applies_once_per_day() {
        let mut app = app();
        app.session_start();
        app.submit_reflection("Felt good", "Keep going").unwrap();
        assert_eq!(app.state.user.total_xp, progression::FEEDBACK_XP as u64);
        assert_eq!(app.state.user.feedback_history.len(), 1);

        // Second reflection the same day: recorded, not rewarded.
        app.submit_reflection("More thoughts", "Nice").unwrap();
        assert_eq!(app.state.user.total_xp, progression::FEEDBACK_XP as u64);
        assert_eq!(app.state.user.feedback_history.len(), 2);

        // Reflections never extend the streak.
        assert_eq!(app.state.user.streak_count, 0);
    }

    #[test]
    fn rollover_resets_quests_and_cheer_flags_once() {
        let mut app = app();
        app.state.friends.push(Friend {
            id: "f1".into(),
            nickname: "Owl".into(),
            level: 4,
            streak_count: 2,
            current_task_title: None,
            avatar: "🦉".into(),
            cheered_today: false,
        });
        app.session_start();
        app.cheer_friend("f1").unwrap();
        app.state.daily_quests.increment(QUEST_GAIN_XP, 40).unwrap();

        // Same-day restart: nothing resets.
        assert!(app.session_start().is_empty());
        assert!(app.state.friends[0].cheered_today);

        // Next day: quests back to template, cheer available again.
        app.clock.advance_days(1);
        let events = app.session_start();
        assert!(events.iter().any(|e| matches!(e, Event::DailyQuestsReset)));
        assert_eq!(app.state.daily_quests, QuestBoard::default());
        assert!(!app.state.friends[0].cheered_today);
        assert!(app.cheer_friend("f1").is_ok());
    }

    #[test]
    fn cheering_twice_same_day_is_rejected() {
        let mut app = app();
        app.state.friends.push(Friend {
            id: "f1".into(),
            nickname: "Owl".into(),
            level: 4,
            streak_count: 2,
            current_task_title: None,
            avatar: "🦉".into(),
            cheered_today: false,
        });
        app.session_start();
        app.cheer_friend("f1").unwrap();
        assert!(matches!(
            app.cheer_friend("f1"),
            Err(ValidationError::AlreadyCheered(_))
        ));
        assert_eq!(app.state.user.total_xp, progression::CHEER_XP as u64);
    }

    #[test]
    fn full_reset_clears_tasks_but_keeps_profile() {
        let mut app = app();
        app.session_start();
        let goal = app.create_macro_task("Goal", "study").unwrap();
        let ids = app.attach_drafts(&goal.id, drafts(1)).unwrap();
        app.start_quest(&ids[0]).unwrap();
        app.complete_active_quest().unwrap();

        let xp_before = app.state.user.total_xp;
        app.full_reset();
        assert!(app.state.macro_tasks.is_empty());
        assert!(app.state.micro_tasks.is_empty());
        assert!(app.state.active_quest_id.is_none());
        assert_eq!(app.state.daily_quests, QuestBoard::default());
        assert_eq!(app.state.user.total_xp, xp_before);
        assert_eq!(app.state.user.total_completed_tasks, 1);
    }
}
