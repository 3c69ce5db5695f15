//! Shared session plumbing for CLI commands.
//!
//! Every command that touches state goes through the same cycle: load the
//! config and snapshot, run the day rollover, apply the mutation, save.
//! The save happens after the whole mutation so a failed command leaves the
//! snapshot as it was.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

use questline_core::{App, Config, Event, SnapshotStore, SystemClock};

type CliError = Box<dyn std::error::Error>;

pub struct Session {
    pub config: Config,
    pub app: App<SystemClock, Pcg64Mcg>,
    store: SnapshotStore,
}

impl Session {
    /// Load config and snapshot and run the once-per-day rollover.
    pub fn open() -> Result<Self, CliError> {
        let config = Config::load()?;
        let store = SnapshotStore::open_default()?;
        let state = store.load_or_default();

        let app = App::new(
            state,
            SystemClock,
            Pcg64Mcg::from_entropy(),
            config.garden.growth_probability,
        );

        let mut session = Self { config, app, store };
        session.rollover()?;
        Ok(session)
    }

    /// Run the once-per-day rollover and persist it immediately, so a
    /// streak break or quest reset is not replayed by the next command.
    fn rollover(&mut self) -> Result<(), CliError> {
        let events = self.app.session_start();
        if !events.is_empty() {
            self.save()?;
        }
        print_events(&events);
        Ok(())
    }

    /// Persist the current state.
    pub fn save(&self) -> Result<(), CliError> {
        self.store.save(&self.app.state)?;
        Ok(())
    }
}

/// Resolve a macro-task id, accepting a unique prefix.
pub fn resolve_macro_id(
    state: &questline_core::AppState,
    id: &str,
) -> Result<String, CliError> {
    if state.macro_task(id).is_some() {
        return Ok(id.to_string());
    }
    let matches: Vec<&str> = state
        .macro_tasks
        .iter()
        .filter(|m| m.id.starts_with(id))
        .map(|m| m.id.as_str())
        .collect();
    match matches.as_slice() {
        [one] => Ok((*one).to_string()),
        [] => Err(format!("No goal matches '{id}'").into()),
        _ => Err(format!("Ambiguous goal id '{id}'").into()),
    }
}

/// Resolve a micro-task id, accepting a unique prefix.
pub fn resolve_micro_id(
    state: &questline_core::AppState,
    id: &str,
) -> Result<String, CliError> {
    if state.micro_task(id).is_some() {
        return Ok(id.to_string());
    }
    let matches: Vec<&str> = state
        .micro_tasks
        .iter()
        .filter(|t| t.id.starts_with(id))
        .map(|t| t.id.as_str())
        .collect();
    match matches.as_slice() {
        [one] => Ok((*one).to_string()),
        [] => Err(format!("No quest matches '{id}'").into()),
        _ => Err(format!("Ambiguous quest id '{id}'").into()),
    }
}

/// Single-threaded runtime for driving the gateway from sync commands.
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// One line per event, in arrival order.
pub fn print_events(events: &[Event]) {
    for event in events {
        match event {
            Event::LevelUp { level } => println!("⬆️  Level up! You are now level {level}."),
            Event::LeaguePromoted { tier } => println!("🏆 Promoted to the {tier:?} league!"),
            Event::StreakExtended { streak } => println!("🔥 Streak extended: {streak} days."),
            Event::StreakProtected { remaining_freezes } => {
                println!("🧊 A streak freeze saved your streak ({remaining_freezes} left).")
            }
            Event::StreakBroken { lost_streak } => {
                println!("💔 Streak broken. {lost_streak} days lost; today is a fresh start.")
            }
            Event::BadgeUnlocked { badge_id } => println!("🎖️  Badge unlocked: {badge_id}"),
            Event::PlantGrown { plant_type, position } => {
                println!("{plant_type} A new plant grew in garden slot {position}.")
            }
            Event::DailyQuestCompleted { quest_id, xp_reward } => {
                println!("✅ Daily quest complete: {quest_id} (worth {xp_reward} XP)")
            }
            Event::DailyQuestsReset => println!("🌅 A new day: daily quests reset."),
            Event::TimerStarted { at } => println!("▶️  Timer started at {}.", at.format("%H:%M:%S")),
            Event::TimerPaused { elapsed_ms, at } => println!(
                "⏸️  Timer paused at {} ({}s elapsed).",
                at.format("%H:%M:%S"),
                elapsed_ms / 1000
            ),
            Event::TimerResumed { at } => println!("▶️  Timer resumed at {}.", at.format("%H:%M:%S")),
            Event::TimerFinished { minutes, at } => println!(
                "⏹️  Session finished at {}: {minutes} focused minute(s).",
                at.format("%H:%M:%S")
            ),
        }
    }
}
