//! # Questline Core Library
//!
//! This library provides the core logic for Questline, a gamified task
//! tracker that breaks big goals into micro-quests. It implements a
//! CLI-first philosophy: every operation is available through the
//! standalone CLI binary, with any future GUI being a thin layer over
//! the same core.
//!
//! ## Architecture
//!
//! - **App**: explicit state struct plus reducers; every mutation applies
//!   atomically and returns the events it produced
//! - **Gateway**: the external decomposition/advice service boundary; no
//!   state is committed until a call resolves
//! - **Storage**: a versioned JSON snapshot for state and TOML for
//!   configuration
//! - **Clock/RNG injection**: day-boundary logic and the garden roll take
//!   their time source and randomness from the caller
//!
//! ## Key Components
//!
//! - [`App`]: state machine driver over [`AppState`]
//! - [`GeminiClient`]: goal decomposition and reflection advice
//! - [`SnapshotStore`]: whole-state persistence
//! - [`Config`]: application configuration management

pub mod app;
pub mod badges;
pub mod clock;
pub mod error;
pub mod events;
pub mod garden;
pub mod gateway;
pub mod pacing;
pub mod progression;
pub mod quests;
pub mod storage;
pub mod streak;
pub mod task;
pub mod timer;
pub mod user;

pub use app::{App, AppState, CompletionOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, GatewayError, Result, StorageError, ValidationError};
pub use events::Event;
pub use gateway::{DecomposeRequest, GeminiClient, PacingProfile};
pub use progression::ShopItem;
pub use quests::{DailyQuest, QuestBoard};
pub use storage::{Config, SnapshotStore, SNAPSHOT_KEY};
pub use task::{EnergyMode, MacroTask, MicroTask, MicroTaskDraft, TaskStatus};
pub use user::{Friend, LeagueTier, User};
