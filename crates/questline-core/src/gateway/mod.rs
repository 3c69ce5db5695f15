//! Decomposition and advice gateway.
//!
//! External-facing contract around the LLM service that turns a goal into
//! micro-task drafts and a reflection into a line of advice. The core's
//! obligation stops at the boundary: pacing parameters pass through
//! unmodified, and whatever well-formed draft list comes back is accepted.
//! Failures are tagged [`GatewayError`]s rather than sentinel empty lists;
//! the application layer commits no state until a call resolves.

pub mod gemini;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::{EnergyMode, MicroTaskDraft};

pub use gemini::GeminiClient;

/// Minimum drafts a fresh (non-refinement) decomposition must yield.
pub const FRESH_DRAFT_MIN: usize = 3;
/// Maximum drafts a fresh decomposition must yield.
pub const FRESH_DRAFT_MAX: usize = 6;

/// User-pacing parameters forwarded with every decomposition request.
///
/// Calibration is descriptive guidance to the service, not something the
/// core enforces on the response: low energy asks for shorter steps, a
/// ratio above 1 asks for inflated durations and finer splits, below 1
/// for tighter durations and coarser steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PacingProfile {
    pub level: u32,
    pub streak: u32,
    pub energy_mode: EnergyMode,
    /// Rolling actual/estimated ratio; 1.0 when uncalibrated.
    #[serde(default = "default_ratio")]
    pub accuracy_ratio: f64,
}

fn default_ratio() -> f64 {
    1.0
}

/// One decomposition request.
///
/// When `refinement_note` and `prior_drafts` are present the service is
/// asked for a *replacement* list reflecting the feedback, not a merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomposeRequest {
    pub goal: String,
    pub category: String,
    pub pacing: PacingProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinement_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_drafts: Option<Vec<MicroTaskDraft>>,
}

impl DecomposeRequest {
    pub fn is_refinement(&self) -> bool {
        self.refinement_note.is_some() && self.prior_drafts.is_some()
    }

    /// Input constraint: the goal must be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.goal.trim().is_empty() {
            return Err(ValidationError::EmptyGoal);
        }
        Ok(())
    }
}

/// Thin wrapper around the OS keyring for the service API key.
pub mod keyring_store {
    const SERVICE: &str = "questline";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
