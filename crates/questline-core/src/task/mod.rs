//! Macro/micro task types.
//!
//! A `MacroTask` is a user-entered high-level goal. The decomposition
//! gateway turns it into a batch of `MicroTask`s -- small, time-boxed,
//! actionable steps. Micro-tasks are created in a batch, mutated exactly
//! once (at completion), and never deleted individually; a full reset is
//! the only thing that clears them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task status.
///
/// Valid transitions:
/// - TODO → DOING (picked as the active quest)
/// - TODO → DONE / DOING → DONE (completion)
/// - DONE is terminal; there is no reverse transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        match self {
            TaskStatus::Todo => matches!(to, TaskStatus::Doing | TaskStatus::Done),
            TaskStatus::Doing => matches!(to, TaskStatus::Done),
            TaskStatus::Done => false, // Terminal state
        }
    }
}

/// User-declared focus-capacity setting.
///
/// Passed through to the decomposition gateway: `Low` asks for step
/// durations at the shorter end of the supported range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnergyMode {
    Low,
    #[default]
    Normal,
}

/// A user-entered high-level goal awaiting (or after) decomposition.
///
/// Owns its micro-tasks 1:N by id back-reference. The status field is
/// largely vestigial once micro-tasks exist; progress lives on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTask {
    pub id: String,
    pub title: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl MacroTask {
    pub fn new(title: impl Into<String>, category: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            category: category.into(),
            created_at: now,
            status: TaskStatus::Todo,
        }
    }
}

/// One decomposition draft as it comes off the wire.
///
/// Field names follow the service contract (camelCase JSON). The caller
/// assigns id, order and status when a draft is accepted into state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicroTaskDraft {
    pub title: String,
    pub duration_est_min: u32,
    /// 1-5 difficulty
    pub difficulty: u8,
    /// 1-5 estimated psychological resistance to starting
    pub friction_score: u8,
    pub xp_reward: u32,
    /// Human-readable completion test
    pub success_criteria: String,
    /// Small tip for moving on to the next step
    pub next_hint: String,
}

/// One AI-generated, time-boxed actionable step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroTask {
    pub id: String,
    pub macro_task_id: String,
    pub title: String,
    /// Inherited from the owning macro-task.
    pub category: String,
    /// Defines sequential presentation, not enforced completion order.
    pub order_index: usize,
    pub duration_est_min: u32,
    /// Set exactly once, at completion.
    #[serde(default)]
    pub actual_duration_min: Option<u32>,
    pub difficulty: u8,
    pub friction_score: u8,
    pub xp_reward: u32,
    pub success_criteria: String,
    pub next_hint: String,
    #[serde(default)]
    pub status: TaskStatus,
}

impl MicroTask {
    /// Accept a gateway draft into state, assigning id, order and status.
    pub fn from_draft(draft: MicroTaskDraft, macro_task: &MacroTask, order_index: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            macro_task_id: macro_task.id.clone(),
            title: draft.title,
            category: macro_task.category.clone(),
            order_index,
            duration_est_min: draft.duration_est_min.max(1),
            actual_duration_min: None,
            difficulty: draft.difficulty.clamp(1, 5),
            friction_score: draft.friction_score.clamp(1, 5),
            xp_reward: draft.xp_reward,
            success_criteria: draft.success_criteria,
            next_hint: draft.next_hint,
            status: TaskStatus::Todo,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Project back to wire shape, for refinement requests that send the
    /// current list to the service as context.
    pub fn as_draft(&self) -> MicroTaskDraft {
        MicroTaskDraft {
            title: self.title.clone(),
            duration_est_min: self.duration_est_min,
            difficulty: self.difficulty,
            friction_score: self.friction_score,
            xp_reward: self.xp_reward,
            success_criteria: self.success_criteria.clone(),
            next_hint: self.next_hint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> MicroTaskDraft {
        MicroTaskDraft {
            title: "Open the laptop".into(),
            duration_est_min: 5,
            difficulty: 1,
            friction_score: 1,
            xp_reward: 10,
            success_criteria: "Laptop is open".into(),
            next_hint: "Just lift the lid".into(),
        }
    }

    #[test]
    fn done_is_terminal() {
        assert!(TaskStatus::Todo.can_transition_to(&TaskStatus::Done));
        assert!(TaskStatus::Doing.can_transition_to(&TaskStatus::Done));
        assert!(!TaskStatus::Done.can_transition_to(&TaskStatus::Todo));
        assert!(!TaskStatus::Done.can_transition_to(&TaskStatus::Doing));
    }

    #[test]
    fn from_draft_inherits_category_and_clamps() {
        let macro_task = MacroTask::new("Write report", "work", Utc::now());
        let mut d = draft();
        d.difficulty = 9;
        d.duration_est_min = 0;
        let micro = MicroTask::from_draft(d, &macro_task, 3);
        assert_eq!(micro.macro_task_id, macro_task.id);
        assert_eq!(micro.category, "work");
        assert_eq!(micro.order_index, 3);
        assert_eq!(micro.difficulty, 5);
        assert_eq!(micro.duration_est_min, 1);
        assert_eq!(micro.status, TaskStatus::Todo);
    }

    #[test]
    fn draft_wire_format_is_camel_case() {
        let json = serde_json::to_value(draft()).unwrap();
        assert!(json.get("durationEstMin").is_some());
        assert!(json.get("successCriteria").is_some());
        assert!(json.get("frictionScore").is_some());
    }
}
