//! Daily quest tracker.
//!
//! A small fixed set of per-day objectives. Progress only ever moves up
//! (clamped to the target) and the whole board snaps back to its template
//! on day rollover. Quest `xp_reward` is display metadata; completing a
//! quest does not itself credit XP.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// "Complete one micro-task" quest.
pub const QUEST_COMPLETE_MICRO: &str = "daily_complete_micro";
/// "Gain 100 XP" quest.
pub const QUEST_GAIN_XP: &str = "daily_gain_xp";
/// "Submit one reflection" quest. Its target of 1 doubles as the
/// once-per-day guard on the reflection XP reward.
pub const QUEST_REFLECT: &str = "daily_reflect";

/// One fixed daily objective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyQuest {
    pub id: String,
    pub title: String,
    pub target_value: u32,
    /// Clamped to `target_value`; never decreases except via day reset.
    #[serde(default)]
    pub current_value: u32,
    pub xp_reward: u32,
}

impl DailyQuest {
    /// Derived: the quest is complete once progress reaches the target.
    pub fn completed(&self) -> bool {
        self.current_value >= self.target_value
    }
}

/// The day's quest board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestBoard {
    pub quests: Vec<DailyQuest>,
}

impl Default for QuestBoard {
    fn default() -> Self {
        Self {
            quests: vec![
                DailyQuest {
                    id: QUEST_COMPLETE_MICRO.to_string(),
                    title: "Complete 1 micro-quest".to_string(),
                    target_value: 1,
                    current_value: 0,
                    xp_reward: 50,
                },
                DailyQuest {
                    id: QUEST_GAIN_XP.to_string(),
                    title: "Earn 100 XP".to_string(),
                    target_value: 100,
                    current_value: 0,
                    xp_reward: 75,
                },
                DailyQuest {
                    id: QUEST_REFLECT.to_string(),
                    title: "Write 1 reflection".to_string(),
                    target_value: 1,
                    current_value: 0,
                    xp_reward: 30,
                },
            ],
        }
    }
}

impl QuestBoard {
    pub fn get(&self, quest_id: &str) -> Option<&DailyQuest> {
        self.quests.iter().find(|q| q.id == quest_id)
    }

    /// Add `amount` to a quest's progress, clamped to its target.
    ///
    /// Returns the completion event when this increment crosses the target;
    /// incrementing an already-complete quest is a clamped no-op.
    pub fn increment(
        &mut self,
        quest_id: &str,
        amount: u32,
    ) -> Result<Option<Event>, ValidationError> {
        let quest = self
            .quests
            .iter_mut()
            .find(|q| q.id == quest_id)
            .ok_or_else(|| ValidationError::UnknownQuest(quest_id.to_string()))?;

        let was_complete = quest.completed();
        quest.current_value = quest.target_value.min(quest.current_value + amount);

        if !was_complete && quest.completed() {
            return Ok(Some(Event::DailyQuestCompleted {
                quest_id: quest.id.clone(),
                xp_reward: quest.xp_reward,
            }));
        }
        Ok(None)
    }

    /// Snap every quest back to the template. Called on day rollover.
    pub fn reset(&mut self) {
        *self = QuestBoard::default();
    }
}
