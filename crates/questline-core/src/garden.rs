//! Garden growth model.
//!
//! Purely cosmetic side-effect of micro-task completion: with a tunable
//! probability a new plant appears in one of 12 slots. Never feeds back
//! into XP, levels or any other subsystem, and the whole garden is
//! replayable from completion history.
//!
//! The RNG is injected so tests can pin outcomes with a seeded generator.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::Event;

/// Maximum number of plants the garden holds.
pub const GARDEN_CAPACITY: usize = 12;

/// Probability that a completion grows a plant. Tunable; the shipped
/// default sits in the 60-70% band.
pub const DEFAULT_GROWTH_PROBABILITY: f64 = 0.65;

/// Fallback palette when a task category has no mapped plant.
const PALETTE: [&str; 7] = ["🌸", "🌿", "🌳", "🌻", "🌵", "🍀", "🌲"];

/// A decorative plant occupying one garden slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenPlant {
    pub id: String,
    /// Visual category (emoji).
    pub plant_type: String,
    /// Category of the completed task that grew this plant, if any.
    #[serde(default)]
    pub category: Option<String>,
    /// Slot index in [0, 12).
    pub position: u8,
    pub grown_at: DateTime<Utc>,
}

/// Plant type keyed off the completed task's category, falling back to a
/// random pick from the palette for unknown categories.
fn plant_type_for_category(category: &str, rng: &mut impl Rng) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "study" => "🌳",
        "work" => "🌲",
        "health" | "exercise" => "🌻",
        "creative" => "🌸",
        "home" => "🌿",
        _ => PALETTE[rng.gen_range(0..PALETTE.len())],
    }
}

/// Roll for growth after a completion.
///
/// Appends one plant at a random unoccupied slot when the roll succeeds and
/// the garden has room. Returns the emitted event, or `None` when nothing
/// grew (failed roll or full garden).
pub fn try_grow(
    garden: &mut Vec<GardenPlant>,
    category: &str,
    probability: f64,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Option<Event> {
    if garden.len() >= GARDEN_CAPACITY {
        return None;
    }
    if rng.gen::<f64>() >= probability {
        return None;
    }

    let occupied: Vec<u8> = garden.iter().map(|p| p.position).collect();
    let free: Vec<u8> = (0..GARDEN_CAPACITY as u8)
        .filter(|slot| !occupied.contains(slot))
        .collect();
    // len < capacity guarantees at least one free slot.
    let position = free[rng.gen_range(0..free.len())];

    let plant_type = plant_type_for_category(category, rng).to_string();
    garden.push(GardenPlant {
        id: Uuid::new_v4().to_string(),
        plant_type: plant_type.clone(),
        category: Some(category.to_string()),
        position,
        grown_at: now,
    });

    Some(Event::PlantGrown {
        plant_type,
        position,
    })
}
