//! Profile, badge and garden commands.

use clap::Subcommand;
use questline_core::{badges, garden::GARDEN_CAPACITY, EnergyMode};

use crate::session::Session;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show level, XP, streak and league
    Show,
    /// Update profile settings
    Set {
        /// New display name
        #[arg(long)]
        nickname: Option<String>,
        /// New avatar (any emoji)
        #[arg(long)]
        avatar: Option<String>,
        /// Energy mode: low or normal
        #[arg(long)]
        energy: Option<String>,
    },
    /// Show the badge catalog with unlock state
    Badges,
    /// Show the garden
    Garden,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        ProfileAction::Show => {
            let user = &session.app.state.user;
            println!("{} {} (level {})", user.avatar, user.nickname, user.level);
            println!(
                "XP: {} total | League: {:?} | Streak: {} day(s) (best {})",
                user.total_xp, user.league_tier, user.streak_count, user.max_streak
            );
            println!(
                "Completed: {} quest(s), {} focus minute(s)",
                user.total_completed_tasks, user.total_focus_minutes
            );
            println!(
                "Inventory: {} streak freeze(s), {} rare seed(s)",
                user.inventory.streak_freeze, user.inventory.rare_seeds
            );
            println!(
                "Pacing: accuracy ratio {:.2}, energy mode {:?}",
                user.recent_accuracy_ratio(),
                user.energy_mode
            );
        }
        ProfileAction::Set {
            nickname,
            avatar,
            energy,
        } => {
            let user = &mut session.app.state.user;
            if let Some(n) = nickname {
                user.nickname = n;
            }
            if let Some(a) = avatar {
                user.avatar = a;
            }
            if let Some(e) = energy {
                user.energy_mode = match e.as_str() {
                    "low" => EnergyMode::Low,
                    "normal" => EnergyMode::Normal,
                    other => return Err(format!("Unknown energy mode: {other}").into()),
                };
            }
            session.save()?;
            println!("Profile updated.");
        }
        ProfileAction::Badges => {
            let unlocked = &session.app.state.user.unlocked_badges;
            for spec in badges::CATALOG {
                let mark = if unlocked.contains(spec.id) { "🎖️" } else { "🔒" };
                println!("  {mark} {} {} - {}", spec.emoji, spec.title, spec.description);
            }
            println!("{}/{} unlocked", unlocked.len(), badges::CATALOG.len());
        }
        ProfileAction::Garden => {
            let garden = &session.app.state.user.garden;
            if garden.is_empty() {
                println!("The garden is empty. Complete quests to grow plants.");
                return Ok(());
            }
            let mut slots: Vec<&str> = vec!["·"; GARDEN_CAPACITY];
            for plant in garden {
                if let Some(slot) = slots.get_mut(plant.position as usize) {
                    *slot = &plant.plant_type;
                }
            }
            for row in slots.chunks(4) {
                println!("  {}", row.join(" "));
            }
            println!("{}/{GARDEN_CAPACITY} slots planted", garden.len());
        }
    }
    Ok(())
}
