//! Daily quest board commands.

use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand)]
pub enum DailyAction {
    /// Show today's quest board
    List,
}

pub fn run(action: DailyAction) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;

    match action {
        DailyAction::List => {
            println!("Today's quests:");
            for quest in &session.app.state.daily_quests.quests {
                let mark = if quest.completed() { "✅" } else { "◻" };
                println!(
                    "  {mark} {} ({}/{}) worth {} XP",
                    quest.title, quest.current_value, quest.target_value, quest.xp_reward
                );
            }
        }
    }
    Ok(())
}
