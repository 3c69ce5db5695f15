//! XP shop commands.

use clap::Subcommand;
use questline_core::ShopItem;

use crate::session::{print_events, Session};

#[derive(Subcommand)]
pub enum ShopAction {
    /// Show items and your balance
    List,
    /// Spend XP on an item
    Buy {
        /// Item: streak-freeze or seed-pack
        item: String,
    },
}

fn parse_item(name: &str) -> Result<ShopItem, String> {
    match name {
        "streak-freeze" => Ok(ShopItem::StreakFreeze),
        "seed-pack" => Ok(ShopItem::SeedPack),
        other => Err(format!("Unknown shop item: {other}")),
    }
}

pub fn run(action: ShopAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        ShopAction::List => {
            let user = &session.app.state.user;
            println!("Balance: {} XP", user.total_xp);
            for item in [ShopItem::StreakFreeze, ShopItem::SeedPack] {
                println!("  {} - {} XP", item.display_name(), item.cost());
            }
            println!(
                "Owned: {} streak freeze(s), {} rare seed(s)",
                user.inventory.streak_freeze, user.inventory.rare_seeds
            );
        }
        ShopAction::Buy { item } => {
            let item = parse_item(&item)?;
            let events = session.app.buy_item(item)?;
            session.save()?;
            println!(
                "Bought {}. Balance: {} XP.",
                item.display_name(),
                session.app.state.user.total_xp
            );
            print_events(&events);
        }
    }
    Ok(())
}
