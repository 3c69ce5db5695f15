//! Friend list and cheering commands.

use clap::Subcommand;
use questline_core::Friend;
use uuid::Uuid;

use crate::session::{print_events, Session};

#[derive(Subcommand)]
pub enum FriendsAction {
    /// List friends
    List,
    /// Add a friend entry
    Add {
        /// Display name
        nickname: String,
        /// Avatar emoji
        #[arg(long, default_value = "🙂")]
        avatar: String,
    },
    /// Send a friend a cheer (+2 XP for you, once per friend per day)
    Cheer {
        /// Friend ID (unique prefix accepted)
        id: String,
    },
}

pub fn run(action: FriendsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        FriendsAction::List => {
            if session.app.state.friends.is_empty() {
                println!("No friends yet. Try: questline friends add <nickname>");
                return Ok(());
            }
            for friend in &session.app.state.friends {
                let cheer = if friend.cheered_today { "📣" } else { "  " };
                println!(
                    "  {cheer} {} {} (level {}, {}-day streak) [{}]",
                    friend.avatar,
                    friend.nickname,
                    friend.level,
                    friend.streak_count,
                    &friend.id[..8.min(friend.id.len())]
                );
                if let Some(task) = &friend.current_task_title {
                    println!("       working on: {task}");
                }
            }
        }
        FriendsAction::Add { nickname, avatar } => {
            let friend = Friend {
                id: Uuid::new_v4().to_string(),
                nickname,
                level: 1,
                streak_count: 0,
                current_task_title: None,
                avatar,
                cheered_today: false,
            };
            println!("Friend added: {} [{}]", friend.nickname, &friend.id[..8]);
            session.app.state.friends.push(friend);
            session.save()?;
        }
        FriendsAction::Cheer { id } => {
            let friend_id = resolve_friend_id(&session, &id)?;
            let events = session.app.cheer_friend(&friend_id)?;
            session.save()?;
            if let Some(friend) = session.app.state.friends.iter().find(|f| f.id == friend_id) {
                println!("You cheered {} on! +2 XP.", friend.nickname);
            }
            print_events(&events);
        }
    }
    Ok(())
}

fn resolve_friend_id(session: &Session, id: &str) -> Result<String, Box<dyn std::error::Error>> {
    let matches: Vec<&Friend> = session
        .app
        .state
        .friends
        .iter()
        .filter(|f| f.id == id || f.id.starts_with(id) || f.nickname == id)
        .collect();
    match matches.as_slice() {
        [one] => Ok(one.id.clone()),
        [] => Err(format!("No friend matches '{id}'").into()),
        _ => Err(format!("Ambiguous friend id '{id}'").into()),
    }
}
