use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "questline", version, about = "Questline CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Goals and micro-quests
    Quest {
        #[command(subcommand)]
        action: commands::quest::QuestAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Daily quest board
    Daily {
        #[command(subcommand)]
        action: commands::daily::DailyAction,
    },
    /// Profile, badges and garden
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// XP shop
    Shop {
        #[command(subcommand)]
        action: commands::shop::ShopAction,
    },
    /// Submit a daily reflection
    Reflect {
        /// Reflection text
        text: String,
    },
    /// Friends and cheering
    Friends {
        #[command(subcommand)]
        action: commands::friends::FriendsAction,
    },
    /// API key management for the decomposition service
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Snapshot export, import and reset
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quest { action } => commands::quest::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Daily { action } => commands::daily::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Shop { action } => commands::shop::run(action),
        Commands::Reflect { text } => commands::reflect::run(&text),
        Commands::Friends { action } => commands::friends::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
