//! Snapshot export, import and reset.

use std::path::PathBuf;

use clap::Subcommand;
use questline_core::SnapshotStore;

use crate::session::Session;

#[derive(Subcommand)]
pub enum DataAction {
    /// Write the current snapshot to a backup file
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Replace the snapshot with a previously exported file
    Import {
        /// Source file
        path: PathBuf,
    },
    /// Clear all goals and micro-quests (profile and XP are kept)
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Export { path } => {
            let session = Session::open()?;
            let store = SnapshotStore::open_default()?;
            store.export(&session.app.state, &path)?;
            println!("Snapshot exported to {}", path.display());
        }
        DataAction::Import { path } => {
            // Validated before anything is replaced; a bad file leaves the
            // current snapshot as it was.
            let store = SnapshotStore::open_default()?;
            let state = store.import(&path)?;
            println!(
                "Snapshot imported: level {}, {} XP, {} micro-quest(s).",
                state.user.level,
                state.user.total_xp,
                state.micro_tasks.len()
            );
        }
        DataAction::Reset { yes } => {
            if !yes {
                return Err("Refusing to reset without --yes".into());
            }
            let mut session = Session::open()?;
            session.app.full_reset();
            session.save()?;
            println!("Tasks cleared. Profile, XP and garden are untouched.");
        }
    }
    Ok(())
}
